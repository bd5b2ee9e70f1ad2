use std::cell::{Cell, RefCell};
use std::fs;

use anyhow::anyhow;

use super::*;
use crate::git::{Git, git, inspect, is_installed};

/// Scripted runner that records every call.
struct FakeGit {
	available: bool,
	remotes: String,
	branch: String,
	push: GitOutput,
	spawn_error_on: Option<&'static str>,
	initialized: Cell<bool>,
	calls: RefCell<Vec<String>>,
}

impl Default for FakeGit {
	fn default() -> Self {
		Self {
			available: true,
			remotes: String::new(),
			branch: "master".into(),
			push: GitOutput::ok(""),
			spawn_error_on: None,
			initialized: Cell::new(false),
			calls: RefCell::new(Vec::new()),
		}
	}
}

impl FakeGit {
	fn calls(&self) -> Vec<String> {
		self.calls.borrow().clone()
	}
}

impl GitRunner for FakeGit {
	fn available(&self) -> bool {
		self.available
	}

	fn exec(&self, dir: &Path, args: &[&str]) -> Result<GitOutput> {
		let line = args.join(" ");
		self.calls.borrow_mut().push(line.clone());
		if self.spawn_error_on.is_some_and(|prefix| line.starts_with(prefix)) {
			return Err(anyhow!("failed to execute: git {line}"));
		}
		let in_repository = self.initialized.get() || is_repository(dir);
		Ok(match args {
			["init"] => {
				self.initialized.set(true);
				GitOutput::ok("")
			}
			["config", ..] if !in_repository => GitOutput::failed("fatal: not in a git directory\n"),
			["remote", "-v"] => GitOutput::ok(self.remotes.clone()),
			["branch", "--show-current"] => GitOutput::ok(format!("{}\n", self.branch)),
			["push", ..] => self.push.clone(),
			["commit", ..] => GitOutput::failed("nothing to commit, working tree clean"),
			_ => GitOutput::ok(""),
		})
	}
}

fn identity() -> Identity {
	Identity::new("Octo Cat", "octo@example.com").unwrap()
}

fn remote(url: &str) -> RemoteTarget {
	RemoteTarget::new(url).unwrap()
}

fn request(dir: &Path, files: &[&str]) -> CommitRequest {
	CommitRequest::new(dir, "", files.iter().map(|f| f.to_string()).collect()).unwrap()
}

#[test]
fn blank_message_defaults() {
	let req = CommitRequest::new("/tmp/x", "   ", vec!["a".into()]).unwrap();
	assert_eq!(req.message, DEFAULT_COMMIT_MESSAGE);
	let req = CommitRequest::new("/tmp/x", "fix typo", vec!["a".into()]).unwrap();
	assert_eq!(req.message, "fix typo");
}

#[test]
fn empty_file_list_is_rejected() {
	let err = CommitRequest::new("/tmp/x", "msg", Vec::new()).unwrap_err();
	assert!(matches!(err, AppError::NoFilesSelected));
}

#[test]
fn fresh_directory_runs_every_step_in_order() {
	let dir = tempfile::tempdir().unwrap();
	let runner = FakeGit::default();
	let (identity, remote) = (identity(), remote("https://github.com/octo/demo.git"));

	let outcome = Sequencer::new(&runner, &identity, &remote).run(&request(dir.path(), &["a.txt", "b/c.txt"]));

	assert_eq!(outcome, Outcome::success(SUCCESS_MESSAGE));
	assert_eq!(
		runner.calls(),
		[
			"config user.name Octo Cat",
			"config user.email octo@example.com",
			"init",
			"branch -M main",
			"config user.name Octo Cat",
			"config user.email octo@example.com",
			"add a.txt",
			"add b/c.txt",
			"commit -m Update project",
			"remote -v",
			"remote add origin https://github.com/octo/demo.git",
			"branch --show-current",
			"branch -M main",
			"push -u origin main",
		]
	);
}

#[test]
fn identity_is_written_again_once_the_repository_exists() {
	let dir = tempfile::tempdir().unwrap();
	let runner = FakeGit::default();
	let (identity, remote) = (identity(), remote("https://github.com/octo/demo.git"));

	let outcome = Sequencer::new(&runner, &identity, &remote).run(&request(dir.path(), &["a.txt"]));
	assert!(outcome.success);

	let calls = runner.calls();
	let init = calls.iter().position(|c| c == "init").unwrap();
	let name_after_init = calls[init..].iter().position(|c| c == "config user.name Octo Cat");
	let email_after_init = calls[init..].iter().position(|c| c == "config user.email octo@example.com");
	let commit = calls.iter().position(|c| c.starts_with("commit")).unwrap();
	assert!(name_after_init.is_some_and(|i| init + i < commit));
	assert!(email_after_init.is_some_and(|i| init + i < commit));
}

#[test]
fn existing_repository_sets_identity_once() {
	let dir = tempfile::tempdir().unwrap();
	fs::create_dir(dir.path().join(".git")).unwrap();
	let runner = FakeGit::default();
	let (identity, remote) = (identity(), remote("https://github.com/octo/demo.git"));

	Sequencer::new(&runner, &identity, &remote).run(&request(dir.path(), &["a.txt"]));

	let calls = runner.calls();
	assert_eq!(calls.iter().filter(|c| c.starts_with("config user.name")).count(), 1);
	assert_eq!(calls.iter().filter(|c| c.starts_with("config user.email")).count(), 1);
}

#[test]
fn existing_state_is_left_alone() {
	let dir = tempfile::tempdir().unwrap();
	fs::create_dir(dir.path().join(".git")).unwrap();
	let runner = FakeGit {
		remotes: "origin\thttps://github.com/octo/demo.git (fetch)\n".into(),
		branch: "main".into(),
		..FakeGit::default()
	};
	let (identity, remote) = (identity(), remote("https://github.com/octo/other.git"));

	let outcome = Sequencer::new(&runner, &identity, &remote).run(&request(dir.path(), &["a.txt"]));

	assert!(outcome.success);
	let calls = runner.calls();
	assert!(!calls.iter().any(|c| c == "init"));
	assert!(!calls.iter().any(|c| c.starts_with("remote add")));
	assert!(!calls.iter().any(|c| c == "branch -M main"));
}

#[test]
fn push_failure_returns_stderr_verbatim() {
	let dir = tempfile::tempdir().unwrap();
	let stderr = "fatal: unable to access 'https://github.com/octo/demo.git/': Could not resolve host: github.com\n";
	let runner = FakeGit {
		push: GitOutput::failed(stderr),
		..FakeGit::default()
	};
	let (identity, remote) = (identity(), remote("https://github.com/octo/demo.git"));

	let outcome = Sequencer::new(&runner, &identity, &remote).run(&request(dir.path(), &["a.txt"]));

	assert_eq!(outcome, Outcome::failure(stderr));
}

#[test]
fn missing_git_short_circuits() {
	let dir = tempfile::tempdir().unwrap();
	let runner = FakeGit {
		available: false,
		..FakeGit::default()
	};
	let (identity, remote) = (identity(), remote("https://github.com/octo/demo.git"));

	let outcome = Sequencer::new(&runner, &identity, &remote).run(&request(dir.path(), &["a.txt"]));

	assert!(!outcome.success);
	assert_eq!(outcome.message, "git is not installed");
	assert!(runner.calls().is_empty());
}

#[test]
fn spawn_error_becomes_failure_and_stops() {
	let dir = tempfile::tempdir().unwrap();
	let runner = FakeGit {
		spawn_error_on: Some("add"),
		..FakeGit::default()
	};
	let (identity, remote) = (identity(), remote("https://github.com/octo/demo.git"));

	let outcome = Sequencer::new(&runner, &identity, &remote).run(&request(dir.path(), &["a.txt", "b.txt"]));

	assert!(!outcome.success);
	assert!(outcome.message.contains("git add a.txt"));
	assert_eq!(runner.calls().last().map(String::as_str), Some("add a.txt"));
}

// The tests below drive the real git binary against a local bare repository
// standing in for GitHub. Global and system git config are hidden so the
// host's identity, default branch and hooks cannot leak in.

fn isolated_git() -> Git {
	git()
		.env("GIT_CONFIG_GLOBAL", "/dev/null")
		.env("GIT_CONFIG_NOSYSTEM", "1")
}

/// Real git with host configuration hidden.
struct IsolatedGit;

impl GitRunner for IsolatedGit {
	fn available(&self) -> bool {
		is_installed()
	}

	fn exec(&self, dir: &Path, args: &[&str]) -> Result<GitOutput> {
		isolated_git().cwd(dir).args(args).capture()
	}
}

struct Fixture {
	_tmp: tempfile::TempDir,
	project: PathBuf,
	origin: PathBuf,
}

fn fixture() -> Fixture {
	let tmp = tempfile::tempdir().unwrap();
	let origin = tmp.path().join("origin.git");
	isolated_git().args(["init", "--bare", "-q"]).arg(&origin).run().unwrap();

	let project = tmp.path().join("project");
	fs::create_dir_all(project.join("src")).unwrap();
	fs::write(project.join("README.md"), "# demo\n").unwrap();
	fs::write(project.join("src/main.rs"), "fn main() {}\n").unwrap();
	fs::write(project.join("notes.txt"), "private\n").unwrap();

	Fixture {
		_tmp: tmp,
		project,
		origin,
	}
}

fn committed_files(project: &Path) -> Vec<String> {
	isolated_git()
		.cwd(project)
		.args(["ls-tree", "-r", "--name-only", "HEAD"])
		.stdout()
		.unwrap()
		.lines()
		.map(str::to_owned)
		.collect()
}

#[test]
fn real_run_commits_selected_files_and_pushes_main() {
	let fx = fixture();
	let identity = identity();
	let remote = remote(&fx.origin.to_string_lossy());
	let req = request(&fx.project, &["README.md", "src/main.rs"]);

	let outcome = Sequencer::new(&IsolatedGit, &identity, &remote).run(&req);
	assert!(outcome.success, "{}", outcome.message);

	assert_eq!(committed_files(&fx.project), ["README.md", "src/main.rs"]);

	let state = inspect(&fx.project).unwrap();
	assert_eq!(state.branch.as_deref(), Some("main"));
	assert_eq!(state.user_name.as_deref(), Some("Octo Cat"));
	assert_eq!(state.user_email.as_deref(), Some("octo@example.com"));
	assert!(state.origin_url.unwrap().ends_with("origin.git"));

	let local = isolated_git().cwd(&fx.project).args(["rev-parse", "HEAD"]).stdout().unwrap();
	let pushed = isolated_git()
		.cwd(&fx.origin)
		.args(["rev-parse", "refs/heads/main"])
		.stdout()
		.unwrap();
	assert_eq!(local, pushed);

	let upstream = isolated_git()
		.cwd(&fx.project)
		.args(["rev-parse", "--abbrev-ref", "main@{upstream}"])
		.stdout()
		.unwrap();
	assert_eq!(upstream, "origin/main");
}

#[test]
fn real_rerun_is_idempotent() {
	let fx = fixture();
	let identity = identity();
	let remote = remote(&fx.origin.to_string_lossy());
	let req = request(&fx.project, &["README.md"]);
	let sequencer = Sequencer::new(&IsolatedGit, &identity, &remote);

	assert!(sequencer.run(&req).success);
	let first_head = isolated_git().cwd(&fx.project).args(["rev-parse", "HEAD"]).stdout().unwrap();

	let again = sequencer.run(&req);
	assert!(again.success, "{}", again.message);

	let remotes = isolated_git().cwd(&fx.project).args(["remote"]).stdout().unwrap();
	assert_eq!(remotes, "origin");
	let head = isolated_git().cwd(&fx.project).args(["rev-parse", "HEAD"]).stdout().unwrap();
	assert_eq!(head, first_head);
	let branch = isolated_git()
		.cwd(&fx.project)
		.args(["branch", "--show-current"])
		.stdout()
		.unwrap();
	assert_eq!(branch, "main");
}

#[test]
fn real_push_failure_keeps_commit() {
	let fx = fixture();
	let identity = identity();
	let missing = fx.origin.with_file_name("missing.git");
	let remote = remote(&missing.to_string_lossy());
	let req = request(&fx.project, &["README.md"]);

	let outcome = Sequencer::new(&IsolatedGit, &identity, &remote).run(&req);

	assert!(!outcome.success);
	assert!(!outcome.message.trim().is_empty());
	assert_eq!(committed_files(&fx.project), ["README.md"]);
}
