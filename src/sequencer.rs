//! The commit-and-push sequence.
//!
//! A run is a fixed list of [`Step`]s executed in order against one project
//! directory. Most steps tolerate failure; only the push decides whether the
//! run succeeded. Nothing is rolled back, so every step that creates state
//! first checks whether that state already exists, which keeps repeated runs
//! idempotent.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::{Identity, RemoteTarget};
use crate::error::AppError;
use crate::git::{GitOutput, GitRunner, is_repository};

/// Commit message used when the user leaves it blank.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update project";
/// Message reported when the push succeeds.
pub const SUCCESS_MESSAGE: &str = "Files were uploaded to the repository successfully!";
/// Branch every run ends up on.
pub const MAIN_BRANCH: &str = "main";
/// Remote name registered for the target URL.
pub const REMOTE_NAME: &str = "origin";

/// What to commit and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
	pub project_path: PathBuf,
	pub message: String,
	pub files: Vec<String>,
}

impl CommitRequest {
	pub fn new(
		project_path: impl Into<PathBuf>,
		message: &str,
		files: Vec<String>,
	) -> Result<Self, AppError> {
		if files.is_empty() {
			return Err(AppError::NoFilesSelected);
		}
		let message = if message.trim().is_empty() {
			DEFAULT_COMMIT_MESSAGE.to_owned()
		} else {
			message.to_owned()
		};
		Ok(Self {
			project_path: project_path.into(),
			message,
			files,
		})
	}
}

/// Terminal result of a run, reported exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
	pub success: bool,
	pub message: String,
}

impl Outcome {
	pub fn success(message: impl Into<String>) -> Self {
		Self {
			success: true,
			message: message.into(),
		}
	}

	pub fn failure(message: impl Into<String>) -> Self {
		Self {
			success: false,
			message: message.into(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	ConfigureIdentity,
	InitRepository,
	StageFiles,
	Commit,
	EnsureRemote,
	EnsureMainBranch,
	Push,
}

impl Step {
	pub const ALL: [Step; 7] = [
		Step::ConfigureIdentity,
		Step::InitRepository,
		Step::StageFiles,
		Step::Commit,
		Step::EnsureRemote,
		Step::EnsureMainBranch,
		Step::Push,
	];

	pub fn label(self) -> &'static str {
		match self {
			Step::ConfigureIdentity => "configure identity",
			Step::InitRepository => "initialize repository",
			Step::StageFiles => "stage files",
			Step::Commit => "commit",
			Step::EnsureRemote => "ensure remote",
			Step::EnsureMainBranch => "ensure main branch",
			Step::Push => "push",
		}
	}
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Runs the step list through a [`GitRunner`].
pub struct Sequencer<'a, R: GitRunner> {
	runner: &'a R,
	identity: &'a Identity,
	remote: &'a RemoteTarget,
}

impl<'a, R: GitRunner> Sequencer<'a, R> {
	pub fn new(runner: &'a R, identity: &'a Identity, remote: &'a RemoteTarget) -> Self {
		Self {
			runner,
			identity,
			remote,
		}
	}

	/// Run every step for `request` and report the outcome.
	///
	/// Never returns an error: anything unexpected becomes a failed
	/// [`Outcome`] carrying the error's description.
	pub fn run(&self, request: &CommitRequest) -> Outcome {
		if !self.runner.available() {
			return Outcome::failure(AppError::GitMissing.to_string());
		}
		info!(
			path = %request.project_path.display(),
			files = request.files.len(),
			"starting commit and push"
		);
		match self.run_steps(request) {
			Ok(outcome) => outcome,
			Err(err) => {
				warn!(error = %err, "sequence aborted");
				Outcome::failure(format!("{err:#}"))
			}
		}
	}

	fn run_steps(&self, request: &CommitRequest) -> Result<Outcome> {
		let dir = request.project_path.as_path();
		let mut push = None;
		for step in Step::ALL {
			debug!(%step, "running step");
			match step {
				Step::ConfigureIdentity => self.configure_identity(dir)?,
				Step::InitRepository => self.init_repository(dir)?,
				Step::StageFiles => self.stage_files(dir, &request.files)?,
				Step::Commit => self.commit(dir, &request.message)?,
				Step::EnsureRemote => self.ensure_remote(dir)?,
				Step::EnsureMainBranch => self.ensure_main_branch(dir)?,
				Step::Push => push = Some(self.push(dir)?),
			}
		}
		let push = push.unwrap_or_else(|| GitOutput::failed("push did not run"));
		if push.success {
			info!("push succeeded");
			Ok(Outcome::success(SUCCESS_MESSAGE))
		} else {
			warn!(stderr = %push.stderr.trim(), "push failed");
			Ok(Outcome::failure(push.stderr))
		}
	}

	fn configure_identity(&self, dir: &Path) -> Result<()> {
		self.tolerate(
			Step::ConfigureIdentity,
			dir,
			&["config", "user.name", &self.identity.username],
		)?;
		self.tolerate(
			Step::ConfigureIdentity,
			dir,
			&["config", "user.email", &self.identity.email],
		)
	}

	fn init_repository(&self, dir: &Path) -> Result<()> {
		if is_repository(dir) {
			debug!("repository already initialized");
			return Ok(());
		}
		self.tolerate(Step::InitRepository, dir, &["init"])?;
		self.tolerate(Step::InitRepository, dir, &["branch", "-M", MAIN_BRANCH])?;
		// `git config` outside a repository fails, so the identity set in the
		// previous step never landed.
		self.configure_identity(dir)
	}

	fn stage_files(&self, dir: &Path, files: &[String]) -> Result<()> {
		for file in files {
			self.tolerate(Step::StageFiles, dir, &["add", file])?;
		}
		Ok(())
	}

	fn commit(&self, dir: &Path, message: &str) -> Result<()> {
		let out = self.runner.exec(dir, &["commit", "-m", message])?;
		if !out.success {
			// Push decides the outcome; an empty commit is not an error by itself.
			let detail = if out.stderr.trim().is_empty() {
				out.stdout.trim()
			} else {
				out.stderr.trim()
			};
			warn!(detail, "commit did not create a new commit");
		}
		Ok(())
	}

	fn ensure_remote(&self, dir: &Path) -> Result<()> {
		let remotes = self.runner.exec(dir, &["remote", "-v"])?;
		if !remotes.stdout.trim().is_empty() {
			debug!("remote already configured");
			return Ok(());
		}
		self.tolerate(
			Step::EnsureRemote,
			dir,
			&["remote", "add", REMOTE_NAME, &self.remote.url],
		)
	}

	fn ensure_main_branch(&self, dir: &Path) -> Result<()> {
		let current = self.runner.exec(dir, &["branch", "--show-current"])?;
		if current.stdout.trim() == MAIN_BRANCH {
			return Ok(());
		}
		self.tolerate(Step::EnsureMainBranch, dir, &["branch", "-M", MAIN_BRANCH])
	}

	fn push(&self, dir: &Path) -> Result<GitOutput> {
		self.runner.exec(dir, &["push", "-u", REMOTE_NAME, MAIN_BRANCH])
	}

	/// Run a best-effort command: a non-zero exit is logged and ignored.
	fn tolerate(&self, step: Step, dir: &Path, args: &[&str]) -> Result<()> {
		let out = self.runner.exec(dir, args)?;
		if !out.success {
			warn!(%step, command = %args.join(" "), stderr = %out.stderr.trim(), "git command failed, continuing");
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
