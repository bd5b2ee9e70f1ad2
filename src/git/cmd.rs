//! Git command execution.
//!
//! Every git operation babygit performs goes through the system `git`
//! binary. This module provides the builder used to assemble those calls and
//! the [`GitRunner`] seam the sequencer executes through.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result};
use tracing::trace;

/// Builder for git commands run inside a working directory.
#[derive(Debug, Default)]
pub struct Git {
	cwd: Option<PathBuf>,
	args: Vec<String>,
	envs: Vec<(String, String)>,
}

impl Git {
	/// Set the current working directory for the command.
	pub fn cwd(mut self, path: &Path) -> Self {
		self.cwd = Some(path.to_path_buf());
		self
	}

	/// Add multiple arguments.
	pub fn args<I, S>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<OsStr>,
	{
		self.args.extend(
			args.into_iter()
				.map(|s| s.as_ref().to_string_lossy().into_owned()),
		);
		self
	}

	/// Add a single argument.
	pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
		self.args.push(arg.as_ref().to_string_lossy().into_owned());
		self
	}

	/// Set an environment variable for the command.
	pub fn env(mut self, key: &str, value: &str) -> Self {
		self.envs.push((key.to_owned(), value.to_owned()));
		self
	}

	/// Execute and return raw output.
	pub fn output(self) -> Result<Output> {
		let mut cmd = Command::new("git");
		if let Some(ref cwd) = self.cwd {
			cmd.current_dir(cwd);
		}
		cmd.args(&self.args);
		cmd.envs(self.envs.iter().map(|(key, value)| (key, value)));
		trace!(args = %self.args.join(" "), "spawning git");
		cmd.output()
			.with_context(|| format!("failed to execute: git {}", self.args.join(" ")))
	}

	/// Execute and capture exit status and both streams as text.
	pub fn capture(self) -> Result<GitOutput> {
		let out = self.output()?;
		Ok(GitOutput {
			success: out.status.success(),
			stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
			stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
		})
	}

	/// Execute and require success.
	pub fn run(self) -> Result<()> {
		let desc = self.args.join(" ");
		let out = self.output()?;
		if !out.status.success() {
			let stderr = String::from_utf8_lossy(&out.stderr);
			anyhow::bail!("git {} failed: {}", desc, stderr.trim());
		}
		Ok(())
	}

	/// Execute and return stdout as trimmed string.
	pub fn stdout(self) -> Result<String> {
		let desc = self.args.join(" ");
		let out = self.output()?;
		if !out.status.success() {
			let stderr = String::from_utf8_lossy(&out.stderr);
			anyhow::bail!("git {} failed: {}", desc, stderr.trim());
		}
		Ok(String::from_utf8(out.stdout)?.trim().to_string())
	}

	/// Execute and return success status (for existence checks).
	pub fn ok(self) -> Result<bool> {
		Ok(self.output()?.status.success())
	}
}

/// Create a new git command builder.
pub fn git() -> Git {
	Git::default()
}

/// Captured result of a finished git process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
	pub success: bool,
	pub stdout: String,
	pub stderr: String,
}

impl GitOutput {
	/// Successful output carrying `stdout`.
	pub fn ok(stdout: impl Into<String>) -> Self {
		Self {
			success: true,
			stdout: stdout.into(),
			stderr: String::new(),
		}
	}

	/// Failed output carrying `stderr`.
	pub fn failed(stderr: impl Into<String>) -> Self {
		Self {
			success: false,
			stdout: String::new(),
			stderr: stderr.into(),
		}
	}
}

/// Executes git subcommands on behalf of the sequencer.
pub trait GitRunner {
	/// Whether a usable git binary exists.
	fn available(&self) -> bool;

	/// Run `git <args>` inside `dir` and capture the result.
	///
	/// A non-zero exit is reported through [`GitOutput::success`]; `Err` is
	/// reserved for failures to run git at all.
	fn exec(&self, dir: &Path, args: &[&str]) -> Result<GitOutput>;
}

/// Runner backed by the `git` found on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

impl GitRunner for SystemGit {
	fn available(&self) -> bool {
		is_installed()
	}

	fn exec(&self, dir: &Path, args: &[&str]) -> Result<GitOutput> {
		git().cwd(dir).args(args).capture()
	}
}

/// Check that `git` is on `PATH` and answers `git --version`.
pub fn is_installed() -> bool {
	if which::which("git").is_err() {
		return false;
	}
	git().arg("--version").ok().unwrap_or(false)
}
