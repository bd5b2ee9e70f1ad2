//! Installing git for users who do not have it yet.

use std::process::Command;

use tracing::{info, warn};

use crate::browser::DOWNLOAD_URL;
use crate::sequencer::Outcome;

/// How git can be installed on the current platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallPlan {
	/// Run a package manager command.
	PackageManager { program: &'static str, args: &'static [&'static str] },
	/// Only a manual download is possible.
	Manual,
}

impl InstallPlan {
	pub fn for_os(os: &str) -> Self {
		match os {
			"windows" => InstallPlan::PackageManager {
				program: "winget",
				args: &["install", "--id", "Git.Git", "-e", "--source", "winget"],
			},
			_ => InstallPlan::Manual,
		}
	}

	pub fn current() -> Self {
		Self::for_os(std::env::consts::OS)
	}

	pub fn is_automatic(&self) -> bool {
		matches!(self, InstallPlan::PackageManager { .. })
	}
}

/// Try to install git once. Never retries.
pub fn install_git() -> Outcome {
	run_plan(&InstallPlan::current())
}

pub fn run_plan(plan: &InstallPlan) -> Outcome {
	let (program, args) = match plan {
		InstallPlan::PackageManager { program, args } => (*program, *args),
		InstallPlan::Manual => {
			return Outcome::failure(
				"Automatic git installation is only supported on Windows. Please install git manually.",
			);
		}
	};

	info!(program, "installing git");
	match Command::new(program).args(args).output() {
		Ok(out) if out.status.success() => Outcome::success("Git installed successfully!"),
		Ok(out) => {
			warn!(
				status = %out.status,
				stderr = %String::from_utf8_lossy(&out.stderr).trim(),
				"git installation failed"
			);
			Outcome::failure(format!(
				"Could not install git automatically. Please install git manually from {DOWNLOAD_URL}"
			))
		}
		Err(err) => Outcome::failure(format!("Error while installing git: {err}")),
	}
}
