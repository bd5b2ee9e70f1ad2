use std::time::Duration;

use anyhow::Result;

use crate::browser::DOWNLOAD_URL;
use crate::commands::open_repos::open_or_print;
use crate::error::AppError;
use crate::installer::{self, InstallPlan};
use crate::sequencer::Outcome;
use crate::{git, output, worker};

pub fn run(auto_yes: bool) -> Result<()> {
	if git::is_installed() {
		output::success("Git is already installed");
		return Ok(());
	}

	let outcome = install_in_background()?;
	if outcome.success {
		output::success(&outcome.message);
		return Ok(());
	}

	output::error(&outcome.message);
	offer_download_page(auto_yes)?;
	Err(AppError::GitMissing.into())
}

/// Make sure git can be used, offering to install it when it is missing.
pub fn ensure_git(auto_yes: bool) -> Result<()> {
	if git::is_installed() {
		return Ok(());
	}

	output::warn("Git is not installed on this computer.");
	if InstallPlan::current().is_automatic()
		&& output::confirm("Install git automatically?", true, auto_yes)?
	{
		let outcome = install_in_background()?;
		if outcome.success {
			output::success(&outcome.message);
			if git::is_installed() {
				return Ok(());
			}
			output::note("Open a new terminal so the freshly installed git is found, then run babygit again.");
			return Err(AppError::GitMissing.into());
		}
		output::error(&outcome.message);
	}

	offer_download_page(auto_yes)?;
	Err(AppError::GitMissing.into())
}

fn install_in_background() -> Result<Outcome> {
	output::note("Installing git, this can take a few minutes");
	let task = worker::spawn("git-install", installer::install_git)?;
	let outcome = task.wait_with(Duration::from_millis(500), output::tick);
	eprintln!();
	Ok(outcome)
}

fn offer_download_page(auto_yes: bool) -> Result<()> {
	if output::confirm("Open the git download page?", true, auto_yes)? {
		open_or_print(DOWNLOAD_URL);
	} else {
		output::note(&format!("Download git from {DOWNLOAD_URL}"));
	}
	Ok(())
}
