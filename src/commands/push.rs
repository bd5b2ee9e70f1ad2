use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::commands::install::ensure_git;
use crate::config::UserData;
use crate::error::AppError;
use crate::git::SystemGit;
use crate::scanner::{FileSelection, FolderScan, format_size};
use crate::sequencer::{CommitRequest, DEFAULT_COMMIT_MESSAGE, Sequencer};
use crate::{output, worker};

/// Number of files listed in the summary before eliding the rest.
const SUMMARY_FILES: usize = 10;

#[derive(Debug, Default)]
pub struct PushOptions {
	pub path: Option<PathBuf>,
	pub message: Option<String>,
	pub files: Vec<String>,
	pub all: bool,
	pub yes: bool,
	pub theme: Option<String>,
}

pub fn run(data_path: &Path, options: PushOptions) -> Result<()> {
	ensure_git(options.yes)?;

	let mut data = UserData::load(data_path);
	complete_user_data(&mut data, options.yes)?;
	let identity = data.identity()?;
	let remote = data.remote()?;
	data.save_quietly(data_path);

	let folder = choose_folder(options.path.as_deref(), options.yes)?;
	let scan = FolderScan::scan(&folder)?;
	output::label_value(
		"Folder",
		format!(
			"{} ({} files, {})",
			scan.display_name(),
			scan.files.len(),
			format_size(scan.total_bytes)
		),
	);

	let Some(selected) = choose_files(&scan, &options)? else {
		anyhow::bail!("aborted by user");
	};

	let message = match options.message.as_deref() {
		Some(message) => message.to_owned(),
		None if options.yes => String::new(),
		None => output::prompt("Commit message", "")?,
	};
	let request = CommitRequest::new(scan.root.clone(), &message, selected)?;

	output::divider();
	output::heading("Commit and push summary");
	output::label_value("Identity", format!("{} <{}>", identity.username, identity.email));
	output::label_value("Remote", &remote.url);
	output::label_value("Folder", request.project_path.display());
	output::label_value("Message", &request.message);
	output::label_value("Files", request.files.len());
	output::bullet_list(request.files.iter().take(SUMMARY_FILES).cloned());
	if request.files.len() > SUMMARY_FILES {
		output::note(&format!("  … and {} more", request.files.len() - SUMMARY_FILES));
	}
	output::divider();

	if !output::confirm("Commit and push these files?", true, options.yes)? {
		anyhow::bail!("aborted by user");
	}

	info!(files = request.files.len(), "handing off to git worker");
	eprint!("Pushing");
	let task = worker::spawn("git-push", move || {
		Sequencer::new(&SystemGit, &identity, &remote).run(&request)
	})?;
	let outcome = task.wait_with(Duration::from_millis(500), output::tick);
	eprintln!();

	if outcome.success {
		output::success(&outcome.message);
		return Ok(());
	}
	output::error("Push failed:");
	eprintln!("{}", outcome.message.trim_end());
	anyhow::bail!("commit and push did not complete")
}

/// Prompt for whatever identity fields are still empty.
fn complete_user_data(data: &mut UserData, auto_yes: bool) -> Result<()> {
	if data.is_complete() || auto_yes {
		return Ok(());
	}
	output::heading("Enter your GitHub details");
	output::note("Create the repository first with `babygit open-repos` if you have not yet.");
	data.username = output::prompt("Username", &data.username)?;
	data.email = output::prompt("Email", &data.email)?;
	data.repo_url = output::prompt("Repository URL", &data.repo_url)?;
	Ok(())
}

fn choose_folder(path: Option<&Path>, auto_yes: bool) -> Result<PathBuf> {
	if let Some(path) = path {
		return Ok(path.to_path_buf());
	}
	let cwd = std::env::current_dir().context("failed to read current directory")?;
	if auto_yes {
		return Ok(cwd);
	}
	let answer = output::prompt("Project folder", &cwd.display().to_string())?;
	if answer.trim().is_empty() {
		return Err(AppError::NoFolderSelected.into());
	}
	Ok(PathBuf::from(answer))
}

/// Pick the files to commit. `None` means the user cancelled.
fn choose_files(scan: &FolderScan, options: &PushOptions) -> Result<Option<Vec<String>>> {
	let mut selection = FileSelection::new(scan);

	if !options.files.is_empty() {
		let unknown = selection.select_only(options.files.iter().map(String::as_str));
		if !unknown.is_empty() {
			anyhow::bail!("not found in {}: {}", scan.display_name(), unknown.join(", "));
		}
		return Ok(Some(selection.selected()));
	}
	if options.all || options.yes {
		return Ok(Some(selection.selected()));
	}

	let rows = scan
		.files
		.iter()
		.map(|file| file_picker::FileRow::new(file.relative_path.clone(), format_size(file.size)))
		.collect();
	let mut picker = file_picker::Picker::new(rows)
		.with_title("Choose files to commit")
		.with_context(format!(
			"{}  •  default message \"{DEFAULT_COMMIT_MESSAGE}\"",
			scan.display_name()
		));
	if let Some(theme) = options.theme.as_deref() {
		picker = picker.with_theme_name(theme);
	}
	let outcome = picker.run()?;
	if !outcome.is_accepted() {
		return Ok(None);
	}
	selection.select_only(outcome.selected().iter().map(String::as_str));
	Ok(Some(selection.selected()))
}
