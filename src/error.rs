use thiserror::Error;

/// Failures that stop a user action before any git command runs.
#[derive(Error, Debug)]
pub enum AppError {
	/// Git is not installed or not on `PATH`.
	#[error("git is not installed")]
	GitMissing,
	/// A required field was left empty.
	#[error("{0} cannot be empty")]
	MissingField(&'static str),
	/// The chosen folder is over the size limit.
	#[error("folder size {size} exceeds the {limit} limit")]
	FolderTooLarge { size: String, limit: String },
	/// No project folder was chosen.
	#[error("select a project folder first")]
	NoFolderSelected,
	/// The file selection is empty.
	#[error("select at least one file to commit")]
	NoFilesSelected,
	/// Error while walking the project folder.
	#[error("failed to scan folder: {0}")]
	Walk(#[from] walkdir::Error),
	/// Error during file I/O operations
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),
}

impl AppError {
	/// Validation errors are the user's to fix; everything else is environmental.
	pub fn is_validation(&self) -> bool {
		matches!(
			self,
			AppError::MissingField(_)
				| AppError::FolderTooLarge { .. }
				| AppError::NoFolderSelected
				| AppError::NoFilesSelected
		)
	}
}

/// Text shown to the user for an error that ended a command.
///
/// Validation errors are printed as-is; anything else gets an `error:` prefix
/// and its full context chain.
pub fn describe(err: &anyhow::Error) -> String {
	match err.downcast_ref::<AppError>() {
		Some(app) if app.is_validation() => app.to_string(),
		_ => format!("error: {err:#}"),
	}
}
