//! Project folder scanning and file selection.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::AppError;

/// Largest folder babygit will upload: 100 MiB.
pub const MAX_FOLDER_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
	/// Path relative to the scan root, `/`-separated.
	pub relative_path: String,
	pub size: u64,
}

#[derive(Debug, Clone)]
pub struct FolderScan {
	pub root: PathBuf,
	pub total_bytes: u64,
	pub files: Vec<ScannedFile>,
}

impl FolderScan {
	/// Scan with the default size limit.
	pub fn scan(root: &Path) -> Result<Self, AppError> {
		Self::scan_with_limit(root, MAX_FOLDER_BYTES)
	}

	/// Walk every file under `root`, rejecting the folder if it is larger
	/// than `limit` bytes. Files in the root's own `.git` directory count
	/// toward the limit but are not listed.
	pub fn scan_with_limit(root: &Path, limit: u64) -> Result<Self, AppError> {
		if !root.is_dir() {
			return Err(AppError::NoFolderSelected);
		}
		let root = dunce::canonicalize(root)?;

		let mut files = Vec::new();
		let mut total_bytes: u64 = 0;
		for entry in WalkDir::new(&root) {
			let entry = entry?;
			if !entry.file_type().is_file() {
				continue;
			}
			let size = entry.metadata()?.len();
			total_bytes += size;

			let relative = pathdiff::diff_paths(entry.path(), &root)
				.unwrap_or_else(|| entry.path().to_path_buf());
			if relative.starts_with(".git") {
				continue;
			}
			files.push(ScannedFile {
				relative_path: relative.to_string_lossy().replace('\\', "/"),
				size,
			});
		}

		if total_bytes > limit {
			return Err(AppError::FolderTooLarge {
				size: format_size(total_bytes),
				limit: format_size(limit),
			});
		}

		files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
		debug!(root = %root.display(), files = files.len(), total_bytes, "scanned folder");

		Ok(Self {
			root,
			total_bytes,
			files,
		})
	}

	/// Folder name shown to the user.
	pub fn display_name(&self) -> String {
		self.root
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| self.root.display().to_string())
	}
}

/// Per-file toggles over a scan. Everything starts selected.
#[derive(Debug, Clone)]
pub struct FileSelection {
	entries: Vec<(String, bool)>,
}

impl FileSelection {
	pub fn new(scan: &FolderScan) -> Self {
		Self {
			entries: scan
				.files
				.iter()
				.map(|file| (file.relative_path.clone(), true))
				.collect(),
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn is_selected(&self, path: &str) -> bool {
		self.entries
			.iter()
			.any(|(entry, selected)| entry == path && *selected)
	}

	/// Flip one file. Returns the new state, or `None` for unknown paths.
	pub fn toggle(&mut self, path: &str) -> Option<bool> {
		let (_, selected) = self.entries.iter_mut().find(|(entry, _)| entry == path)?;
		*selected = !*selected;
		Some(*selected)
	}

	/// Keep exactly `paths` selected. Unknown paths are returned.
	pub fn select_only<'a>(&mut self, paths: impl IntoIterator<Item = &'a str>) -> Vec<String> {
		self.clear();
		let mut unknown = Vec::new();
		for path in paths {
			let normalized = path.trim_start_matches("./").replace('\\', "/");
			match self.entries.iter_mut().find(|(entry, _)| *entry == normalized) {
				Some((_, selected)) => *selected = true,
				None => unknown.push(path.to_owned()),
			}
		}
		unknown
	}

	pub fn select_all(&mut self) {
		self.entries.iter_mut().for_each(|(_, selected)| *selected = true);
	}

	pub fn clear(&mut self) {
		self.entries.iter_mut().for_each(|(_, selected)| *selected = false);
	}

	/// Selected paths in scan order.
	pub fn selected(&self) -> Vec<String> {
		self.entries
			.iter()
			.filter(|(_, selected)| *selected)
			.map(|(path, _)| path.clone())
			.collect()
	}

	pub fn entries(&self) -> impl Iterator<Item = (&str, bool)> {
		self.entries
			.iter()
			.map(|(path, selected)| (path.as_str(), *selected))
	}
}

/// Human readable byte count.
pub fn format_size(bytes: u64) -> String {
	const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
	let mut value = bytes as f64;
	let mut unit = 0;
	while value >= 1024.0 && unit < UNITS.len() - 1 {
		value /= 1024.0;
		unit += 1;
	}
	if unit == 0 {
		format!("{bytes} B")
	} else {
		format!("{value:.1} {}", UNITS[unit])
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;

	fn project() -> tempfile::TempDir {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("README.md"), "hello").unwrap();
		fs::create_dir_all(dir.path().join("src/nested")).unwrap();
		fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
		fs::write(dir.path().join("src/nested/lib.rs"), "").unwrap();
		dir
	}

	#[test]
	fn lists_relative_paths_and_total_size() {
		let dir = project();
		let scan = FolderScan::scan(dir.path()).unwrap();
		let paths: Vec<&str> = scan.files.iter().map(|f| f.relative_path.as_str()).collect();
		assert_eq!(paths, ["README.md", "src/main.rs", "src/nested/lib.rs"]);
		assert_eq!(scan.total_bytes, 5 + 12);
	}

	#[test]
	fn skips_git_directory() {
		let dir = project();
		fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
		fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
		fs::write(dir.path().join(".gitignore"), "target\n").unwrap();

		let scan = FolderScan::scan(dir.path()).unwrap();
		assert!(scan.files.iter().all(|f| !f.relative_path.starts_with(".git/")));
		assert!(scan.files.iter().any(|f| f.relative_path == ".gitignore"));
	}

	#[test]
	fn git_directory_counts_toward_limit() {
		let dir = project();
		fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
		fs::write(dir.path().join(".git/objects/pack"), vec![0u8; 100]).unwrap();

		let scan = FolderScan::scan(dir.path()).unwrap();
		assert_eq!(scan.total_bytes, 5 + 12 + 100);
		assert_eq!(scan.files.len(), 3);

		let err = FolderScan::scan_with_limit(dir.path(), 50).unwrap_err();
		assert!(matches!(err, AppError::FolderTooLarge { .. }));
	}

	#[test]
	fn rejects_oversized_folder() {
		let dir = project();
		fs::write(dir.path().join("blob.bin"), vec![0u8; 64]).unwrap();
		let err = FolderScan::scan_with_limit(dir.path(), 64).unwrap_err();
		assert!(matches!(err, AppError::FolderTooLarge { .. }));
	}

	#[test]
	fn exactly_at_limit_is_accepted() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("a"), vec![0u8; 10]).unwrap();
		assert!(FolderScan::scan_with_limit(dir.path(), 10).is_ok());
	}

	#[test]
	fn missing_folder_is_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let err = FolderScan::scan(&dir.path().join("nope")).unwrap_err();
		assert!(matches!(err, AppError::NoFolderSelected));
	}

	#[test]
	fn selection_defaults_to_everything() {
		let dir = project();
		let scan = FolderScan::scan(dir.path()).unwrap();
		let mut selection = FileSelection::new(&scan);
		assert_eq!(selection.selected().len(), 3);

		assert_eq!(selection.toggle("src/main.rs"), Some(false));
		assert_eq!(selection.selected(), ["README.md", "src/nested/lib.rs"]);

		selection.clear();
		assert!(selection.selected().is_empty());
		selection.select_all();
		assert_eq!(selection.selected().len(), 3);
	}

	#[test]
	fn select_only_reports_unknown_paths() {
		let dir = project();
		let scan = FolderScan::scan(dir.path()).unwrap();
		let mut selection = FileSelection::new(&scan);
		let unknown = selection.select_only(["./src/main.rs", "missing.txt"]);
		assert_eq!(unknown, ["missing.txt"]);
		assert_eq!(selection.selected(), ["src/main.rs"]);
	}

	#[test]
	fn formats_sizes() {
		assert_eq!(format_size(512), "512 B");
		assert_eq!(format_size(MAX_FOLDER_BYTES), "100.0 MiB");
	}
}
