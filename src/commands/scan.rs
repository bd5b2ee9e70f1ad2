use std::path::Path;

use anyhow::Result;

use crate::output;
use crate::scanner::{FolderScan, MAX_FOLDER_BYTES, format_size};

pub fn run(path: Option<&Path>) -> Result<()> {
	let path = path.unwrap_or_else(|| Path::new("."));
	let scan = FolderScan::scan(path)?;

	output::divider();
	output::heading(&format!("Files in {}", scan.display_name()));
	output::bullet_list(
		scan.files
			.iter()
			.map(|file| format!("{}  ({})", file.relative_path, format_size(file.size))),
	);
	output::divider();
	output::label_value("Files", scan.files.len());
	output::label_value(
		"Total size",
		format!(
			"{} of {} allowed",
			format_size(scan.total_bytes),
			format_size(MAX_FOLDER_BYTES)
		),
	);
	Ok(())
}
