use std::path::Path;

use anyhow::Result;

use crate::git;
use crate::output;

pub fn run(path: Option<&Path>) -> Result<()> {
	let path = path.unwrap_or_else(|| Path::new("."));
	if !git::is_repository(path) {
		output::warn(&format!("{} is not a git repository yet", path.display()));
		output::note("Run `babygit push` in that folder to create one.");
		return Ok(());
	}

	let state = git::inspect(path)?;
	let show = |value: Option<String>| value.unwrap_or_else(|| "<not set>".to_string());

	output::divider();
	output::heading("Repository status");
	output::label_value("Folder", path.display());
	output::label_value("Branch", show(state.branch));
	output::label_value("Origin", show(state.origin_url));
	output::label_value("user.name", show(state.user_name));
	output::label_value("user.email", show(state.user_email));
	output::divider();
	Ok(())
}
