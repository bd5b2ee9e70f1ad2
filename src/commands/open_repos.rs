use std::path::Path;

use anyhow::Result;

use crate::browser;
use crate::config::UserData;
use crate::output;

pub fn run(data_path: &Path, username: Option<&str>) -> Result<()> {
	let stored;
	let username = match username {
		Some(name) => name,
		None => {
			stored = UserData::load(data_path).username;
			stored.as_str()
		}
	};

	let url = browser::repositories_url(username);
	open_or_print(&url);

	output::bullet_list([
		"Press 'New' on the page that opened to create a repository.".to_string(),
		"Copy the new repository's URL.".to_string(),
		"Save it with `babygit identity --repo-url <URL>`.".to_string(),
	]);
	Ok(())
}

/// Open `url`, falling back to printing it.
pub fn open_or_print(url: &str) {
	if let Err(err) = browser::open_url(url) {
		output::warn(&format!("Could not open a browser: {err:#}"));
	}
	output::label_value("URL", url);
}
