use std::path::Path;

use anyhow::Result;

use crate::config::UserData;
use crate::output;

/// New values for the stored identity. `None` keeps the current value.
#[derive(Debug, Default)]
pub struct IdentityUpdate {
	pub username: Option<String>,
	pub email: Option<String>,
	pub repo_url: Option<String>,
}

impl IdentityUpdate {
	fn is_empty(&self) -> bool {
		self.username.is_none() && self.email.is_none() && self.repo_url.is_none()
	}

	fn apply(self, data: &mut UserData) {
		if let Some(username) = self.username {
			data.username = username.trim().to_owned();
		}
		if let Some(email) = self.email {
			data.email = email.trim().to_owned();
		}
		if let Some(url) = self.repo_url {
			data.repo_url = url.trim().to_owned();
		}
	}
}

pub fn run(data_path: &Path, update: IdentityUpdate) -> Result<()> {
	let data = if update.is_empty() {
		UserData::load(data_path)
	} else {
		let mut data = UserData::read(data_path);
		update.apply(&mut data);
		data.save(data_path)?;
		output::success("Saved identity");
		data
	};

	show(&data, data_path);
	Ok(())
}

pub fn show(data: &UserData, data_path: &Path) {
	output::divider();
	output::heading("GitHub identity");
	output::label_value("Username", or_unset(&data.username));
	output::label_value("Email", or_unset(&data.email));
	output::label_value("Repository URL", or_unset(&data.repo_url));
	output::label_value("Stored in", data_path.display());
	output::divider();
}

fn or_unset(value: &str) -> &str {
	if value.trim().is_empty() {
		"<not set>"
	} else {
		value
	}
}
