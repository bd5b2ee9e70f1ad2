use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AppError;

/// File name of the persisted user data.
pub const USER_DATA_FILE: &str = "user_data.json";
/// Environment variable overriding the user data location.
pub const DATA_FILE_ENV: &str = "BABYGIT_DATA_FILE";

/// What babygit remembers between launches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserData {
	pub username: String,
	pub email: String,
	pub repo_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct Overrides {
	pub username: Option<String>,
	pub email: Option<String>,
	pub repo_url: Option<String>,
}

impl UserData {
	/// Load user data from `path`, applying environment overrides.
	///
	/// A missing or broken file is not an error: every field falls back to an
	/// empty string.
	pub fn load(path: &Path) -> Self {
		let mut data = Self::read(path);
		apply_overrides(&mut data, &load_env_overrides());
		data
	}

	/// Load user data from `path` exactly as stored.
	pub fn read(path: &Path) -> Self {
		match try_read(path) {
			Ok(Some(data)) => data,
			Ok(None) => {
				debug!(path = %path.display(), "no user data file, starting empty");
				Self::default()
			}
			Err(err) => {
				debug!(path = %path.display(), error = %err, "ignoring unreadable user data");
				Self::default()
			}
		}
	}

	/// Write user data as pretty-printed UTF-8 JSON.
	pub fn save(&self, path: &Path) -> Result<()> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent)
				.with_context(|| format!("failed to create {}", parent.display()))?;
		}
		let json = serde_json::to_string_pretty(self)?;
		fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
		Ok(())
	}

	/// Persist, logging rather than surfacing failures.
	pub fn save_quietly(&self, path: &Path) {
		if let Err(err) = self.save(path) {
			warn!(path = %path.display(), error = %err, "could not save user data");
		}
	}

	/// Whether identity and remote are all filled in.
	pub fn is_complete(&self) -> bool {
		!self.username.trim().is_empty()
			&& !self.email.trim().is_empty()
			&& !self.repo_url.trim().is_empty()
	}

	pub fn identity(&self) -> Result<Identity, AppError> {
		Identity::new(&self.username, &self.email)
	}

	pub fn remote(&self) -> Result<RemoteTarget, AppError> {
		RemoteTarget::new(&self.repo_url)
	}
}

/// Resolve where user data lives.
///
/// Precedence: explicit path, `BABYGIT_DATA_FILE`, the platform config
/// directory, then the current directory.
pub fn data_file_path(explicit: Option<&Path>) -> PathBuf {
	if let Some(path) = explicit {
		return path.to_path_buf();
	}
	if let Some(path) = std::env::var_os(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
		return PathBuf::from(path);
	}
	match dirs::config_dir() {
		Some(dir) => dir.join("babygit").join(USER_DATA_FILE),
		None => PathBuf::from(USER_DATA_FILE),
	}
}

/// Committer name and email written to the repository's local config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
	pub username: String,
	pub email: String,
}

impl Identity {
	pub fn new(username: &str, email: &str) -> Result<Self, AppError> {
		Ok(Self {
			username: required("username", username)?,
			email: required("email", email)?,
		})
	}
}

/// URL registered as `origin` when the repository has no remote yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
	pub url: String,
}

impl RemoteTarget {
	pub fn new(url: &str) -> Result<Self, AppError> {
		Ok(Self {
			url: required("repository URL", url)?,
		})
	}
}

fn required(field: &'static str, value: &str) -> Result<String, AppError> {
	let value = value.trim();
	if value.is_empty() {
		return Err(AppError::MissingField(field));
	}
	Ok(value.to_owned())
}

fn try_read(path: &Path) -> Result<Option<UserData>> {
	if !path.exists() {
		return Ok(None);
	}
	let contents = fs::read_to_string(path)
		.with_context(|| format!("failed to read {}", path.display()))?;
	if contents.trim().is_empty() {
		return Ok(None);
	}
	let data = serde_json::from_str(&contents)
		.with_context(|| format!("failed to parse {} as JSON", path.display()))?;
	Ok(Some(data))
}

fn load_env_overrides() -> Overrides {
	let var = |key: &str| std::env::var(key).ok().filter(|s| !s.is_empty());
	Overrides {
		username: var("BABYGIT_USERNAME"),
		email: var("BABYGIT_EMAIL"),
		repo_url: var("BABYGIT_REPO_URL"),
	}
}

fn apply_overrides(data: &mut UserData, overrides: &Overrides) {
	if let Some(username) = &overrides.username {
		data.username = username.clone();
	}
	if let Some(email) = &overrides.email {
		data.email = email.clone();
	}
	if let Some(url) = &overrides.repo_url {
		data.repo_url = url.clone();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_file_loads_empty() {
		let dir = tempfile::tempdir().unwrap();
		let data = UserData::read(&dir.path().join(USER_DATA_FILE));
		assert_eq!(data, UserData::default());
	}

	#[test]
	fn corrupt_file_loads_empty() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join(USER_DATA_FILE);
		fs::write(&path, "{ not json").unwrap();
		assert_eq!(UserData::read(&path), UserData::default());
	}

	#[test]
	fn partial_file_fills_missing_keys() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join(USER_DATA_FILE);
		fs::write(&path, r#"{"username": "octo"}"#).unwrap();
		let data = UserData::read(&path);
		assert_eq!(data.username, "octo");
		assert_eq!(data.email, "");
		assert_eq!(data.repo_url, "");
	}

	#[test]
	fn save_preserves_non_ascii() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join(USER_DATA_FILE);
		let data = UserData {
			username: "Пётр".into(),
			email: "petr@example.com".into(),
			repo_url: "https://github.com/petr/проект.git".into(),
		};
		data.save(&path).unwrap();

		let raw = fs::read_to_string(&path).unwrap();
		assert!(raw.contains("Пётр"));
		assert!(raw.contains("\n  \"email\""));
		assert_eq!(UserData::read(&path), data);
	}

	#[test]
	fn overrides_replace_loaded_values() {
		let mut data = UserData {
			username: "a".into(),
			email: "a@example.com".into(),
			repo_url: "https://example.com/a.git".into(),
		};
		let overrides = Overrides {
			repo_url: Some("https://example.com/b.git".into()),
			..Overrides::default()
		};
		apply_overrides(&mut data, &overrides);
		assert_eq!(data.username, "a");
		assert_eq!(data.repo_url, "https://example.com/b.git");
	}

	#[test]
	fn identity_requires_both_fields() {
		assert!(matches!(
			Identity::new("  ", "a@example.com"),
			Err(AppError::MissingField("username"))
		));
		assert!(matches!(
			Identity::new("octo", ""),
			Err(AppError::MissingField("email"))
		));
		let identity = Identity::new(" octo ", "octo@example.com").unwrap();
		assert_eq!(identity.username, "octo");
	}

	#[test]
	fn explicit_data_path_wins() {
		let path = data_file_path(Some(Path::new("/tmp/custom.json")));
		assert_eq!(path, PathBuf::from("/tmp/custom.json"));
	}
}
