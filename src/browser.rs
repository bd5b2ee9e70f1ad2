use anyhow::{Context, Result};
use tracing::debug;

/// Official git download page.
pub const DOWNLOAD_URL: &str = "https://git-scm.com/downloads";

const GITHUB_URL: &str = "https://github.com/";

/// Page listing a user's repositories, or GitHub's front page without a user.
pub fn repositories_url(username: &str) -> String {
	let username = username.trim();
	if username.is_empty() {
		GITHUB_URL.to_owned()
	} else {
		format!("{GITHUB_URL}{username}?tab=repositories")
	}
}

/// Open `url` in the default browser.
pub fn open_url(url: &str) -> Result<()> {
	debug!(url, "opening browser");
	open::that(url).with_context(|| format!("failed to open {url}"))
}
