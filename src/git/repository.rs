//! Repository inspection using gix.

use std::path::Path;

use anyhow::{Context, Result};

/// Read-only view of the bits of a repository babygit cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoState {
	pub branch: Option<String>,
	pub origin_url: Option<String>,
	pub user_name: Option<String>,
	pub user_email: Option<String>,
}

/// Open the repository rooted at `path` and collect its state.
pub fn inspect(path: &Path) -> Result<RepoState> {
	let repo = gix::open(path)
		.with_context(|| format!("failed to open git repository at {}", path.display()))?;

	let branch = repo
		.head_name()
		.context("failed to read HEAD")?
		.map(|name| name.shorten().to_string());

	let origin_url = repo
		.find_remote("origin")
		.ok()
		.and_then(|remote| {
			remote
				.url(gix::remote::Direction::Push)
				.map(|url| url.to_bstring().to_string())
		});

	let config = repo.config_snapshot();
	let user_name = config.string("user.name").map(|v| v.to_string());
	let user_email = config.string("user.email").map(|v| v.to_string());

	Ok(RepoState {
		branch,
		origin_url,
		user_name,
		user_email,
	})
}

/// Check if a path is the root of a git working tree.
pub fn is_repository(path: &Path) -> bool {
	path.join(".git").exists()
}
