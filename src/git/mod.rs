//! Git operations for babygit.
//!
//! Mutating operations shell out to the `git` binary; read-only inspection
//! of repository state goes through `gix`.

pub mod cmd;
pub mod repository;

// Re-export commonly used items
pub use cmd::{Git, GitOutput, GitRunner, SystemGit, git, is_installed};
pub use repository::{RepoState, inspect, is_repository};
