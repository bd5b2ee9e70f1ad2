pub mod identity;
pub mod install;
pub mod open_repos;
pub mod push;
pub mod scan;
pub mod status;
