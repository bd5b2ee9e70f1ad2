pub mod browser;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod installer;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod sequencer;
pub mod worker;

pub use config::{Identity, RemoteTarget, UserData};
pub use error::AppError;
pub use sequencer::{CommitRequest, Outcome, Sequencer, Step};
