//! Background execution with a single completion message.
//!
//! Long git operations run on their own thread so the caller stays
//! responsive. The job's [`Outcome`] is sent once over a channel; there is
//! no cancellation.

use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::sequencer::Outcome;

/// Handle to a running job.
pub struct Task {
	name: String,
	receiver: Receiver<Outcome>,
	handle: Option<JoinHandle<()>>,
}

/// Start `job` on a new named thread.
pub fn spawn<F>(name: &str, job: F) -> Result<Task>
where
	F: FnOnce() -> Outcome + Send + 'static,
{
	let (sender, receiver) = channel();
	let handle = thread::Builder::new()
		.name(name.to_owned())
		.spawn(move || {
			// The receiver may be gone if the caller stopped waiting.
			let _ = sender.send(job());
		})
		.with_context(|| format!("failed to start {name} worker"))?;
	debug!(worker = name, "worker started");
	Ok(Task {
		name: name.to_owned(),
		receiver,
		handle: Some(handle),
	})
}

impl Task {
	/// Block until the job reports.
	pub fn wait(mut self) -> Outcome {
		let outcome = self.receiver.recv().unwrap_or_else(|_| self.lost());
		self.join();
		outcome
	}

	/// Wait up to `timeout` for the job to report.
	pub fn poll(&mut self, timeout: Duration) -> Option<Outcome> {
		match self.receiver.recv_timeout(timeout) {
			Ok(outcome) => {
				self.join();
				Some(outcome)
			}
			Err(RecvTimeoutError::Timeout) => None,
			Err(RecvTimeoutError::Disconnected) => Some(self.lost()),
		}
	}

	/// Wait for the outcome, calling `tick` every `interval` meanwhile.
	pub fn wait_with(mut self, interval: Duration, mut tick: impl FnMut()) -> Outcome {
		loop {
			if let Some(outcome) = self.poll(interval) {
				return outcome;
			}
			tick();
		}
	}

	fn lost(&mut self) -> Outcome {
		self.join();
		Outcome::failure(format!("{} worker stopped without reporting a result", self.name))
	}

	fn join(&mut self) {
		if let Some(handle) = self.handle.take() {
			let _ = handle.join();
		}
	}
}
