//! Errors raised while extracting facts.

use std::process::ExitStatus;

use thiserror::Error;

/// Failure of one extraction request.
#[derive(Debug, Error)]
pub enum RunError {
	/// The extractor program could not be started.
	#[error("failed to spawn extractor '{program}': {source}")]
	Spawn {
		program: String,
		#[source]
		source: std::io::Error,
	},

	#[error("extractor I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// An output line was not a valid event.
	#[error("malformed extractor event on line {line}: {source}")]
	Decode {
		line: usize,
		#[source]
		source: serde_json::Error,
	},

	/// The extractor exited unsuccessfully.
	#[error("extractor exited with {status}: {stderr}")]
	Exited { status: ExitStatus, stderr: String },

	/// A standard stream of the child was not captured.
	#[error("extractor {0} was not captured")]
	MissingPipe(&'static str),

	/// Failure reported by an in-process engine.
	#[error("extraction failed: {0}")]
	Engine(String),
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, RunError>;
