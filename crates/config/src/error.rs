//! Error types for configuration parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A pattern did not compile.
	#[error("invalid pattern for '{field}': {source}")]
	InvalidPattern {
		/// Config key holding the pattern.
		field: &'static str,
		#[source]
		source: regex::Error,
	},

	/// The extractor command is present but empty.
	#[error("extractor command must name a program")]
	EmptyCommand,
}

/// Non-fatal issue found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// A top-level section this crate does not know about.
	UnknownSection(String),
}

impl std::fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnknownSection(name) => write!(f, "unknown section '{name}' will be ignored"),
		}
	}
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
