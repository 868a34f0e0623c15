//! Configuration for live annotations.
//!
//! Configuration is written in TOML and has two sections:
//!
//! ```toml
//! [patterns]
//! test-name = "^it$"
//! test-file = "\\.(spec|test)\\.[jt]s$"
//! test-dir = "(^|/)(test|tests|spec)(/|$)"
//!
//! [extractor]
//! command = ["wannabe", "--json"]
//! ```
//!
//! Missing sections and keys fall back to defaults. Patterns are compiled
//! while loading, so a bad expression fails the load rather than a later run.
//! Unknown sections are collected in [`Config::warnings`].

pub mod error;
pub mod patterns;


use std::path::Path;

use serde::Deserialize;

pub use error::{ConfigError, ConfigWarning, Result};
pub use patterns::TestPatterns;

const SECTIONS: &[&str] = &["patterns", "extractor"];

/// Program the subprocess extraction engine launches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorCommand {
	pub program: String,
	pub args: Vec<String>,
}

/// Parsed configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
	pub patterns: TestPatterns,
	/// External extraction engine, when one is configured.
	pub extractor: Option<ExtractorCommand>,
	/// Non-fatal warnings encountered during parsing.
	pub warnings: Vec<ConfigWarning>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
	#[serde(default)]
	patterns: RawPatterns,
	extractor: Option<RawExtractor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawPatterns {
	test_name: Option<String>,
	test_file: Option<String>,
	test_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawExtractor {
	command: Vec<String>,
}

impl Config {
	/// Parse a TOML string into a [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		let table: toml::Table = toml::from_str(input)?;
		let warnings = table
			.keys()
			.filter(|key| !SECTIONS.contains(&key.as_str()))
			.map(|key| ConfigWarning::UnknownSection(key.clone()))
			.collect();

		let raw: RawConfig = toml::from_str(input)?;
		let patterns = TestPatterns::new(
			raw.patterns.test_name.as_deref().unwrap_or(patterns::DEFAULT_TEST_NAME),
			raw.patterns.test_file.as_deref().unwrap_or(patterns::DEFAULT_TEST_FILE),
			raw.patterns.test_dir.as_deref().unwrap_or(patterns::DEFAULT_TEST_DIR),
		)?;

		let extractor = raw
			.extractor
			.map(|extractor| {
				let mut parts = extractor.command.into_iter();
				let program = parts.next().filter(|program| !program.is_empty()).ok_or(ConfigError::EmptyCommand)?;
				Ok::<_, ConfigError>(ExtractorCommand {
					program,
					args: parts.collect(),
				})
			})
			.transpose()?;

		Ok(Config {
			patterns,
			extractor,
			warnings,
		})
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Load configuration from a file, or defaults when it does not exist.
	pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		if !path.exists() {
			return Ok(Self::default());
		}
		Self::load(path)
	}
}
