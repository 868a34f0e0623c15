//! Precompiled matching predicates.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ConfigError, Result};

/// Default test function name pattern.
pub const DEFAULT_TEST_NAME: &str = "^it$";
/// Default test file name pattern.
pub const DEFAULT_TEST_FILE: &str = r"\.(spec|test)\.[jt]s$";
/// Default test directory pattern.
pub const DEFAULT_TEST_DIR: &str = r"(^|/)(test|tests|spec)(/|$)";

/// Patterns selecting which files are run and which test functions count.
///
/// Consumers only ever ask yes/no questions of these; the expressions are
/// compiled once at load time.
#[derive(Debug, Clone)]
pub struct TestPatterns {
	test_name: Regex,
	test_file: Regex,
	test_dir: Regex,
}

static DEFAULT_PATTERNS: LazyLock<TestPatterns> =
	LazyLock::new(|| TestPatterns::new(DEFAULT_TEST_NAME, DEFAULT_TEST_FILE, DEFAULT_TEST_DIR).expect("default patterns compile"));

impl Default for TestPatterns {
	fn default() -> Self {
		DEFAULT_PATTERNS.clone()
	}
}

impl TestPatterns {
	/// Compiles the three patterns.
	pub fn new(test_name: &str, test_file: &str, test_dir: &str) -> Result<Self> {
		Ok(Self {
			test_name: compile("test-name", test_name)?,
			test_file: compile("test-file", test_file)?,
			test_dir: compile("test-dir", test_dir)?,
		})
	}

	/// Pattern test functions are selected by.
	pub fn test_name(&self) -> &Regex {
		&self.test_name
	}

	/// True when the file name matches the test-file pattern and its
	/// directory matches the test-dir pattern.
	pub fn accepts(&self, path: &Path) -> bool {
		let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
			return false;
		};
		let dir = path.parent().map(|dir| dir.to_string_lossy().replace('\\', "/")).unwrap_or_default();

		self.test_file.is_match(file_name) && self.test_dir.is_match(&dir)
	}
}

fn compile(field: &'static str, pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern { field, source })
}
