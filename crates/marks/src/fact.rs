//! Facts emitted by the extraction engine.
//!
//! A fact is an immutable observation tied to a 1-based source line. Frame
//! facts describe runtime state at one execution point; test facts describe
//! the outcome of one test. Both deserialize from the camelCase JSON the
//! extraction engine writes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// 1-based source line as reported by the extraction engine.
pub type Line = u32;

/// Identifies the logical test a frame was observed under.
///
/// The `line` of the test declaration is assumed to be unique per test
/// within one file. Nothing here verifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestRef {
	pub line: Line,
}

/// A `name=value` pair from a locals or arguments listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedValue {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
}

impl NamedValue {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			value: Some(value.into()),
		}
	}

	/// Returns the `name=value` text when both halves are present.
	pub fn display(&self) -> Option<String> {
		match (&self.name, &self.value) {
			(Some(name), Some(value)) if !name.is_empty() => Some(format!("{name}={value}")),
			_ => None,
		}
	}
}

/// Value returned at a frame. Absent for functions returning nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReturnValue {
	#[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
}

impl ReturnValue {
	pub fn new(value: impl Into<String>) -> Self {
		Self { value: Some(value.into()) }
	}

	/// Text shown for the value; `undefined` when nothing was returned.
	pub fn text(&self) -> &str {
		self.value.as_deref().unwrap_or("undefined")
	}
}

/// Accepts any JSON value as text. Strings are kept verbatim, everything
/// else is written back as compact JSON.
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
	Ok(Some(match Value::deserialize(deserializer)? {
		Value::String(text) => text,
		other => other.to_string(),
	}))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
	#[serde(rename = "type")]
	pub kind: String,
	pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleOutput {
	#[serde(rename = "type")]
	pub kind: String,
	pub text: String,
}

/// Observed state at one execution point.
///
/// Equality is structural and is what frame de-duplication compares.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePayload {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locals: Option<Vec<NamedValue>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub arguments: Option<Vec<NamedValue>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub return_value: Option<ReturnValue>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub exception: Option<ExceptionInfo>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub console: Option<ConsoleOutput>,
}

impl FramePayload {
	pub fn with_locals(locals: impl IntoIterator<Item = NamedValue>) -> Self {
		Self {
			locals: Some(locals.into_iter().collect()),
			..Self::default()
		}
	}
}

/// One frame observation at `line`, recorded while running test `test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameFact {
	pub line: Line,
	pub test: TestRef,
	#[serde(default)]
	pub payload: FramePayload,
}

impl FrameFact {
	pub fn new(line: Line, test_line: Line, payload: FramePayload) -> Self {
		Self {
			line,
			test: TestRef { line: test_line },
			payload,
		}
	}

	pub fn has_exception(&self) -> bool {
		self.payload.exception.is_some()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestState {
	Passed,
	Failed,
	#[default]
	#[serde(other)]
	Unknown,
}

impl TestState {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Passed => "passed",
			Self::Failed => "failed",
			Self::Unknown => "unknown",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestError {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

/// Outcome of the test declared at `line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFact {
	pub line: Line,
	#[serde(default)]
	pub state: TestState,
	/// Duration in milliseconds, possibly fractional.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub duration: Option<Number>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub err: Option<TestError>,
}

impl TestFact {
	pub fn new(line: Line, state: TestState) -> Self {
		Self {
			line,
			state,
			duration: None,
			err: None,
		}
	}
}
