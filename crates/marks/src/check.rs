//! Gutter check glyphs.
//!
//! A glyph is a small colored indicator placed in the gutter next to an
//! annotated line. Its color summarises the aggregate state of the mark.

use crate::fact::{FrameFact, TestState};

/// Aggregate state a check glyph reflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckState {
	/// Frames recorded without an exception.
	Ok,
	/// At least one recorded frame raised.
	Exception,
	Passed,
	Failed,
	Unknown,
}

impl CheckState {
	/// Background color of the glyph.
	pub const fn color(self) -> &'static str {
		match self {
			Self::Ok => "#108206",
			Self::Exception => "#ff8200",
			Self::Passed => "#12b804",
			Self::Failed => "#d50000",
			Self::Unknown => "#5c5c5c",
		}
	}
}

impl From<TestState> for CheckState {
	fn from(state: TestState) -> Self {
		match state {
			TestState::Passed => Self::Passed,
			TestState::Failed => Self::Failed,
			TestState::Unknown => Self::Unknown,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckGlyph {
	pub state: CheckState,
}

impl CheckGlyph {
	/// Glyph for a frame mark: exception wins over ok across all frames.
	pub fn for_frames(frames: &[FrameFact]) -> Self {
		let state = if frames.iter().any(FrameFact::has_exception) {
			CheckState::Exception
		} else {
			CheckState::Ok
		};
		Self { state }
	}

	pub fn for_test(state: TestState) -> Self {
		Self { state: state.into() }
	}

	pub const fn color(&self) -> &'static str {
		self.state.color()
	}
}
