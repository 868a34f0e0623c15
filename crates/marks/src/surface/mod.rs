//! Host decoration layer abstraction.
//!
//! Marks never talk to an editor directly. They place anchors and render
//! decorations through a [`DecorationSurface`], which the host implements
//! over its own marker/gutter machinery. Every handle is released
//! independently.

mod memory;
#[cfg(test)]
mod tests;

pub use memory::{MemorySurface, RenderedDecoration, RenderedKind};

use crate::check::CheckGlyph;
use crate::render::{FrameDump, TestBadge};

/// Column anchors are placed at; hosts clamp it to the end of the line.
pub const LINE_END_COLUMN: u32 = 999;

/// Handle to an anchor placed in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorHandle(pub u64);

/// Handle to one rendered decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DecorationHandle(pub u64);

/// Inclusive range of 0-based rows currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRows {
	pub first: u32,
	pub last: u32,
}

impl VisibleRows {
	pub const fn new(first: u32, last: u32) -> Self {
		Self { first, last }
	}

	pub const fn contains(&self, row: u32) -> bool {
		row >= self.first && row <= self.last
	}
}

/// Style applied to a rendered decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
	FrameOverlay,
	FrameOverlayHidden,
	FrameOverlayUnconfirmed,
	TestOverlay,
	TestOverlayHidden,
	TestOverlayUnconfirmed,
	Gutter,
	GutterUnconfirmed,
}

impl StyleClass {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::FrameOverlay => "wannabe-marker-frame",
			Self::FrameOverlayHidden => "wannabe-marker-frame-hide",
			Self::FrameOverlayUnconfirmed => "wannabe-marker-frame-unconfirm",
			Self::TestOverlay => "wannabe-marker-test",
			Self::TestOverlayHidden => "wannabe-marker-test-hide",
			Self::TestOverlayUnconfirmed => "wannabe-marker-test-unconfirm",
			Self::Gutter => "wannabe-marker-gutter",
			Self::GutterUnconfirmed => "wannabe-marker-gutter-unconfirm",
		}
	}

	pub const fn is_hidden(self) -> bool {
		matches!(self, Self::FrameOverlayHidden | Self::TestOverlayHidden)
	}
}

/// Body of an overlay decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayContent {
	Dump(FrameDump),
	Badge(TestBadge),
}

/// Decoration layer of one editor buffer.
pub trait DecorationSurface {
	/// Places an anchor at a 0-based row and column.
	fn place_anchor(&mut self, row: u32, column: u32) -> AnchorHandle;

	/// Renders an overlay attached to `anchor`.
	fn render_overlay(&mut self, anchor: AnchorHandle, content: &OverlayContent, class: StyleClass) -> DecorationHandle;

	/// Renders a gutter glyph attached to `anchor`.
	fn render_gutter(&mut self, anchor: AnchorHandle, glyph: &CheckGlyph, class: StyleClass) -> DecorationHandle;

	fn destroy_decoration(&mut self, decoration: DecorationHandle);

	/// Destroys an anchor. Decorations still attached to it go with it.
	fn destroy_anchor(&mut self, anchor: AnchorHandle);

	/// Rows currently on screen.
	fn visible_rows(&self) -> VisibleRows;
}

impl<S: DecorationSurface + ?Sized> DecorationSurface for Box<S> {
	fn place_anchor(&mut self, row: u32, column: u32) -> AnchorHandle {
		(**self).place_anchor(row, column)
	}

	fn render_overlay(&mut self, anchor: AnchorHandle, content: &OverlayContent, class: StyleClass) -> DecorationHandle {
		(**self).render_overlay(anchor, content, class)
	}

	fn render_gutter(&mut self, anchor: AnchorHandle, glyph: &CheckGlyph, class: StyleClass) -> DecorationHandle {
		(**self).render_gutter(anchor, glyph, class)
	}

	fn destroy_decoration(&mut self, decoration: DecorationHandle) {
		(**self).destroy_decoration(decoration)
	}

	fn destroy_anchor(&mut self, anchor: AnchorHandle) {
		(**self).destroy_anchor(anchor)
	}

	fn visible_rows(&self) -> VisibleRows {
		(**self).visible_rows()
	}
}

/// Row an anchor for a 1-based fact line is placed on.
pub const fn anchor_row(line: u32) -> u32 {
	line.saturating_sub(1)
}
