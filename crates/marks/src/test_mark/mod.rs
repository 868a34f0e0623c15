//! Test marks.
//!
//! A test mark shows the outcome of the test declared on its line as a badge
//! overlay plus a state-colored gutter glyph. Unlike frame marks it does not
//! accumulate: the first fact of a pass is the one displayed, and a newer
//! outcome arrives through the registry's reclaim path in the next pass.

#[cfg(test)]
mod tests;

use crate::check::CheckGlyph;
use crate::fact::{Line, TestFact};
use crate::mark::{Decorations, Mark};
use crate::render::{OverlayAction, TestBadge};
use crate::surface::{DecorationSurface, OverlayContent, StyleClass, VisibleRows, anchor_row};

#[derive(Debug)]
pub struct TestMark {
	test: TestFact,
	decorations: Decorations,
	visible: bool,
	unconfirmed: bool,
}

impl TestMark {
	pub fn new<S: DecorationSurface + ?Sized>(surface: &mut S, test: TestFact) -> Self {
		let visible = surface.visible_rows().contains(anchor_row(test.line));
		let overlay = OverlayContent::Badge(TestBadge::build(&test));
		let decorations = Decorations::place(
			surface,
			test.line,
			Some((overlay, Self::overlay_style(visible, false))),
			CheckGlyph::for_test(test.state),
			StyleClass::Gutter,
		);

		Self {
			test,
			decorations,
			visible,
			unconfirmed: false,
		}
	}

	/// Later facts for the same line within one pass leave the badge as is.
	pub fn append(&mut self, test: &TestFact) {
		tracing::trace!(line = test.line, state = test.state.as_str(), "test mark already settled for this pass");
	}

	pub fn data(&self) -> &TestFact {
		&self.test
	}

	pub fn overlay_class(&self) -> Option<StyleClass> {
		self.decorations.overlay_class()
	}

	pub fn gutter_class(&self) -> StyleClass {
		self.decorations.gutter.class
	}

	pub fn glyph(&self) -> CheckGlyph {
		self.decorations.gutter.content
	}

	pub fn badge(&self) -> Option<&TestBadge> {
		match self.decorations.overlay.as_ref().map(|overlay| &overlay.content) {
			Some(OverlayContent::Badge(badge)) => Some(badge),
			_ => None,
		}
	}

	/// Action bound to the badge control.
	pub fn action(&self) -> Option<OverlayAction> {
		self.badge().map(|badge| badge.action)
	}

	fn overlay_style(visible: bool, unconfirmed: bool) -> StyleClass {
		match (visible, unconfirmed) {
			(false, _) => StyleClass::TestOverlayHidden,
			(true, true) => StyleClass::TestOverlayUnconfirmed,
			(true, false) => StyleClass::TestOverlay,
		}
	}
}

impl Mark for TestMark {
	fn line(&self) -> Line {
		self.test.line
	}

	fn test_line(&self) -> Line {
		self.test.line
	}

	fn is_visible(&self) -> bool {
		self.visible
	}

	fn is_unconfirmed(&self) -> bool {
		self.unconfirmed
	}

	fn unconfirm<S: DecorationSurface + ?Sized>(&mut self, surface: &mut S) {
		self.unconfirmed = true;
		self.decorations.restyle_gutter(surface, StyleClass::GutterUnconfirmed);
		if self.visible {
			self.decorations.restyle_overlay(surface, Self::overlay_style(true, true));
		}
	}

	fn set_visibility<S: DecorationSurface + ?Sized>(&mut self, surface: &mut S, rows: VisibleRows) {
		let visible = rows.contains(self.decorations.row);
		if visible == self.visible {
			return;
		}
		self.visible = visible;
		self.decorations.restyle_overlay(surface, Self::overlay_style(visible, self.unconfirmed));
	}

	fn dispose<S: DecorationSurface + ?Sized>(self, surface: &mut S) {
		self.decorations.release(surface);
	}
}
