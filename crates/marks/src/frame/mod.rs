//! Frame marks.
//!
//! A frame mark accumulates every frame fact observed on one line during a
//! pass. The gutter glyph reflects all of them; the overlay dump only shows
//! facts that were not flagged gutter-only.
//!
//! Every append performs a full rebuild: the anchor and all decorations are
//! destroyed and rendered again from the accumulated facts, so the visuals
//! always match `data()` exactly.


use crate::check::CheckGlyph;
use crate::fact::{FrameFact, Line};
use crate::mark::{Decorations, Mark};
use crate::render::FrameDump;
use crate::surface::{DecorationSurface, OverlayContent, StyleClass, VisibleRows, anchor_row};

#[derive(Debug)]
pub struct FrameMark {
	frames: Vec<FrameFact>,
	dump_frames: Vec<FrameFact>,
	decorations: Decorations,
	visible: bool,
	unconfirmed: bool,
}

impl FrameMark {
	/// Creates a mark for `fact`, rendering it immediately.
	pub fn new<S: DecorationSurface + ?Sized>(surface: &mut S, fact: FrameFact, only_gutter: bool) -> Self {
		let dump_frames = if only_gutter { Vec::new() } else { vec![fact.clone()] };
		let frames = vec![fact];
		let visible = surface.visible_rows().contains(anchor_row(frames[0].line));
		let decorations = Self::build(surface, &frames, &dump_frames, visible, false);

		Self {
			frames,
			dump_frames,
			decorations,
			visible,
			unconfirmed: false,
		}
	}

	/// Adds a fact observed on the same line and rebuilds all decorations.
	///
	/// `only_gutter` facts update the glyph but leave the dump untouched.
	pub fn append<S: DecorationSurface + ?Sized>(&mut self, surface: &mut S, fact: FrameFact, only_gutter: bool) {
		if !only_gutter {
			self.dump_frames.push(fact.clone());
		}
		self.frames.push(fact);

		let line = self.line();
		self.visible = surface.visible_rows().contains(anchor_row(line));
		let fresh = Self::build(surface, &self.frames, &self.dump_frames, self.visible, self.unconfirmed);
		std::mem::replace(&mut self.decorations, fresh).release(surface);
	}

	/// Returns true when a fact of the same logical test already recorded an
	/// identical payload on a different line.
	///
	/// Only dumped facts are compared. Test identity is the test's declaration
	/// line, assumed unique within the file.
	pub fn check_if_exists(&self, fact: &FrameFact) -> bool {
		self.dump_frames
			.iter()
			.filter(|existing| existing.test.line == fact.test.line)
			.any(|existing| existing.line != fact.line && existing.payload == fact.payload)
	}

	/// Every fact accumulated on this line.
	pub fn data(&self) -> &[FrameFact] {
		&self.frames
	}

	/// Facts shown in the overlay dump.
	pub fn dump_frames(&self) -> &[FrameFact] {
		&self.dump_frames
	}

	/// Current overlay style, if an overlay is rendered.
	pub fn overlay_class(&self) -> Option<StyleClass> {
		self.decorations.overlay_class()
	}

	pub fn gutter_class(&self) -> StyleClass {
		self.decorations.gutter.class
	}

	pub fn glyph(&self) -> CheckGlyph {
		self.decorations.gutter.content
	}

	/// The rendered dump, if any.
	pub fn dump(&self) -> Option<&FrameDump> {
		match self.decorations.overlay.as_ref().map(|overlay| &overlay.content) {
			Some(OverlayContent::Dump(dump)) => Some(dump),
			_ => None,
		}
	}

	fn build<S: DecorationSurface + ?Sized>(surface: &mut S, frames: &[FrameFact], dump_frames: &[FrameFact], visible: bool, unconfirmed: bool) -> Decorations {
		let line = frames.last().map_or(0, |frame| frame.line);
		let overlay = (!dump_frames.is_empty()).then(|| (OverlayContent::Dump(FrameDump::build(dump_frames)), Self::overlay_style(visible, unconfirmed)));
		let gutter = if unconfirmed { StyleClass::GutterUnconfirmed } else { StyleClass::Gutter };

		Decorations::place(surface, line, overlay, CheckGlyph::for_frames(frames), gutter)
	}

	fn overlay_style(visible: bool, unconfirmed: bool) -> StyleClass {
		match (visible, unconfirmed) {
			(false, _) => StyleClass::FrameOverlayHidden,
			(true, true) => StyleClass::FrameOverlayUnconfirmed,
			(true, false) => StyleClass::FrameOverlay,
		}
	}
}

impl Mark for FrameMark {
	fn line(&self) -> Line {
		self.frames.last().map_or(0, |frame| frame.line)
	}

	fn test_line(&self) -> Line {
		self.frames.first().map_or(0, |frame| frame.test.line)
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
