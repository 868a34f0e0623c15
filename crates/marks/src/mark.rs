//! Shared mark plumbing.
//!
//! Both mark kinds own one anchor, one gutter glyph and at most one overlay.
//! [`Decorations`] holds those handles together with the content they were
//! rendered from, so a restyle can re-render the same content under a new
//! class without rebuilding it.

use crate::check::CheckGlyph;
use crate::fact::Line;
use crate::surface::{AnchorHandle, DecorationHandle, DecorationSurface, LINE_END_COLUMN, OverlayContent, StyleClass, VisibleRows, anchor_row};

/// Behaviour the registry needs from every mark kind.
pub trait Mark {
	/// 1-based line the mark is anchored to.
	fn line(&self) -> Line;

	/// Line of the test that produced the mark's first fact.
	fn test_line(&self) -> Line;

	fn is_visible(&self) -> bool;

	fn is_unconfirmed(&self) -> bool;

	/// Flags the mark as surviving a pass without fresh facts. Idempotent.
	fn unconfirm<S: DecorationSurface + ?Sized>(&mut self, surface: &mut S);

	/// Shows or hides the overlay depending on whether the anchor row is on screen.
	fn set_visibility<S: DecorationSurface + ?Sized>(&mut self, surface: &mut S, rows: VisibleRows);

	/// Releases the anchor and every decoration.
	fn dispose<S: DecorationSurface + ?Sized>(self, surface: &mut S);
}

/// A decoration together with what it was rendered from.
#[derive(Debug)]
pub(crate) struct Rendered<T> {
	pub handle: DecorationHandle,
	pub content: T,
	pub class: StyleClass,
}

/// Handles owned by one mark.
#[derive(Debug)]
pub(crate) struct Decorations {
	pub anchor: AnchorHandle,
	pub row: u32,
	pub overlay: Option<Rendered<OverlayContent>>,
	pub gutter: Rendered<CheckGlyph>,
}

impl Decorations {
	/// Places the anchor for `line` and renders the gutter glyph and optional overlay.
	pub fn place<S: DecorationSurface + ?Sized>(
		surface: &mut S,
		line: Line,
		overlay: Option<(OverlayContent, StyleClass)>,
		glyph: CheckGlyph,
		gutter_class: StyleClass,
	) -> Self {
		let row = anchor_row(line);
		let anchor = surface.place_anchor(row, LINE_END_COLUMN);
		let overlay = overlay.map(|(content, class)| Rendered {
			handle: surface.render_overlay(anchor, &content, class),
			content,
			class,
		});
		let gutter = Rendered {
			handle: surface.render_gutter(anchor, &glyph, gutter_class),
			content: glyph,
			class: gutter_class,
		};

		Self {
			anchor,
			row,
			overlay,
			gutter,
		}
	}

	/// Re-renders the overlay under `class`. No-op when already styled so.
	pub fn restyle_overlay<S: DecorationSurface + ?Sized>(&mut self, surface: &mut S, class: StyleClass) {
		let Some(overlay) = self.overlay.as_mut() else {
			return;
		};
		if overlay.class == class {
			return;
		}
		surface.destroy_decoration(overlay.handle);
		overlay.handle = surface.render_overlay(self.anchor, &overlay.content, class);
		overlay.class = class;
	}

	/// Re-renders the gutter glyph under `class`. No-op when already styled so.
	pub fn restyle_gutter<S: DecorationSurface + ?Sized>(&mut self, surface: &mut S, class: StyleClass) {
		if self.gutter.class == class {
			return;
		}
		surface.destroy_decoration(self.gutter.handle);
		self.gutter.handle = surface.render_gutter(self.anchor, &self.gutter.content, class);
		self.gutter.class = class;
	}

	pub fn overlay_class(&self) -> Option<StyleClass> {
		self.overlay.as_ref().map(|overlay| overlay.class)
	}

	pub fn release<S: DecorationSurface + ?Sized>(self, surface: &mut S) {
		if let Some(overlay) = self.overlay {
			surface.destroy_decoration(overlay.handle);
		}
		surface.destroy_decoration(self.gutter.handle);
		surface.destroy_anchor(self.anchor);
	}
}
