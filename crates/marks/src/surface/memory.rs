use std::collections::BTreeMap;

use super::{AnchorHandle, DecorationHandle, DecorationSurface, OverlayContent, StyleClass, VisibleRows};
use crate::check::CheckGlyph;

/// What a rendered decoration shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedKind {
	Overlay(OverlayContent),
	Gutter(CheckGlyph),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDecoration {
	pub anchor: AnchorHandle,
	pub kind: RenderedKind,
	pub class: StyleClass,
}

impl RenderedDecoration {
	pub fn is_overlay(&self) -> bool {
		matches!(self.kind, RenderedKind::Overlay(_))
	}
}

/// In-memory decoration layer for headless hosts and tests.
///
/// Tracks every live anchor and decoration and counts how many have been
/// created and destroyed so churn can be observed.
#[derive(Debug, Default)]
pub struct MemorySurface {
	next_id: u64,
	anchors: BTreeMap<AnchorHandle, (u32, u32)>,
	decorations: BTreeMap<DecorationHandle, RenderedDecoration>,
	visible: VisibleRows,
	rendered_total: u64,
	destroyed_total: u64,
}

impl MemorySurface {
	pub fn new(visible: VisibleRows) -> Self {
		Self {
			visible,
			..Self::default()
		}
	}

	/// Scrolls the simulated viewport.
	pub fn set_visible_rows(&mut self, visible: VisibleRows) {
		self.visible = visible;
	}

	pub fn anchor_count(&self) -> usize {
		self.anchors.len()
	}

	pub fn decoration_count(&self) -> usize {
		self.decorations.len()
	}

	/// Decorations rendered over the surface lifetime.
	pub fn rendered_total(&self) -> u64 {
		self.rendered_total
	}

	/// Decorations destroyed over the surface lifetime, anchors included.
	pub fn destroyed_total(&self) -> u64 {
		self.destroyed_total
	}

	pub fn anchor_row(&self, anchor: AnchorHandle) -> Option<u32> {
		self.anchors.get(&anchor).map(|(row, _)| *row)
	}

	pub fn decoration(&self, decoration: DecorationHandle) -> Option<&RenderedDecoration> {
		self.decorations.get(&decoration)
	}

	/// Live decorations attached to anchors on `row`.
	pub fn decorations_on_row(&self, row: u32) -> Vec<&RenderedDecoration> {
		self.decorations
			.values()
			.filter(|decoration| self.anchor_row(decoration.anchor) == Some(row))
			.collect()
	}

	pub fn overlays_on_row(&self, row: u32) -> Vec<&RenderedDecoration> {
		self.decorations_on_row(row).into_iter().filter(|d| d.is_overlay()).collect()
	}

	pub fn gutters_on_row(&self, row: u32) -> Vec<&RenderedDecoration> {
		self.decorations_on_row(row).into_iter().filter(|d| !d.is_overlay()).collect()
	}

	fn next(&mut self) -> u64 {
		self.next_id += 1;
		self.next_id
	}

	fn insert(&mut self, anchor: AnchorHandle, kind: RenderedKind, class: StyleClass) -> DecorationHandle {
		let handle = DecorationHandle(self.next());
		if !self.anchors.contains_key(&anchor) {
			tracing::warn!(?anchor, "decoration rendered on a destroyed anchor");
		}
		self.decorations.insert(handle, RenderedDecoration { anchor, kind, class });
		self.rendered_total += 1;
		handle
	}
}

impl DecorationSurface for MemorySurface {
	fn place_anchor(&mut self, row: u32, column: u32) -> AnchorHandle {
		let handle = AnchorHandle(self.next());
		self.anchors.insert(handle, (row, column));
		handle
	}

	fn render_overlay(&mut self, anchor: AnchorHandle, content: &OverlayContent, class: StyleClass) -> DecorationHandle {
		self.insert(anchor, RenderedKind::Overlay(content.clone()), class)
	}

	fn render_gutter(&mut self, anchor: AnchorHandle, glyph: &CheckGlyph, class: StyleClass) -> DecorationHandle {
		self.insert(anchor, RenderedKind::Gutter(*glyph), class)
	}

	fn destroy_decoration(&mut self, decoration: DecorationHandle) {
		if self.decorations.remove(&decoration).is_some() {
			self.destroyed_total += 1;
		}
	}

	fn destroy_anchor(&mut self, anchor: AnchorHandle) {
		if self.anchors.remove(&anchor).is_none() {
			return;
		}
		self.destroyed_total += 1;
		let before = self.decorations.len();
		self.decorations.retain(|_, decoration| decoration.anchor != anchor);
		self.destroyed_total += (before - self.decorations.len()) as u64;
	}

	fn visible_rows(&self) -> VisibleRows {
		self.visible
	}
}
