use super::*;
use crate::check::CheckState;

#[test]
fn visible_rows_are_inclusive() {
	let rows = VisibleRows::new(10, 20);
	assert!(!rows.contains(9));
	assert!(rows.contains(10));
	assert!(rows.contains(20));
	assert!(!rows.contains(21));
}

#[test]
fn anchor_row_is_zero_based() {
	assert_eq!(anchor_row(1), 0);
	assert_eq!(anchor_row(10), 9);
	assert_eq!(anchor_row(0), 0);
}

#[test]
fn destroying_anchor_releases_attached_decorations() {
	let mut surface = MemorySurface::new(VisibleRows::new(0, 10));
	let anchor = surface.place_anchor(3, LINE_END_COLUMN);
	let glyph = CheckGlyph { state: CheckState::Ok };
	surface.render_gutter(anchor, &glyph, StyleClass::Gutter);
	let other = surface.place_anchor(4, LINE_END_COLUMN);
	surface.render_gutter(other, &glyph, StyleClass::Gutter);

	surface.destroy_anchor(anchor);

	assert_eq!(surface.anchor_count(), 1);
	assert_eq!(surface.decoration_count(), 1);
	assert!(surface.decorations_on_row(3).is_empty());
	assert_eq!(surface.gutters_on_row(4).len(), 1);
}

#[test]
fn destroying_twice_is_harmless() {
	let mut surface = MemorySurface::default();
	let anchor = surface.place_anchor(0, 0);
	let decoration = surface.render_gutter(anchor, &CheckGlyph { state: CheckState::Passed }, StyleClass::Gutter);

	surface.destroy_decoration(decoration);
	surface.destroy_decoration(decoration);
	surface.destroy_anchor(anchor);
	surface.destroy_anchor(anchor);

	assert_eq!(surface.destroyed_total(), 2);
	assert_eq!(surface.decoration_count(), 0);
}
