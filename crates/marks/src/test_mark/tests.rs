use super::*;
use crate::check::CheckState;
use crate::fact::TestState;
use crate::surface::MemorySurface;

fn surface() -> MemorySurface {
	MemorySurface::new(VisibleRows::new(0, 49))
}

#[test]
fn renders_badge_and_state_glyph() {
	let mut surface = surface();
	let mark = TestMark::new(&mut surface, TestFact::new(2, TestState::Failed));

	assert_eq!(mark.badge().map(|badge| badge.text.as_str()), Some("failed"));
	assert_eq!(mark.glyph().state, CheckState::Failed);
	assert_eq!(mark.overlay_class(), Some(StyleClass::TestOverlay));
	assert_eq!(surface.overlays_on_row(1).len(), 1);
	assert_eq!(surface.gutters_on_row(1).len(), 1);
}

#[test]
fn append_is_a_no_op() {
	let mut surface = surface();
	let mut mark = TestMark::new(&mut surface, TestFact::new(2, TestState::Passed));
	let rendered = surface.rendered_total();

	mark.append(&TestFact::new(2, TestState::Failed));

	assert_eq!(mark.data().state, TestState::Passed);
	assert_eq!(mark.glyph().state, CheckState::Passed);
	assert_eq!(surface.rendered_total(), rendered);
}

#[test]
fn unconfirm_restyles_badge_and_gutter_once() {
	let mut surface = surface();
	let mut mark = TestMark::new(&mut surface, TestFact::new(2, TestState::Passed));

	mark.unconfirm(&mut surface);
	let rendered = surface.rendered_total();
	mark.unconfirm(&mut surface);

	assert_eq!(surface.rendered_total(), rendered);
	assert_eq!(mark.overlay_class(), Some(StyleClass::TestOverlayUnconfirmed));
	assert_eq!(mark.gutter_class(), StyleClass::GutterUnconfirmed);
	assert_eq!(surface.decoration_count(), 2);
}

#[test]
fn visibility_round_trip() {
	let mut surface = surface();
	let mut mark = TestMark::new(&mut surface, TestFact::new(30, TestState::Passed));

	mark.set_visibility(&mut surface, VisibleRows::new(0, 10));
	assert_eq!(mark.overlay_class(), Some(StyleClass::TestOverlayHidden));

	mark.set_visibility(&mut surface, VisibleRows::new(20, 40));
	assert_eq!(mark.overlay_class(), Some(StyleClass::TestOverlay));
}

#[test]
fn badge_offers_file_rerun() {
	let mut surface = surface();
	let mark = TestMark::new(&mut surface, TestFact::new(2, TestState::Unknown));

	assert_eq!(mark.action(), Some(OverlayAction::RerunFile));
}
