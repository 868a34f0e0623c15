//! Mark registry and pass reconciliation.
//!
//! The registry owns every mark of one buffer, keyed by line, for both mark
//! kinds. Marks live in one of two generations:
//!
//! - **valid**: confirmed by the current pass, or carried over unconfirmed.
//! - **invalid**: everything that was valid when the pass began.
//!
//! A pass runs [`MarkRegistry::invalid_marks`], streams facts through
//! [`MarkRegistry::create_frame_mark`] and [`MarkRegistry::create_test_mark`],
//! then settles with [`MarkRegistry::check_invalids`] and
//! [`MarkRegistry::invalid_dispose`]. A mark that is not re-validated is
//! demoted to unconfirmed or disposed within two passes, and nothing that is
//! still true is cleared and redrawn in between.


use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::fact::{FrameFact, Line, TestFact};
use crate::frame::FrameMark;
use crate::mark::Mark;
use crate::surface::DecorationSurface;
use crate::test_mark::TestMark;

/// Mark kinds tracked by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
	Frame,
	Test,
}

/// One generation of marks, keyed by line.
#[derive(Debug, Default)]
struct Generation {
	frame: BTreeMap<Line, FrameMark>,
	test: BTreeMap<Line, TestMark>,
}

impl Generation {
	fn is_empty(&self) -> bool {
		self.frame.is_empty() && self.test.is_empty()
	}

	fn len(&self) -> usize {
		self.frame.len() + self.test.len()
	}

	fn lines(&self, kind: MarkKind) -> Vec<Line> {
		match kind {
			MarkKind::Frame => self.frame.keys().copied().collect(),
			MarkKind::Test => self.test.keys().copied().collect(),
		}
	}

	fn contains(&self, kind: MarkKind, line: Line) -> bool {
		match kind {
			MarkKind::Frame => self.frame.contains_key(&line),
			MarkKind::Test => self.test.contains_key(&line),
		}
	}

	/// Disposes every mark and returns how many there were.
	fn dispose_all<S: DecorationSurface + ?Sized>(&mut self, surface: &mut S) -> usize {
		let count = self.len();
		for (_, mark) in std::mem::take(&mut self.frame) {
			mark.dispose(surface);
		}
		for (_, mark) in std::mem::take(&mut self.test) {
			mark.dispose(surface);
		}
		count
	}
}

/// Moves marks from `invalid` back into `valid` as unconfirmed when `keep` holds.
fn demote<M, S, F>(invalid: &mut BTreeMap<Line, M>, valid: &mut BTreeMap<Line, M>, surface: &mut S, keep: F) -> usize
where
	M: Mark,
	S: DecorationSurface + ?Sized,
	F: Fn(&M) -> bool,
{
	let lines: Vec<Line> = invalid.iter().filter(|(_, mark)| keep(mark)).map(|(line, _)| *line).collect();
	let mut demoted = 0;

	for line in lines {
		let Some(mut mark) = invalid.remove(&line) else {
			continue;
		};
		match valid.entry(line) {
			Entry::Vacant(slot) => {
				mark.unconfirm(surface);
				slot.insert(mark);
				demoted += 1;
			}
			Entry::Occupied(_) => {
				tracing::warn!(line, "invalid mark shadowed by a valid one, disposing");
				mark.dispose(surface);
			}
		}
	}

	demoted
}

/// Authoritative line-to-mark mapping for one buffer.
///
/// Dropping the registry disposes every mark it still owns.
#[derive(Debug)]
pub struct MarkRegistry<S: DecorationSurface> {
	surface: S,
	valid: Generation,
	invalid: Generation,
}

impl<S: DecorationSurface> MarkRegistry<S> {
	pub fn new(surface: S) -> Self {
		Self {
			surface,
			valid: Generation::default(),
			invalid: Generation::default(),
		}
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	/// Begins a pass: relabels every valid mark as invalid.
	///
	/// Marks are neither destroyed nor restyled. Leftovers from a pass that
	/// never settled are disposed first so the two generations cannot mix.
	pub fn invalid_marks(&mut self) {
		if !self.invalid.is_empty() {
			let leftovers = self.invalid.dispose_all(&mut self.surface);
			tracing::warn!(leftovers, "pass started before the previous one settled");
		}
		self.invalid = std::mem::take(&mut self.valid);
		tracing::trace!(invalid = self.invalid.len(), "marks.invalidate");
	}

	/// Files a frame fact under its line.
	///
	/// A stale mark from the previous pass is disposed and replaced; a mark
	/// created earlier in this pass accumulates the fact.
	pub fn create_frame_mark(&mut self, fact: FrameFact, only_gutter: bool) {
		let line = fact.line;
		if let Some(stale) = self.invalid.frame.remove(&line) {
			stale.dispose(&mut self.surface);
		}

		match self.valid.frame.entry(line) {
			Entry::Occupied(mut slot) => slot.get_mut().append(&mut self.surface, fact, only_gutter),
			Entry::Vacant(slot) => {
				slot.insert(FrameMark::new(&mut self.surface, fact, only_gutter));
			}
		}
	}

	/// Files a test fact under its line.
	pub fn create_test_mark(&mut self, fact: TestFact) {
		let line = fact.line;
		if let Some(stale) = self.invalid.test.remove(&line) {
			stale.dispose(&mut self.surface);
		}

		match self.valid.test.entry(line) {
			Entry::Occupied(mut slot) => slot.get_mut().append(&fact),
			Entry::Vacant(slot) => {
				slot.insert(TestMark::new(&mut self.surface, fact));
			}
		}
	}

	/// Returns true when some valid frame mark of the same logical test
	/// already shows an identical payload on another line.
	pub fn check_if_exists(&self, fact: &FrameFact) -> bool {
		self.valid.frame.values().any(|mark| mark.check_if_exists(fact))
	}

	/// Demotes invalid marks whose test did not run this pass.
	///
	/// Frame marks are matched by the test that produced them, test marks by
	/// their own line. Demoted marks return to the valid generation flagged
	/// unconfirmed; marks whose test did run stay invalid and are disposed by
	/// [`Self::invalid_dispose`]. `None` means the pass confirmed nothing and
	/// demotes everything. Returns the number of demoted marks.
	pub fn check_invalids(&mut self, tests: Option<&[TestFact]>) -> usize {
		let ran: Vec<Line> = tests.unwrap_or_default().iter().map(|test| test.line).collect();
		let frames = demote(&mut self.invalid.frame, &mut self.valid.frame, &mut self.surface, |mark| !ran.contains(&mark.test_line()));
		let tests = demote(&mut self.invalid.test, &mut self.valid.test, &mut self.surface, |mark| !ran.contains(&mark.line()));
		tracing::debug!(frames, tests, remaining = self.invalid.len(), "marks.demote");
		frames + tests
	}

	/// Disposes whatever is still invalid. Runs at the end of every pass.
	pub fn invalid_dispose(&mut self) -> usize {
		let disposed = self.invalid.dispose_all(&mut self.surface);
		if disposed > 0 {
			tracing::debug!(disposed, "marks.dispose_invalid");
		}
		disposed
	}

	/// Disposes every mark in both generations.
	pub fn dispose(&mut self) {
		let valid = self.valid.dispose_all(&mut self.surface);
		let invalid = self.invalid.dispose_all(&mut self.surface);
		if valid + invalid > 0 {
			tracing::debug!(valid, invalid, "marks.dispose");
		}
	}

	/// Re-evaluates overlay visibility against the surface viewport.
	///
	/// Hosts call this on every scroll.
	pub fn update_visibility(&mut self) {
		let rows = self.surface.visible_rows();
		for generation in [&mut self.valid, &mut self.invalid] {
			for mark in generation.frame.values_mut() {
				mark.set_visibility(&mut self.surface, rows);
			}
			for mark in generation.test.values_mut() {
				mark.set_visibility(&mut self.surface, rows);
			}
		}
	}

	pub fn frame_mark(&self, line: Line) -> Option<&FrameMark> {
		self.valid.frame.get(&line)
	}

	pub fn test_mark(&self, line: Line) -> Option<&TestMark> {
		self.valid.test.get(&line)
	}

	/// Lines with a valid mark of `kind`, ascending.
	pub fn valid_lines(&self, kind: MarkKind) -> Vec<Line> {
		self.valid.lines(kind)
	}

	/// Lines with an invalid mark of `kind`, ascending.
	pub fn invalid_lines(&self, kind: MarkKind) -> Vec<Line> {
		self.invalid.lines(kind)
	}

	pub fn is_valid(&self, kind: MarkKind, line: Line) -> bool {
		self.valid.contains(kind, line)
	}

	pub fn is_invalid(&self, kind: MarkKind, line: Line) -> bool {
		self.invalid.contains(kind, line)
	}

	/// True once the current pass has settled.
	pub fn is_settled(&self) -> bool {
		self.invalid.is_empty()
	}

	pub fn len(&self) -> usize {
		self.valid.len() + self.invalid.len()
	}

	pub fn is_empty(&self) -> bool {
		self.valid.is_empty() && self.invalid.is_empty()
	}
}

impl<S: DecorationSurface> Drop for MarkRegistry<S> {
	fn drop(&mut self) {
		self.dispose();
	}
}
