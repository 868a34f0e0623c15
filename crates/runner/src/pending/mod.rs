//! Edit-triggered pass serialization.
//!
//! Edits bump a saturating counter; the coordinator drains it one pass per
//! unit. After each pass the counter drops by one and is clamped to one, so
//! any burst of edits landing during a pass costs at most one extra pass.
//!
//! Scrolls are signalled separately and coalesce into a single visibility
//! refresh, applied between passes.


use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;
use wannabe_marks::{Line, OverlayAction};

/// Buffer state a pass runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
	pub path: PathBuf,
	pub text: Arc<str>,
	/// 1-based line of the cursor.
	pub cursor_line: Line,
}

impl DocumentSnapshot {
	pub fn new(path: impl Into<PathBuf>, text: impl Into<Arc<str>>, cursor_line: Line) -> Self {
		Self {
			path: path.into(),
			text: text.into(),
			cursor_line,
		}
	}
}

/// How much of the file a pass extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunScope {
	/// Around the cursor first, the whole file if that finds no frames.
	Cursor,
	/// The whole file, unfiltered.
	Full,
}

/// One unit of pending work handed to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRequest {
	pub snapshot: DocumentSnapshot,
	pub scope: RunScope,
}

#[derive(Debug, Default)]
struct PendingState {
	count: usize,
	latest: Option<DocumentSnapshot>,
	full: bool,
	scrolled: bool,
}

#[derive(Debug, Default)]
struct PendingInner {
	state: Mutex<PendingState>,
	notify: Notify,
	scroll: Notify,
}

/// Shared pending-pass counter between the edit side and the coordinator.
#[derive(Debug, Clone, Default)]
pub struct PendingRuns {
	inner: Arc<PendingInner>,
}

impl PendingRuns {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records an edit. The newest snapshot wins; a requested full run stays
	/// requested until a pass picks it up.
	pub fn request(&self, snapshot: DocumentSnapshot, scope: RunScope) {
		let count = {
			let mut state = self.inner.state.lock();
			state.count = state.count.saturating_add(1);
			state.latest = Some(snapshot);
			state.full |= scope == RunScope::Full;
			state.count
		};
		tracing::trace!(pending = count, ?scope, "runs.request");
		self.inner.notify.notify_one();
	}

	/// Records an edit scoped to the cursor.
	pub fn request_edit(&self, snapshot: DocumentSnapshot) {
		self.request(snapshot, RunScope::Cursor);
	}

	/// Handles an overlay control activated by the user.
	pub fn request_action(&self, action: OverlayAction, snapshot: DocumentSnapshot) {
		match action {
			OverlayAction::RerunFile => self.request(snapshot, RunScope::Full),
		}
	}

	/// Records that the viewport moved. Any number of scrolls before the
	/// worker gets to them cost one refresh.
	pub fn request_scroll(&self) {
		self.inner.state.lock().scrolled = true;
		tracing::trace!("runs.scroll");
		self.inner.scroll.notify_one();
	}

	pub fn pending(&self) -> usize {
		self.inner.state.lock().count
	}

	/// Returns the request to run next, if any is pending.
	pub fn begin(&self) -> Option<PassRequest> {
		let mut state = self.inner.state.lock();
		if state.count == 0 {
			return None;
		}
		let snapshot = state.latest.clone()?;
		let scope = if std::mem::take(&mut state.full) { RunScope::Full } else { RunScope::Cursor };
		Some(PassRequest { snapshot, scope })
	}

	/// Completes one pass: decrements, then clamps to one.
	pub fn finish(&self) {
		let mut state = self.inner.state.lock();
		state.count = state.count.saturating_sub(1).min(1);
	}

	/// Waits for a scroll and consumes it.
	pub async fn scrolled(&self) {
		loop {
			let notified = self.inner.scroll.notified();
			if std::mem::take(&mut self.inner.state.lock().scrolled) {
				return;
			}
			notified.await;
		}
	}

	/// Waits until a request is recorded.
	pub async fn wait(&self) {
		loop {
			let notified = self.inner.notify.notified();
			if self.pending() > 0 {
				return;
			}
			notified.await;
		}
	}
}
