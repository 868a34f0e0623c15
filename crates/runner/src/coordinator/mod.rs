//! Run coordinator.
//!
//! Turns pending edit requests into reconciliation passes over one buffer's
//! [`MarkRegistry`], one pass at a time. A pass:
//!
//! 1. invalidates the current marks,
//! 2. extracts around the cursor, falling back to the whole file when that
//!    yields no frames,
//! 3. files every streamed fact as it arrives,
//! 4. settles: demotes what was not re-confirmed and disposes the rest.
//!
//! Extraction failures never escape a pass. They are logged and the pass
//! settles as if nothing was confirmed.


use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wannabe_config::TestPatterns;
use wannabe_marks::{DecorationSurface, MarkRegistry};

use crate::engine::{ExtractFrom, ExtractOutcome, ExtractRequest, Extraction, ExtractionEngine, FactEvent};
use crate::error::Result;
use crate::pending::{DocumentSnapshot, PassRequest, PendingRuns, RunScope};

/// How a pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
	/// The file is not a test file; marks were left alone.
	Skipped,
	/// Extraction covered part of the file.
	Narrow { tests: usize },
	/// Extraction covered the whole file.
	Exhaustive { tests: usize },
	/// Extraction failed; surviving marks were demoted.
	Failed,
}

/// Serializes passes for one buffer and owns its registry.
pub struct RunCoordinator<S: DecorationSurface, E: ExtractionEngine> {
	registry: MarkRegistry<S>,
	engine: E,
	patterns: TestPatterns,
	pending: PendingRuns,
}

impl<S: DecorationSurface, E: ExtractionEngine> RunCoordinator<S, E> {
	pub fn new(registry: MarkRegistry<S>, engine: E, patterns: TestPatterns) -> Self {
		Self {
			registry,
			engine,
			patterns,
			pending: PendingRuns::new(),
		}
	}

	/// Handle the edit side records requests through.
	pub fn pending(&self) -> PendingRuns {
		self.pending.clone()
	}

	pub fn registry(&self) -> &MarkRegistry<S> {
		&self.registry
	}

	pub fn registry_mut(&mut self) -> &mut MarkRegistry<S> {
		&mut self.registry
	}

	/// Worker loop: drains pending passes and applies viewport scrolls until
	/// `shutdown`.
	///
	/// A scroll landing during a pass is applied once that pass settles.
	/// Marks are disposed when the coordinator, and with it the registry, is
	/// dropped on return.
	pub async fn run(mut self, shutdown: CancellationToken) {
		loop {
			let scrolled = tokio::select! {
				biased;
				_ = shutdown.cancelled() => break,
				_ = self.pending.scrolled() => true,
				_ = self.pending.wait() => false,
			};
			if scrolled {
				self.registry.update_visibility();
			} else {
				self.drain().await;
			}
		}
		tracing::debug!(marks = self.registry.len(), "runs.shutdown");
	}

	/// Runs passes until nothing is pending. Returns how many ran.
	pub async fn drain(&mut self) -> usize {
		let mut passes = 0;
		while let Some(request) = self.pending.begin() {
			self.run_pass(&request).await;
			self.pending.finish();
			passes += 1;
		}
		passes
	}

	/// Runs one full reconciliation pass.
	pub async fn run_pass(&mut self, request: &PassRequest) -> PassOutcome {
		let snapshot = &request.snapshot;
		if !self.patterns.accepts(&snapshot.path) {
			tracing::trace!(path = %snapshot.path.display(), "pass.skip");
			return PassOutcome::Skipped;
		}

		tracing::debug!(path = %snapshot.path.display(), scope = ?request.scope, cursor = snapshot.cursor_line, "pass.start");
		self.registry.invalid_marks();

		let outcome = match self.extract(request).await {
			Ok((outcome, from)) => {
				let tests = outcome.tests.len();
				if tests == 0 {
					self.registry.check_invalids(None);
				} else if !from.is_unrestricted() {
					self.registry.check_invalids(Some(outcome.tests.as_slice()));
				}
				if from.is_unrestricted() {
					PassOutcome::Exhaustive { tests }
				} else {
					PassOutcome::Narrow { tests }
				}
			}
			Err(error) => {
				tracing::error!(path = %snapshot.path.display(), %error, "pass failed");
				self.registry.check_invalids(None);
				PassOutcome::Failed
			}
		};

		self.registry.invalid_dispose();
		tracing::debug!(?outcome, marks = self.registry.len(), "pass.done");
		outcome
	}

	async fn extract(&mut self, request: &PassRequest) -> Result<(ExtractOutcome, ExtractFrom)> {
		let snapshot = &request.snapshot;
		if request.scope == RunScope::Cursor {
			let from = ExtractFrom::Line(snapshot.cursor_line);
			let outcome = self.extract_from(snapshot, from.clone()).await?;
			if !outcome.frames.is_empty() {
				return Ok((outcome, from));
			}
			tracing::debug!(cursor = snapshot.cursor_line, "no frames around cursor, extracting whole file");
		}

		let outcome = self.extract_from(snapshot, ExtractFrom::All).await?;
		Ok((outcome, ExtractFrom::All))
	}

	async fn extract_from(&mut self, snapshot: &DocumentSnapshot, extract_from: ExtractFrom) -> Result<ExtractOutcome> {
		let mut extraction = self.engine.request(ExtractRequest {
			file_path: snapshot.path.clone(),
			file_text: snapshot.text.clone(),
			test_name: self.patterns.test_name().clone(),
			extract_from,
		})?;

		let result = stream(&mut self.registry, extraction.as_mut()).await;
		extraction.dispose().await;
		result
	}
}

/// Drives one extraction, filing each fact as soon as it is emitted.
async fn stream<S: DecorationSurface>(registry: &mut MarkRegistry<S>, extraction: &mut dyn Extraction) -> Result<ExtractOutcome> {
	let mut events = extraction.runner();
	let result = {
		let run = extraction.run();
		tokio::pin!(run);
		loop {
			tokio::select! {
				biased;
				Some(event) = events.recv() => apply(registry, event),
				result = &mut run => break result,
			}
		}
	};
	drain_events(registry, &mut events);
	result
}

fn drain_events<S: DecorationSurface>(registry: &mut MarkRegistry<S>, events: &mut mpsc::UnboundedReceiver<FactEvent>) {
	while let Ok(event) = events.try_recv() {
		apply(registry, event);
	}
}

fn apply<S: DecorationSurface>(registry: &mut MarkRegistry<S>, event: FactEvent) {
	match event {
		FactEvent::Frame(fact) => {
			let only_gutter = registry.check_if_exists(&fact);
			registry.create_frame_mark(fact, only_gutter);
		}
		FactEvent::Test(fact) => registry.create_test_mark(fact),
	}
}
