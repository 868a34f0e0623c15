//! Extraction engine seam.
//!
//! The engine that instruments and runs code is external. One
//! [`ExtractionEngine::request`] produces an [`Extraction`] whose
//! [`Extraction::runner`] stream emits facts while [`Extraction::run`]
//! drives the computation to its aggregate [`ExtractOutcome`].

mod command;
#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use wannabe_marks::{FrameFact, Line, TestFact};

pub use command::{CommandEngine, decode_event};

use crate::error::Result;

/// Which part of the file an extraction covers.
#[derive(Debug, Clone)]
pub enum ExtractFrom {
	/// Only what executes around this 1-based line.
	Line(Line),
	/// Statements matching a pattern.
	Pattern(Regex),
	/// The whole file, unrestricted.
	All,
}

impl ExtractFrom {
	/// True when the extraction is not narrowed to part of the file.
	pub fn is_unrestricted(&self) -> bool {
		matches!(self, Self::All)
	}
}

/// Input of one extraction.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
	pub file_path: PathBuf,
	pub file_text: Arc<str>,
	pub test_name: Regex,
	pub extract_from: ExtractFrom,
}

/// One fact as emitted on the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum FactEvent {
	Frame(FrameFact),
	Test(TestFact),
}

/// Aggregate of everything a run emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOutcome {
	pub frames: BTreeMap<Line, Vec<FrameFact>>,
	pub tests: Vec<TestFact>,
}

impl ExtractOutcome {
	pub fn record(&mut self, event: &FactEvent) {
		match event {
			FactEvent::Frame(frame) => self.frames.entry(frame.line).or_default().push(frame.clone()),
			FactEvent::Test(test) => self.tests.push(test.clone()),
		}
	}

	pub fn from_events<'a>(events: impl IntoIterator<Item = &'a FactEvent>) -> Self {
		let mut outcome = Self::default();
		for event in events {
			outcome.record(event);
		}
		outcome
	}
}

/// One in-flight extraction request.
#[async_trait]
pub trait Extraction: Send {
	/// Opens the fact stream. Call once, before [`Self::run`].
	fn runner(&mut self) -> mpsc::UnboundedReceiver<FactEvent>;

	/// Runs to completion and returns the aggregate.
	async fn run(&mut self) -> Result<ExtractOutcome>;

	/// Releases whatever the request holds.
	async fn dispose(&mut self) {}
}

/// Factory of extraction requests.
pub trait ExtractionEngine: Send + Sync {
	fn request(&self, request: ExtractRequest) -> Result<Box<dyn Extraction>>;
}

impl<E: ExtractionEngine + ?Sized> ExtractionEngine for Arc<E> {
	fn request(&self, request: ExtractRequest) -> Result<Box<dyn Extraction>> {
		(**self).request(request)
	}
}
