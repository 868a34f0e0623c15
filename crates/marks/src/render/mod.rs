//! Overlay content builders.
//!
//! Builds the structured body of frame dumps and test badges. Hosts decide
//! how sections become pixels or cells; this module only decides what text
//! they carry.

#[cfg(test)]
mod tests;

use crate::fact::{FrameFact, NamedValue, TestFact, TestState};

/// Width budget, in characters, of the one-line locals summary.
pub const SUMMARY_BUDGET: usize = 50;

/// One block of a frame dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpSection {
	/// Every displayable local plus the bounded summary line.
	Locals { entries: Vec<String>, summary: String },
	Arguments { entries: Vec<String> },
	Return(String),
	Exception(String),
	Console(String),
}

impl DumpSection {
	/// Text shown when the section is collapsed.
	pub fn headline(&self) -> &str {
		match self {
			Self::Locals { summary, .. } => summary,
			Self::Arguments { .. } => "args",
			Self::Return(text) | Self::Exception(text) | Self::Console(text) => text,
		}
	}
}

/// Overlay body for a frame mark.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameDump {
	pub sections: Vec<DumpSection>,
}

impl FrameDump {
	/// Builds a dump from frames in arrival order.
	pub fn build(frames: &[FrameFact]) -> Self {
		let mut sections = Vec::new();

		for frame in frames {
			let payload = &frame.payload;

			if let Some(locals) = payload.locals.as_deref()
				&& !locals.is_empty()
			{
				sections.push(DumpSection::Locals {
					entries: locals.iter().filter_map(NamedValue::display).collect(),
					summary: locals_summary(locals),
				});
			}

			if let Some(arguments) = payload.arguments.as_deref()
				&& !arguments.is_empty()
			{
				sections.push(DumpSection::Arguments {
					entries: arguments
						.iter()
						.map(|arg| {
							format!(
								"{}={}",
								arg.name.as_deref().unwrap_or_default(),
								arg.value.as_deref().unwrap_or_default()
							)
						})
						.collect(),
				});
			}

			if let Some(ret) = &payload.return_value {
				sections.push(DumpSection::Return(format!("ret:{}", ret.text())));
			}

			if let Some(ex) = &payload.exception {
				sections.push(DumpSection::Exception(format!("ex:{}={}", ex.kind, ex.text)));
			}

			if let Some(console) = &payload.console {
				sections.push(DumpSection::Console(format!("{}:{}", console.kind, console.text)));
			}
		}

		Self { sections }
	}

	pub fn is_empty(&self) -> bool {
		self.sections.is_empty()
	}

	/// Collapsed headline of every section, in order.
	pub fn headlines(&self) -> impl Iterator<Item = &str> {
		self.sections.iter().map(DumpSection::headline)
	}
}

/// Bounded one-line summary of a locals listing.
///
/// Appends `name=value` entries while each fits in what remains of
/// [`SUMMARY_BUDGET`]. Locals without a name or value are skipped but still
/// count as fitted. When anything did not fit the summary switches to the
/// compact `(N) name1, name2, ...` form.
pub fn locals_summary(locals: &[NamedValue]) -> String {
	let mut summary = String::new();
	let mut used = 0usize;
	let mut fitted = 0usize;

	for local in locals {
		let Some(text) = local.display() else {
			fitted += 1;
			continue;
		};
		let len = text.chars().count();
		if len < SUMMARY_BUDGET.saturating_sub(used) {
			summary.push_str(&text);
			summary.push(' ');
			used += len + 1;
			fitted += 1;
		}
	}

	if fitted != locals.len() {
		let names: Vec<&str> = locals.iter().map(|local| local.name.as_deref().unwrap_or_default()).collect();
		return format!("({}) {}", locals.len(), names.join(", "));
	}

	summary.truncate(summary.trim_end().len());
	summary
}

/// Interactive affordance attached to an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
	/// Request a full, unfiltered run for the whole file.
	RerunFile,
}

/// Overlay body for a test mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBadge {
	pub state: TestState,
	pub text: String,
	pub action: OverlayAction,
}

impl TestBadge {
	pub fn build(test: &TestFact) -> Self {
		let mut text = test.state.as_str().to_owned();
		if let Some(duration) = &test.duration
			&& duration.as_f64().is_some_and(|ms| ms > 0.0)
		{
			text.push_str(&format!(" ({duration}ms)"));
		}
		if let Some(message) = test.err.as_ref().and_then(|err| err.message.as_deref())
			&& !message.is_empty()
		{
			text.push_str(" @ ");
			text.push_str(message);
		}

		Self {
			state: test.state,
			text,
			action: OverlayAction::RerunFile,
		}
	}

	/// Style of the badge body, independent of the overlay class.
	pub const fn badge_class(&self) -> &'static str {
		match self.state {
			TestState::Passed => "wannabe-badge-passed",
			TestState::Failed => "wannabe-badge-failed",
			TestState::Unknown => "wannabe-badge-unknown",
		}
	}
}
