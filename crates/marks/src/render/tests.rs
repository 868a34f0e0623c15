use pretty_assertions::assert_eq;

use super::*;
use crate::fact::{ConsoleOutput, ExceptionInfo, FramePayload, ReturnValue, TestError};

fn locals(pairs: &[(&str, &str)]) -> Vec<NamedValue> {
	pairs.iter().map(|(n, v)| NamedValue::new(*n, *v)).collect()
}

#[test]
fn summary_keeps_all_locals_that_fit() {
	assert_eq!(locals_summary(&locals(&[("x", "1"), ("y", "two")])), "x=1 y=two");
}

#[test]
fn summary_switches_to_compact_form_when_budget_exhausted() {
	let long = "v".repeat(40);
	let list = locals(&[("alpha", &long), ("beta", &long), ("gamma", "3")]);

	assert_eq!(locals_summary(&list), "(3) alpha, beta, gamma");
}

#[test]
fn summary_counts_unnamed_locals_as_fitted() {
	let list = vec![
		NamedValue::new("x", "1"),
		NamedValue {
			name: Some("hidden".into()),
			value: None,
		},
	];

	assert_eq!(locals_summary(&list), "x=1");
}

#[test]
fn single_local_at_budget_does_not_fit() {
	let value = "v".repeat(SUMMARY_BUDGET - 2);
	let list = locals(&[("a", &value)]);

	assert_eq!(locals_summary(&list), "(1) a");
}

#[test]
fn dump_has_one_section_per_payload_part() {
	let frame = FrameFact::new(
		4,
		1,
		FramePayload {
			locals: Some(locals(&[("x", "1")])),
			arguments: Some(locals(&[("a", "b")])),
			return_value: Some(ReturnValue::new("42")),
			exception: Some(ExceptionInfo {
				kind: "Error".into(),
				text: "bad".into(),
			}),
			console: Some(ConsoleOutput {
				kind: "log".into(),
				text: "hello".into(),
			}),
		},
	);

	let dump = FrameDump::build(std::slice::from_ref(&frame));

	assert_eq!(dump.headlines().collect::<Vec<_>>(), vec!["x=1", "args", "ret:42", "ex:Error=bad", "log:hello"]);
	assert_eq!(
		dump.sections[1],
		DumpSection::Arguments {
			entries: vec!["a=b".into()]
		}
	);
}

#[test]
fn empty_lists_produce_no_sections() {
	let frame = FrameFact::new(
		4,
		1,
		FramePayload {
			locals: Some(Vec::new()),
			arguments: Some(Vec::new()),
			..FramePayload::default()
		},
	);

	assert!(FrameDump::build(&[frame]).is_empty());
}

#[test]
fn badge_text_includes_duration_and_error() {
	let test = TestFact {
		line: 2,
		state: TestState::Failed,
		duration: Some(12.into()),
		err: Some(TestError {
			message: Some("expected 1".into()),
		}),
	};

	let badge = TestBadge::build(&test);

	assert_eq!(badge.text, "failed (12ms) @ expected 1");
	assert_eq!(badge.badge_class(), "wannabe-badge-failed");
	assert_eq!(badge.action, OverlayAction::RerunFile);
}

#[test]
fn badge_text_for_bare_state() {
	assert_eq!(TestBadge::build(&TestFact::new(2, TestState::Passed)).text, "passed");
}

#[test]
fn void_return_reads_undefined() {
	let frame = FrameFact::new(
		4,
		1,
		FramePayload {
			return_value: Some(ReturnValue::default()),
			..FramePayload::default()
		},
	);

	assert_eq!(FrameDump::build(&[frame]).headlines().collect::<Vec<_>>(), vec!["ret:undefined"]);
}

#[test]
fn fractional_duration_is_shown_as_reported() {
	let test: TestFact = serde_json::from_str(r#"{"line":2,"state":"passed","duration":1.5}"#).unwrap();
	assert_eq!(TestBadge::build(&test).text, "passed (1.5ms)");

	let test: TestFact = serde_json::from_str(r#"{"line":2,"state":"passed","duration":0}"#).unwrap();
	assert_eq!(TestBadge::build(&test).text, "passed");
}
