use pretty_assertions::assert_eq;
use wannabe_marks::{FramePayload, NamedValue, TestState};

use super::*;

#[test]
fn decodes_tagged_events() {
	let frame = decode_event(r#"{"event":"frame","line":4,"test":{"line":1},"payload":{"locals":[{"name":"i","value":"0"}]}}"#)
		.unwrap()
		.unwrap();
	assert_eq!(
		frame,
		FactEvent::Frame(FrameFact::new(4, 1, FramePayload::with_locals([NamedValue::new("i", "0")])))
	);

	let test = decode_event(r#"{"event":"test","line":1,"state":"passed","duration":3}"#).unwrap().unwrap();
	match test {
		FactEvent::Test(test) => {
			assert_eq!(test.state, TestState::Passed);
			assert_eq!(test.duration, Some(3.into()));
		}
		other => panic!("expected test event, got {other:?}"),
	}
}

#[test]
fn loosely_typed_values_do_not_fail_decoding() {
	let event = decode_event(
		r#"{"event":"frame","line":7,"test":{"line":1},"payload":{"returnValue":{},"locals":[{"name":"n","value":7}]}}"#,
	)
	.unwrap()
	.unwrap();
	let FactEvent::Frame(frame) = event else {
		panic!("expected frame event");
	};
	assert_eq!(frame.payload.return_value.unwrap().text(), "undefined");
	assert_eq!(frame.payload.locals.unwrap()[0].display().as_deref(), Some("n=7"));

	let event = decode_event(r#"{"event":"frame","line":7,"test":{"line":1},"payload":{"returnValue":{"value":42}}}"#)
		.unwrap()
		.unwrap();
	let FactEvent::Frame(frame) = event else {
		panic!("expected frame event");
	};
	assert_eq!(frame.payload.return_value.unwrap().text(), "42");

	let event = decode_event(r#"{"event":"test","line":1,"state":"passed","duration":1.5}"#).unwrap().unwrap();
	let FactEvent::Test(test) = event else {
		panic!("expected test event");
	};
	assert_eq!(test.duration.map(|ms| ms.to_string()).as_deref(), Some("1.5"));
}

#[test]
fn blank_lines_are_skipped() {
	assert_eq!(decode_event("   ").unwrap(), None);
}

#[test]
fn unknown_event_is_an_error() {
	assert!(decode_event(r#"{"event":"progress"}"#).is_err());
	assert!(decode_event("not json").is_err());
}

#[test]
fn outcome_groups_frames_by_line() {
	let events = [
		FactEvent::Frame(FrameFact::new(4, 1, FramePayload::default())),
		FactEvent::Frame(FrameFact::new(4, 1, FramePayload::default())),
		FactEvent::Frame(FrameFact::new(6, 1, FramePayload::default())),
		FactEvent::Test(TestFact::new(1, TestState::Passed)),
	];

	let outcome = ExtractOutcome::from_events(&events);

	assert_eq!(outcome.frames.keys().copied().collect::<Vec<_>>(), vec![4, 6]);
	assert_eq!(outcome.frames[&4].len(), 2);
	assert_eq!(outcome.tests, vec![TestFact::new(1, TestState::Passed)]);
}

#[cfg(unix)]
mod command {
	use pretty_assertions::assert_eq;
	use wannabe_config::ExtractorCommand;

	use super::*;
	use crate::error::RunError;

	fn request() -> ExtractRequest {
		ExtractRequest {
			file_path: "test/math.spec.js".into(),
			file_text: Arc::from("it('adds', () => {});\n"),
			test_name: Regex::new("^it$").unwrap(),
			extract_from: ExtractFrom::Line(1),
		}
	}

	fn sh(script: &str) -> CommandEngine {
		CommandEngine::new(ExtractorCommand {
			program: "sh".into(),
			args: vec!["-c".into(), script.into(), "extractor".into()],
		})
	}

	#[tokio::test]
	async fn streams_events_from_stdout() {
		let engine = sh(r#"cat >/dev/null; printf '%s\n' '{"event":"frame","line":1,"test":{"line":1}}' '' '{"event":"test","line":1,"state":"passed"}'"#);
		let mut extraction = engine.request(request()).unwrap();
		let mut events = extraction.runner();

		let outcome = extraction.run().await.unwrap();
		extraction.dispose().await;

		assert_eq!(outcome.frames.len(), 1);
		assert_eq!(outcome.tests.len(), 1);
		assert!(matches!(events.recv().await, Some(FactEvent::Frame(_))));
		assert!(matches!(events.recv().await, Some(FactEvent::Test(_))));
		assert!(events.recv().await.is_none());
	}

	#[tokio::test]
	async fn failing_program_reports_stderr() {
		let engine = sh("cat >/dev/null; echo 'syntax error' >&2; exit 3");
		let mut extraction = engine.request(request()).unwrap();
		let _events = extraction.runner();

		match extraction.run().await {
			Err(RunError::Exited { stderr, .. }) => assert_eq!(stderr, "syntax error"),
			other => panic!("expected exit error, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn missing_program_fails_to_spawn() {
		let engine = CommandEngine::new(ExtractorCommand {
			program: "/nonexistent/wannabe-extractor".into(),
			args: Vec::new(),
		});
		let mut extraction = engine.request(request()).unwrap();

		assert!(matches!(extraction.run().await, Err(RunError::Spawn { .. })));
	}
}
