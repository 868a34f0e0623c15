use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use wannabe_config::ExtractorCommand;

use super::{ExtractFrom, ExtractOutcome, ExtractRequest, Extraction, ExtractionEngine, FactEvent};
use crate::error::{Result, RunError};

/// Decodes one line of extractor output. Blank lines yield `None`.
pub fn decode_event(line: &str) -> std::result::Result<Option<FactEvent>, serde_json::Error> {
	let line = line.trim();
	if line.is_empty() {
		return Ok(None);
	}
	serde_json::from_str(line).map(Some)
}

/// Engine backed by an external program speaking newline-delimited JSON.
///
/// The program receives
/// `<args..> <file> --test-name <pattern> (--line <n> | --pattern <regex>)`,
/// reads the buffer text from stdin and writes one event per line.
#[derive(Debug, Clone)]
pub struct CommandEngine {
	command: ExtractorCommand,
}

impl CommandEngine {
	pub fn new(command: ExtractorCommand) -> Self {
		Self { command }
	}
}

impl ExtractionEngine for CommandEngine {
	fn request(&self, request: ExtractRequest) -> Result<Box<dyn Extraction>> {
		Ok(Box::new(CommandExtraction {
			command: self.command.clone(),
			request,
			events: None,
		}))
	}
}

struct CommandExtraction {
	command: ExtractorCommand,
	request: ExtractRequest,
	events: Option<mpsc::UnboundedSender<FactEvent>>,
}

impl CommandExtraction {
	fn command(&self) -> Command {
		let mut cmd = Command::new(&self.command.program);
		cmd.args(&self.command.args)
			.arg(&self.request.file_path)
			.arg("--test-name")
			.arg(self.request.test_name.as_str());
		match &self.request.extract_from {
			ExtractFrom::Line(line) => cmd.arg("--line").arg(line.to_string()),
			ExtractFrom::Pattern(pattern) => cmd.arg("--pattern").arg(pattern.as_str()),
			ExtractFrom::All => cmd.arg("--pattern").arg(".*"),
		};
		cmd.stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped()).kill_on_drop(true);
		cmd
	}
}

#[async_trait]
impl Extraction for CommandExtraction {
	fn runner(&mut self) -> mpsc::UnboundedReceiver<FactEvent> {
		let (tx, rx) = mpsc::unbounded_channel();
		self.events = Some(tx);
		rx
	}

	async fn run(&mut self) -> Result<ExtractOutcome> {
		let mut child = self.command().spawn().map_err(|source| RunError::Spawn {
			program: self.command.program.clone(),
			source,
		})?;
		tracing::trace!(program = %self.command.program, file = %self.request.file_path.display(), "extractor.spawn");

		let mut stdin = child.stdin.take().ok_or(RunError::MissingPipe("stdin"))?;
		let stdout = child.stdout.take().ok_or(RunError::MissingPipe("stdout"))?;
		let mut stderr = child.stderr.take().ok_or(RunError::MissingPipe("stderr"))?;

		let text = self.request.file_text.clone();
		let writer = tokio::spawn(async move {
			if let Err(error) = stdin.write_all(text.as_bytes()).await {
				tracing::debug!(%error, "extractor closed stdin early");
			}
		});
		let stderr_reader = tokio::spawn(async move {
			let mut buf = String::new();
			let _ = stderr.read_to_string(&mut buf).await;
			buf
		});

		let mut outcome = ExtractOutcome::default();
		let mut lines = BufReader::new(stdout).lines();
		let mut line_no = 0usize;
		while let Some(line) = lines.next_line().await? {
			line_no += 1;
			let Some(event) = decode_event(&line).map_err(|source| RunError::Decode { line: line_no, source })? else {
				continue;
			};
			outcome.record(&event);
			if let Some(events) = &self.events {
				let _ = events.send(event);
			}
		}

		let status = child.wait().await?;
		let _ = writer.await;
		let stderr = stderr_reader.await.unwrap_or_default();
		self.events = None;

		if !status.success() {
			return Err(RunError::Exited {
				status,
				stderr: stderr.trim().to_owned(),
			});
		}

		tracing::trace!(frames = outcome.frames.len(), tests = outcome.tests.len(), "extractor.done");
		Ok(outcome)
	}

	async fn dispose(&mut self) {
		self.events = None;
	}
}
