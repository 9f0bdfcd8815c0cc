//! Save handling: one analysis call and one captured record per save.

use crate::config::OutputFormat;
use crate::display::{detail_panel, Summary};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::status::{StatusLine, StatusState};
use sca_domain::{AnalysisBackend, AnalysisRequest, AnalysisResult, Capture, RecordSink};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// A file that was just saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEvent {
    /// Path of the saved file, as sent to the service
    pub path: PathBuf,
    /// Full text of the file
    pub content: String,
    /// Language identifier
    pub language: String,
    /// Directory under which the dataset lives
    pub project_root: PathBuf,
}

impl SaveEvent {
    /// Path as a string, lossy for non-UTF-8 paths.
    pub fn file_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Handles save events against a backend and a record sink.
///
/// Each call to [`SaveHandler::handle`] is independent. Handlers may run
/// concurrently for overlapping saves; they share only the status line.
pub struct SaveHandler<B, S> {
    backend: B,
    sink: S,
    status: StatusLine,
    formatter: Formatter,
}

impl<B, S> SaveHandler<B, S>
where
    B: AnalysisBackend,
    S: RecordSink,
    CliError: From<B::Error> + From<S::Error>,
{
    /// Create a handler.
    pub fn new(backend: B, sink: S, status: StatusLine, formatter: Formatter) -> Self {
        Self {
            backend,
            sink,
            status,
            formatter,
        }
    }

    /// Status line this handler updates.
    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Analyze one save and capture the result.
    ///
    /// Returns the path of the written record. A failed analysis call leaves
    /// the status line in the error state and writes nothing.
    pub async fn handle(&self, event: SaveEvent) -> Result<PathBuf> {
        let file_path = event.file_path();
        debug!(file = %file_path, language = %event.language, "analyzing save");

        self.status.set(StatusState::Analyzing);

        let request = AnalysisRequest::new(&file_path, &event.content, &event.language);
        let response = match self.backend.analyze(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = CliError::from(e);
                self.status.set(StatusState::Error);
                error!(file = %file_path, error = %err, "analysis failed");
                self.emit(self.formatter.error(&err.to_string()));
                return Err(err);
            }
        };

        let result = AnalysisResult::from_value(response);
        let missing = result.missing_fields();
        if !missing.is_empty() {
            debug!(file = %file_path, ?missing, "response omitted fields");
        }

        let summary = Summary::from_result(&result);
        self.status.set(StatusState::from_summary(&summary));
        self.show(&file_path, &summary, &result);

        let written = self.sink.capture(Capture {
            result: &result,
            file_path: &file_path,
            content: &event.content,
            language: &event.language,
            project_root: &event.project_root,
        });

        match written {
            Ok(path) => {
                info!(file = %file_path, record = %path.display(), "record captured");
                if self.formatter.format() == OutputFormat::Table {
                    self.emit(self.formatter.record_written(&path));
                }
                Ok(path)
            }
            Err(e) => {
                let err = CliError::from(e);
                error!(file = %file_path, error = %err, "record capture failed");
                self.emit(self.formatter.error(&err.to_string()));
                Err(err)
            }
        }
    }

    fn show(&self, file_path: &str, summary: &Summary, result: &AnalysisResult) {
        match self.formatter.format() {
            OutputFormat::Table => {
                self.emit(self.formatter.notification(summary));
                println!("{}", self.formatter.panel_header(file_path));
                println!("{}", detail_panel(&result.raw));
            }
            OutputFormat::Json => println!("{}", detail_panel(&result.raw)),
            OutputFormat::Quiet => {}
        }
    }

    fn emit(&self, line: String) {
        if self.formatter.format() != OutputFormat::Quiet {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sca_store::RecordPipeline;
    use sca_webhook::MockBackend;
    use serde_json::json;

    fn handler(backend: MockBackend) -> SaveHandler<MockBackend, RecordPipeline> {
        SaveHandler::new(
            backend,
            RecordPipeline,
            StatusLine::silent(),
            Formatter::new(OutputFormat::Quiet, false),
        )
    }

    fn event(root: &std::path::Path, name: &str) -> SaveEvent {
        SaveEvent {
            path: root.join(name),
            content: "print('x')".to_string(),
            language: "python".to_string(),
            project_root: root.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_sends_path_content_and_language() {
        let root = tempfile::tempdir().unwrap();
        let backend = MockBackend::default();
        let handler = handler(backend.clone());

        handler.handle(event(root.path(), "a.py")).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].code, "print('x')");
        assert_eq!(requests[0].language, "python");
        assert!(requests[0].file_path.ends_with("a.py"));
    }

    #[tokio::test]
    async fn test_status_follows_verdict() {
        let root = tempfile::tempdir().unwrap();
        let handler = handler(MockBackend::new(json!({
            "verdict": "violation",
            "license_risk": "high",
        })));

        handler.handle(event(root.path(), "a.py")).await.unwrap();

        let state = handler.status().current();
        assert_eq!(state.text(), "violation | high");
        assert_eq!(state.color(), crate::status::StatusColor::Red);
    }

    #[tokio::test]
    async fn test_failed_call_sets_error_and_writes_nothing() {
        let root = tempfile::tempdir().unwrap();
        let mut backend = MockBackend::default();
        let broken = root.path().join("broken.py");
        backend.add_error(broken.to_string_lossy());
        let handler = handler(backend);

        let err = handler.handle(event(root.path(), "broken.py")).await.unwrap_err();

        assert!(matches!(err, CliError::Network(_)));
        assert_eq!(handler.status().current(), StatusState::Error);
        assert!(!root.path().join(sca_domain::DATASET_DIR_NAME).exists());
    }
}
