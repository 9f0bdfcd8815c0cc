//! Capture: response + context in, one new record file out

use crate::{DatasetStore, StoreError};
use chrono::Utc;
use sca_domain::traits::{Capture, RecordSink};
use sca_domain::{AnalysisResult, EvaluationRecord};
use std::path::{Path, PathBuf};

/// Build an evaluation record and append it under `project_root`
///
/// Ensures `<project_root>/sca_llm_eval_data` exists (parents included) and
/// writes one new, uniquely named file into it.
///
/// # Errors
///
/// - [`StoreError::Serialization`] if the record cannot be encoded
/// - [`StoreError::Io`] if the directory or the file cannot be created or
///   written
pub fn capture_record(
    result: &AnalysisResult,
    file_path: &str,
    content: &str,
    language: &str,
    project_root: &Path,
) -> Result<PathBuf, StoreError> {
    let record = EvaluationRecord::new(result, file_path, content, language, Utc::now());
    DatasetStore::for_project(project_root).append(&record)
}

/// [`RecordSink`] over the on-disk dataset
///
/// Stateless: every capture resolves its dataset directory from the capture's
/// project root, so one pipeline serves any number of workspaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordPipeline;

impl RecordSink for RecordPipeline {
    type Error = StoreError;

    fn capture(&self, capture: Capture<'_>) -> Result<PathBuf, Self::Error> {
        capture_record(
            capture.result,
            capture.file_path,
            capture.content,
            capture.language,
            capture.project_root,
        )
    }
}
