//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the save handler and
//! infrastructure. Implementations live in other crates.

use crate::{AnalysisRequest, AnalysisResult};
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};

/// Trait for the remote analysis service
///
/// Implemented by the infrastructure layer (sca-webhook)
pub trait AnalysisBackend: Send + Sync {
    /// Error type for analysis calls
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue one analysis call and return the response body
    ///
    /// Implementations make exactly one attempt: no retries, no queuing.
    fn analyze(
        &self,
        request: AnalysisRequest,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;
}

/// Everything the record pipeline needs to capture one analysis
#[derive(Debug, Clone, Copy)]
pub struct Capture<'a> {
    /// Parsed response
    pub result: &'a AnalysisResult,

    /// Path of the analyzed file
    pub file_path: &'a str,

    /// Full text that was analyzed
    pub content: &'a str,

    /// Language identifier
    pub language: &'a str,

    /// Directory under which the dataset lives
    pub project_root: &'a Path,
}

/// Trait for persisting evaluation records
///
/// Implemented by the storage layer (sca-store)
pub trait RecordSink: Send + Sync {
    /// Error type for capture operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append one record and return the path it was written to
    fn capture(&self, capture: Capture<'_>) -> Result<PathBuf, Self::Error>;
}
