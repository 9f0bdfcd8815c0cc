//! SCA Capture Storage Layer
//!
//! The record pipeline: turns an analysis response into an
//! [`EvaluationRecord`](sca_domain::EvaluationRecord) and appends it to the
//! project-local dataset directory.
//!
//! # Layout
//!
//! ```text
//! <project_root>/sca_llm_eval_data/
//!     record_<unix-millis>_<uuidv7>.json    one file per analyzed save
//!     ground_truth/<record-stem>.json       operator annotations
//! ```
//!
//! Records are append-only: the pipeline never rewrites or deletes one.
//!
//! # Examples
//!
//! ```no_run
//! use sca_domain::AnalysisResult;
//! use sca_store::capture_record;
//! use serde_json::json;
//! use std::path::Path;
//!
//! let result = AnalysisResult::from_value(json!({"verdict": "safe"}));
//! let path = capture_record(&result, "src/app.py", "print('x')", "python", Path::new("/ws")).unwrap();
//! println!("wrote {}", path.display());
//! ```

#![warn(missing_docs)]

pub mod dataset;
pub mod pipeline;

use std::path::PathBuf;
use thiserror::Error;

pub use dataset::{DatasetStore, DuplicateGroup, StoredRecord};
pub use pipeline::{capture_record, RecordPipeline};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The dataset directory or a file in it could not be created, read or written
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path that was being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored file could not be parsed
    #[error("Corrupt file {}: {source}", path.display())]
    Corrupt {
        /// Offending file
        path: PathBuf,
        /// Parse error
        #[source]
        source: serde_json::Error,
    },

    /// No record matches the given identifier
    #[error("Record not found: {0}")]
    NotFound(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
