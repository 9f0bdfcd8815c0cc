//! SCA Capture Domain Layer
//!
//! Data model shared by every other crate in the workspace. It defines what a
//! save-time analysis looks like on the wire and on disk, and the trait seams
//! between the save handler and its infrastructure.
//!
//! ## Key Concepts
//!
//! - **AnalysisResult**: the untrusted response of the analysis webhook, with
//!   every field optional
//! - **EvaluationRecord**: the immutable artifact appended to the dataset
//!   directory for each successful analysis
//! - **CodeHash**: SHA-256 fingerprint of the analyzed snippet, used as a
//!   dedup key by downstream tooling
//! - **Verdict**: classification vocabulary of an analysis pass
//! - **GroundTruth**: an operator's judgement of a record

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod fingerprint;
pub mod ground_truth;
pub mod record;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use analysis::{AnalysisRequest, AnalysisResult};
pub use fingerprint::CodeHash;
pub use ground_truth::{AnnotationConfidence, GroundTruth, InfringementBasis, LicenseRisk};
pub use record::EvaluationRecord;
pub use traits::{AnalysisBackend, Capture, RecordSink};
pub use verdict::Verdict;

/// Name of the dataset directory created under the project root
pub const DATASET_DIR_NAME: &str = "sca_llm_eval_data";
