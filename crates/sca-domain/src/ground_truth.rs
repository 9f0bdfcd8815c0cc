//! Ground-truth annotations attached to records by operators

use crate::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the analyzed code relates to the matched source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfringementBasis {
    /// Written without reference to the source
    Independent,
    /// Follows the source's ideas but not its text
    Inspired,
    /// Adapted from the source
    Derivative,
    /// Taken verbatim
    Copied,
}

impl InfringementBasis {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            InfringementBasis::Independent => "independent",
            InfringementBasis::Inspired => "inspired",
            InfringementBasis::Derivative => "derivative",
            InfringementBasis::Copied => "copied",
        }
    }
}

/// License obligations triggered by the reuse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseRisk {
    /// No obligations
    None,
    /// Attribution must be preserved
    AttributionRequired,
    /// Weak copyleft (LGPL, MPL) obligations apply
    WeakCopyleftObligations,
    /// Strong copyleft (GPL) terms are violated
    StrongCopyleftViolation,
}

impl LicenseRisk {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseRisk::None => "none",
            LicenseRisk::AttributionRequired => "attribution_required",
            LicenseRisk::WeakCopyleftObligations => "weak_copyleft_obligations",
            LicenseRisk::StrongCopyleftViolation => "strong_copyleft_violation",
        }
    }
}

/// Annotator's confidence in a ground-truth judgement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationConfidence {
    /// Certain
    #[default]
    High,
    /// Probably right
    Medium,
    /// Best guess
    Low,
}

/// An operator's judgement of one record
///
/// Stored next to the dataset rather than inside the record, since records
/// are never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruth {
    /// File name of the annotated record
    pub record: String,

    /// Correct verdict
    pub verdict: Option<Verdict>,

    /// Correct infringement basis
    pub infringement_basis: Option<InfringementBasis>,

    /// Correct license risk
    pub license_risk: Option<LicenseRisk>,

    /// Annotator confidence
    #[serde(default)]
    pub confidence: AnnotationConfidence,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the annotation was made
    pub annotated_at: DateTime<Utc>,
}

impl GroundTruth {
    /// Start an empty annotation for a record
    pub fn new(record: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            verdict: None,
            infringement_basis: None,
            license_risk: None,
            confidence: AnnotationConfidence::default(),
            notes: String::new(),
            annotated_at: Utc::now(),
        }
    }

    /// Set the verdict
    pub fn with_verdict(mut self, verdict: Verdict) -> Self {
        self.verdict = Some(verdict);
        self
    }

    /// Set the infringement basis
    pub fn with_basis(mut self, basis: InfringementBasis) -> Self {
        self.infringement_basis = Some(basis);
        self
    }

    /// Set the license risk
    pub fn with_license_risk(mut self, risk: LicenseRisk) -> Self {
        self.license_risk = Some(risk);
        self
    }

    /// Set the confidence
    pub fn with_confidence(mut self, confidence: AnnotationConfidence) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}
