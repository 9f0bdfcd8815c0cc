//! Evaluation records - the persisted artifact of every successful analysis

use crate::{AnalysisResult, CodeHash};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One analyzed save event, as written to the dataset directory
///
/// Records are immutable once written. Every field is always serialized;
/// promoted response fields that were absent are stored as `null`, which is
/// independent of the `"unknown"` defaulting the display layer applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Creation time (ISO-8601, millisecond precision, UTC)
    #[serde(with = "iso8601_millis")]
    pub timestamp: DateTime<Utc>,

    /// Path of the analyzed file
    pub file_path: String,

    /// Language identifier of the analyzed file
    pub language: String,

    /// Fingerprint of `snippet`
    pub code_hash: CodeHash,

    /// The analyzed text
    pub snippet: String,

    /// Length of `snippet` in characters
    pub snippet_length: usize,

    /// Promoted from the response
    pub verdict: Option<Value>,

    /// Promoted from the response
    pub infringement_basis: Option<Value>,

    /// Promoted from the response
    pub license_risk: Option<Value>,

    /// Promoted from the response
    pub reasoning: Option<Value>,

    /// Promoted from the response
    pub model_comparison: Option<Value>,

    /// Promoted from the response
    pub error_analysis: Option<Value>,

    /// Promoted from the response
    #[serde(rename = "trial_A")]
    pub trial_a: Option<Value>,

    /// Promoted from the response
    #[serde(rename = "trial_B")]
    pub trial_b: Option<Value>,

    /// The complete, unmodified response
    pub raw_output: Value,
}

impl EvaluationRecord {
    /// Assemble a record from a response and the context it was produced for
    ///
    /// `timestamp` is truncated to millisecond precision so that the value
    /// read back from disk compares equal to the one written.
    pub fn new(
        result: &AnalysisResult,
        file_path: impl Into<String>,
        snippet: impl Into<String>,
        language: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let snippet = snippet.into();
        Self {
            timestamp: timestamp.trunc_subsecs(3),
            file_path: file_path.into(),
            language: language.into(),
            code_hash: CodeHash::of(&snippet),
            snippet_length: snippet.chars().count(),
            snippet,
            verdict: result.verdict.clone(),
            infringement_basis: result.infringement_basis.clone(),
            license_risk: result.license_risk.clone(),
            reasoning: result.reasoning.clone(),
            model_comparison: result.model_comparison.clone(),
            error_analysis: result.error_analysis.clone(),
            trial_a: result.trial_a.clone(),
            trial_b: result.trial_b.clone(),
            raw_output: result.raw.clone(),
        }
    }

    /// Verdict as text, when one was stored as a string
    pub fn verdict_text(&self) -> Option<&str> {
        self.verdict.as_ref().and_then(Value::as_str)
    }

    /// License risk as text, when one was stored as a string
    pub fn license_risk_text(&self) -> Option<&str> {
        self.license_risk.as_ref().and_then(Value::as_str)
    }
}

mod iso8601_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
