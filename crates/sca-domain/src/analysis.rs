//! Analysis request/response shapes exchanged with the remote webhook

use crate::Verdict;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of the outbound analysis call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Path of the saved file, as the editor reported it
    pub file_path: String,

    /// Full text of the saved file
    pub code: String,

    /// Short language identifier (e.g. "python")
    pub language: String,
}

impl AnalysisRequest {
    /// Create a new request
    pub fn new(
        file_path: impl Into<String>,
        code: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            code: code.into(),
            language: language.into(),
        }
    }
}

/// Response of the analysis service
///
/// The service is partially trusted: every field is optional and kept as an
/// opaque JSON value. `raw` holds the complete response exactly as received,
/// including fields that are not promoted here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    /// Classification (see [`Verdict`])
    pub verdict: Option<Value>,

    /// License risk label
    pub license_risk: Option<Value>,

    /// Explanation of why the snippet may infringe
    pub infringement_basis: Option<Value>,

    /// Sub-result of the first independent analysis pass
    pub trial_a: Option<Value>,

    /// Sub-result of the second independent analysis pass
    pub trial_b: Option<Value>,

    /// Auxiliary payload
    pub reasoning: Option<Value>,

    /// Auxiliary payload
    pub model_comparison: Option<Value>,

    /// Auxiliary payload
    pub error_analysis: Option<Value>,

    /// The complete, unmodified response
    pub raw: Value,
}

impl AnalysisResult {
    /// Wire names of the promoted fields
    pub const PROMOTED_FIELDS: [&'static str; 8] = [
        "verdict",
        "license_risk",
        "infringement_basis",
        "trial_A",
        "trial_B",
        "reasoning",
        "model_comparison",
        "error_analysis",
    ];

    /// Build a result from whatever JSON the service returned
    ///
    /// A field that is absent stays `None`; a field explicitly set to `null`
    /// is treated the same way. Any non-object response is accepted with
    /// every promoted field absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use sca_domain::AnalysisResult;
    /// use serde_json::json;
    ///
    /// let result = AnalysisResult::from_value(json!({"verdict": "violation"}));
    /// assert_eq!(result.verdict_text(), Some("violation"));
    /// assert!(result.license_risk.is_none());
    /// ```
    pub fn from_value(raw: Value) -> Self {
        let empty = Map::new();
        let fields = raw.as_object().unwrap_or(&empty);
        let take = |name: &str| fields.get(name).filter(|v| !v.is_null()).cloned();

        Self {
            verdict: take("verdict"),
            license_risk: take("license_risk"),
            infringement_basis: take("infringement_basis"),
            trial_a: take("trial_A"),
            trial_b: take("trial_B"),
            reasoning: take("reasoning"),
            model_comparison: take("model_comparison"),
            error_analysis: take("error_analysis"),
            raw,
        }
    }

    /// Verdict as text, when the service sent a string
    pub fn verdict_text(&self) -> Option<&str> {
        self.verdict.as_ref().and_then(Value::as_str)
    }

    /// Verdict within the known vocabulary
    pub fn known_verdict(&self) -> Option<Verdict> {
        self.verdict_text().and_then(Verdict::parse)
    }

    /// License risk as text, when the service sent a string
    pub fn license_risk_text(&self) -> Option<&str> {
        self.license_risk.as_ref().and_then(Value::as_str)
    }

    /// Infringement basis as text, when the service sent a string
    pub fn infringement_basis_text(&self) -> Option<&str> {
        self.infringement_basis.as_ref().and_then(Value::as_str)
    }

    /// Names of the promoted fields that were absent from the response
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.verdict.is_some(),
            self.license_risk.is_some(),
            self.infringement_basis.is_some(),
            self.trial_a.is_some(),
            self.trial_b.is_some(),
            self.reasoning.is_some(),
            self.model_comparison.is_some(),
            self.error_analysis.is_some(),
        ];
        Self::PROMOTED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect()
    }
}

impl From<Value> for AnalysisResult {
    fn from(raw: Value) -> Self {
        Self::from_value(raw)
    }
}
