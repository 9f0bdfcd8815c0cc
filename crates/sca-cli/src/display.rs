//! What the user sees after an analysis: summary line and detail panel.
//!
//! Missing fields show as `"unknown"` here. This is unrelated to the record
//! pipeline, which stores missing fields as `null`.

use sca_domain::{AnalysisResult, Verdict};
use serde_json::Value;

/// Placeholder for fields the service left out
pub const UNKNOWN: &str = "unknown";

/// Display view of an analysis response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Verdict text
    pub verdict: String,
    /// Infringement basis text
    pub basis: String,
    /// License risk text
    pub license_risk: String,
}

impl Summary {
    /// Build the display view, defaulting missing fields to `"unknown"`
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            verdict: display_text(result.verdict.as_ref()),
            basis: display_text(result.infringement_basis.as_ref()),
            license_risk: display_text(result.license_risk.as_ref()),
        }
    }

    /// Verdict within the known vocabulary
    pub fn known_verdict(&self) -> Option<Verdict> {
        Verdict::parse(&self.verdict)
    }

    /// One-line notification text
    pub fn message(&self) -> String {
        format!(
            "Verdict: {} | Basis: {} | License risk: {}",
            self.verdict, self.basis, self.license_risk
        )
    }
}

/// Strings verbatim, other JSON compactly, absent as "unknown"
fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Detail panel: the complete response as formatted JSON
pub fn detail_panel(raw: &Value) -> String {
    serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_display_as_unknown() {
        let result = AnalysisResult::from_value(json!({}));
        let summary = Summary::from_result(&result);
        assert_eq!(summary.verdict, "unknown");
        assert_eq!(summary.basis, "unknown");
        assert_eq!(summary.license_risk, "unknown");

        // The promoted fields themselves stay absent
        assert!(result.verdict.is_none());
    }

    #[test]
    fn test_message() {
        let result = AnalysisResult::from_value(json!({
            "verdict": "violation",
            "infringement_basis": "copied",
        }));
        assert_eq!(
            Summary::from_result(&result).message(),
            "Verdict: violation | Basis: copied | License risk: unknown"
        );
    }

    #[test]
    fn test_non_string_fields_are_rendered() {
        let result = AnalysisResult::from_value(json!({"license_risk": {"level": 3}}));
        assert_eq!(Summary::from_result(&result).license_risk, "{\"level\":3}");
    }

    #[test]
    fn test_unrecognized_verdict_shown_verbatim() {
        let result = AnalysisResult::from_value(json!({"verdict": "needs_review"}));
        let summary = Summary::from_result(&result);
        assert_eq!(summary.verdict, "needs_review");
        assert_eq!(summary.known_verdict(), None);
    }

    #[test]
    fn test_detail_panel_is_pretty() {
        let panel = detail_panel(&json!({"verdict": "safe"}));
        assert_eq!(panel, "{\n  \"verdict\": \"safe\"\n}");
    }
}
