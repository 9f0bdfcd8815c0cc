//! Verdict module - classification vocabulary of an analysis pass

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of an analysis pass, ordered from harmless to infringing
///
/// The remote service is untrusted, so verdict strings outside this
/// vocabulary can show up in responses. Those are kept verbatim in records;
/// `Verdict::parse` simply returns `None` for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No reuse detected
    Safe,

    /// Superficial similarity only
    LowRisk,

    /// Similarity worth a manual look
    MediumRisk,

    /// Probable reuse with license obligations
    HighRisk,

    /// Reuse that violates the source license
    Violation,

    /// The service could not decide
    Unknown,
}

impl Verdict {
    /// All verdicts, in severity order
    pub const ALL: [Verdict; 6] = [
        Verdict::Safe,
        Verdict::LowRisk,
        Verdict::MediumRisk,
        Verdict::HighRisk,
        Verdict::Violation,
        Verdict::Unknown,
    ];

    /// Get the verdict name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Safe => "safe",
            Verdict::LowRisk => "low_risk",
            Verdict::MediumRisk => "medium_risk",
            Verdict::HighRisk => "high_risk",
            Verdict::Violation => "violation",
            Verdict::Unknown => "unknown",
        }
    }

    /// Parse a verdict (case-insensitive, surrounding whitespace ignored)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "safe" => Some(Verdict::Safe),
            "low_risk" => Some(Verdict::LowRisk),
            "medium_risk" => Some(Verdict::MediumRisk),
            "high_risk" => Some(Verdict::HighRisk),
            "violation" => Some(Verdict::Violation),
            "unknown" => Some(Verdict::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid verdict: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for verdict in Verdict::ALL {
            assert_eq!(Verdict::parse(verdict.as_str()), Some(verdict));
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case() {
        assert_eq!(Verdict::parse(" Violation "), Some(Verdict::Violation));
        assert_eq!(Verdict::parse("HIGH_RISK"), Some(Verdict::HighRisk));
        assert_eq!(Verdict::parse("catastrophic"), None);
    }

    #[test]
    fn test_severity_order() {
        assert!(Verdict::Safe < Verdict::HighRisk);
        assert!(Verdict::HighRisk < Verdict::Violation);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Verdict::HighRisk).unwrap();
        assert_eq!(json, "\"high_risk\"");
        let parsed: Verdict = serde_json::from_str("\"medium_risk\"").unwrap();
        assert_eq!(parsed, Verdict::MediumRisk);
    }
}
