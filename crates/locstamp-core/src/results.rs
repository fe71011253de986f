//! Verification and credibility results
use crate::diagnostics::Diagnostics;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub valid: bool,
    pub signatures_valid: bool,
    pub structure_valid: bool,
    pub signals_consistent: bool,
    pub details: Diagnostics,
}

impl VerificationResult {
    /// Combines the three category outcomes; `valid` is their conjunction.
    pub fn from_checks(
        structure_valid: bool,
        signatures_valid: bool,
        signals_consistent: bool,
        details: Diagnostics,
    ) -> Self {
        Self {
            valid: structure_valid && signatures_valid && signals_consistent,
            signatures_valid,
            structure_valid,
            signals_consistent,
            details,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} (structure: {}, signatures: {}, signals: {}, {} diagnostics)",
            if self.valid { "VALID" } else { "INVALID" },
            self.structure_valid,
            self.signatures_valid,
            self.signals_consistent,
            self.details.len()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredibilityVector {
    pub supports_claim: bool,
    pub score: f64,
    pub spatial: f64,
    pub temporal: f64,
    pub details: Diagnostics,
}

impl CredibilityVector {
    /// Non-supporting vector with every score at zero.
    pub fn zeroed(details: Diagnostics) -> Self {
        Self {
            supports_claim: false,
            score: 0.0,
            spatial: 0.0,
            temporal: 0.0,
            details,
        }
    }

    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CredibilityVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: score {:.3} (spatial {:.3}, temporal {:.3})",
            if self.supports_claim { "SUPPORTS" } else { "DOES_NOT_SUPPORT" },
            self.score,
            self.spatial,
            self.temporal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKey;

    #[test]
    fn test_valid_is_conjunction() {
        let result = VerificationResult::from_checks(true, true, true, Diagnostics::new());
        assert!(result.valid);

        let result = VerificationResult::from_checks(true, false, true, Diagnostics::new());
        assert!(!result.valid);
        assert!(result.summary().starts_with("INVALID"));
    }

    #[test]
    fn test_zeroed_vector() {
        let mut details = Diagnostics::new();
        details.record(DiagnosticKey::Error, "claim location is a Polygon");
        let vector = CredibilityVector::zeroed(details);
        assert!(!vector.supports_claim);
        assert_eq!(vector.score, 0.0);
        assert!(vector.details.contains(DiagnosticKey::Error));
        assert!(vector.to_string().starts_with("DOES_NOT_SUPPORT"));
    }

    #[test]
    fn test_wire_field_names() {
        let result = VerificationResult::from_checks(true, true, false, Diagnostics::new());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["signaturesValid"], true);
        assert_eq!(json["signalsConsistent"], false);

        let vector = CredibilityVector::zeroed(Diagnostics::new());
        let json = serde_json::to_value(&vector).unwrap();
        assert_eq!(json["supportsClaim"], false);
    }
}
