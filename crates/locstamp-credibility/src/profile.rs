//! Credibility Profiles
//!
//! Weights, bonuses and verdict thresholds used by the evaluator.

use locstamp_core::LocstampError;
use serde::{Deserialize, Serialize};

/// Scoring constants. Missing YAML keys fall back to the standard profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredibilityProfile {
    /// Profile name (e.g., "standard@1.0")
    pub name: String,

    // === Combination ===

    /// Weight of the spatial score in the combined score
    pub spatial_weight: f64,

    /// Weight of the temporal score in the combined score
    pub temporal_weight: f64,

    /// Subtracted from the combined score when the challenge failed
    pub failure_penalty: f64,

    // === Spatial ===

    /// Uncertainty assumed when the stamp carries none
    pub default_uncertainty_km: f64,

    /// Spatial reaches zero at this multiple of the effective radius
    pub outside_decay_factor: f64,

    // === Corroboration Bonuses ===

    /// Scaled by the fraction of agreeing IP geolocation sources
    pub ip_source_bonus: f64,

    pub know_location_bonus: f64,

    pub corroboration_bonus: f64,

    // === Verdict ===

    /// Combined score must exceed this
    pub min_score: f64,

    /// Spatial score must exceed this
    pub min_spatial: f64,

    /// Temporal score must exceed this
    pub min_temporal: f64,
}

impl CredibilityProfile {
    pub fn standard() -> Self {
        Self {
            name: "standard@1.0".to_string(),
            spatial_weight: 0.65,
            temporal_weight: 0.35,
            failure_penalty: 0.3,
            default_uncertainty_km: 50.0,
            outside_decay_factor: 3.0,
            ip_source_bonus: 0.10,
            know_location_bonus: 0.05,
            corroboration_bonus: 0.05,
            min_score: 0.3,
            min_spatial: 0.1,
            min_temporal: 0.0,
        }
    }

    /// Tighter thresholds for claims that gate something valuable
    pub fn strict() -> Self {
        Self {
            name: "strict@1.0".to_string(),
            default_uncertainty_km: 25.0,
            min_score: 0.5,
            min_spatial: 0.3,
            min_temporal: 0.5,
            ..Self::standard()
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, LocstampError> {
        serde_yaml::from_str(yaml).map_err(|e| LocstampError::Config(format!("credibility profile: {}", e)))
    }

    /// Get profile by name
    pub fn for_name(name: &str) -> Self {
        match name {
            "strict" => Self::strict(),
            _ => Self::standard(),
        }
    }
}

impl Default for CredibilityProfile {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_constants() {
        let profile = CredibilityProfile::standard();
        assert_eq!(profile.spatial_weight, 0.65);
        assert_eq!(profile.temporal_weight, 0.35);
        assert_eq!(profile.failure_penalty, 0.3);
        assert_eq!(profile.default_uncertainty_km, 50.0);
    }

    #[test]
    fn test_yaml_overrides_keep_defaults() {
        let profile = CredibilityProfile::from_yaml("name: field-test\nfailure_penalty: 0.5\n").unwrap();
        assert_eq!(profile.name, "field-test");
        assert_eq!(profile.failure_penalty, 0.5);
        assert_eq!(profile.ip_source_bonus, 0.10);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = CredibilityProfile::from_yaml("failure_penalty: [1, 2]").unwrap_err();
        assert!(err.to_string().starts_with("CONFIG/"));
    }

    #[test]
    fn test_for_name() {
        assert_eq!(CredibilityProfile::for_name("strict").min_score, 0.5);
        assert_eq!(CredibilityProfile::for_name("anything").name, "standard@1.0");
    }
}
