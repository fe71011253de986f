//! Credibility evaluation of a stamp against a claim
//!
//! Produces spatial and temporal scores, folds in corroboration bonuses and
//! the failed-challenge penalty, and gates the verdict on all three.

use crate::geo::{haversine_distance, spatial_score};
use crate::profile::CredibilityProfile;
use crate::temporal::overlap_ratio;
use locstamp_core::{Claim, CredibilityVector, DiagnosticKey, Diagnostics, UnsignedStamp};
use serde_json::json;
use tracing::debug;

/// Evaluator bound to one credibility profile
#[derive(Debug, Clone, Default)]
pub struct CredibilityEvaluator {
    profile: CredibilityProfile,
}

impl CredibilityEvaluator {
    pub fn new(profile: CredibilityProfile) -> Self {
        Self { profile }
    }

    pub fn for_profile(name: &str) -> Self {
        Self::new(CredibilityProfile::for_name(name))
    }

    pub fn profile(&self) -> &CredibilityProfile {
        &self.profile
    }

    /// Scores how well `stamp` supports `claim`. Total over all inputs.
    pub fn evaluate<S: AsRef<UnsignedStamp>>(&self, stamp: &S, claim: &Claim) -> CredibilityVector {
        let stamp = stamp.as_ref();
        let profile = &self.profile;
        let mut details = Diagnostics::new();

        // === Location ===
        let (stamp_point, claim_point) = match (stamp.location.as_point(), claim.location.as_point()) {
            (Some(stamp_point), Some(claim_point)) => (stamp_point, claim_point),
            (stamp_point, _) => {
                let (which, geometry) = if stamp_point.is_none() {
                    ("stamp", &stamp.location)
                } else {
                    ("claim", &claim.location)
                };
                details.record(
                    DiagnosticKey::Error,
                    format!("MalformedLocation: {} location is a {}, expected a Point", which, geometry.kind()),
                );
                return CredibilityVector::zeroed(details);
            }
        };

        // === Spatial ===
        let distance = haversine_distance(stamp_point, claim_point);
        let uncertainty_km = stamp
            .signals
            .uncertainty_km
            .unwrap_or(profile.default_uncertainty_km);
        let uncertainty_meters = uncertainty_km * 1000.0;
        let effective_radius = claim.radius + uncertainty_meters;

        let mut spatial = spatial_score(distance, effective_radius, profile.outside_decay_factor);
        details.record(DiagnosticKey::Distance, distance);
        details.record(DiagnosticKey::UncertaintyMeters, uncertainty_meters);
        details.record(DiagnosticKey::EffectiveRadius, effective_radius);
        details.record(DiagnosticKey::BaseSpatial, spatial);

        // === Corroboration Bonuses ===
        if let Some(corroboration) = &stamp.signals.corroboration {
            let (agreed, total) = corroboration.ip_agreement();
            details.record(DiagnosticKey::IpSourcesAgreed, agreed);
            details.record(DiagnosticKey::IpSourcesTotal, total);
            if total > 0 {
                let bonus = profile.ip_source_bonus * agreed as f64 / total as f64;
                spatial = (spatial + bonus).min(1.0);
                details.record(DiagnosticKey::IpSourceBonus, bonus);
            }

            if corroboration.know_location == Some(true) {
                spatial = (spatial + profile.know_location_bonus).min(1.0);
                details.record(DiagnosticKey::KnowLocationBonus, profile.know_location_bonus);
            }

            if corroboration.verified {
                spatial = (spatial + profile.corroboration_bonus).min(1.0);
                details.record(DiagnosticKey::CorroborationBonus, profile.corroboration_bonus);
            }
        }
        let spatial = clamp_unit(spatial);

        // === Temporal ===
        let temporal = clamp_unit(overlap_ratio(&stamp.temporal_footprint, &claim.time));
        details.record(
            DiagnosticKey::TemporalOverlap,
            json!({
                "seconds": stamp.temporal_footprint.overlap(&claim.time),
                "ratio": temporal,
            }),
        );

        // === Penalty ===
        let penalty = if stamp.signals.challenge_succeeded() == Some(false) {
            details.record(DiagnosticKey::ChallengeFailedPenalty, profile.failure_penalty);
            profile.failure_penalty
        } else {
            0.0
        };

        let score = clamp_unit(spatial * profile.spatial_weight + temporal * profile.temporal_weight - penalty);
        let supports_claim =
            score > profile.min_score && spatial > profile.min_spatial && temporal > profile.min_temporal;

        let vector = CredibilityVector {
            supports_claim,
            score,
            spatial,
            temporal,
            details,
        };
        debug!(profile = %profile.name, distance, result = %vector, "claim evaluated");
        vector
    }
}

/// Clamps into `[0, 1]`, mapping NaN to 0.
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locstamp_core::{
        ChallengeResult, ClaimedLocation, Corroboration, Geometry, PluginRef, Point, Signals,
        TimeWindow,
    };
    use std::collections::BTreeMap;

    const START: i64 = 1_772_366_400;

    fn corroboration(ip: &[(&str, bool)], know_location: Option<bool>, verified: bool) -> Corroboration {
        Corroboration {
            know_location,
            ip_sources: ip.iter().map(|(name, agrees)| (name.to_string(), *agrees)).collect::<BTreeMap<_, _>>(),
            uncertainty_km: 5.2,
            verified,
        }
    }

    fn stamp(success: bool, corroboration: Option<Corroboration>) -> UnsignedStamp {
        let signals = Signals {
            challenge_id: Some("c-1".to_string()),
            success: Some(success),
            uncertainty_km: corroboration.as_ref().map(|c| c.uncertainty_km),
            corroboration,
            ..Signals::default()
        };
        UnsignedStamp::at_point(
            PluginRef::new("witnesschain", "0.1.0"),
            Point {
                longitude: -73.9857,
                latitude: 40.7484,
            },
            TimeWindow::new(START, START + 10),
            signals,
        )
    }

    fn nyc_claim() -> Claim {
        Claim::at_point(-73.9857, 40.7484, 500.0, TimeWindow::new(START - 3600, START + 3600))
    }

    fn evaluator() -> CredibilityEvaluator {
        CredibilityEvaluator::default()
    }

    #[test]
    fn test_same_point_supports_claim() {
        let stamp = stamp(true, Some(corroboration(&[], Some(true), true)));
        let vector = evaluator().evaluate(&stamp, &nyc_claim());

        assert!(vector.spatial > 0.5);
        assert_eq!(vector.temporal, 1.0);
        assert!(vector.supports_claim);
        let effective = vector.details.get(DiagnosticKey::EffectiveRadius).and_then(|r| r.as_f64()).unwrap();
        assert!((effective - 5_700.0).abs() < 1e-6);
    }

    #[test]
    fn test_london_claim_far_away() {
        let stamp = stamp(true, Some(corroboration(&[("ipinfo", true), ("maxmind", true), ("ip2location", false)], Some(true), true)));
        let claim = Claim::at_point(-0.1276, 51.5074, 500.0, nyc_claim().time);
        let vector = evaluator().evaluate(&stamp, &claim);

        let distance = vector.details.get(DiagnosticKey::Distance).and_then(|d| d.as_f64()).unwrap();
        assert!(distance > 5_000_000.0);
        assert!(vector.spatial < 0.2);
        assert_eq!(vector.details.get(DiagnosticKey::BaseSpatial), Some(&json!(0.0)));
    }

    #[test]
    fn test_disjoint_years() {
        let stamp = stamp(true, Some(corroboration(&[], Some(true), true)));
        // 2025-01-01 .. 2025-12-31, stamp sits in 2026
        let claim = Claim::at_point(-73.9857, 40.7484, 500.0, TimeWindow::new(1_735_689_600, 1_767_139_200));
        let vector = evaluator().evaluate(&stamp, &claim);

        assert_eq!(vector.temporal, 0.0);
        assert!(!vector.supports_claim);
    }

    #[test]
    fn test_failed_challenge_penalty() {
        let corr = corroboration(&[], Some(true), true);
        let passed = evaluator().evaluate(&stamp(true, Some(corr.clone())), &nyc_claim());
        let failed = evaluator().evaluate(&stamp(false, Some(corr)), &nyc_claim());

        assert_eq!(failed.details.get(DiagnosticKey::ChallengeFailedPenalty), Some(&json!(0.3)));
        assert!(!passed.details.contains(DiagnosticKey::ChallengeFailedPenalty));
        assert!((passed.score - failed.score - 0.3).abs() < 1e-9);
        assert_eq!(passed.spatial, failed.spatial);
    }

    #[test]
    fn test_ip_source_bonus() {
        let corr = corroboration(&[("ipinfo", true), ("maxmind", true), ("ip2location", false)], None, false);
        let claim = Claim::at_point(-73.9857, 40.80, 500.0, nyc_claim().time);
        let vector = evaluator().evaluate(&stamp(true, Some(corr)), &claim);

        assert_eq!(vector.details.get(DiagnosticKey::IpSourcesAgreed), Some(&json!(2)));
        assert_eq!(vector.details.get(DiagnosticKey::IpSourcesTotal), Some(&json!(3)));
        let bonus = vector.details.get(DiagnosticKey::IpSourceBonus).and_then(|b| b.as_f64()).unwrap();
        assert!((bonus - 0.1 * 2.0 / 3.0).abs() < 1e-12);

        let base = vector.details.get(DiagnosticKey::BaseSpatial).and_then(|b| b.as_f64()).unwrap();
        assert!((vector.spatial - (base + bonus)).abs() < 1e-12);
        assert!(!vector.details.contains(DiagnosticKey::KnowLocationBonus));
    }

    #[test]
    fn test_bonuses_never_exceed_one() {
        let corr = corroboration(&[("ipinfo", true)], Some(true), true);
        let vector = evaluator().evaluate(&stamp(true, Some(corr)), &nyc_claim());
        assert_eq!(vector.spatial, 1.0);
        assert!(vector.score <= 1.0);
    }

    #[test]
    fn test_default_uncertainty() {
        let vector = evaluator().evaluate(&stamp(true, None), &nyc_claim());
        assert_eq!(vector.details.get(DiagnosticKey::UncertaintyMeters), Some(&json!(50_000.0)));
        assert!(!vector.details.contains(DiagnosticKey::IpSourcesTotal));
    }

    #[test]
    fn test_malformed_claim_location() {
        let mut claim = nyc_claim();
        claim.location = Geometry::Polygon {
            coordinates: vec![vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 0.0]]],
        };
        let vector = evaluator().evaluate(&stamp(true, None), &claim);

        assert_eq!(vector.score, 0.0);
        assert_eq!(vector.spatial, 0.0);
        assert_eq!(vector.temporal, 0.0);
        assert!(!vector.supports_claim);
        assert_eq!(vector.details.len(), 1);
        let error = vector.details.get(DiagnosticKey::Error).unwrap().as_str().unwrap();
        assert!(error.contains("claim"));
    }

    #[test]
    fn test_malformed_stamp_location() {
        let mut unsigned = stamp(true, None);
        unsigned.location = Geometry::LineString {
            coordinates: vec![vec![0.0, 0.0], vec![1.0, 1.0]],
        };
        let vector = evaluator().evaluate(&unsigned, &nyc_claim());
        assert!(!vector.supports_claim);
        assert!(vector.details.get(DiagnosticKey::Error).unwrap().as_str().unwrap().contains("stamp"));
    }

    #[test]
    fn test_conjunctive_gate() {
        // temporal perfect but spatial zero: score 0.35 > 0.3, still rejected
        let claim = Claim::at_point(139.6917, 35.6895, 0.0, nyc_claim().time);
        let vector = evaluator().evaluate(&stamp(true, None), &claim);
        assert!(vector.score > 0.3);
        assert_eq!(vector.spatial, 0.0);
        assert!(!vector.supports_claim);
    }

    #[test]
    fn test_out_of_range_inputs_stay_bounded() {
        let mut unsigned = stamp(false, None);
        unsigned.signals.uncertainty_km = Some(f64::NAN);
        let claim = Claim::at_point(500.0, -300.0, -1.0, TimeWindow::new(10, 0));
        let vector = evaluator().evaluate(&unsigned, &claim);

        for value in [vector.score, vector.spatial, vector.temporal] {
            assert!((0.0..=1.0).contains(&value));
        }
        assert!(!vector.supports_claim);
    }

    #[test]
    fn test_unbounded_claim_window() {
        let claim = Claim::at_point(-73.9857, 40.7484, 500.0, TimeWindow::new(i64::MIN, i64::MAX));
        let vector = evaluator().evaluate(&stamp(true, None), &claim);
        assert_eq!(vector.temporal, 1.0);
        assert!(vector.supports_claim);

        let stamp = UnsignedStamp {
            temporal_footprint: TimeWindow::new(i64::MIN, 0),
            ..stamp(true, None)
        };
        let vector = evaluator().evaluate(&stamp, &claim);
        assert_eq!(vector.temporal, 1.0);
        assert_eq!(
            vector.details.get(DiagnosticKey::TemporalOverlap),
            Some(&json!({ "seconds": i64::MAX, "ratio": 1.0 }))
        );
    }

    #[test]
    fn test_evidence_outcome_used_when_flag_absent() {
        let evidence = ChallengeResult {
            id: "c-1".to_string(),
            start_time: START,
            challenger: "0xabc".to_string(),
            challenger_claimed_location: ClaimedLocation::new(40.7, -74.0, 1000.0),
            prover_claimed_location: ClaimedLocation::new(40.7484, -73.9857, 100.0),
            succeeded: false,
            round_trip_micros: 0,
            message: String::new(),
            signature: String::new(),
            corroboration: Corroboration::default(),
        };
        let mut unsigned = stamp(true, None);
        unsigned.signals.success = None;
        unsigned.signals.evidence = Some(evidence);

        let vector = evaluator().evaluate(&unsigned, &nyc_claim());
        assert!(vector.details.contains(DiagnosticKey::ChallengeFailedPenalty));
    }
}
