//! Evidence normalization: one watchtower challenge into a raw signal bundle
use crate::PLUGIN_NAME;
use chrono::{TimeZone, Utc};
use locstamp_core::{ChallengeResult, RawSignalBundle};
use serde_json::Value;
use std::collections::BTreeMap;

/// Claim key carrying the challenge start as RFC 3339
pub const OBSERVED_AT: &str = "observedAt";

/// Wraps `evidence` for the stamp builder. Total; the bundle timestamp is
/// the challenge start.
pub fn normalize(evidence: ChallengeResult) -> RawSignalBundle {
    let mut claims = BTreeMap::new();
    if let Some(observed) = Utc.timestamp_opt(evidence.start_time, 0).single() {
        claims.insert(OBSERVED_AT.to_string(), Value::String(observed.to_rfc3339()));
    }

    RawSignalBundle {
        plugin: PLUGIN_NAME.to_string(),
        timestamp: evidence.start_time,
        evidence: Some(evidence),
        claims,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locstamp_core::{ClaimedLocation, Corroboration};

    fn challenge(start_time: i64) -> ChallengeResult {
        ChallengeResult {
            id: "c-42".to_string(),
            start_time,
            challenger: "0xabc".to_string(),
            challenger_claimed_location: ClaimedLocation::new(40.7128, -74.0060, 1000.0),
            prover_claimed_location: ClaimedLocation::new(40.7484, -73.9857, 100.0),
            succeeded: true,
            round_trip_micros: 180_000,
            message: "{}".to_string(),
            signature: "00".to_string(),
            corroboration: Corroboration::default(),
        }
    }

    #[test]
    fn test_bundle_shape() {
        let evidence = challenge(1_772_366_400);
        let bundle = normalize(evidence.clone());

        assert_eq!(bundle.plugin, "witnesschain");
        assert_eq!(bundle.timestamp, 1_772_366_400);
        assert_eq!(bundle.evidence, Some(evidence));
        assert_eq!(bundle.claims[OBSERVED_AT], "2026-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_normalize_is_pure() {
        assert_eq!(normalize(challenge(0)), normalize(challenge(0)));
    }

    #[test]
    fn test_unrepresentable_time_skips_claim() {
        let bundle = normalize(challenge(i64::MAX));
        assert_eq!(bundle.timestamp, i64::MAX);
        assert!(bundle.claims.is_empty());
    }
}
