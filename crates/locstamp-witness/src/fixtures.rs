//! Sample evidence for demos and tests
//!
//! An Empire State Building prover challenged from lower Manhattan on
//! 2026-03-01 at 12:00 UTC, signed by whichever challenger key is supplied.

use crate::source::ProverRecord;
use locstamp_core::{ChallengeResult, ClaimedLocation, Corroboration, LocstampError, Signer};
use serde_json::json;
use std::collections::BTreeMap;

pub const SAMPLE_PROVER_ID: &str = "prover-empire-state";
pub const SAMPLE_CHALLENGE_ID: &str = "challenge-esb-0001";
/// 2026-03-01T12:00:00Z
pub const SAMPLE_START_TIME: i64 = 1_772_366_400;

pub const EMPIRE_STATE: ClaimedLocation = ClaimedLocation {
    latitude: 40.7484,
    longitude: -73.9857,
    radius: 100.0,
};

pub const LOWER_MANHATTAN: ClaimedLocation = ClaimedLocation {
    latitude: 40.7128,
    longitude: -74.0060,
    radius: 1000.0,
};

/// Successful challenge whose message is signed by `challenger`.
pub fn sample_challenge(challenger: &dyn Signer) -> Result<ChallengeResult, LocstampError> {
    let message = json!({
        "challengeId": SAMPLE_CHALLENGE_ID,
        "prover": SAMPLE_PROVER_ID,
        "startTime": SAMPLE_START_TIME,
        "roundTripMicros": 180_000,
    })
    .to_string();
    let signature = challenger.sign(&message)?;

    let ip_sources: BTreeMap<String, bool> = [("ip2location", false), ("ipinfo", true), ("maxmind", true)]
        .into_iter()
        .map(|(name, agrees)| (name.to_string(), agrees))
        .collect();

    Ok(ChallengeResult {
        id: SAMPLE_CHALLENGE_ID.to_string(),
        start_time: SAMPLE_START_TIME,
        challenger: challenger.identity().to_string(),
        challenger_claimed_location: LOWER_MANHATTAN,
        prover_claimed_location: EMPIRE_STATE,
        succeeded: true,
        round_trip_micros: 180_000,
        message,
        signature,
        corroboration: Corroboration {
            know_location: Some(true),
            ip_sources,
            uncertainty_km: 5.2,
            verified: true,
        },
    })
}

/// The sample prover with one failed and one successful challenge.
pub fn sample_prover(challenger: &dyn Signer) -> Result<ProverRecord, LocstampError> {
    let success = sample_challenge(challenger)?;
    let failed = ChallengeResult {
        id: "challenge-esb-0000".to_string(),
        start_time: SAMPLE_START_TIME + 3_600,
        succeeded: false,
        ..success.clone()
    };

    Ok(ProverRecord {
        id: SAMPLE_PROVER_ID.to_string(),
        claimed_location: EMPIRE_STATE,
        challenges: vec![failed, success],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use locstamp_core::SignatureRecovery;
    use locstamp_stamp::{Ed25519Recovery, Ed25519Signer};

    #[test]
    fn test_sample_challenge_recovers_to_challenger() {
        let signer = Ed25519Signer::from_seed([7u8; 32]);
        let challenge = sample_challenge(&signer).unwrap();

        let recovered = Ed25519Recovery.recover(&challenge.message, &challenge.signature).unwrap();
        assert_eq!(recovered, challenge.challenger);
        assert!(challenge.prover_claimed_location.is_in_range());
        assert_eq!(challenge.corroboration.ip_agreement(), (2, 3));
    }

    #[test]
    fn test_sample_prover_latest_successful() {
        let signer = Ed25519Signer::from_seed([7u8; 32]);
        let prover = sample_prover(&signer).unwrap();
        let selected = crate::source::latest_successful(&prover.challenges).unwrap();
        assert_eq!(selected.id, SAMPLE_CHALLENGE_ID);
    }
}
