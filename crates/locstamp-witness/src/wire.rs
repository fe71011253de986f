//! Watchtower wire format
//!
//! The watchtower service reports provers and their challenges in
//! snake_case with RFC 3339 start times. These types decode that form and
//! convert it into the core data model.

use crate::source::ProverRecord;
use chrono::DateTime;
use locstamp_core::{ChallengeResult, ClaimedLocation, Corroboration, LocstampError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub radius: f64,
}

impl From<WireLocation> for ClaimedLocation {
    fn from(location: WireLocation) -> Self {
        ClaimedLocation::new(location.latitude, location.longitude, location.radius)
    }
}

/// Corroborating sources as reported. Named IP geolocation sources sit
/// beside the fixed fields, one boolean each.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireCorroboration {
    #[serde(default)]
    pub knowloc: Option<bool>,
    #[serde(default)]
    pub uncertainty_km: f64,
    #[serde(default)]
    pub verified: bool,
    #[serde(flatten)]
    pub sources: BTreeMap<String, Value>,
}

impl From<WireCorroboration> for Corroboration {
    fn from(wire: WireCorroboration) -> Self {
        let mut ip_sources = BTreeMap::new();
        for (name, value) in wire.sources {
            match value.as_bool() {
                Some(agrees) => {
                    ip_sources.insert(name, agrees);
                }
                None => trace!(source = %name, "ignoring non-boolean corroboration entry"),
            }
        }

        Corroboration {
            know_location: wire.knowloc,
            ip_sources,
            uncertainty_km: wire.uncertainty_km,
            verified: wire.verified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireChallenge {
    pub id: String,
    /// RFC 3339
    pub start_time: String,
    pub challenger: String,
    pub challenger_claimed_location: WireLocation,
    pub prover_claimed_location: WireLocation,
    pub succeeded: bool,
    #[serde(default)]
    pub round_trip_micros: u64,
    pub message: String,
    pub signature: String,
    #[serde(default)]
    pub corroboration: WireCorroboration,
}

impl TryFrom<WireChallenge> for ChallengeResult {
    type Error = LocstampError;

    fn try_from(wire: WireChallenge) -> Result<Self, Self::Error> {
        let start_time = DateTime::parse_from_rfc3339(&wire.start_time)
            .map_err(|e| {
                LocstampError::Source(format!(
                    "challenge {} has invalid start_time {:?}: {}",
                    wire.id, wire.start_time, e
                ))
            })?
            .timestamp();

        Ok(ChallengeResult {
            id: wire.id,
            start_time,
            challenger: wire.challenger,
            challenger_claimed_location: wire.challenger_claimed_location.into(),
            prover_claimed_location: wire.prover_claimed_location.into(),
            succeeded: wire.succeeded,
            round_trip_micros: wire.round_trip_micros,
            message: wire.message,
            signature: wire.signature,
            corroboration: wire.corroboration.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireProver {
    pub id: String,
    pub claimed_location: WireLocation,
    #[serde(default)]
    pub challenges: Vec<WireChallenge>,
}

impl TryFrom<WireProver> for ProverRecord {
    type Error = LocstampError;

    fn try_from(wire: WireProver) -> Result<Self, Self::Error> {
        let challenges = wire
            .challenges
            .into_iter()
            .map(ChallengeResult::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProverRecord {
            id: wire.id,
            claimed_location: wire.claimed_location.into(),
            challenges,
        })
    }
}

/// Decodes a JSON array of provers as the watchtower service emits it.
pub fn parse_provers(json: &str) -> Result<Vec<ProverRecord>, LocstampError> {
    let wire: Vec<WireProver> =
        serde_json::from_str(json).map_err(|e| LocstampError::Source(format!("malformed prover list: {}", e)))?;
    wire.into_iter().map(ProverRecord::try_from).collect()
}
