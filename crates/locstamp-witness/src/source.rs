//! Challenge sources and evidence selection
use crate::normalizer::normalize;
use crate::wire::parse_provers;
use locstamp_core::{BoxFuture, ChallengeResult, ClaimedLocation, LocstampError, RawSignalBundle};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Claim key carrying the prover the evidence was collected for
pub const PROVER_ID: &str = "proverId";

/// A prover and every challenge the watchtowers ran against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProverRecord {
    pub id: String,
    pub claimed_location: ClaimedLocation,
    #[serde(default)]
    pub challenges: Vec<ChallengeResult>,
}

/// Where challenge records come from (the watchtower service, a cache, fixtures)
pub trait ChallengeSource: Send + Sync {
    /// `Ok(None)` when the source knows no such prover
    fn prover<'a>(&'a self, prover_id: &'a str) -> BoxFuture<'a, Result<Option<ProverRecord>, LocstampError>>;
}

/// In-memory source keyed by prover id
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    provers: BTreeMap<String, ProverRecord>,
}

impl StaticSource {
    pub fn new(provers: impl IntoIterator<Item = ProverRecord>) -> Self {
        let mut source = Self::default();
        for prover in provers {
            source.insert(prover);
        }
        source
    }

    /// Loads a prover list in the watchtower wire format.
    pub fn from_json(json: &str) -> Result<Self, LocstampError> {
        Ok(Self::new(parse_provers(json)?))
    }

    /// Replaces any record with the same id
    pub fn insert(&mut self, prover: ProverRecord) {
        self.provers.insert(prover.id.clone(), prover);
    }

    pub fn len(&self) -> usize {
        self.provers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.provers.is_empty()
    }
}

impl ChallengeSource for StaticSource {
    fn prover<'a>(&'a self, prover_id: &'a str) -> BoxFuture<'a, Result<Option<ProverRecord>, LocstampError>> {
        let record = self.provers.get(prover_id).cloned();
        Box::pin(async move { Ok(record) })
    }
}

/// Most recent successful challenge. Among equal start times the one listed
/// last wins.
pub fn latest_successful(challenges: &[ChallengeResult]) -> Option<&ChallengeResult> {
    challenges
        .iter()
        .filter(|challenge| challenge.succeeded)
        .max_by_key(|challenge| challenge.start_time)
}

/// Fetches `prover_id` from `source`, selects its latest successful
/// challenge and normalizes it.
pub async fn collect(source: &dyn ChallengeSource, prover_id: &str) -> Result<RawSignalBundle, LocstampError> {
    let record = source
        .prover(prover_id)
        .await?
        .ok_or_else(|| LocstampError::ProverNotFound(prover_id.to_string()))?;

    let challenge = latest_successful(&record.challenges)
        .ok_or_else(|| LocstampError::NoSuccessfulChallenge(prover_id.to_string()))?;
    debug!(
        prover_id,
        challenge_id = %challenge.id,
        candidates = record.challenges.len(),
        "selected challenge"
    );

    let mut bundle = normalize(challenge.clone());
    bundle
        .claims
        .insert(PROVER_ID.to_string(), Value::String(prover_id.to_string()));

    info!(prover_id, timestamp = bundle.timestamp, "evidence collected");
    Ok(bundle)
}
