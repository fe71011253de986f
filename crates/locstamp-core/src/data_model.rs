//! Data Model: ChallengeResult, Corroboration, RawSignalBundle, Claim
use crate::stamp::{Geometry, TimeWindow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A self-reported position with a tolerance radius in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
}

impl ClaimedLocation {
    pub fn new(latitude: f64, longitude: f64, radius: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius,
        }
    }

    /// Both coordinates lie within WGS84 bounds. NaN is never in range.
    pub fn is_in_range(&self) -> bool {
        latitude_in_range(self.latitude) && longitude_in_range(self.longitude)
    }
}

pub fn latitude_in_range(latitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude)
}

pub fn longitude_in_range(longitude: f64) -> bool {
    (-180.0..=180.0).contains(&longitude)
}

/// Independent signals attached to one challenge outcome.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corroboration {
    /// Verdict of the primary know-location verifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub know_location: Option<bool>,
    /// Named IP geolocation sources and whether each agrees
    #[serde(default)]
    pub ip_sources: BTreeMap<String, bool>,
    pub uncertainty_km: f64,
    pub verified: bool,
}

impl Corroboration {
    /// `(agreed, total)` over the geolocation sources present in the record.
    pub fn ip_agreement(&self) -> (usize, usize) {
        let agreed = self.ip_sources.values().filter(|agrees| **agrees).count();
        (agreed, self.ip_sources.len())
    }
}

/// One completed proof-of-location attempt as reported by a watchtower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResult {
    pub id: String,
    /// Unix seconds
    pub start_time: i64,
    pub challenger: String,
    pub challenger_claimed_location: ClaimedLocation,
    pub prover_claimed_location: ClaimedLocation,
    pub succeeded: bool,
    pub round_trip_micros: u64,
    /// Exact string the challenger signed
    pub message: String,
    pub signature: String,
    pub corroboration: Corroboration,
}

/// Transport-neutral container handed from collection to stamp creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSignalBundle {
    pub plugin: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<ChallengeResult>,
    #[serde(default)]
    pub claims: BTreeMap<String, serde_json::Value>,
}

/// The spatial/temporal assertion a stamp is evaluated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub location: Geometry,
    /// Tolerance in meters
    pub radius: f64,
    pub time: TimeWindow,
}

impl Claim {
    pub fn at_point(longitude: f64, latitude: f64, radius: f64, time: TimeWindow) -> Self {
        Self {
            location: Geometry::point(longitude, latitude),
            radius,
            time,
        }
    }
}
