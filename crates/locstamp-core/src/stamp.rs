//! Location stamps: the canonical record built from one piece of evidence
use crate::data_model::{ChallengeResult, ClaimedLocation, Corroboration};
use crate::error::LocstampError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Location protocol version carried by every stamp
pub const LP_VERSION: &str = "0.2";
pub const LOCATION_TYPE_POINT: &str = "geojson-point";
/// WGS84
pub const SRS_WGS84: &str = "EPSG:4326";

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub longitude: f64,
    pub latitude: f64,
}

/// GeoJSON geometry. Coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Vec<f64> },
    LineString { coordinates: Vec<Vec<f64>> },
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
}

impl Geometry {
    pub fn point(longitude: f64, latitude: f64) -> Self {
        Geometry::Point {
            coordinates: vec![longitude, latitude],
        }
    }

    /// The position if this geometry is a point with at least two coordinates.
    pub fn as_point(&self) -> Option<Point> {
        match self {
            Geometry::Point { coordinates } if coordinates.len() >= 2 => Some(Point {
                longitude: coordinates[0],
                latitude: coordinates[1],
            }),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::LineString { .. } => "LineString",
            Geometry::Polygon { .. } => "Polygon",
        }
    }
}

/// Half-open interval `[start, end)` in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Seconds shared by both windows, zero when disjoint.
    pub fn overlap(&self, other: &TimeWindow) -> i64 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end <= start {
            0
        } else {
            end.saturating_sub(start)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRef {
    pub name: String,
    pub version: String,
}

impl PluginRef {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Known keys of the flattened `signals` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKey {
    ChallengeId,
    Challenger,
    ChallengerLocation,
    ProverLocation,
    Success,
    RoundTripMicros,
    Corroboration,
    UncertaintyKm,
    Evidence,
}

impl SignalKey {
    pub const ALL: [SignalKey; 9] = [
        SignalKey::ChallengeId,
        SignalKey::Challenger,
        SignalKey::ChallengerLocation,
        SignalKey::ProverLocation,
        SignalKey::Success,
        SignalKey::RoundTripMicros,
        SignalKey::Corroboration,
        SignalKey::UncertaintyKm,
        SignalKey::Evidence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKey::ChallengeId => "challengeId",
            SignalKey::Challenger => "challenger",
            SignalKey::ChallengerLocation => "challengerLocation",
            SignalKey::ProverLocation => "proverLocation",
            SignalKey::Success => "success",
            SignalKey::RoundTripMicros => "roundTripMicros",
            SignalKey::Corroboration => "corroboration",
            SignalKey::UncertaintyKm => "uncertaintyKm",
            SignalKey::Evidence => "evidence",
        }
    }

    pub fn from_name(name: &str) -> Option<SignalKey> {
        SignalKey::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

/// Evidence flattened for verification and evaluation.
///
/// Known keys are typed; anything else lands in `extra` and is serialized
/// at the same level, so the wire form stays a single flat object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenger_location: Option<ClaimedLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prover_location: Option<ClaimedLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_trip_micros: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corroboration: Option<Corroboration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<ChallengeResult>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Signals {
    pub fn has(&self, key: SignalKey) -> bool {
        match key {
            SignalKey::ChallengeId => self.challenge_id.is_some(),
            SignalKey::Challenger => self.challenger.is_some(),
            SignalKey::ChallengerLocation => self.challenger_location.is_some(),
            SignalKey::ProverLocation => self.prover_location.is_some(),
            SignalKey::Success => self.success.is_some(),
            SignalKey::RoundTripMicros => self.round_trip_micros.is_some(),
            SignalKey::Corroboration => self.corroboration.is_some(),
            SignalKey::UncertaintyKm => self.uncertainty_km.is_some(),
            SignalKey::Evidence => self.evidence.is_some(),
        }
    }

    /// Adds an extra diagnostic signal. Known key names and keys already
    /// present are refused.
    pub fn insert_extra(&mut self, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if SignalKey::from_name(&key).is_some() || self.extra.contains_key(&key) {
            return false;
        }
        self.extra.insert(key, value);
        true
    }

    /// Outcome of the challenge, from the flattened flag or the embedded evidence.
    pub fn challenge_succeeded(&self) -> Option<bool> {
        self.success
            .or_else(|| self.evidence.as_ref().map(|evidence| evidence.succeeded))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedStamp {
    pub lp_version: String,
    pub location_type: String,
    pub location: Geometry,
    pub srs: String,
    pub temporal_footprint: TimeWindow,
    pub plugin: PluginRef,
    pub signals: Signals,
}

impl UnsignedStamp {
    /// A stamp at a WGS84 point with the current protocol tags.
    pub fn at_point(plugin: PluginRef, point: Point, window: TimeWindow, signals: Signals) -> Self {
        Self {
            lp_version: LP_VERSION.to_string(),
            location_type: LOCATION_TYPE_POINT.to_string(),
            location: Geometry::point(point.longitude, point.latitude),
            srs: SRS_WGS84.to_string(),
            temporal_footprint: window,
            plugin,
            signals,
        }
    }

    /// Order-stable JSON: struct fields in declaration order, maps sorted by key.
    pub fn canonical_json(&self) -> Result<String, LocstampError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn digest(&self) -> Result<String, LocstampError> {
        let json = self.canonical_json()?;
        Ok(format!("blake3:{}", blake3::hash(json.as_bytes())))
    }
}

impl AsRef<UnsignedStamp> for UnsignedStamp {
    fn as_ref(&self) -> &UnsignedStamp {
        self
    }
}

/// One wrapper signature over the canonical unsigned stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampSignature {
    #[serde(rename = "signerIdentity")]
    pub signer: String,
    #[serde(rename = "algorithmTag")]
    pub algorithm: String,
    #[serde(rename = "signatureValue")]
    pub value: String,
    /// Unix seconds
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedStamp {
    #[serde(flatten)]
    pub stamp: UnsignedStamp,
    #[serde(default)]
    pub signatures: Vec<StampSignature>,
}

impl SignedStamp {
    /// Wraps a stamp with no signatures yet.
    pub fn unsigned(stamp: UnsignedStamp) -> Self {
        Self {
            stamp,
            signatures: Vec::new(),
        }
    }
}

impl AsRef<UnsignedStamp> for SignedStamp {
    fn as_ref(&self) -> &UnsignedStamp {
        &self.stamp
    }
}
