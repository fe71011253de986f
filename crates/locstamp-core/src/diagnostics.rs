//! Append-only diagnostic records shared by verification and evaluation
//!
//! Serialized as one JSON object in insertion order. A key is written at
//! most once; later writes to the same key are dropped.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKey {
    // === Structure ===
    StructureError,
    UnsupportedVersion,
    UnexpectedPlugin,
    LocationNotPoint,
    InvalidTemporalFootprint,
    MissingSignals,

    // === Signatures ===
    ChallengerRecovered,
    ChallengerMismatch,
    ChallengerRecoveryError,
    WrapperSignersVerified,
    WrapperSignatureErrors,
    NoSignatures,

    // === Signals ===
    LatitudeOutOfRange,
    LongitudeOutOfRange,
    ChallengerLocationOutOfRange,
    ProverLocationOutOfRange,
    CorroborationFlagNotBoolean,
    ChallengeFailed,

    // === Credibility ===
    Error,
    Distance,
    UncertaintyMeters,
    EffectiveRadius,
    BaseSpatial,
    IpSourcesAgreed,
    IpSourcesTotal,
    IpSourceBonus,
    KnowLocationBonus,
    CorroborationBonus,
    TemporalOverlap,
    ChallengeFailedPenalty,
}

impl DiagnosticKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKey::StructureError => "structureError",
            DiagnosticKey::UnsupportedVersion => "unsupportedVersion",
            DiagnosticKey::UnexpectedPlugin => "unexpectedPlugin",
            DiagnosticKey::LocationNotPoint => "locationNotPoint",
            DiagnosticKey::InvalidTemporalFootprint => "invalidTemporalFootprint",
            DiagnosticKey::MissingSignals => "missingSignals",
            DiagnosticKey::ChallengerRecovered => "challengerRecovered",
            DiagnosticKey::ChallengerMismatch => "challengerMismatch",
            DiagnosticKey::ChallengerRecoveryError => "challengerRecoveryError",
            DiagnosticKey::WrapperSignersVerified => "wrapperSignersVerified",
            DiagnosticKey::WrapperSignatureErrors => "wrapperSignatureErrors",
            DiagnosticKey::NoSignatures => "noSignatures",
            DiagnosticKey::LatitudeOutOfRange => "latitudeOutOfRange",
            DiagnosticKey::LongitudeOutOfRange => "longitudeOutOfRange",
            DiagnosticKey::ChallengerLocationOutOfRange => "challengerLocationOutOfRange",
            DiagnosticKey::ProverLocationOutOfRange => "proverLocationOutOfRange",
            DiagnosticKey::CorroborationFlagNotBoolean => "corroborationFlagNotBoolean",
            DiagnosticKey::ChallengeFailed => "challengeFailed",
            DiagnosticKey::Error => "error",
            DiagnosticKey::Distance => "distance",
            DiagnosticKey::UncertaintyMeters => "uncertaintyMeters",
            DiagnosticKey::EffectiveRadius => "effectiveRadius",
            DiagnosticKey::BaseSpatial => "baseSpatial",
            DiagnosticKey::IpSourcesAgreed => "ipSourcesAgreed",
            DiagnosticKey::IpSourcesTotal => "ipSourcesTotal",
            DiagnosticKey::IpSourceBonus => "ipSourceBonus",
            DiagnosticKey::KnowLocationBonus => "knowLocationBonus",
            DiagnosticKey::CorroborationBonus => "corroborationBonus",
            DiagnosticKey::TemporalOverlap => "temporalOverlap",
            DiagnosticKey::ChallengeFailedPenalty => "challengeFailedPenalty",
        }
    }
}

impl fmt::Display for DiagnosticKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub key: DiagnosticKey,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` under `key` unless the key is already present.
    /// Returns whether the record was added.
    pub fn record(&mut self, key: DiagnosticKey, value: impl Into<Value>) -> bool {
        if self.contains(key) {
            tracing::trace!(key = %key, "diagnostic already recorded, keeping first value");
            return false;
        }
        self.entries.push(Diagnostic {
            key,
            value: value.into(),
        });
        true
    }

    /// Appends every record of `other` whose key is not yet present.
    pub fn extend(&mut self, other: Diagnostics) {
        for entry in other.entries {
            self.record(entry.key, entry.value);
        }
    }

    pub fn get(&self, key: DiagnosticKey) -> Option<&Value> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    pub fn contains(&self, key: DiagnosticKey) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Diagnostics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.key.as_str(), &entry.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Diagnostics {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DiagnosticsVisitor;

        impl<'de> Visitor<'de> for DiagnosticsVisitor {
            type Value = Diagnostics;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of diagnostic keys to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Diagnostics, A::Error> {
                let mut diagnostics = Diagnostics::new();
                while let Some((key, value)) = access.next_entry::<DiagnosticKey, Value>()? {
                    diagnostics.record(key, value);
                }
                Ok(diagnostics)
            }
        }

        deserializer.deserialize_map(DiagnosticsVisitor)
    }
}
