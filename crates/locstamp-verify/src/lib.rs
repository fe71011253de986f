//! locstamp verify: checks a signed stamp without ever failing the call
//!
//! Three independent categories are evaluated on every call and reported
//! together:
//!
//! ```text
//! SignedStamp ─┬─ structure  → structureValid
//!              ├─ signatures → signaturesValid   (challenger + wrapper signatures)
//!              └─ signals    → signalsConsistent
//!                                  ↓
//!                 valid = structure ∧ signatures ∧ signals
//! ```
//!
//! Which signer identities are trusted is left to the caller: any signature
//! that recovers to its declared signer is accepted.

mod signals;
mod signatures;
mod structure;

use locstamp_core::{
    DiagnosticKey, Diagnostics, SignatureRecovery, SignedStamp, VerificationResult, LP_VERSION,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    pub supported_version: String,
    pub expected_plugin: String,
}

impl VerifierConfig {
    /// Current protocol version, stamps produced by `plugin`.
    pub fn for_plugin(plugin: impl Into<String>) -> Self {
        Self {
            supported_version: LP_VERSION.to_string(),
            expected_plugin: plugin.into(),
        }
    }
}

pub struct StampVerifier {
    recovery: Arc<dyn SignatureRecovery>,
    config: VerifierConfig,
}

impl StampVerifier {
    pub fn new(recovery: Arc<dyn SignatureRecovery>, config: VerifierConfig) -> Self {
        Self { recovery, config }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn verify(&self, stamp: &SignedStamp) -> VerificationResult {
        let mut details = Diagnostics::new();

        let structure_valid = structure::check(stamp, &self.config, &mut details);
        let signatures_valid = signatures::check(stamp, self.recovery.as_ref(), &mut details);
        let signals_consistent = signals::check(stamp, &mut details);

        let result = VerificationResult::from_checks(
            structure_valid,
            signatures_valid,
            signals_consistent,
            details,
        );
        if result.valid {
            debug!(summary = %result.summary(), "stamp verified");
        } else {
            warn!(summary = %result.summary(), "stamp rejected");
        }
        result
    }

    /// Verifies a stamp in wire form. Documents that do not decode as a
    /// stamp still produce a populated, invalid result. A malformed
    /// knowLocation flag fails signal consistency only.
    pub fn verify_json(&self, value: &Value) -> VerificationResult {
        let mut details = Diagnostics::new();
        let mut value = value.clone();
        let flags_ok = signals::take_wire_flags(&mut value, &mut details);

        match serde_json::from_value::<SignedStamp>(value) {
            Ok(stamp) => {
                let checked = self.verify(&stamp);
                details.extend(checked.details);
                VerificationResult::from_checks(
                    checked.structure_valid,
                    checked.signatures_valid,
                    checked.signals_consistent && flags_ok,
                    details,
                )
            }
            Err(e) => {
                details.record(DiagnosticKey::StructureError, e.to_string());
                warn!(error = %e, "stamp did not decode");
                VerificationResult::from_checks(false, false, false, details)
            }
        }
    }
}

/// Verifies with a one-off verifier.
pub fn verify(
    stamp: &SignedStamp,
    recovery: Arc<dyn SignatureRecovery>,
    config: VerifierConfig,
) -> VerificationResult {
    StampVerifier::new(recovery, config).verify(stamp)
}
