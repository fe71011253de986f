//! Structural checks: protocol tags, geometry, window, minimum signals
use crate::VerifierConfig;
use locstamp_core::{DiagnosticKey, Diagnostics, SignalKey, SignedStamp};
use serde_json::json;

pub(crate) fn check(stamp: &SignedStamp, config: &VerifierConfig, details: &mut Diagnostics) -> bool {
    let unsigned = &stamp.stamp;
    let mut valid = true;

    if unsigned.lp_version != config.supported_version {
        details.record(
            DiagnosticKey::UnsupportedVersion,
            json!({ "expected": config.supported_version, "found": unsigned.lp_version }),
        );
        valid = false;
    }

    if unsigned.plugin.name != config.expected_plugin {
        details.record(
            DiagnosticKey::UnexpectedPlugin,
            json!({ "expected": config.expected_plugin, "found": unsigned.plugin.name }),
        );
        valid = false;
    }

    if unsigned.location.as_point().is_none() {
        details.record(DiagnosticKey::LocationNotPoint, unsigned.location.kind());
        valid = false;
    }

    if unsigned.temporal_footprint.is_empty() {
        details.record(
            DiagnosticKey::InvalidTemporalFootprint,
            json!({
                "start": unsigned.temporal_footprint.start,
                "end": unsigned.temporal_footprint.end,
            }),
        );
        valid = false;
    }

    if unsigned.signals.evidence.is_none() {
        let missing: Vec<&str> = [SignalKey::ChallengeId, SignalKey::Success]
            .iter()
            .filter(|key| !unsigned.signals.has(**key))
            .map(SignalKey::as_str)
            .collect();
        if !missing.is_empty() {
            details.record(DiagnosticKey::MissingSignals, missing);
            valid = false;
        }
    }

    valid
}
