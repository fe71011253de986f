//! Signal sanity: coordinate ranges and the challenge outcome
use locstamp_core::data_model::{latitude_in_range, longitude_in_range};
use locstamp_core::{DiagnosticKey, Diagnostics, SignedStamp};
use serde_json::{json, Value};

pub(crate) fn check(stamp: &SignedStamp, details: &mut Diagnostics) -> bool {
    let unsigned = &stamp.stamp;
    let signals = &unsigned.signals;
    let mut consistent = true;

    if let Some(point) = unsigned.location.as_point() {
        if !latitude_in_range(point.latitude) {
            details.record(DiagnosticKey::LatitudeOutOfRange, number(point.latitude));
            consistent = false;
        }
        if !longitude_in_range(point.longitude) {
            details.record(DiagnosticKey::LongitudeOutOfRange, number(point.longitude));
            consistent = false;
        }
    }

    let claimed = [
        (DiagnosticKey::ChallengerLocationOutOfRange, signals.challenger_location),
        (DiagnosticKey::ProverLocationOutOfRange, signals.prover_location),
    ];
    for (key, location) in claimed {
        if let Some(location) = location.filter(|location| !location.is_in_range()) {
            details.record(
                key,
                json!({
                    "latitude": number(location.latitude),
                    "longitude": number(location.longitude),
                }),
            );
            consistent = false;
        }
    }

    if signals.challenge_succeeded() == Some(false) {
        // warning only
        details.record(DiagnosticKey::ChallengeFailed, true);
    }

    consistent
}

/// Corroboration records carrying a knowLocation flag on the wire
const FLAG_PARENTS: [&str; 2] = ["/signals/corroboration", "/signals/evidence/corroboration"];
const KNOW_LOCATION: &str = "knowLocation";

/// Removes knowLocation flags that are neither boolean nor null from a
/// wire-form stamp, so the rest of the document still decodes. Returns
/// false when any flag was removed.
pub(crate) fn take_wire_flags(value: &mut Value, details: &mut Diagnostics) -> bool {
    let mut consistent = true;
    for parent in FLAG_PARENTS {
        let Some(corroboration) = value.pointer_mut(parent).and_then(Value::as_object_mut) else {
            continue;
        };
        let malformed = matches!(
            corroboration.get(KNOW_LOCATION),
            Some(flag) if !flag.is_boolean() && !flag.is_null()
        );
        if let Some(flag) = malformed.then(|| corroboration.remove(KNOW_LOCATION)).flatten() {
            details.record(DiagnosticKey::CorroborationFlagNotBoolean, flag);
            consistent = false;
        }
    }
    consistent
}

/// NaN and infinities have no JSON number form.
fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(value.to_string()))
}
