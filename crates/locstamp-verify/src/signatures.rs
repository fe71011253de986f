//! Signature checks: embedded challenger signature and wrapper signatures
use locstamp_core::{DiagnosticKey, Diagnostics, SignatureRecovery, SignedStamp};
use serde_json::{json, Value};
use tracing::debug;

pub(crate) fn check(stamp: &SignedStamp, recovery: &dyn SignatureRecovery, details: &mut Diagnostics) -> bool {
    let evidence = stamp.stamp.signals.evidence.as_ref();
    if evidence.is_none() && stamp.signatures.is_empty() {
        details.record(DiagnosticKey::NoSignatures, true);
        return false;
    }

    let mut valid = true;

    if let Some(evidence) = evidence {
        match recovery.recover(&evidence.message, &evidence.signature) {
            Ok(recovered) if same_identity(&recovered, &evidence.challenger) => {
                details.record(DiagnosticKey::ChallengerRecovered, recovered);
            }
            Ok(recovered) => {
                details.record(
                    DiagnosticKey::ChallengerMismatch,
                    json!({ "expected": evidence.challenger, "recovered": recovered }),
                );
                valid = false;
            }
            Err(e) => {
                details.record(DiagnosticKey::ChallengerRecoveryError, e.to_string());
                valid = false;
            }
        }
    }

    if stamp.signatures.is_empty() {
        return valid;
    }

    let message = match stamp.stamp.canonical_json() {
        Ok(message) => message,
        Err(e) => {
            details.record(DiagnosticKey::WrapperSignatureErrors, vec![json!({ "error": e.to_string() })]);
            return false;
        }
    };

    let mut verified: Vec<Value> = Vec::new();
    let mut failures: Vec<Value> = Vec::new();
    for signature in &stamp.signatures {
        match recovery.recover(&message, &signature.value) {
            Ok(recovered) if same_identity(&recovered, &signature.signer) => {
                verified.push(Value::String(recovered));
            }
            Ok(recovered) => failures.push(json!({
                "signer": signature.signer,
                "recovered": recovered,
            })),
            Err(e) => failures.push(json!({
                "signer": signature.signer,
                "error": e.to_string(),
            })),
        }
    }
    debug!(verified = verified.len(), failed = failures.len(), "wrapper signatures checked");

    if !verified.is_empty() {
        details.record(DiagnosticKey::WrapperSignersVerified, verified);
    }
    if !failures.is_empty() {
        details.record(DiagnosticKey::WrapperSignatureErrors, failures);
        valid = false;
    }

    valid
}

/// Identities are hex addresses; case carries no meaning.
fn same_identity(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
