//! Stamp Signer: wrapper signatures over the canonical unsigned stamp
use chrono::Utc;
use locstamp_core::{LocstampError, SignedStamp, Signer, StampSignature, UnsignedStamp};

/// Signs a fresh stamp.
pub fn sign(stamp: &UnsignedStamp, signer: &dyn Signer) -> Result<SignedStamp, LocstampError> {
    countersign(&SignedStamp::unsigned(stamp.clone()), signer)
}

/// Appends one more signature over the same unsigned payload.
pub fn countersign(stamp: &SignedStamp, signer: &dyn Signer) -> Result<SignedStamp, LocstampError> {
    let message = stamp.stamp.canonical_json()?;
    let value = signer.sign(&message)?;

    let mut signatures = stamp.signatures.clone();
    signatures.push(StampSignature {
        signer: signer.identity().to_string(),
        algorithm: signer.algorithm().to_string(),
        value,
        timestamp: Utc::now().timestamp(),
    });
    tracing::debug!(
        signer = signer.identity(),
        count = signatures.len(),
        "stamp signed"
    );

    Ok(SignedStamp {
        stamp: stamp.stamp.clone(),
        signatures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use locstamp_core::{CapabilityError, PluginRef, Point, Signals, TimeWindow};
    use std::sync::Mutex;

    struct RecordingSigner {
        seen: Mutex<Vec<String>>,
    }

    impl Signer for RecordingSigner {
        fn identity(&self) -> &str {
            "0xrecorder"
        }

        fn algorithm(&self) -> &str {
            "test"
        }

        fn sign(&self, message: &str) -> Result<String, CapabilityError> {
            self.seen.lock().unwrap().push(message.to_string());
            Ok(format!("sig:{}", message.len()))
        }
    }

    struct FailingSigner;

    impl Signer for FailingSigner {
        fn identity(&self) -> &str {
            "0xbroken"
        }

        fn algorithm(&self) -> &str {
            "test"
        }

        fn sign(&self, _message: &str) -> Result<String, CapabilityError> {
            Err(CapabilityError::Signing("key unavailable".to_string()))
        }
    }

    fn stamp() -> UnsignedStamp {
        UnsignedStamp::at_point(
            PluginRef::new("witnesschain", "0.1.0"),
            Point {
                longitude: 2.35,
                latitude: 48.85,
            },
            TimeWindow::new(0, 10),
            Signals::default(),
        )
    }

    #[test]
    fn test_signs_canonical_json() {
        let signer = RecordingSigner {
            seen: Mutex::new(Vec::new()),
        };
        let unsigned = stamp();
        let signed = sign(&unsigned, &signer).unwrap();

        assert_eq!(signed.stamp, unsigned);
        assert_eq!(signed.signatures.len(), 1);
        assert_eq!(signed.signatures[0].signer, "0xrecorder");
        assert_eq!(signed.signatures[0].algorithm, "test");
        assert_eq!(signer.seen.lock().unwrap()[0], unsigned.canonical_json().unwrap());
    }

    #[test]
    fn test_countersign_appends_without_mutating() {
        let signer = RecordingSigner {
            seen: Mutex::new(Vec::new()),
        };
        let once = sign(&stamp(), &signer).unwrap();
        let twice = countersign(&once, &signer).unwrap();

        assert_eq!(once.signatures.len(), 1);
        assert_eq!(twice.signatures.len(), 2);
        let seen = signer.seen.lock().unwrap();
        assert_eq!(seen[0], seen[1]);
    }

    #[test]
    fn test_signer_failure_propagates() {
        let err = sign(&stamp(), &FailingSigner).unwrap_err();
        assert_eq!(err.to_string(), "SIGN/FAILED: key unavailable");
    }
}
