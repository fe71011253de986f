//! Unified Error Model
use thiserror::Error;

/// Failures raised by the injected signing and recovery capabilities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("SIGN/FAILED: {0}")]
    Signing(String),

    #[error("RECOVER/MALFORMED: {0}")]
    MalformedSignature(String),

    #[error("RECOVER/INVALID: {0}")]
    InvalidSignature(String),

    #[error("KEY/INVALID: {0}")]
    InvalidKey(String),
}

#[derive(Error, Debug)]
pub enum LocstampError {
    #[error("EVIDENCE/MISSING: bundle from {0} carries no challenge evidence")]
    MissingEvidence(String),

    #[error("SOURCE/PROVER_NOT_FOUND: {0}")]
    ProverNotFound(String),

    #[error("SOURCE/NO_SUCCESSFUL_CHALLENGE: prover {0}")]
    NoSuccessfulChallenge(String),

    #[error("SOURCE/FETCH: {0}")]
    Source(String),

    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error("CAPABILITY/UNSUPPORTED: {plugin} does not provide {capability}")]
    Unsupported { plugin: String, capability: String },

    #[error("REGISTRY/DUPLICATE: {0}")]
    DuplicatePlugin(String),

    #[error("SERIALIZE/{0}")]
    Serialize(String),

    #[error("CONFIG/{0}")]
    Config(String),
}

impl From<serde_json::Error> for LocstampError {
    fn from(err: serde_json::Error) -> Self {
        LocstampError::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_display() {
        let err = LocstampError::ProverNotFound("prover-9".to_string());
        assert_eq!(err.to_string(), "SOURCE/PROVER_NOT_FOUND: prover-9");

        let err: LocstampError = CapabilityError::Signing("hsm offline".to_string()).into();
        assert_eq!(err.to_string(), "SIGN/FAILED: hsm offline");
    }
}
