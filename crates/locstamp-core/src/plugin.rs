//! Plugin contract: one implementation per evidence source
use crate::capability::Signer;
use crate::data_model::{Claim, RawSignalBundle};
use crate::error::LocstampError;
use crate::results::{CredibilityVector, VerificationResult};
use crate::stamp::{SignedStamp, UnsignedStamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Operations a plugin may provide to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Collect,
    Create,
    Sign,
    Verify,
    Evaluate,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::Collect,
        Capability::Create,
        Capability::Sign,
        Capability::Verify,
        Capability::Evaluate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Collect => "collect",
            Capability::Create => "create",
            Capability::Sign => "sign",
            Capability::Verify => "verify",
            Capability::Evaluate => "evaluate",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host environments a plugin can run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    Server,
    Browser,
    Mobile,
}

/// Contract between the host and one evidence source.
pub trait ProofPlugin: Send + Sync {
    /// Plugin identifier (ex: "witnesschain")
    fn name(&self) -> &'static str;

    fn version(&self) -> &'static str;

    fn runtimes(&self) -> &'static [Runtime];

    fn capabilities(&self) -> &'static [Capability];

    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Fetches evidence for one prover and normalizes it
    fn collect<'a>(&'a self, prover_id: &'a str) -> BoxFuture<'a, Result<RawSignalBundle, LocstampError>>;

    fn create(&self, bundle: &RawSignalBundle) -> Result<UnsignedStamp, LocstampError>;

    fn sign(&self, stamp: &UnsignedStamp, signer: &dyn Signer) -> Result<SignedStamp, LocstampError>;

    /// Never fails; problems are reported inside the result
    fn verify(&self, stamp: &SignedStamp) -> VerificationResult;

    fn evaluate(&self, stamp: &SignedStamp, claim: &Claim) -> CredibilityVector;
}
