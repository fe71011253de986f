//! The witnesschain proof plugin
use crate::source::{collect, ChallengeSource};
use crate::{PLUGIN_NAME, PLUGIN_VERSION};
use locstamp_core::{
    BoxFuture, Capability, Claim, CredibilityVector, LocstampError, PluginRef, ProofPlugin,
    RawSignalBundle, Runtime, SignatureRecovery, SignedStamp, Signer, UnsignedStamp,
    VerificationResult,
};
use locstamp_credibility::{CredibilityEvaluator, CredibilityProfile};
use locstamp_stamp::StampBuilder;
use locstamp_verify::{StampVerifier, VerifierConfig};
use std::sync::Arc;

const RUNTIMES: &[Runtime] = &[Runtime::Server, Runtime::Browser];

/// Binds a challenge source, the stamp builder, verifier and evaluator
/// behind the `ProofPlugin` contract.
pub struct WitnessChainPlugin {
    source: Arc<dyn ChallengeSource>,
    builder: StampBuilder,
    verifier: StampVerifier,
    evaluator: CredibilityEvaluator,
}

impl WitnessChainPlugin {
    pub fn new(source: Arc<dyn ChallengeSource>, recovery: Arc<dyn SignatureRecovery>) -> Self {
        Self::with_profile(source, recovery, CredibilityProfile::default())
    }

    pub fn with_profile(
        source: Arc<dyn ChallengeSource>,
        recovery: Arc<dyn SignatureRecovery>,
        profile: CredibilityProfile,
    ) -> Self {
        Self {
            source,
            builder: StampBuilder::new(PluginRef::new(PLUGIN_NAME, PLUGIN_VERSION)),
            verifier: StampVerifier::new(recovery, VerifierConfig::for_plugin(PLUGIN_NAME)),
            evaluator: CredibilityEvaluator::new(profile),
        }
    }

    pub fn profile(&self) -> &CredibilityProfile {
        self.evaluator.profile()
    }
}

impl ProofPlugin for WitnessChainPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn version(&self) -> &'static str {
        PLUGIN_VERSION
    }

    fn runtimes(&self) -> &'static [Runtime] {
        RUNTIMES
    }

    fn capabilities(&self) -> &'static [Capability] {
        &Capability::ALL
    }

    fn collect<'a>(&'a self, prover_id: &'a str) -> BoxFuture<'a, Result<RawSignalBundle, LocstampError>> {
        Box::pin(collect(self.source.as_ref(), prover_id))
    }

    fn create(&self, bundle: &RawSignalBundle) -> Result<UnsignedStamp, LocstampError> {
        self.builder.build(bundle)
    }

    fn sign(&self, stamp: &UnsignedStamp, signer: &dyn Signer) -> Result<SignedStamp, LocstampError> {
        locstamp_stamp::sign(stamp, signer)
    }

    fn verify(&self, stamp: &SignedStamp) -> VerificationResult {
        self.verifier.verify(stamp)
    }

    fn evaluate(&self, stamp: &SignedStamp, claim: &Claim) -> CredibilityVector {
        self.evaluator.evaluate(stamp, claim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use locstamp_stamp::Ed25519Recovery;

    #[test]
    fn test_metadata() {
        let plugin = WitnessChainPlugin::new(Arc::new(StaticSource::default()), Arc::new(Ed25519Recovery));
        assert_eq!(plugin.name(), "witnesschain");
        assert_eq!(plugin.version(), "0.1.0");
        assert_eq!(plugin.runtimes(), &[Runtime::Server, Runtime::Browser]);
        assert!(Capability::ALL.iter().all(|capability| plugin.supports(*capability)));
        assert_eq!(plugin.profile().name, "standard@1.0");
    }
}
