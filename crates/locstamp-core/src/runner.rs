//! Pipeline Runner: collect → create → sign → verify → evaluate over one plugin
use crate::capability::Signer;
use crate::context::ExecutionContext;
use crate::data_model::{Claim, RawSignalBundle};
use crate::error::LocstampError;
use crate::plugin::{Capability, ProofPlugin};
use crate::results::{CredibilityVector, VerificationResult};
use crate::stamp::SignedStamp;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn, Instrument};

/// Hash trail of one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageReceipt {
    pub id: String,
    pub in_hash: String,
    pub out_hash: String,
    pub deterministic: bool,
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub trace_id: String,
    pub pipeline_id: String,
    pub bundle: RawSignalBundle,
    pub stamp: SignedStamp,
    pub verification: VerificationResult,
    pub credibility: CredibilityVector,
    pub receipts: Vec<StageReceipt>,
}

pub struct PipelineRunner {
    plugin: Arc<dyn ProofPlugin>,
    signer: Arc<dyn Signer>,
    pipeline_id: String,
}

impl PipelineRunner {
    pub fn new(plugin: Arc<dyn ProofPlugin>, signer: Arc<dyn Signer>) -> Self {
        let pipeline_id = format!(
            "{}:{}",
            plugin.name(),
            Capability::ALL
                .iter()
                .map(Capability::as_str)
                .collect::<Vec<_>>()
                .join("→")
        );

        Self {
            plugin,
            signer,
            pipeline_id,
        }
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    /// Collects evidence for `prover_id` and runs it through every stage.
    pub async fn run(
        &self,
        prover_id: &str,
        claim: &Claim,
        ctx: &ExecutionContext,
    ) -> Result<PipelineReport, LocstampError> {
        self.require(Capability::Collect)?;
        let span = tracing::info_span!("pipeline", trace_id = %ctx.trace_id, plugin = self.plugin.name());

        let start = Instant::now();
        let bundle = self
            .plugin
            .collect(prover_id)
            .instrument(span.clone())
            .await?;
        let receipt = StageReceipt {
            id: Capability::Collect.to_string(),
            in_hash: hash_bytes(prover_id.as_bytes()),
            out_hash: hash_json(&bundle)?,
            deterministic: false,
            latency_ms: start.elapsed().as_millis() as u64,
        };

        let _entered = span.enter();
        debug!(prover_id, out_hash = %receipt.out_hash, "evidence collected");
        self.run_stages(bundle, claim, ctx, vec![receipt])
    }

    /// Runs every stage after collection on an existing bundle.
    pub fn run_bundle(
        &self,
        bundle: RawSignalBundle,
        claim: &Claim,
        ctx: &ExecutionContext,
    ) -> Result<PipelineReport, LocstampError> {
        let span = tracing::info_span!("pipeline", trace_id = %ctx.trace_id, plugin = self.plugin.name());
        let _entered = span.enter();
        self.run_stages(bundle, claim, ctx, Vec::new())
    }

    fn run_stages(
        &self,
        bundle: RawSignalBundle,
        claim: &Claim,
        ctx: &ExecutionContext,
        mut receipts: Vec<StageReceipt>,
    ) -> Result<PipelineReport, LocstampError> {
        for capability in [Capability::Create, Capability::Sign, Capability::Verify, Capability::Evaluate] {
            self.require(capability)?;
        }
        if !ctx.metadata.is_empty() {
            debug!(metadata = ?ctx.metadata, "run metadata");
        }

        let start = Instant::now();
        let unsigned = self.plugin.create(&bundle)?;
        receipts.push(self.receipt(Capability::Create, &bundle, &unsigned, true, start)?);

        let start = Instant::now();
        let stamp = self.plugin.sign(&unsigned, self.signer.as_ref())?;
        // signatures carry a wall-clock timestamp
        receipts.push(self.receipt(Capability::Sign, &unsigned, &stamp, false, start)?);

        let start = Instant::now();
        let verification = self.plugin.verify(&stamp);
        receipts.push(self.receipt(Capability::Verify, &stamp, &verification, true, start)?);
        if !verification.valid {
            warn!(summary = %verification.summary(), "stamp failed verification");
        }

        let start = Instant::now();
        let credibility = self.plugin.evaluate(&stamp, claim);
        receipts.push(self.receipt(Capability::Evaluate, &stamp, &credibility, true, start)?);

        info!(
            pipeline = %self.pipeline_id,
            valid = verification.valid,
            score = credibility.score,
            supports_claim = credibility.supports_claim,
            "pipeline complete"
        );

        Ok(PipelineReport {
            trace_id: ctx.trace_id.clone(),
            pipeline_id: self.pipeline_id.clone(),
            bundle,
            stamp,
            verification,
            credibility,
            receipts,
        })
    }

    fn require(&self, capability: Capability) -> Result<(), LocstampError> {
        if self.plugin.supports(capability) {
            Ok(())
        } else {
            Err(LocstampError::Unsupported {
                plugin: self.plugin.name().to_string(),
                capability: capability.to_string(),
            })
        }
    }

    fn receipt<I: Serialize, O: Serialize>(
        &self,
        capability: Capability,
        input: &I,
        output: &O,
        deterministic: bool,
        start: Instant,
    ) -> Result<StageReceipt, LocstampError> {
        let receipt = StageReceipt {
            id: capability.to_string(),
            in_hash: hash_json(input)?,
            out_hash: hash_json(output)?,
            deterministic,
            latency_ms: start.elapsed().as_millis() as u64,
        };
        debug!(stage = %receipt.id, out_hash = %receipt.out_hash, latency_ms = receipt.latency_ms, "stage complete");
        Ok(receipt)
    }
}

pub fn hash_bytes(data: &[u8]) -> String {
    format!("blake3:{}", blake3::hash(data))
}

pub fn hash_json<T: Serialize>(value: &T) -> Result<String, LocstampError> {
    let bytes = serde_json::to_vec(value)?;
    Ok(hash_bytes(&bytes))
}
