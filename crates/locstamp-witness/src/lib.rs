//! locstamp witness: watchtower challenge evidence as location stamps
//!
//! Watchtowers challenge a prover over the network and report the outcome.
//! This crate fetches those reports from a [`ChallengeSource`], picks the
//! latest successful challenge, normalizes it and exposes the whole
//! lifecycle as the `witnesschain` [`ProofPlugin`](locstamp_core::ProofPlugin).
//!
//! # Example
//!
//! ```ignore
//! use locstamp_core::{ExecutionContext, PipelineRunner};
//! use locstamp_stamp::{Ed25519Recovery, Ed25519Signer};
//! use locstamp_witness::{StaticSource, WitnessChainPlugin};
//!
//! let source = StaticSource::from_json(&provers_json)?;
//! let plugin = WitnessChainPlugin::new(Arc::new(source), Arc::new(Ed25519Recovery));
//! let runner = PipelineRunner::new(Arc::new(plugin), Arc::new(Ed25519Signer::from_seed(seed)));
//! let report = runner.run("prover-1", &claim, &ExecutionContext::new()).await?;
//! println!("{}", report.credibility);
//! ```

pub mod fixtures;
pub mod normalizer;
pub mod plugin;
pub mod source;
pub mod wire;

pub use normalizer::normalize;
pub use plugin::WitnessChainPlugin;
pub use source::{collect, latest_successful, ChallengeSource, ProverRecord, StaticSource};
pub use wire::{parse_provers, WireChallenge, WireCorroboration, WireLocation, WireProver};

pub const PLUGIN_NAME: &str = "witnesschain";
pub const PLUGIN_VERSION: &str = "0.1.0";
