//! Runs the sample Empire State Building evidence through the full pipeline
//! and prints the report as JSON.
use locstamp_core::telemetry::{init_logging, LogFormat};
use locstamp_core::{Claim, ExecutionContext, LocstampError, PipelineRunner, TimeWindow};
use locstamp_stamp::{Ed25519Recovery, Ed25519Signer};
use locstamp_witness::fixtures::{self, EMPIRE_STATE, SAMPLE_PROVER_ID, SAMPLE_START_TIME};
use locstamp_witness::{StaticSource, WitnessChainPlugin};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), LocstampError> {
    // LOCSTAMP_LOG_FORMAT=json for machine-readable logs
    let format = match std::env::var("LOCSTAMP_LOG_FORMAT").as_deref() {
        Ok("json") => LogFormat::Json,
        _ => LogFormat::Human,
    };
    init_logging(format, "info")?;

    let stamper = match std::env::var("LOCSTAMP_SIGNER_SEED") {
        Ok(seed) => Ed25519Signer::from_hex(&seed)?,
        Err(_) => Ed25519Signer::from_seed([1u8; 32]),
    };
    let challenger = Ed25519Signer::from_seed([2u8; 32]);

    let source = StaticSource::new(vec![fixtures::sample_prover(&challenger)?]);
    let plugin = WitnessChainPlugin::new(Arc::new(source), Arc::new(Ed25519Recovery));
    let runner = PipelineRunner::new(Arc::new(plugin), Arc::new(stamper));

    let claim = Claim::at_point(
        EMPIRE_STATE.longitude,
        EMPIRE_STATE.latitude,
        500.0,
        TimeWindow::new(SAMPLE_START_TIME - 3_600, SAMPLE_START_TIME + 3_600),
    );
    let report = runner.run(SAMPLE_PROVER_ID, &claim, &ExecutionContext::new()).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
