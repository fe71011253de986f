//! locstamp core: data model, capability traits and pipeline runner
//!
//! Evidence flows through five stages:
//!
//! ```text
//! ChallengeResult → normalize → RawSignalBundle → build → UnsignedStamp → sign → SignedStamp
//!                                                              ↓                     ↓
//!                                                          evaluate               verify
//!                                                              ↓                     ↓
//!                                                     CredibilityVector    VerificationResult
//! ```
//!
//! The stages themselves live in the sibling crates; this crate holds the
//! types they exchange and the `ProofPlugin` seam a host binds against.

pub mod capability;
pub mod context;
pub mod data_model;
pub mod diagnostics;
pub mod error;
pub mod plugin;
pub mod results;
pub mod runner;
pub mod stamp;
pub mod telemetry;

pub use capability::{SignatureRecovery, Signer};
pub use context::ExecutionContext;
pub use data_model::{ChallengeResult, Claim, ClaimedLocation, Corroboration, RawSignalBundle};
pub use diagnostics::{Diagnostic, DiagnosticKey, Diagnostics};
pub use error::{CapabilityError, LocstampError};
pub use plugin::{BoxFuture, Capability, ProofPlugin, Runtime};
pub use results::{CredibilityVector, VerificationResult};
pub use runner::{PipelineReport, PipelineRunner, StageReceipt};
pub use stamp::{
    Geometry, PluginRef, Point, SignalKey, Signals, SignedStamp, StampSignature, TimeWindow,
    UnsignedStamp, LP_VERSION,
};
