//! Credibility: how well a stamp supports a spatial/temporal claim
//!
//! Combines great-circle distance, temporal overlap, corroboration bonuses
//! and the failed-challenge penalty into a bounded score with a verdict.
//!
//! # Example
//!
//! ```ignore
//! use locstamp_credibility::CredibilityEvaluator;
//!
//! let evaluator = CredibilityEvaluator::for_profile("strict");
//! let vector = evaluator.evaluate(&signed_stamp, &claim);
//! println!("{}", vector);
//! ```

pub mod evaluator;
pub mod geo;
pub mod profile;
pub mod temporal;

pub use evaluator::CredibilityEvaluator;
pub use geo::{haversine_distance, spatial_score, EARTH_RADIUS_M};
pub use profile::CredibilityProfile;
pub use temporal::overlap_ratio;

use locstamp_core::{Claim, CredibilityVector, UnsignedStamp};
use once_cell::sync::Lazy;

/// Evaluator with the standard profile
pub static DEFAULT_EVALUATOR: Lazy<CredibilityEvaluator> = Lazy::new(CredibilityEvaluator::default);

/// Evaluate with the standard profile
pub fn evaluate<S: AsRef<UnsignedStamp>>(stamp: &S, claim: &Claim) -> CredibilityVector {
    DEFAULT_EVALUATOR.evaluate(stamp, claim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use locstamp_core::{PluginRef, Point, SignedStamp, Signals, TimeWindow};

    #[test]
    fn test_default_evaluator_accepts_signed_stamp() {
        let stamp = UnsignedStamp::at_point(
            PluginRef::new("witnesschain", "0.1.0"),
            Point {
                longitude: 2.3522,
                latitude: 48.8566,
            },
            TimeWindow::new(1_000, 1_010),
            Signals {
                success: Some(true),
                ..Signals::default()
            },
        );
        let signed = SignedStamp::unsigned(stamp.clone());
        let claim = Claim::at_point(2.3522, 48.8566, 100.0, TimeWindow::new(0, 2_000));

        let from_signed = evaluate(&signed, &claim);
        let from_unsigned = evaluate(&stamp, &claim);
        assert_eq!(from_signed, from_unsigned);
        assert!(from_signed.supports_claim);
        assert_eq!(DEFAULT_EVALUATOR.profile().name, "standard@1.0");
    }
}
