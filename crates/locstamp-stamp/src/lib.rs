//! locstamp stamps: building, signing, and an ed25519 signing capability
pub mod builder;
pub mod keys;
pub mod signer;

pub use builder::{window_duration, StampBuilder};
pub use keys::{address_for, Ed25519Recovery, Ed25519Signer, ED25519_ALGORITHM};
pub use signer::{countersign, sign};

use locstamp_core::{LocstampError, UnsignedStamp};

/// blake3 digest of the canonical stamp, usable as a cache or log key.
pub fn stamp_digest(stamp: &UnsignedStamp) -> Result<String, LocstampError> {
    stamp.digest()
}
