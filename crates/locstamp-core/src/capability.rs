//! Injected cryptographic capabilities
//!
//! The core never holds keys. Signing and signer recovery are supplied by the
//! host as string-in, string-out calls.

use crate::error::CapabilityError;

/// Produces a signature over a message on behalf of one identity.
pub trait Signer: Send + Sync {
    /// Address the signature recovers to
    fn identity(&self) -> &str;

    /// Algorithm tag recorded next to each signature
    fn algorithm(&self) -> &str;

    fn sign(&self, message: &str) -> Result<String, CapabilityError>;
}

/// Recovers the signing identity from a message and its signature.
pub trait SignatureRecovery: Send + Sync {
    fn recover(&self, message: &str, signature: &str) -> Result<String, CapabilityError>;
}

impl<T: Signer + ?Sized> Signer for std::sync::Arc<T> {
    fn identity(&self) -> &str {
        (**self).identity()
    }

    fn algorithm(&self) -> &str {
        (**self).algorithm()
    }

    fn sign(&self, message: &str) -> Result<String, CapabilityError> {
        (**self).sign(message)
    }
}

impl<T: SignatureRecovery + ?Sized> SignatureRecovery for std::sync::Arc<T> {
    fn recover(&self, message: &str, signature: &str) -> Result<String, CapabilityError> {
        (**self).recover(message, signature)
    }
}
