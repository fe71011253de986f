//! Ed25519 signing with recoverable signatures
//!
//! Ed25519 cannot recover a public key from a signature alone, so the
//! signature value carries the key: `hex(public_key ‖ signature)`, 96 bytes.
//! Recovery verifies the signature against the embedded key and derives the
//! signer's address from it.
use ed25519_dalek::{Signature, Signer as _, SigningKey, VerifyingKey};
use locstamp_core::{CapabilityError, SignatureRecovery, Signer};

pub const ED25519_ALGORITHM: &str = "ed25519-blake3";

const PUBLIC_KEY_LEN: usize = 32;
const SIGNATURE_LEN: usize = 64;

/// `0x` + first 20 bytes of `blake3(public_key)`, lowercase hex.
pub fn address_for(key: &VerifyingKey) -> String {
    let digest = blake3::hash(key.as_bytes());
    format!("0x{}", hex::encode(&digest.as_bytes()[..20]))
}

pub struct Ed25519Signer {
    key: SigningKey,
    identity: String,
}

impl Ed25519Signer {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let key = SigningKey::from_bytes(&seed);
        let identity = address_for(&key.verifying_key());
        Self { key, identity }
    }

    /// Seed as 64 hex characters, optional `0x` prefix.
    pub fn from_hex(seed: &str) -> Result<Self, CapabilityError> {
        let bytes = decode_hex(seed).map_err(CapabilityError::InvalidKey)?;
        let seed: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CapabilityError::InvalidKey("seed must be 32 bytes".to_string()))?;
        Ok(Self::from_seed(seed))
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.key.verifying_key().as_bytes())
    }
}

impl Signer for Ed25519Signer {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn algorithm(&self) -> &str {
        ED25519_ALGORITHM
    }

    fn sign(&self, message: &str) -> Result<String, CapabilityError> {
        let signature = self.key.sign(message.as_bytes());
        let mut bytes = Vec::with_capacity(PUBLIC_KEY_LEN + SIGNATURE_LEN);
        bytes.extend_from_slice(self.key.verifying_key().as_bytes());
        bytes.extend_from_slice(&signature.to_bytes());
        Ok(hex::encode(bytes))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Recovery;

impl SignatureRecovery for Ed25519Recovery {
    fn recover(&self, message: &str, signature: &str) -> Result<String, CapabilityError> {
        let bytes = decode_hex(signature).map_err(CapabilityError::MalformedSignature)?;
        if bytes.len() != PUBLIC_KEY_LEN + SIGNATURE_LEN {
            return Err(CapabilityError::MalformedSignature(format!(
                "expected {} bytes, got {}",
                PUBLIC_KEY_LEN + SIGNATURE_LEN,
                bytes.len()
            )));
        }

        let (key_bytes, sig_bytes) = bytes.split_at(PUBLIC_KEY_LEN);
        let key_bytes: [u8; PUBLIC_KEY_LEN] = key_bytes
            .try_into()
            .map_err(|_| CapabilityError::MalformedSignature("public key length".to_string()))?;
        let sig_bytes: [u8; SIGNATURE_LEN] = sig_bytes
            .try_into()
            .map_err(|_| CapabilityError::MalformedSignature("signature length".to_string()))?;

        let key = VerifyingKey::from_bytes(&key_bytes)
            .map_err(|e| CapabilityError::MalformedSignature(e.to_string()))?;
        let signature = Signature::from_bytes(&sig_bytes);
        key.verify_strict(message.as_bytes(), &signature)
            .map_err(|e| CapabilityError::InvalidSignature(e.to_string()))?;

        Ok(address_for(&key))
    }
}

fn decode_hex(value: &str) -> Result<Vec<u8>, String> {
    let trimmed = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(trimmed).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_recover() {
        let signer = Ed25519Signer::from_seed([7u8; 32]);
        let signature = signer.sign("hello stamp").unwrap();
        assert_eq!(signature.len(), 192);

        let recovered = Ed25519Recovery.recover("hello stamp", &signature).unwrap();
        assert_eq!(recovered, signer.identity());
        assert!(recovered.starts_with("0x"));
        assert_eq!(recovered.len(), 42);
    }

    #[test]
    fn test_recover_rejects_other_message() {
        let signer = Ed25519Signer::from_seed([7u8; 32]);
        let signature = signer.sign("hello stamp").unwrap();
        let err = Ed25519Recovery.recover("hello stamp!", &signature).unwrap_err();
        assert!(matches!(err, CapabilityError::InvalidSignature(_)));
    }

    #[test]
    fn test_recover_rejects_malformed() {
        let err = Ed25519Recovery.recover("m", "not-hex").unwrap_err();
        assert!(matches!(err, CapabilityError::MalformedSignature(_)));

        let err = Ed25519Recovery.recover("m", "abcd").unwrap_err();
        assert!(matches!(err, CapabilityError::MalformedSignature(_)));
    }

    #[test]
    fn test_from_hex_seed() {
        let seed = "0x".to_string() + &"07".repeat(32);
        let signer = Ed25519Signer::from_hex(&seed).unwrap();
        assert_eq!(signer.identity(), Ed25519Signer::from_seed([7u8; 32]).identity());
        assert_eq!(signer.public_key_hex().len(), 64);

        assert!(Ed25519Signer::from_hex("0011").is_err());
    }

    #[test]
    fn test_distinct_keys_distinct_identities() {
        let a = Ed25519Signer::from_seed([1u8; 32]);
        let b = Ed25519Signer::from_seed([2u8; 32]);
        assert_ne!(a.identity(), b.identity());
    }
}
