//! Ed25519 keypairs in the layout Solana tooling stores them.
//!
//! A Solana "private key" is 64 bytes: the 32-byte Ed25519 seed followed by
//! the 32-byte public key. `solana-keygen` writes the same 64 bytes as a JSON
//! array of numbers; both encodings are accepted on decode.

use std::fmt;

use ed25519_dalek::{Signer, SigningKey};
use rand_core::OsRng;
use zeroize::Zeroizing;

use crate::address::Pubkey;
use crate::error::SolError;

/// Length of the `seed || public` keypair encoding.
pub const KEYPAIR_LENGTH: usize = 64;

/// An Ed25519 signing keypair. The secret half is wiped on drop.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a fresh keypair from the operating system RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Build a keypair from a 32-byte Ed25519 seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Decode the 64-byte `seed || public` layout.
    ///
    /// The public half must match the key derived from the seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SolError> {
        let raw: &[u8; KEYPAIR_LENGTH] = bytes.try_into().map_err(|_| {
            SolError::InvalidPrivateKey(format!(
                "expected {KEYPAIR_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;

        let signing_key = SigningKey::from_keypair_bytes(raw).map_err(|_| {
            SolError::InvalidPrivateKey("public key does not match secret key".into())
        })?;

        Ok(Self { signing_key })
    }

    /// Decode a `solana-keygen` style JSON array of 64 byte values.
    pub fn from_json_array(text: &str) -> Result<Self, SolError> {
        let bytes: Zeroizing<Vec<u8>> = Zeroizing::new(
            serde_json::from_str(text.trim())
                .map_err(|e| SolError::InvalidPrivateKey(format!("invalid JSON keypair: {e}")))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Decode either encoding: JSON array if the content looks like one,
    /// raw bytes otherwise.
    pub fn decode(bytes: &[u8]) -> Result<Self, SolError> {
        let looks_like_json = bytes
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|&b| b == b'[');

        if looks_like_json && bytes.len() != KEYPAIR_LENGTH {
            let text = std::str::from_utf8(bytes)
                .map_err(|_| SolError::InvalidPrivateKey("keypair file is not UTF-8".into()))?;
            return Self::from_json_array(text);
        }
        Self::from_bytes(bytes)
    }

    /// The `seed || public` encoding persisted by the key store.
    pub fn to_bytes(&self) -> Zeroizing<[u8; KEYPAIR_LENGTH]> {
        Zeroizing::new(self.signing_key.to_keypair_bytes())
    }

    pub fn pubkey(&self) -> Pubkey {
        Pubkey::new(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign arbitrary bytes, returning the 64-byte Ed25519 signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}
