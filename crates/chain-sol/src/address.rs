//! Solana address handling and validation.
//!
//! Solana addresses are simply Base58-encoded 32-byte Ed25519 public keys.
//! There is no hashing step (unlike Bitcoin or Ethereum). An address that can
//! receive a plain SOL transfer must additionally be a valid point on the
//! Ed25519 curve; program-derived addresses are deliberately off-curve.

use std::fmt;
use std::str::FromStr;

use curve25519_dalek::edwards::CompressedEdwardsY;

use crate::error::SolError;

/// A 32-byte Ed25519 public key identifying a Solana account.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pubkey([u8; 32]);

impl Pubkey {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether these bytes decompress to a point on the Ed25519 curve.
    pub fn is_on_curve(&self) -> bool {
        CompressedEdwardsY(self.0).decompress().is_some()
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bytes_to_address(&self.0))
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({self})")
    }
}

impl FromStr for Pubkey {
    type Err = SolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        address_to_bytes(s).map(Self)
    }
}

/// Parse an address that is about to receive funds from a system transfer.
///
/// On top of the Base58 / length checks, the decoded key must lie on the
/// Ed25519 curve.
pub fn parse_recipient(address: &str) -> Result<Pubkey, SolError> {
    let pubkey: Pubkey = address.trim().parse()?;
    if !pubkey.is_on_curve() {
        return Err(SolError::InvalidAddress(format!(
            "invalid public key: {address} is not on the ed25519 curve"
        )));
    }
    Ok(pubkey)
}

/// Decode a Solana address string to its 32-byte representation.
///
/// Returns an error if the address is not valid Base58 or does not decode
/// to exactly 32 bytes.
pub fn address_to_bytes(address: &str) -> Result<[u8; 32], SolError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| SolError::InvalidAddress(format!("base58 decode failed: {e}")))?;

    let arr: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
        SolError::InvalidAddress(format!("expected 32 bytes, got {}", v.len()))
    })?;

    Ok(arr)
}

/// Encode 32 bytes as a Solana address (Base58 string).
pub fn bytes_to_address(bytes: &[u8; 32]) -> String {
    bs58::encode(bytes).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_off_curve() -> Pubkey {
        (0u8..=255)
            .map(|b| Pubkey::new([b; 32]))
            .find(|k| !k.is_on_curve())
            .expect("some repeated-byte key is off the curve")
    }

    /// The System Program address is 32 zero bytes, which encodes to
    /// "11111111111111111111111111111111" in Base58.
    #[test]
    fn system_program_address() {
        let addr = Pubkey::new([0u8; 32]).to_string();
        assert_eq!(addr, "11111111111111111111111111111111");
    }

    #[test]
    fn roundtrip_encode_decode() {
        let address = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
        let pubkey: Pubkey = address.parse().unwrap();
        assert_eq!(pubkey.to_string(), address);
    }

    #[test]
    fn garbage_address_returns_error() {
        assert!("not-a-valid-address!!!".parse::<Pubkey>().is_err());
    }

    #[test]
    fn too_short_address_returns_error() {
        // "1" decodes to a single zero byte, which is not 32 bytes.
        let err = address_to_bytes("1").unwrap_err();
        assert!(err.to_string().contains("expected 32 bytes, got 1"));
    }

    #[test]
    fn generated_key_is_on_curve() {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&[0x42u8; 32]);
        let pubkey = Pubkey::new(signing_key.verifying_key().to_bytes());
        assert!(pubkey.is_on_curve());
        assert_eq!(parse_recipient(&pubkey.to_string()).unwrap(), pubkey);
    }

    #[test]
    fn recipient_off_curve_rejected() {
        let off = first_off_curve();
        let err = parse_recipient(&off.to_string()).unwrap_err();
        assert!(matches!(err, SolError::InvalidAddress(_)));
        assert!(err.to_string().contains("not on the ed25519 curve"));
    }

    #[test]
    fn recipient_bad_base58_rejected() {
        assert!(matches!(
            parse_recipient("0OIl"),
            Err(SolError::InvalidAddress(_))
        ));
    }

    #[test]
    fn recipient_is_trimmed() {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&[7u8; 32]);
        let pubkey = Pubkey::new(signing_key.verifying_key().to_bytes());
        let padded = format!("  {pubkey}\n");
        assert_eq!(parse_recipient(&padded).unwrap(), pubkey);
    }

    #[test]
    fn debug_shows_base58() {
        let debug = format!("{:?}", Pubkey::new([0u8; 32]));
        assert_eq!(debug, "Pubkey(11111111111111111111111111111111)");
    }
}
