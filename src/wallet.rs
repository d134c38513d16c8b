// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

//! Process-lifetime signing wallet.
//!
//! One Ed25519 keypair per process. The key is either decoded from the
//! `PRIVATE_KEY` environment secret (bech32 `iotaprivkey1…` or raw base64
//! seed) or freshly generated at boot. A decode failure is never fatal: the
//! service logs a warning and falls back to an ephemeral keypair so the
//! read-only endpoints keep working. The key lives in memory only and is
//! never persisted or exposed over the API.

use base64ct::{Base64, Encoding};
use bech32::FromBase32;
use blake2::{digest::consts::U32, Blake2b, Digest};
use ed25519_dalek::{Signature, Signer, SigningKey};
use rand::rngs::OsRng;

type Blake2b256 = Blake2b<U32>;

/// Human-readable part of bech32-encoded private keys.
pub const PRIVATE_KEY_HRP: &str = "iotaprivkey";

/// Signature scheme flag byte. Ed25519 is the only supported scheme.
const ED25519_FLAG: u8 = 0x00;

/// Errors from decoding an environment-supplied private key.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("invalid key encoding: {0}")]
    InvalidEncoding(String),

    #[error("unsupported key scheme flag {0:#04x}; only Ed25519 is supported")]
    UnsupportedScheme(u8),

    #[error("invalid secret key length: {0} bytes, expected 32")]
    InvalidLength(usize),
}

/// In-memory signing wallet.
pub struct Wallet {
    signing_key: SigningKey,
    address: String,
    from_env_key: bool,
}

impl Wallet {
    /// Build the wallet from an optional environment-supplied key.
    ///
    /// Falls back to a generated keypair if no key is supplied or the
    /// supplied key fails to decode.
    pub fn from_config(private_key: Option<&str>) -> Self {
        match private_key {
            Some(raw) => match decode_private_key(raw) {
                Ok(seed) => {
                    let wallet = Self::from_seed(seed, true);
                    tracing::info!(address = %wallet.address, "loaded wallet key from environment");
                    wallet
                }
                Err(err) => {
                    tracing::warn!(%err, "invalid private key in environment, generating new keypair");
                    Self::generate()
                }
            },
            None => {
                tracing::info!("no private key configured, generating new keypair");
                Self::generate()
            }
        }
    }

    /// Generate a fresh ephemeral keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        let wallet = Self::from_signing_key(signing_key, false);
        tracing::warn!(
            address = %wallet.address,
            "generated ephemeral wallet; set PRIVATE_KEY to keep the same address across restarts"
        );
        wallet
    }

    fn from_seed(seed: [u8; 32], from_env_key: bool) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(&seed), from_env_key)
    }

    fn from_signing_key(signing_key: SigningKey, from_env_key: bool) -> Self {
        let address = derive_address(signing_key.verifying_key().as_bytes());
        Self {
            signing_key,
            address,
            from_env_key,
        }
    }

    /// The wallet's on-chain address (`0x` + 64 hex chars).
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether the key came from the environment rather than being generated.
    pub fn has_private_key(&self) -> bool {
        self.from_env_key
    }

    /// Sign an arbitrary payload with the wallet key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }

    /// Raw public key bytes.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }
}

/// Decode a private key from its environment representation.
///
/// Two encodings are supported:
/// - bech32 with the `iotaprivkey` HRP: 33-byte payload of
///   `scheme flag || 32-byte seed`, flag must be `0x00` (Ed25519)
/// - raw base64 of the 32-byte seed
pub fn decode_private_key(raw: &str) -> Result<[u8; 32], WalletError> {
    if raw.starts_with(PRIVATE_KEY_HRP) {
        let (hrp, data, _variant) =
            bech32::decode(raw).map_err(|e| WalletError::InvalidEncoding(e.to_string()))?;
        if hrp != PRIVATE_KEY_HRP {
            return Err(WalletError::InvalidEncoding(format!(
                "unexpected bech32 prefix: {hrp}"
            )));
        }
        let bytes = Vec::<u8>::from_base32(&data)
            .map_err(|e| WalletError::InvalidEncoding(e.to_string()))?;
        if bytes.len() != 33 {
            return Err(WalletError::InvalidLength(bytes.len().saturating_sub(1)));
        }
        if bytes[0] != ED25519_FLAG {
            return Err(WalletError::UnsupportedScheme(bytes[0]));
        }
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&bytes[1..]);
        return Ok(seed);
    }

    let bytes =
        Base64::decode_vec(raw).map_err(|e| WalletError::InvalidEncoding(e.to_string()))?;
    if bytes.len() != 32 {
        return Err(WalletError::InvalidLength(bytes.len()));
    }
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&bytes);
    Ok(seed)
}

/// Derive the on-chain address: BLAKE2b-256 over `flag || public key`.
fn derive_address(public_key: &[u8; 32]) -> String {
    let mut hasher = Blake2b256::new();
    hasher.update([ED25519_FLAG]);
    hasher.update(public_key);
    format!("0x{}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bech32::{ToBase32, Variant};
    use ed25519_dalek::Verifier;

    fn bech32_key(flag: u8, seed: &[u8]) -> String {
        let mut payload = vec![flag];
        payload.extend_from_slice(seed);
        bech32::encode(PRIVATE_KEY_HRP, payload.to_base32(), Variant::Bech32).unwrap()
    }

    #[test]
    fn decodes_base64_seed() {
        let seed = [7u8; 32];
        let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, seed);
        assert_eq!(decode_private_key(&encoded).unwrap(), seed);
    }

    #[test]
    fn rejects_base64_of_wrong_length() {
        let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, [1u8; 31]);
        assert!(matches!(
            decode_private_key(&encoded),
            Err(WalletError::InvalidLength(31))
        ));
    }

    #[test]
    fn decodes_bech32_key() {
        let seed = [42u8; 32];
        let encoded = bech32_key(ED25519_FLAG, &seed);
        assert_eq!(decode_private_key(&encoded).unwrap(), seed);
    }

    #[test]
    fn rejects_non_ed25519_scheme_flag() {
        let encoded = bech32_key(0x01, &[3u8; 32]);
        assert!(matches!(
            decode_private_key(&encoded),
            Err(WalletError::UnsupportedScheme(0x01))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_private_key("not a key!!!").is_err());
        assert!(decode_private_key("iotaprivkey1qqqq").is_err());
    }

    #[test]
    fn same_seed_yields_same_address() {
        let seed = [9u8; 32];
        let a = Wallet::from_seed(seed, true);
        let b = Wallet::from_seed(seed, true);
        assert_eq!(a.address(), b.address());
        assert!(a.address().starts_with("0x"));
        assert_eq!(a.address().len(), 66);
        assert!(a.has_private_key());
    }

    #[test]
    fn invalid_env_key_falls_back_to_generated() {
        let wallet = Wallet::from_config(Some("garbage"));
        assert!(!wallet.has_private_key());
    }

    #[test]
    fn signatures_verify_against_public_key() {
        let wallet = Wallet::generate();
        let signature = wallet.sign(b"payload");
        let verifying =
            ed25519_dalek::VerifyingKey::from_bytes(&wallet.public_key_bytes()).unwrap();
        assert!(verifying.verify(b"payload", &signature).is_ok());
    }
}
