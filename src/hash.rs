// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

//! Content digest helpers for loan documents.
//!
//! Notarization records never carry raw document bytes, only the SHA-256
//! digest of the document. The API hashes uploads here and validates that
//! client-supplied `content` fields are well-formed digests before anything
//! is sent to the chain.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Whether `s` is a well-formed SHA-256 digest: exactly 64 hex characters.
///
/// Both cases are accepted; the chain stores the digest as an opaque string.
pub fn is_valid_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA-256 of the empty input.
    const EMPTY_DIGEST: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn empty_input_matches_known_digest() {
        assert_eq!(sha256_hex(b""), EMPTY_DIGEST);
    }

    #[test]
    fn digest_is_deterministic() {
        let a = sha256_hex(b"loan agreement v1");
        let b = sha256_hex(b"loan agreement v1");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(is_valid_sha256_hex(&a));
    }

    #[test]
    fn known_abc_digest() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn accepts_both_cases() {
        assert!(is_valid_sha256_hex(EMPTY_DIGEST));
        assert!(is_valid_sha256_hex(&EMPTY_DIGEST.to_uppercase()));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid_sha256_hex(""));
        assert!(!is_valid_sha256_hex("abc"));
        assert!(!is_valid_sha256_hex(&EMPTY_DIGEST[..63]));
        assert!(!is_valid_sha256_hex(&format!("{EMPTY_DIGEST}0")));
    }

    #[test]
    fn rejects_non_hex_characters() {
        let tainted = format!("{}g", &EMPTY_DIGEST[..63]);
        assert!(!is_valid_sha256_hex(&tainted));
        assert!(!is_valid_sha256_hex(&"z".repeat(64)));
        assert!(!is_valid_sha256_hex(&format!("{} ", &EMPTY_DIGEST[..63])));
    }
}
