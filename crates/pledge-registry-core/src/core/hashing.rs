// crates/pledge-registry-core/src/core/hashing.rs
// ============================================================================
// Module: Client Fingerprints
// Description: One-way digests of client addresses.
// Purpose: Key rate-limit entries without storing raw addresses in the ledger.
// Dependencies: sha2
// ============================================================================

//! ## Overview
//! Rate-limit ledger keys embed a SHA-256 fingerprint of the client address
//! rather than the address itself. The fingerprint is lowercase hex.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Fingerprints
// ============================================================================

/// Returns the lowercase hex SHA-256 fingerprint of a client address.
#[must_use]
pub fn client_fingerprint(address: &str) -> String {
    let digest = Sha256::digest(address.as_bytes());
    hex_encode(&digest)
}

/// Encodes bytes as lowercase hex.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::client_fingerprint;

    #[test]
    fn fingerprint_is_stable_hex() {
        let first = client_fingerprint("203.0.113.7");
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase()));
        assert_eq!(first, client_fingerprint("203.0.113.7"));
        assert_ne!(first, client_fingerprint("203.0.113.8"));
    }

    #[test]
    fn fingerprint_matches_known_digest() {
        assert_eq!(
            client_fingerprint(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
