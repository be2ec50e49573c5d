// provenance-gate-core/src/core/digest.rs
// ============================================================================
// Module: Content Digests
// Description: SHA-256 digests of attestation payloads, statements, and certificates.
// Purpose: Let audit reports reference attested content by digest.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! A [`ContentDigest`] renders as `sha256:<hex>`, the same form artifact
//! references use. Raw payloads and DER certificates are digested over
//! their bytes; decoded statements are digested over RFC 8785 canonical
//! JSON, so two envelopes carrying the same statement with different key
//! order or whitespace share a statement digest.

use std::fmt;

use serde::Serialize;
use serde::Serializer;
use sha2::Digest;
use sha2::Sha256;

use crate::core::provenance::ProvenanceStatement;

/// Algorithm prefix of every digest.
pub const DIGEST_ALGORITHM: &str = "sha256";

/// SHA-256 digest of attested content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    /// Lowercase hex digest.
    hex: String,
}

impl ContentDigest {
    /// Digests raw bytes.
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self {
            hex: hex_encode(&Sha256::digest(bytes)),
        }
    }

    /// Digests the canonical JSON form of a decoded statement.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the statement cannot be canonicalized.
    pub fn of_statement(statement: &ProvenanceStatement) -> Result<Self, serde_json::Error> {
        Ok(Self::of_bytes(&serde_jcs::to_vec(statement)?))
    }

    /// Returns the lowercase hex digest without the algorithm prefix.
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DIGEST_ALGORITHM}:{}", self.hex)
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Lowercase hex rendering of `bytes`.
pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    bytes
        .iter()
        .flat_map(|byte| [DIGITS[usize::from(byte >> 4)], DIGITS[usize::from(byte & 0x0f)]])
        .map(char::from)
        .collect()
}
