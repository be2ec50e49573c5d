// provenance-gate-core/src/core/envelope.rs
// ============================================================================
// Module: Signed Envelope Types
// Description: Wire shapes for DSSE attestation envelopes.
// Purpose: Decode `{payload, signatures}` envelopes produced per attestation layer.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An attestation layer carries a JSON envelope whose `payload` is the base64
//! encoding of an in-toto statement and whose `signatures` list the declared
//! key identifiers and signatures. Certificates reach the extractor as DER
//! bytes wrapped in [`EncodedCertificate`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Canonical media type of a DSSE signed envelope layer.
pub const DSSE_ENVELOPE_MEDIA_TYPE: &str = "application/vnd.dsse.envelope.v1+json";
/// Predicate type of SLSA v0.2 build provenance.
pub const SLSA_PROVENANCE_V02_PREDICATE_TYPE: &str = "https://slsa.dev/provenance/v0.2";
/// Statement type of in-toto v0.1 statements.
pub const IN_TOTO_STATEMENT_V01_TYPE: &str = "https://in-toto.io/Statement/v0.1";

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// Signature declared inside an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeSignature {
    /// Key identifier (may be empty for keyless signing).
    #[serde(default)]
    pub keyid: String,
    /// Base64 signature bytes.
    #[serde(default)]
    pub sig: String,
}

/// Signed envelope as stored in an attestation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    /// Base64-encoded statement.
    #[serde(default, deserialize_with = "null_as_default")]
    pub payload: String,
    /// Payload type declared by the signer.
    #[serde(default, rename = "payloadType", skip_serializing_if = "Option::is_none")]
    pub payload_type: Option<String>,
    /// Declared signatures.
    #[serde(default, deserialize_with = "null_as_default")]
    pub signatures: Vec<EnvelopeSignature>,
}

/// Deserializes an explicit JSON `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// SECTION: Certificates
// ============================================================================

/// DER-encoded X.509 certificate handed over by an envelope source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCertificate(Vec<u8>);

impl EncodedCertificate {
    /// Wraps DER bytes.
    #[must_use]
    pub const fn from_der(der: Vec<u8>) -> Self {
        Self(der)
    }

    /// Returns the DER bytes.
    #[must_use]
    pub fn as_der(&self) -> &[u8] {
        &self.0
    }
}
