// provenance-gate-core/src/core/provenance.rs
// ============================================================================
// Module: Provenance Records
// Description: In-toto statements, SLSA predicates, and resolved signers.
// Purpose: Hold the immutable result of extracting one attestation envelope.
// Dependencies: serde, serde_json, x509-cert
// ============================================================================

//! ## Overview
//! A [`ProvenanceRecord`] is produced only by the extractor and exposes the
//! raw statement bytes for audit, a structured statement view that
//! round-trips through serde, a typed SLSA v0.2 predicate view, and the
//! [`ResolvedSigner`] that vouched for it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use x509_cert::Certificate;
use x509_cert::der::Decode;

use crate::core::envelope::EncodedCertificate;
use crate::core::envelope::EnvelopeSignature;
use crate::core::envelope::null_as_default;
use crate::core::error::SourceError;
use crate::core::digest::ContentDigest;
use crate::core::digest::hex_encode;

// ============================================================================
// SECTION: Statement
// ============================================================================

/// In-toto statement decoded from an envelope payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceStatement {
    /// Statement type URI.
    #[serde(rename = "_type", default)]
    pub statement_type: String,
    /// Predicate type URI.
    #[serde(rename = "predicateType", default)]
    pub predicate_type: String,
    /// Attested subjects.
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: Vec<Map<String, Value>>,
    /// Predicate body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Map<String, Value>>,
}

impl ProvenanceStatement {
    /// Returns true when the statement carries no recognizable content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statement_type.is_empty()
            && self.predicate_type.is_empty()
            && self.subject.is_empty()
            && self.predicate.is_none()
    }
}

// ============================================================================
// SECTION: SLSA Predicate
// ============================================================================

/// Builder identity of a SLSA v0.2 predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlsaBuilder {
    /// Builder identifier URI.
    #[serde(default)]
    pub id: String,
}

/// Source of the build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlsaConfigSource {
    /// Source URI, typically `git+<url>@<ref>`.
    #[serde(default)]
    pub uri: String,
    /// Digests of the source revision keyed by algorithm.
    #[serde(default)]
    pub digest: BTreeMap<String, String>,
    /// Entry point within the source.
    #[serde(default)]
    pub entry_point: String,
}

/// Invocation recorded by the builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlsaInvocation {
    /// Build configuration source.
    #[serde(default)]
    pub config_source: SlsaConfigSource,
    /// Build parameters.
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// Build environment.
    #[serde(default)]
    pub environment: Map<String, Value>,
}

/// Material consumed by the build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlsaMaterial {
    /// Material URI.
    #[serde(default)]
    pub uri: String,
    /// Material digests keyed by algorithm.
    #[serde(default)]
    pub digest: BTreeMap<String, String>,
}

/// Typed view of a SLSA v0.2 provenance predicate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlsaPredicate {
    /// Build type URI.
    #[serde(default)]
    pub build_type: String,
    /// Builder identity.
    #[serde(default)]
    pub builder: SlsaBuilder,
    /// Recorded invocation.
    #[serde(default)]
    pub invocation: SlsaInvocation,
    /// Builder-specific configuration.
    #[serde(default)]
    pub build_config: Option<Value>,
    /// Build metadata.
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    /// Materials consumed by the build.
    #[serde(default)]
    pub materials: Vec<SlsaMaterial>,
}

// ============================================================================
// SECTION: Signer
// ============================================================================

/// Identity fields of an X.509 certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateIdentity {
    /// Subject distinguished name.
    pub subject: String,
    /// Issuer distinguished name.
    pub issuer: String,
    /// Lowercase hex serial number.
    pub serial_number: String,
    /// Start of validity (seconds since epoch).
    pub not_before: u64,
    /// End of validity (seconds since epoch).
    pub not_after: u64,
    /// Digest of the DER encoding.
    pub fingerprint: ContentDigest,
}

impl CertificateIdentity {
    /// Decodes a DER certificate into its identity fields.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Certificate`] when the DER cannot be decoded.
    pub fn from_encoded(encoded: &EncodedCertificate) -> Result<Self, SourceError> {
        let certificate = Certificate::from_der(encoded.as_der())?;
        let tbs = &certificate.tbs_certificate;
        Ok(Self {
            subject: tbs.subject.to_string(),
            issuer: tbs.issuer.to_string(),
            serial_number: hex_encode(tbs.serial_number.as_bytes()),
            not_before: tbs.validity.not_before.to_unix_duration().as_secs(),
            not_after: tbs.validity.not_after.to_unix_duration().as_secs(),
            fingerprint: ContentDigest::of_bytes(encoded.as_der()),
        })
    }
}

/// Identity that vouched for an attestation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedSigner {
    /// Keyed signing: the envelope's own signature.
    Signature {
        /// Base64 signature returned by the envelope source.
        signature: String,
        /// Signatures declared inside the envelope, kept for audit.
        declared: Vec<EnvelopeSignature>,
    },
    /// Keyless signing: a short-lived certificate and its issuing chain.
    Certificate {
        /// Signing certificate.
        certificate: CertificateIdentity,
        /// Issuing chain, leaf-most first.
        chain: Vec<CertificateIdentity>,
    },
}

impl ResolvedSigner {
    /// Returns a short label for the signing method.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        match self {
            Self::Signature {
                ..
            } => "signature",
            Self::Certificate {
                ..
            } => "certificate",
        }
    }
}

// ============================================================================
// SECTION: Record
// ============================================================================

/// Provenance extracted from one envelope; immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvenanceRecord {
    /// Decoded statement.
    statement: ProvenanceStatement,
    /// Resolved signer.
    signer: ResolvedSigner,
    /// Digest of the raw statement bytes.
    payload_digest: ContentDigest,
    /// Digest of the canonical JSON statement.
    statement_digest: ContentDigest,
    /// Raw statement bytes as decoded from the envelope.
    #[serde(skip)]
    raw_payload: Vec<u8>,
}

impl ProvenanceRecord {
    /// Builds a record; only the extractor creates records.
    pub(crate) fn new(
        statement: ProvenanceStatement,
        statement_digest: ContentDigest,
        raw_payload: Vec<u8>,
        signer: ResolvedSigner,
    ) -> Self {
        Self {
            statement,
            signer,
            payload_digest: ContentDigest::of_bytes(&raw_payload),
            statement_digest,
            raw_payload,
        }
    }

    /// Returns the structured statement.
    #[must_use]
    pub const fn statement(&self) -> &ProvenanceStatement {
        &self.statement
    }

    /// Returns the predicate type of the statement.
    #[must_use]
    pub fn predicate_type(&self) -> &str {
        &self.statement.predicate_type
    }

    /// Returns the resolved signer.
    #[must_use]
    pub const fn signer(&self) -> &ResolvedSigner {
        &self.signer
    }

    /// Returns the raw statement bytes.
    #[must_use]
    pub fn raw_payload(&self) -> &[u8] {
        &self.raw_payload
    }

    /// Returns the digest of the raw statement bytes.
    #[must_use]
    pub const fn payload_digest(&self) -> &ContentDigest {
        &self.payload_digest
    }

    /// Returns the canonical-JSON digest of the structured statement.
    #[must_use]
    pub const fn statement_digest(&self) -> &ContentDigest {
        &self.statement_digest
    }

    /// Decodes the predicate as SLSA v0.2 provenance.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the predicate does not match the
    /// SLSA v0.2 shape.
    pub fn slsa_predicate(&self) -> Result<SlsaPredicate, serde_json::Error> {
        let predicate = self.statement.predicate.clone().unwrap_or_default();
        serde_json::from_value(Value::Object(predicate))
    }
}
