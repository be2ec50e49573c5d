// provenance-gate-core/src/runtime/extractor.rs
// ============================================================================
// Module: Provenance Extraction
// Description: Validates signed envelopes and extracts provenance records.
// Purpose: Turn one attestation layer into a typed record or a typed failure.
// Dependencies: crate::{core, interfaces}, base64, serde_json
// ============================================================================

//! ## Overview
//! Extraction is a fixed pipeline: media type, bounded payload read, envelope
//! decode, base64 decode, statement decode, predicate type check, then signer
//! resolution. Each stage maps its failure to exactly one [`GateError`] kind.
//! The signer is taken from the envelope signature when one is present and
//! from the certificate and chain otherwise, so callers never branch on the
//! signing method.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::core::CertificateIdentity;
use crate::core::ContentDigest;
use crate::core::DSSE_ENVELOPE_MEDIA_TYPE;
use crate::core::DecodeError;
use crate::core::EnvelopeSignature;
use crate::core::GateError;
use crate::core::ProvenanceRecord;
use crate::core::ProvenanceStatement;
use crate::core::ResolvedSigner;
use crate::core::SLSA_PROVENANCE_V02_PREDICATE_TYPE;
use crate::core::SignedEnvelope;
use crate::core::SourceError;
use crate::interfaces::EnvelopeSource;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default upper bound on envelope bytes read from a layer (10 MiB).
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Media type every layer must declare.
    pub media_type: String,
    /// Predicate type every statement must declare.
    pub predicate_type: String,
    /// Maximum envelope bytes read from a layer.
    pub max_payload_bytes: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            media_type: DSSE_ENVELOPE_MEDIA_TYPE.to_string(),
            predicate_type: SLSA_PROVENANCE_V02_PREDICATE_TYPE.to_string(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Extractor
// ============================================================================

/// Extracts provenance records from envelope sources.
#[derive(Debug, Clone, Default)]
pub struct ProvenanceExtractor {
    /// Extraction settings.
    config: ExtractorConfig,
}

impl ProvenanceExtractor {
    /// Creates an extractor with explicit settings.
    #[must_use]
    pub const fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
        }
    }

    /// Returns the extraction settings.
    #[must_use]
    pub const fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts a provenance record from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] describing the first pipeline stage that failed.
    pub fn extract(
        &self,
        source: Option<&dyn EnvelopeSource>,
    ) -> Result<ProvenanceRecord, GateError> {
        let source = source.ok_or(GateError::InputMissing)?;

        let media_type = source.media_type().map_err(GateError::MediaTypeUnreadable)?;
        if media_type != self.config.media_type {
            return Err(GateError::MediaTypeMismatch {
                expected: self.config.media_type.clone(),
                actual: media_type,
            });
        }

        let bytes = self.read_envelope(source)?;
        let envelope: SignedEnvelope = serde_json::from_slice(&bytes)
            .map_err(|err| GateError::PayloadMalformed(DecodeError::Envelope(err)))?;
        if envelope.payload.is_empty() {
            return Err(GateError::EmptyPredicate);
        }

        let raw_payload = STANDARD
            .decode(envelope.payload.as_bytes())
            .map_err(|err| GateError::PayloadMalformed(DecodeError::Base64(err)))?;
        let statement: Option<ProvenanceStatement> = serde_json::from_slice(&raw_payload)
            .map_err(|err| GateError::PayloadMalformed(DecodeError::Statement(err)))?;
        let Some(statement) = statement.filter(|statement| !statement.is_empty()) else {
            return Err(GateError::EmptyPredicate);
        };

        if statement.predicate_type != self.config.predicate_type {
            return Err(GateError::UnexpectedPredicateType {
                expected: self.config.predicate_type.clone(),
                received: statement.predicate_type,
            });
        }
        if statement.statement_type.is_empty() {
            return Err(GateError::PayloadMalformed(DecodeError::MissingField("_type")));
        }
        if statement.predicate.is_none() {
            return Err(GateError::PayloadMalformed(DecodeError::MissingField("predicate")));
        }

        let signer = resolve_signer(source, envelope.signatures)?;
        let statement_digest = ContentDigest::of_statement(&statement)
            .map_err(|err| GateError::PayloadMalformed(DecodeError::Canonicalization(err)))?;
        Ok(ProvenanceRecord::new(statement, statement_digest, raw_payload, signer))
    }

    /// Reads the envelope bytes, failing once the byte limit is exceeded.
    fn read_envelope(&self, source: &dyn EnvelopeSource) -> Result<Vec<u8>, GateError> {
        let reader = source.uncompressed_payload().map_err(GateError::PayloadUnreadable)?;
        let limit = self.config.max_payload_bytes;
        let mut bytes = Vec::new();
        let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
        reader
            .take(cap)
            .read_to_end(&mut bytes)
            .map_err(|err| GateError::PayloadUnreadable(SourceError::Io(err)))?;
        if bytes.len() > limit {
            return Err(GateError::PayloadMalformed(DecodeError::TooLarge {
                limit,
            }));
        }
        Ok(bytes)
    }
}

/// Extracts a provenance record with the default settings.
///
/// # Errors
///
/// Returns [`GateError`] describing the first pipeline stage that failed.
pub fn extract_provenance(
    source: Option<&dyn EnvelopeSource>,
) -> Result<ProvenanceRecord, GateError> {
    ProvenanceExtractor::default().extract(source)
}

// ============================================================================
// SECTION: Signer Resolution
// ============================================================================

/// Resolves the signer, preferring the direct signature.
fn resolve_signer(
    source: &dyn EnvelopeSource,
    declared: Vec<EnvelopeSignature>,
) -> Result<ResolvedSigner, GateError> {
    let signature_note = match source.base64_signature() {
        Ok(signature) if !signature.is_empty() => {
            return Ok(ResolvedSigner::Signature {
                signature,
                declared,
            });
        }
        Ok(_) => "signature empty".to_string(),
        Err(err) => format!("signature unavailable ({err})"),
    };

    let certificate = source
        .certificate()
        .and_then(|encoded| CertificateIdentity::from_encoded(&encoded))
        .map_err(|source| GateError::SignerResolutionFailed {
            detail: format!("{signature_note}; certificate unusable"),
            source,
        })?;
    let chain = source
        .certificate_chain()
        .and_then(|encoded| {
            encoded.iter().map(CertificateIdentity::from_encoded).collect::<Result<Vec<_>, _>>()
        })
        .map_err(|source| GateError::SignerResolutionFailed {
            detail: format!("{signature_note}; certificate chain unusable"),
            source,
        })?;

    Ok(ResolvedSigner::Certificate {
        certificate,
        chain,
    })
}
