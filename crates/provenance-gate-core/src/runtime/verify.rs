// provenance-gate-core/src/runtime/verify.rs
// ============================================================================
// Module: Artifact Verification
// Description: Extracts every attestation attached to one artifact.
// Purpose: Keep one malformed attestation from hiding a valid sibling.
// Dependencies: crate::{core, interfaces, runtime::extractor}
// ============================================================================

//! ## Overview
//! Verification fetches all envelopes for an artifact and extracts each one
//! independently. Per-envelope failures are collected next to the records
//! that succeeded; only a registry failure aborts the whole artifact.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::DiagnosticEvent;
use crate::core::GateError;
use crate::core::ProvenanceRecord;
use crate::interfaces::AttestationRegistry;
use crate::interfaces::DiagnosticSink;
use crate::interfaces::EnvelopeSource;
use crate::runtime::extractor::ProvenanceExtractor;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Extraction failure for one attestation of an artifact.
#[derive(Debug)]
pub struct AttestationFailure {
    /// Position of the attestation in registry order.
    pub index: usize,
    /// Extraction error.
    pub error: GateError,
}

/// Outcome of verifying every attestation of one artifact.
#[derive(Debug)]
pub struct ArtifactVerification {
    /// Artifact reference.
    pub artifact: String,
    /// Records extracted successfully, in registry order.
    pub records: Vec<ProvenanceRecord>,
    /// Attestations that failed extraction, in registry order.
    pub failures: Vec<AttestationFailure>,
}

impl ArtifactVerification {
    /// Returns true when at least one attestation yielded a record.
    #[must_use]
    pub const fn has_provenance(&self) -> bool {
        !self.records.is_empty()
    }
}

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Extracts every attestation of `artifact`, continuing past failures.
///
/// # Errors
///
/// Returns [`GateError::RegistryUnavailable`] when the attestations cannot
/// be listed.
pub fn verify_artifact<R>(
    registry: &R,
    extractor: &ProvenanceExtractor,
    artifact: &str,
) -> Result<ArtifactVerification, GateError>
where
    R: AttestationRegistry + ?Sized,
{
    let envelopes =
        registry.fetch_attestations(artifact).map_err(|source| GateError::RegistryUnavailable {
            artifact: artifact.to_string(),
            source,
        })?;

    let mut records = Vec::new();
    let mut failures = Vec::new();
    for (index, envelope) in envelopes.iter().enumerate() {
        let envelope: &dyn EnvelopeSource = envelope.as_ref();
        match extractor.extract(Some(envelope)) {
            Ok(record) => records.push(record),
            Err(error) => failures.push(AttestationFailure {
                index,
                error,
            }),
        }
    }

    Ok(ArtifactVerification {
        artifact: artifact.to_string(),
        records,
        failures,
    })
}

/// Artifact verifier that reports rejected attestations to a sink.
pub struct ArtifactVerifier<R, S> {
    /// Attestation registry.
    registry: R,
    /// Envelope extractor.
    extractor: ProvenanceExtractor,
    /// Destination for rejection warnings.
    sink: S,
}

impl<R, S> ArtifactVerifier<R, S>
where
    R: AttestationRegistry,
    S: DiagnosticSink,
{
    /// Creates a verifier.
    #[must_use]
    pub const fn new(registry: R, extractor: ProvenanceExtractor, sink: S) -> Self {
        Self {
            registry,
            extractor,
            sink,
        }
    }

    /// Verifies `artifact`, emitting an `attestation_rejected` warning per
    /// failed attestation.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::RegistryUnavailable`] when the attestations
    /// cannot be listed.
    pub fn verify(&self, artifact: &str) -> Result<ArtifactVerification, GateError> {
        let verification = verify_artifact(&self.registry, &self.extractor, artifact)?;
        for failure in &verification.failures {
            let message = failure.error.chain_message();
            let event = DiagnosticEvent::warning("attestation_rejected", message)
                .with_artifact(artifact)
                .with_field("index", failure.index.to_string())
                .with_field("code", failure.error.code())
                .with_field("kind", failure.error.kind().label());
            self.sink.record(&event);
        }
        Ok(verification)
    }
}
