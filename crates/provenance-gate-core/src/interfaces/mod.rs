// provenance-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Provenance Gate Interfaces
// Description: Collaborator contracts for envelopes, registries, and history.
// Purpose: Keep registry, source-control, and clock access outside the core.
// Dependencies: crate::core, time
// ============================================================================

//! ## Overview
//! Interfaces define how the resolvers reach external systems. Every
//! accessor returns a typed [`SourceError`] so collaborator causes stay in
//! the chain. One implementation exists per real backend and one per test
//! double; the core never branches on which.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::sync::Arc;

use time::OffsetDateTime;

use crate::core::BuildSource;
use crate::core::DiagnosticEvent;
use crate::core::EncodedCertificate;
use crate::core::GateError;
use crate::core::ProvenanceRecord;
use crate::core::SignOffRecord;
use crate::core::SourceError;

// ============================================================================
// SECTION: Envelope Source
// ============================================================================

/// Accessors over one attestation layer.
pub trait EnvelopeSource {
    /// Returns the media type declared for the layer.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the media type cannot be read.
    fn media_type(&self) -> Result<String, SourceError>;

    /// Opens the uncompressed envelope bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the payload cannot be opened.
    fn uncompressed_payload(&self) -> Result<Box<dyn Read + '_>, SourceError>;

    /// Returns the base64 signature attached to the layer.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the signature cannot be read.
    fn base64_signature(&self) -> Result<String, SourceError>;

    /// Returns the signing certificate.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when no certificate is available.
    fn certificate(&self) -> Result<EncodedCertificate, SourceError>;

    /// Returns the issuing chain, leaf-most first.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the chain cannot be read.
    fn certificate_chain(&self) -> Result<Vec<EncodedCertificate>, SourceError>;
}

impl<T: EnvelopeSource + ?Sized> EnvelopeSource for Box<T> {
    fn media_type(&self) -> Result<String, SourceError> {
        (**self).media_type()
    }

    fn uncompressed_payload(&self) -> Result<Box<dyn Read + '_>, SourceError> {
        (**self).uncompressed_payload()
    }

    fn base64_signature(&self) -> Result<String, SourceError> {
        (**self).base64_signature()
    }

    fn certificate(&self) -> Result<EncodedCertificate, SourceError> {
        (**self).certificate()
    }

    fn certificate_chain(&self) -> Result<Vec<EncodedCertificate>, SourceError> {
        (**self).certificate_chain()
    }
}

// ============================================================================
// SECTION: Attestation Registry
// ============================================================================

/// Lists the attestation layers attached to an artifact.
pub trait AttestationRegistry {
    /// Fetches every attestation envelope for `artifact`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the registry cannot be queried.
    fn fetch_attestations(
        &self,
        artifact: &str,
    ) -> Result<Vec<Box<dyn EnvelopeSource + Send + Sync>>, SourceError>;
}

impl<T: AttestationRegistry + ?Sized> AttestationRegistry for &T {
    fn fetch_attestations(
        &self,
        artifact: &str,
    ) -> Result<Vec<Box<dyn EnvelopeSource + Send + Sync>>, SourceError> {
        (**self).fetch_attestations(artifact)
    }
}

// ============================================================================
// SECTION: Source Control
// ============================================================================

/// Resolves commit messages from source control.
pub trait CommitMessageProvider {
    /// Returns the full message of `commit_sha` in `scm_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the repository or commit is unreachable.
    fn commit_message(&self, scm_url: &str, commit_sha: &str) -> Result<String, SourceError>;
}

impl<T: CommitMessageProvider + ?Sized> CommitMessageProvider for &T {
    fn commit_message(&self, scm_url: &str, commit_sha: &str) -> Result<String, SourceError> {
        (**self).commit_message(scm_url, commit_sha)
    }
}

/// Derives the build source from a provenance record.
pub trait BuildSourceLocator {
    /// Locates the repository and commit that produced `record`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::BuildSourceUnavailable`] when the record does not
    /// name a source.
    fn locate(&self, record: &ProvenanceRecord) -> Result<BuildSource, GateError>;
}

/// Recovers sign-off evidence for a provenance record.
pub trait SignOffSource {
    /// Resolves sign-off references.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::NoSignOffReference`] when no evidence matches, or
    /// the collaborator failure that prevented the search.
    fn sign_off(&self, record: &ProvenanceRecord) -> Result<SignOffRecord, GateError>;
}

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Supplies the instant policy windows are evaluated at.
pub trait EffectiveTimeProvider {
    /// Returns the evaluation instant.
    fn effective_time(&self) -> OffsetDateTime;
}

impl<T: EffectiveTimeProvider + ?Sized> EffectiveTimeProvider for Box<T> {
    fn effective_time(&self) -> OffsetDateTime {
        (**self).effective_time()
    }
}

// ============================================================================
// SECTION: Diagnostics
// ============================================================================

/// Receives structured diagnostic events.
pub trait DiagnosticSink: Send + Sync {
    /// Records a diagnostic event.
    fn record(&self, event: &DiagnosticEvent);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn record(&self, event: &DiagnosticEvent) {
        (**self).record(event);
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Box<T> {
    fn record(&self, event: &DiagnosticEvent) {
        (**self).record(event);
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn record(&self, event: &DiagnosticEvent) {
        (**self).record(event);
    }
}
