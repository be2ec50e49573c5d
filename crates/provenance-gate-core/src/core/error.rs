// provenance-gate-core/src/core/error.rs
// ============================================================================
// Module: Provenance Gate Error Taxonomy
// Description: Fixed catalog of typed, chainable failure kinds.
// Purpose: Give every resolver failure a stable kind, code, and cause chain.
// Dependencies: base64, regex, serde, serde_json, thiserror, x509-cert
// ============================================================================

//! ## Overview
//! [`GateError`] is the single error type returned by the extractor, the
//! sign-off resolvers, and artifact verification. Each variant maps to an
//! [`ErrorKind`] with a stable code so reports can be filtered without string
//! matching. Collaborator failures are carried as [`SourceError`] and always
//! remain reachable through [`std::error::Error::source`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Error Kinds
// ============================================================================

/// Stable classification of [`GateError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No envelope source was supplied.
    InputMissing,
    /// The media type accessor failed.
    MediaTypeUnreadable,
    /// The media type is not the canonical signed-envelope media type.
    MediaTypeMismatch,
    /// The payload stream could not be opened or read.
    PayloadUnreadable,
    /// The envelope or statement could not be decoded.
    PayloadMalformed,
    /// The payload decoded but carried no statement content.
    EmptyPredicate,
    /// The statement predicate type is not the expected provenance type.
    UnexpectedPredicateType,
    /// Neither the signature nor the certificate path produced a signer.
    SignerResolutionFailed,
    /// The provenance does not record a source repository and commit.
    BuildSourceUnavailable,
    /// The commit message collaborator failed.
    CommitLookupFailed,
    /// The sign-off pattern matched nothing.
    NoSignOffReference,
    /// The configured sign-off pattern does not compile.
    InvalidSignOffPattern,
    /// The attestation registry could not be queried.
    RegistryUnavailable,
}

impl ErrorKind {
    /// Returns the stable error code for this kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InputMissing => "PG001",
            Self::MediaTypeUnreadable | Self::MediaTypeMismatch => "PG002",
            Self::PayloadUnreadable | Self::PayloadMalformed => "PG003",
            Self::EmptyPredicate => "PG004",
            Self::UnexpectedPredicateType => "PG005",
            Self::SignerResolutionFailed => "PG006",
            Self::BuildSourceUnavailable => "PG007",
            Self::CommitLookupFailed => "PG008",
            Self::NoSignOffReference => "PG009",
            Self::InvalidSignOffPattern => "PG010",
            Self::RegistryUnavailable => "PG011",
        }
    }

    /// Returns the snake-case label for this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InputMissing => "input_missing",
            Self::MediaTypeUnreadable => "media_type_unreadable",
            Self::MediaTypeMismatch => "media_type_mismatch",
            Self::PayloadUnreadable => "payload_unreadable",
            Self::PayloadMalformed => "payload_malformed",
            Self::EmptyPredicate => "empty_predicate",
            Self::UnexpectedPredicateType => "unexpected_predicate_type",
            Self::SignerResolutionFailed => "signer_resolution_failed",
            Self::BuildSourceUnavailable => "build_source_unavailable",
            Self::CommitLookupFailed => "commit_lookup_failed",
            Self::NoSignOffReference => "no_sign_off_reference",
            Self::InvalidSignOffPattern => "invalid_sign_off_pattern",
            Self::RegistryUnavailable => "registry_unavailable",
        }
    }
}

// ============================================================================
// SECTION: Collaborator Errors
// ============================================================================

/// Failures reported by external collaborators (registry, source control,
/// envelope accessors).
#[derive(Debug, Error)]
pub enum SourceError {
    /// Underlying I/O failed.
    #[error("collaborator io error")]
    Io(#[from] io::Error),
    /// The collaborator could not serve the request.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
    /// The collaborator returned data that cannot be used.
    #[error("collaborator returned invalid data: {0}")]
    Invalid(String),
    /// A certificate could not be decoded.
    #[error("certificate decode failed")]
    Certificate(#[from] x509_cert::der::Error),
}

// ============================================================================
// SECTION: Decode Errors
// ============================================================================

/// Reasons an envelope payload is considered malformed.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The envelope JSON is invalid or empty.
    #[error("invalid envelope json")]
    Envelope(#[source] serde_json::Error),
    /// The envelope payload is not valid standard base64.
    #[error("invalid base64 payload")]
    Base64(#[from] base64::DecodeError),
    /// The decoded statement JSON is invalid.
    #[error("invalid statement json")]
    Statement(#[source] serde_json::Error),
    /// The decoded statement has no canonical JSON form.
    #[error("statement cannot be canonicalized")]
    Canonicalization(#[source] serde_json::Error),
    /// The envelope exceeds the configured byte limit.
    #[error("envelope exceeds {limit} bytes")]
    TooLarge {
        /// Configured byte limit.
        limit: usize,
    },
    /// A required statement field is absent.
    #[error("statement missing required field `{0}`")]
    MissingField(&'static str),
}

// ============================================================================
// SECTION: Gate Errors
// ============================================================================

/// Errors raised while extracting provenance or resolving sign-off evidence.
#[derive(Debug, Error)]
pub enum GateError {
    /// No envelope source was supplied.
    #[error("no attestation envelope was supplied")]
    InputMissing,
    /// The media type accessor failed.
    #[error("unable to read envelope media type")]
    MediaTypeUnreadable(#[source] SourceError),
    /// The media type is not the canonical signed-envelope media type.
    #[error("expecting media type of `{expected}`, received: `{actual}`")]
    MediaTypeMismatch {
        /// Canonical media type.
        expected: String,
        /// Media type reported by the source.
        actual: String,
    },
    /// The payload stream could not be opened or read.
    #[error("unable to read envelope payload")]
    PayloadUnreadable(#[source] SourceError),
    /// The envelope or statement could not be decoded.
    #[error("malformed envelope payload")]
    PayloadMalformed(#[source] DecodeError),
    /// The payload decoded but carried no statement content.
    #[error("attestation payload carries no statement")]
    EmptyPredicate,
    /// The statement predicate type is not the expected provenance type.
    #[error("unexpected predicate type `{received}`, expecting `{expected}`")]
    UnexpectedPredicateType {
        /// Expected predicate type.
        expected: String,
        /// Predicate type found in the statement.
        received: String,
    },
    /// Neither the signature nor the certificate path produced a signer.
    #[error("unable to resolve attestation signer: {detail}")]
    SignerResolutionFailed {
        /// Which resolution path failed.
        detail: String,
        /// Failure reported by the certificate accessors.
        #[source]
        source: SourceError,
    },
    /// The provenance does not record a source repository and commit.
    #[error("build source unavailable: {0}")]
    BuildSourceUnavailable(String),
    /// The commit message collaborator failed.
    #[error("commit lookup failed for {repository}@{commit}")]
    CommitLookupFailed {
        /// Repository URL used for the lookup.
        repository: String,
        /// Commit identifier used for the lookup.
        commit: String,
        /// Collaborator failure.
        #[source]
        source: SourceError,
    },
    /// The sign-off pattern matched nothing.
    #[error("no sign-off references found in {origin}")]
    NoSignOffReference {
        /// Description of the searched evidence.
        origin: String,
    },
    /// The configured sign-off pattern does not compile.
    #[error("invalid sign-off pattern")]
    InvalidSignOffPattern(#[from] regex::Error),
    /// The attestation registry could not be queried.
    #[error("attestation registry unavailable for {artifact}")]
    RegistryUnavailable {
        /// Artifact reference that was queried.
        artifact: String,
        /// Collaborator failure.
        #[source]
        source: SourceError,
    },
}

impl GateError {
    /// Returns the stable kind for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InputMissing => ErrorKind::InputMissing,
            Self::MediaTypeUnreadable(_) => ErrorKind::MediaTypeUnreadable,
            Self::MediaTypeMismatch {
                ..
            } => ErrorKind::MediaTypeMismatch,
            Self::PayloadUnreadable(_) => ErrorKind::PayloadUnreadable,
            Self::PayloadMalformed(_) => ErrorKind::PayloadMalformed,
            Self::EmptyPredicate => ErrorKind::EmptyPredicate,
            Self::UnexpectedPredicateType {
                ..
            } => ErrorKind::UnexpectedPredicateType,
            Self::SignerResolutionFailed {
                ..
            } => ErrorKind::SignerResolutionFailed,
            Self::BuildSourceUnavailable(_) => ErrorKind::BuildSourceUnavailable,
            Self::CommitLookupFailed {
                ..
            } => ErrorKind::CommitLookupFailed,
            Self::NoSignOffReference {
                ..
            } => ErrorKind::NoSignOffReference,
            Self::InvalidSignOffPattern(_) => ErrorKind::InvalidSignOffPattern,
            Self::RegistryUnavailable {
                ..
            } => ErrorKind::RegistryUnavailable,
        }
    }

    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Renders this error followed by each cause in its source chain.
    #[must_use]
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = err.source();
        }
        message
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
