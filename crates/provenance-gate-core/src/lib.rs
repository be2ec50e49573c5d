// provenance-gate-core/src/lib.rs
// ============================================================================
// Module: Provenance Gate Core Library
// Description: Public API surface for the Provenance Gate core.
// Purpose: Expose core types, collaborator interfaces, and runtime resolvers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Provenance Gate core validates signed attestation envelopes for container
//! images, extracts their build-provenance records, narrows an organization's
//! compliance policy to the rules effective for one artifact, and recovers
//! sign-off references from the recorded build history. Registry access,
//! source control, and clocks are reached only through explicit interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::AttestationRegistry;
pub use interfaces::BuildSourceLocator;
pub use interfaces::CommitMessageProvider;
pub use interfaces::DiagnosticSink;
pub use interfaces::EffectiveTimeProvider;
pub use interfaces::EnvelopeSource;
pub use interfaces::SignOffSource;
pub use runtime::ArtifactVerification;
pub use runtime::ArtifactVerifier;
pub use runtime::AttestationFailure;
pub use runtime::CommitSignOffSource;
pub use runtime::CriteriaResolver;
pub use runtime::DEFAULT_MAX_PAYLOAD_BYTES;
pub use runtime::ExtractorConfig;
pub use runtime::IssueTrackerSignOffSource;
pub use runtime::ProvenanceExtractor;
pub use runtime::SlsaBuildSourceLocator;
pub use runtime::extract_provenance;
pub use runtime::render_report;
pub use runtime::render_statements;
pub use runtime::resolve_criteria;
pub use runtime::resolve_sign_off;
pub use runtime::verify_artifact;
