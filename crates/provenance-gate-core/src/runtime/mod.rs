// provenance-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Provenance Gate Runtime
// Description: Criteria resolution, provenance extraction, and sign-off lookup.
// Purpose: Implement the resolvers over core types and collaborator interfaces.
// Dependencies: crate::{core, interfaces}, base64, regex, time
// ============================================================================

//! ## Overview
//! Runtime modules are synchronous and pure over their inputs; only the
//! collaborators they are handed perform I/O. Independent artifacts can be
//! processed in parallel because no resolver keeps mutable state between
//! calls.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod criteria;
pub mod extractor;
pub mod report;
pub mod sign_off;
pub mod verify;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use criteria::CriteriaResolver;
pub use criteria::resolve_criteria;
pub use extractor::DEFAULT_MAX_PAYLOAD_BYTES;
pub use extractor::ExtractorConfig;
pub use extractor::ProvenanceExtractor;
pub use extractor::extract_provenance;
pub use report::render_report;
pub use report::render_statements;
pub use sign_off::CommitSignOffSource;
pub use sign_off::IssueTrackerSignOffSource;
pub use sign_off::SlsaBuildSourceLocator;
pub use sign_off::resolve_sign_off;
pub use verify::ArtifactVerification;
pub use verify::ArtifactVerifier;
pub use verify::AttestationFailure;
pub use verify::verify_artifact;
