// provenance-gate-providers/src/lib.rs
// ============================================================================
// Module: Provenance Gate Providers
// Description: Concrete collaborators for the Provenance Gate core.
// Purpose: Back the core interfaces with clocks, files, HTTP, and log sinks.
// Dependencies: provenance-gate-core, reqwest, serde, serde_json, serde_yaml, time, x509-cert
// ============================================================================

//! ## Overview
//! This crate ships the collaborators the core reaches through its
//! interfaces: effective-time clocks, in-memory and file-backed envelope
//! sources, a directory-backed attestation registry, an HTTP commit message
//! provider, policy document loading, and JSON-line diagnostic sinks. Every
//! reader enforces a byte limit on untrusted input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod clock;
pub mod commit;
pub mod diagnostics;
pub mod envelope;
mod files;
pub mod policy;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use clock::FixedEffectiveTime;
pub use clock::SystemClock;
pub use commit::HttpCommitMessageProvider;
pub use commit::HttpCommitProviderConfig;
pub use diagnostics::FileDiagnosticSink;
pub use diagnostics::MemoryDiagnosticSink;
pub use diagnostics::NoopDiagnosticSink;
pub use diagnostics::StderrDiagnosticSink;
pub use envelope::FileEnvelopeSource;
pub use envelope::InMemoryEnvelopeSource;
pub use envelope::decode_pem_chain;
pub use policy::DEFAULT_MAX_POLICY_BYTES;
pub use policy::load_policy_source;
pub use registry::ATTESTATION_INDEX_FILE;
pub use registry::AttestationIndex;
pub use registry::AttestationIndexEntry;
pub use registry::DirectoryAttestationRegistry;
