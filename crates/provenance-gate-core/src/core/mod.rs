// provenance-gate-core/src/core/mod.rs
// ============================================================================
// Module: Provenance Gate Core Types
// Description: Canonical policy, envelope, provenance, and sign-off structures.
// Purpose: Provide stable, serializable types shared by resolvers and reports.
// Dependencies: serde, serde_json, thiserror, time, x509-cert
// ============================================================================

//! ## Overview
//! Core types describe the inputs and outputs of the resolvers: policy sources
//! and the criteria derived from them, signed envelopes and the provenance
//! records extracted from them, and sign-off evidence. They are the canonical
//! source of truth for any report rendered for audit.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod criteria;
pub mod diagnostics;
pub mod digest;
pub mod envelope;
pub mod error;
pub mod provenance;
pub mod sign_off;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use criteria::CriteriaDiagnostic;
pub use criteria::CriteriaResolution;
pub use criteria::EffectiveCriteria;
pub use criteria::LegacyConfiguration;
pub use criteria::PolicySource;
pub use criteria::StaticCriteria;
pub use criteria::TimeBound;
pub use criteria::VolatileCriteria;
pub use criteria::VolatileRule;
pub use criteria::WILDCARD_CRITERION;
pub use diagnostics::DiagnosticEvent;
pub use diagnostics::DiagnosticLevel;
pub use digest::ContentDigest;
pub use digest::DIGEST_ALGORITHM;
pub use envelope::DSSE_ENVELOPE_MEDIA_TYPE;
pub use envelope::EncodedCertificate;
pub use envelope::EnvelopeSignature;
pub use envelope::IN_TOTO_STATEMENT_V01_TYPE;
pub use envelope::SLSA_PROVENANCE_V02_PREDICATE_TYPE;
pub use envelope::SignedEnvelope;
pub use error::DecodeError;
pub use error::ErrorKind;
pub use error::GateError;
pub use error::SourceError;
pub use provenance::CertificateIdentity;
pub use provenance::ProvenanceRecord;
pub use provenance::ProvenanceStatement;
pub use provenance::ResolvedSigner;
pub use provenance::SlsaBuilder;
pub use provenance::SlsaConfigSource;
pub use provenance::SlsaInvocation;
pub use provenance::SlsaMaterial;
pub use provenance::SlsaPredicate;
pub use sign_off::BuildSource;
pub use sign_off::DEFAULT_SIGN_OFF_PATTERN;
pub use sign_off::SignOffOrigin;
pub use sign_off::SignOffPattern;
pub use sign_off::SignOffRecord;
