// provenance-gate-providers/tests/envelope_source.rs
// ============================================================================
// Module: Envelope Source Tests
// Description: In-memory and file-backed envelope sources.
// Purpose: Validate certificate decoding and lazy file access.
// Dependencies: provenance-gate-providers, rcgen, tempfile
// ============================================================================

//! ## Overview
//! Covers PEM and DER certificate files, PEM bundles, and the extractor
//! running over both source implementations.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::fs;

use provenance_gate_core::DSSE_ENVELOPE_MEDIA_TYPE;
use provenance_gate_core::EncodedCertificate;
use provenance_gate_core::EnvelopeSource;
use provenance_gate_core::ErrorKind;
use provenance_gate_core::ResolvedSigner;
use provenance_gate_core::SourceError;
use provenance_gate_core::extract_provenance;
use provenance_gate_providers::FileEnvelopeSource;
use provenance_gate_providers::InMemoryEnvelopeSource;
use provenance_gate_providers::decode_pem_chain;

use crate::common::envelope_bytes;
use crate::common::slsa_statement;
use crate::common::test_chain;

// ============================================================================
// SECTION: In-Memory Source
// ============================================================================

/// Tests the in-memory source defaults to the canonical media type.
#[test]
fn test_in_memory_defaults() {
    let source = InMemoryEnvelopeSource::new(b"{}".to_vec());
    assert_eq!(source.media_type().unwrap(), DSSE_ENVELOPE_MEDIA_TYPE);
    assert_eq!(source.base64_signature().unwrap(), "");
    assert!(matches!(source.certificate(), Err(SourceError::Unavailable(_))));
    assert!(source.certificate_chain().unwrap().is_empty());
}

/// Tests a keyless in-memory source yields a certificate signer.
#[test]
fn test_in_memory_keyless_source_extracts() {
    let chain = test_chain();
    let source = InMemoryEnvelopeSource::new(envelope_bytes(&slsa_statement())).with_certificates(
        EncodedCertificate::from_der(chain.leaf.der().to_vec()),
        vec![EncodedCertificate::from_der(chain.ca.der().to_vec())],
    );

    let record = extract_provenance(Some(&source)).unwrap();
    assert_eq!(record.signer().method(), "certificate");
}

/// Tests an overridden media type is rejected by the extractor.
#[test]
fn test_in_memory_media_type_override() {
    let source = InMemoryEnvelopeSource::new(envelope_bytes(&slsa_statement()))
        .with_media_type("application/json")
        .with_signature("c2ln");
    let err = extract_provenance(Some(&source)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MediaTypeMismatch);
}

// ============================================================================
// SECTION: File Source
// ============================================================================

/// Tests PEM leaf and bundle files decode in order.
#[test]
fn test_file_source_reads_pem_files() {
    let dir = tempfile::tempdir().unwrap();
    let chain = test_chain();
    let payload = dir.path().join("att.json");
    let leaf = dir.path().join("leaf.pem");
    let bundle = dir.path().join("bundle.pem");
    fs::write(&payload, envelope_bytes(&slsa_statement())).unwrap();
    fs::write(&leaf, chain.leaf.pem()).unwrap();
    fs::write(&bundle, format!("{}{}", chain.leaf.pem(), chain.ca.pem())).unwrap();

    let source = FileEnvelopeSource::new(DSSE_ENVELOPE_MEDIA_TYPE, payload)
        .with_certificate_path(leaf)
        .with_chain_path(bundle);

    assert_eq!(source.certificate().unwrap().as_der(), chain.leaf.der().as_ref());
    let decoded = source.certificate_chain().unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[1].as_der(), chain.ca.der().as_ref());

    match extract_provenance(Some(&source)).unwrap().signer() {
        ResolvedSigner::Certificate {
            chain,
            ..
        } => assert_eq!(chain.len(), 2),
        other => panic!("unexpected signer {other:?}"),
    }
}

/// Tests DER certificate files are passed through.
#[test]
fn test_file_source_reads_der_files() {
    let dir = tempfile::tempdir().unwrap();
    let chain = test_chain();
    let payload = dir.path().join("att.json");
    let leaf = dir.path().join("leaf.der");
    fs::write(&payload, envelope_bytes(&slsa_statement())).unwrap();
    fs::write(&leaf, chain.leaf.der()).unwrap();

    let source =
        FileEnvelopeSource::new(DSSE_ENVELOPE_MEDIA_TYPE, payload).with_certificate_path(leaf);
    assert_eq!(source.certificate().unwrap().as_der(), chain.leaf.der().as_ref());
    assert!(source.certificate_chain().unwrap().is_empty());
}

/// Tests a missing payload file surfaces as an unreadable payload.
#[test]
fn test_file_source_missing_payload() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileEnvelopeSource::new(DSSE_ENVELOPE_MEDIA_TYPE, dir.path().join("missing"))
        .with_signature("c2ln");
    let err = extract_provenance(Some(&source)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PayloadUnreadable);
}

/// Tests the file source reports signer material as configured.
#[test]
fn test_file_source_signature_passthrough() {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("att.json");
    fs::write(&payload, envelope_bytes(&slsa_statement())).unwrap();
    let source = FileEnvelopeSource::new(DSSE_ENVELOPE_MEDIA_TYPE, payload).with_signature("c2ln");

    assert_eq!(source.base64_signature().unwrap(), "c2ln");
    assert!(matches!(source.certificate(), Err(SourceError::Unavailable(_))));
    assert_eq!(extract_provenance(Some(&source)).unwrap().signer().method(), "signature");
}

// ============================================================================
// SECTION: PEM Bundles
// ============================================================================

/// Tests PEM bundles decode leaf-first.
#[test]
fn test_decode_pem_chain_preserves_order() {
    let chain = test_chain();
    let bundle = format!("{}{}", chain.leaf.pem(), chain.ca.pem());
    let decoded = decode_pem_chain(bundle.as_bytes()).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[0].as_der(), chain.leaf.der().as_ref());
    assert_eq!(decoded[1].as_der(), chain.ca.der().as_ref());
}

/// Tests malformed PEM is rejected.
#[test]
fn test_decode_pem_chain_rejects_garbage() {
    let result = decode_pem_chain(b"-----BEGIN CERTIFICATE-----\nnot base64\n-----END CERTIFICATE-----\n");
    assert!(result.is_err());
}
