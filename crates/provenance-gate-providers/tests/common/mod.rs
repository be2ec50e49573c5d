// provenance-gate-providers/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared statements, envelopes, and certificates for provider tests.
// Purpose: Provide reusable test infrastructure for deterministic testing.
// Dependencies: base64, rcgen, serde_json
// ============================================================================

//! ## Overview
//! Builds SLSA statements, DSSE envelope bytes, and ephemeral certificate
//! chains used across provider test files.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use provenance_gate_core::IN_TOTO_STATEMENT_V01_TYPE;
use provenance_gate_core::SLSA_PROVENANCE_V02_PREDICATE_TYPE;
use rcgen::BasicConstraints;
use rcgen::Certificate;
use rcgen::CertificateParams;
use rcgen::DistinguishedName;
use rcgen::DnType;
use rcgen::IsCa;
use rcgen::Issuer;
use rcgen::KeyPair;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Statements
// ============================================================================

/// Minimal SLSA v0.2 statement.
#[must_use]
pub fn slsa_statement() -> Value {
    json!({
        "_type": IN_TOTO_STATEMENT_V01_TYPE,
        "predicateType": SLSA_PROVENANCE_V02_PREDICATE_TYPE,
        "subject": [{"name": "registry.example/app", "digest": {"sha256": "ab12"}}],
        "predicate": {
            "builder": {"id": "https://tekton.dev/chains/v2"},
            "invocation": {
                "configSource": {
                    "uri": "git+https://github.com/org/app@refs/heads/main",
                    "digest": {"sha1": "0123abcd"}
                }
            }
        }
    })
}

/// DSSE envelope bytes wrapping `statement`.
#[must_use]
pub fn envelope_bytes(statement: &Value) -> Vec<u8> {
    let payload = STANDARD.encode(serde_json::to_vec(statement).unwrap());
    serde_json::to_vec(&json!({"payload": payload, "signatures": [{"keyid": "", "sig": "c2ln"}]}))
        .unwrap()
}

// ============================================================================
// SECTION: Certificates
// ============================================================================

/// Ephemeral CA and leaf certificate.
pub struct TestChain {
    pub ca: Certificate,
    pub leaf: Certificate,
}

/// Issues a leaf certificate from a fresh CA.
#[must_use]
pub fn test_chain() -> TestChain {
    let ca_key = KeyPair::generate().unwrap();
    let mut ca_params = CertificateParams::default();
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    ca_params.distinguished_name = distinguished_name("Provenance Gate Test CA");
    let ca = ca_params.self_signed(&ca_key).unwrap();
    let issuer = Issuer::new(ca_params, ca_key);

    let leaf_key = KeyPair::generate().unwrap();
    let mut leaf_params = CertificateParams::default();
    leaf_params.is_ca = IsCa::NoCa;
    leaf_params.distinguished_name = distinguished_name("builder@example.com");
    let leaf = leaf_params.signed_by(&leaf_key, &issuer).unwrap();

    TestChain {
        ca,
        leaf,
    }
}

fn distinguished_name(common_name: &str) -> DistinguishedName {
    let mut name = DistinguishedName::new();
    name.push(DnType::CommonName, common_name);
    name
}
