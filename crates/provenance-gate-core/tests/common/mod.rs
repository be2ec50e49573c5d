// provenance-gate-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Fixtures
// Description: Scripted envelope sources, statements, and certificate chains.
// Purpose: Share test doubles across core integration tests.
// Dependencies: base64, rcgen, serde_json
// ============================================================================

//! ## Overview
//! [`ScriptedEnvelope`] answers each accessor from a preset result and
//! counts how often the certificate accessors are consulted.

#![allow(dead_code, reason = "Shared helpers are used by a subset of test files.")]

use std::io::Cursor;
use std::io::Read;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use provenance_gate_core::DSSE_ENVELOPE_MEDIA_TYPE;
use provenance_gate_core::EncodedCertificate;
use provenance_gate_core::EnvelopeSource;
use provenance_gate_core::IN_TOTO_STATEMENT_V01_TYPE;
use provenance_gate_core::SLSA_PROVENANCE_V02_PREDICATE_TYPE;
use provenance_gate_core::SourceError;
use rcgen::BasicConstraints;
use rcgen::CertificateParams;
use rcgen::DistinguishedName;
use rcgen::DnType;
use rcgen::IsCa;
use rcgen::Issuer;
use rcgen::KeyPair;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Scripted Envelope
// ============================================================================

/// Envelope source whose accessors return preset results.
pub struct ScriptedEnvelope {
    pub media_type: Result<String, String>,
    pub payload: Result<Vec<u8>, String>,
    pub signature: Result<String, String>,
    pub certificate: Result<Vec<u8>, String>,
    pub chain: Result<Vec<Vec<u8>>, String>,
    pub certificate_calls: AtomicUsize,
    pub chain_calls: AtomicUsize,
}

impl ScriptedEnvelope {
    /// Envelope with the canonical media type and a signature.
    pub fn signed(payload: Vec<u8>) -> Self {
        Self {
            media_type: Ok(DSSE_ENVELOPE_MEDIA_TYPE.to_string()),
            payload: Ok(payload),
            signature: Ok("c2lnbmF0dXJl".to_string()),
            certificate: Err("no certificate".to_string()),
            chain: Err("no chain".to_string()),
            certificate_calls: AtomicUsize::new(0),
            chain_calls: AtomicUsize::new(0),
        }
    }

    /// Envelope signed keylessly by `leaf` issued from `chain`.
    pub fn keyless(payload: Vec<u8>, leaf: Vec<u8>, chain: Vec<Vec<u8>>) -> Self {
        Self {
            signature: Ok(String::new()),
            certificate: Ok(leaf),
            chain: Ok(chain),
            ..Self::signed(payload)
        }
    }

    pub fn certificate_calls(&self) -> usize {
        self.certificate_calls.load(Ordering::SeqCst)
    }

    pub fn chain_calls(&self) -> usize {
        self.chain_calls.load(Ordering::SeqCst)
    }
}

impl EnvelopeSource for ScriptedEnvelope {
    fn media_type(&self) -> Result<String, SourceError> {
        self.media_type.clone().map_err(SourceError::Unavailable)
    }

    fn uncompressed_payload(&self) -> Result<Box<dyn Read + '_>, SourceError> {
        match &self.payload {
            Ok(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            Err(reason) => Err(SourceError::Unavailable(reason.clone())),
        }
    }

    fn base64_signature(&self) -> Result<String, SourceError> {
        self.signature.clone().map_err(SourceError::Unavailable)
    }

    fn certificate(&self) -> Result<EncodedCertificate, SourceError> {
        self.certificate_calls.fetch_add(1, Ordering::SeqCst);
        self.certificate.clone().map(EncodedCertificate::from_der).map_err(SourceError::Unavailable)
    }

    fn certificate_chain(&self) -> Result<Vec<EncodedCertificate>, SourceError> {
        self.chain_calls.fetch_add(1, Ordering::SeqCst);
        self.chain
            .clone()
            .map(|chain| chain.into_iter().map(EncodedCertificate::from_der).collect())
            .map_err(SourceError::Unavailable)
    }
}

// ============================================================================
// SECTION: Statements
// ============================================================================

/// SLSA v0.2 statement recording a git config source.
pub fn slsa_statement() -> Value {
    json!({
        "_type": IN_TOTO_STATEMENT_V01_TYPE,
        "predicateType": SLSA_PROVENANCE_V02_PREDICATE_TYPE,
        "subject": [{"name": "registry.example/app", "digest": {"sha256": "abc"}}],
        "predicate": {
            "buildType": "tekton.dev/v1beta1/TaskRun",
            "builder": {"id": "https://tekton.dev/chains/v2"},
            "invocation": {
                "configSource": {
                    "uri": "git+https://github.com/org/app@refs/heads/main",
                    "digest": {"sha1": "0123456789abcdef"},
                    "entryPoint": "build.yaml"
                },
                "parameters": {"ISSUE": "RedHat JIRA Issue: PARAM-7"},
                "environment": {}
            },
            "materials": []
        }
    })
}

/// Envelope JSON wrapping `statement` as its base64 payload.
pub fn envelope_bytes(statement: &Value) -> Vec<u8> {
    let payload = STANDARD.encode(serde_json::to_vec(statement).unwrap());
    serde_json::to_vec(&json!({
        "payload": payload,
        "signatures": [{"keyid": "key-1", "sig": "c2ln"}]
    }))
    .unwrap()
}

/// Envelope JSON carrying a raw payload string.
pub fn envelope_with_payload(payload: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({"payload": payload, "signatures": []})).unwrap()
}

// ============================================================================
// SECTION: Certificates
// ============================================================================

/// Issues a leaf certificate from a fresh CA; returns `(leaf_der, ca_der)`.
pub fn certificate_chain() -> (Vec<u8>, Vec<u8>) {
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

    (leaf.der().to_vec(), ca.der().to_vec())
}

fn distinguished_name(common_name: &str) -> DistinguishedName {
    let mut name = DistinguishedName::new();
    name.push(DnType::CommonName, common_name);
    name
}
