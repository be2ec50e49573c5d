// provenance-gate-providers/tests/policy.rs
// ============================================================================
// Module: Policy Loading Tests
// Description: JSON and YAML policy documents.
// Purpose: Validate policy parsing and size limits.
// Dependencies: provenance-gate-providers, tempfile
// ============================================================================

//! ## Overview
//! Loads policy sources from temporary files and resolves criteria from them.

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

use std::fs;

use provenance_gate_core::resolve_criteria;
use provenance_gate_providers::DEFAULT_MAX_POLICY_BYTES;
use provenance_gate_providers::load_policy_source;
use time::macros::datetime;

/// Tests JSON policies load every section.
#[test]
fn test_json_policy_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.json");
    fs::write(
        &path,
        r#"{
            "config": {"include": ["a"], "exclude": ["b"]},
            "volatile_config": {"include": [{"value": "v1", "effective_on": "2023-01-01T00:00:00Z"}]}
        }"#,
    )
    .unwrap();

    let source = load_policy_source(&path).unwrap();
    assert!(source.legacy.is_none());
    let criteria = resolve_criteria(&source, "img", datetime!(2023-06-01 0:00 UTC)).criteria;
    assert_eq!(criteria.include(), ["a".to_string(), "v1".to_string()].as_slice());
    assert_eq!(criteria.exclude(), ["b".to_string()].as_slice());
}

/// Tests YAML policies load by extension.
#[test]
fn test_yaml_policy_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.YML");
    fs::write(
        &path,
        "volatile_config:\n  exclude:\n    - value: cve\n      effective_until: 2023-03-01T00:00:00Z\n      image_ref: img\nlegacy:\n  collections: [minimal]\n",
    )
    .unwrap();

    let source = load_policy_source(&path).unwrap();
    let criteria = resolve_criteria(&source, "img", datetime!(2023-01-01 0:00 UTC)).criteria;
    assert_eq!(criteria.exclude(), ["cve".to_string()].as_slice());
    assert_eq!(criteria.include(), ["*".to_string()].as_slice());

    let later = resolve_criteria(&source, "img", datetime!(2023-06-01 0:00 UTC)).criteria;
    assert_eq!(later.include(), ["@minimal".to_string()].as_slice());
}

/// Tests malformed documents are rejected.
#[test]
fn test_malformed_policy_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.json");
    fs::write(&path, r#"{"config": {"include": "not-a-list"}}"#).unwrap();
    let err = load_policy_source(&path).unwrap_err();
    assert!(err.to_string().contains("invalid policy json"));
}

/// Tests misspelled sections are rejected instead of ignored.
#[test]
fn test_unknown_policy_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.yaml");
    fs::write(&path, "volatileConfig:\n  include: []\n").unwrap();
    assert!(load_policy_source(&path).is_err());
}

/// Tests oversized documents are rejected.
#[test]
fn test_oversized_policy_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.json");
    fs::write(&path, vec![b' '; DEFAULT_MAX_POLICY_BYTES + 1]).unwrap();
    let err = load_policy_source(&path).unwrap_err();
    assert!(err.to_string().contains("exceeds"));
}
