//! Section validation tests for provenance-gate-config.
// provenance-gate-config/tests/section_validation.rs
// ============================================================================
// Module: Config Section Validation Tests
// Description: Validate attestation, criteria, sign-off, and provider limits.
// Purpose: Ensure invalid settings are rejected before wiring.
// ============================================================================

use std::path::PathBuf;

use provenance_gate_config::GateConfig;
use provenance_gate_core::PolicySource;

mod common;

use common::TestResult;
use common::assert_invalid;

#[test]
fn sign_off_rejects_invalid_regex() -> TestResult {
    assert_invalid(GateConfig::from_toml("[sign_off]\npattern = \"(unclosed\"\n"), "sign_off.pattern")
}

#[test]
fn sign_off_rejects_empty_pattern() -> TestResult {
    let mut config = GateConfig::default();
    config.sign_off.pattern = String::new();
    assert_invalid(config.validate(), "sign_off.pattern must be non-empty")
}

#[test]
fn criteria_rejects_invalid_effective_time() -> TestResult {
    assert_invalid(
        GateConfig::from_toml("[criteria]\neffective_time = \"tomorrow\"\n"),
        "criteria.effective_time",
    )
}

#[test]
fn criteria_rejects_policy_path_with_inline_policy() -> TestResult {
    let mut config = GateConfig::default();
    config.criteria.policy_path = Some(PathBuf::from("policy.yaml"));
    config.policy = Some(PolicySource::default());
    assert_invalid(config.validate(), "conflicts with inline policy")
}

#[test]
fn attestation_rejects_zero_payload_limit() -> TestResult {
    let mut config = GateConfig::default();
    config.attestation.max_payload_bytes = 0;
    assert_invalid(config.validate(), "attestation.max_payload_bytes out of range")
}

#[test]
fn attestation_rejects_oversized_payload_limit() -> TestResult {
    let mut config = GateConfig::default();
    config.attestation.max_payload_bytes = 64 * 1024 * 1024 + 1;
    assert_invalid(config.validate(), "attestation.max_payload_bytes out of range")
}

#[test]
fn attestation_rejects_blank_media_type() -> TestResult {
    let mut config = GateConfig::default();
    config.attestation.media_type = "  ".to_string();
    assert_invalid(config.validate(), "attestation.media_type must be non-empty")
}

#[test]
fn commit_provider_rejects_http_without_opt_in() -> TestResult {
    let mut config = GateConfig::default();
    config.commit_provider.api_base_url = "http://git.internal".to_string();
    assert_invalid(config.validate(), "must use https")?;
    config.commit_provider.allow_http = true;
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn commit_provider_rejects_timeout_out_of_range() -> TestResult {
    let mut config = GateConfig::default();
    config.commit_provider.timeout_ms = 10;
    assert_invalid(config.validate(), "commit_provider.timeout_ms out of range")?;
    config.commit_provider.timeout_ms = 60_000;
    assert_invalid(config.validate(), "commit_provider.timeout_ms out of range")
}

#[test]
fn commit_provider_rejects_zero_response_limit() -> TestResult {
    let mut config = GateConfig::default();
    config.commit_provider.max_response_bytes = 0;
    assert_invalid(config.validate(), "commit_provider.max_response_bytes out of range")
}

#[test]
fn diagnostics_rejects_long_path_component() -> TestResult {
    let mut config = GateConfig::default();
    config.diagnostics.path = Some(PathBuf::from("a".repeat(300)));
    assert_invalid(config.validate(), "diagnostics path component too long")
}
