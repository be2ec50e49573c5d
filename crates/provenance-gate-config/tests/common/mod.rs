// provenance-gate-config/tests/common/mod.rs
// ============================================================================
// Module: Config Test Helpers
// Description: Temporary config files and shared assertions.
// Purpose: Reduce duplication across config validation tests.
// ============================================================================

//! Shared helpers for provenance-gate-config tests.

#![allow(dead_code, reason = "Shared helpers are used by a subset of test files.")]

use std::io::Write;

use provenance_gate_config::ConfigError;
use tempfile::NamedTempFile;

/// Result type used by config tests.
pub type TestResult = Result<(), String>;

/// Writes `contents` to a temporary TOML file.
pub fn write_config(contents: &str) -> Result<NamedTempFile, String> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .map_err(|err| err.to_string())?;
    file.write_all(contents.as_bytes()).map_err(|err| err.to_string())?;
    Ok(file)
}

/// Asserts that `result` failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
