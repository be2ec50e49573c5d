// provenance-gate-providers/src/policy.rs
// ============================================================================
// Module: Policy Documents
// Description: Loads policy sources from JSON or YAML files.
// Purpose: Read the caller-owned policy source with strict size limits.
// Dependencies: provenance-gate-core, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! Policy documents use the [`PolicySource`] shape. Files ending in `.yaml`
//! or `.yml` are parsed as YAML; everything else is parsed as JSON.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use provenance_gate_core::PolicySource;
use provenance_gate_core::SourceError;

use crate::files::read_file_limited;

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Maximum policy document size in bytes.
pub const DEFAULT_MAX_POLICY_BYTES: usize = 1024 * 1024;

/// Loads a policy source from `path`.
///
/// # Errors
///
/// Returns [`SourceError`] when the file cannot be read, exceeds the size
/// limit, or does not match the policy source shape.
pub fn load_policy_source(path: &Path) -> Result<PolicySource, SourceError> {
    let content = read_file_limited(path, DEFAULT_MAX_POLICY_BYTES)?;
    let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    let ext = ext.to_ascii_lowercase();
    if ext == "yaml" || ext == "yml" {
        return serde_yaml::from_slice(&content)
            .map_err(|err| SourceError::Invalid(format!("invalid policy yaml: {err}")));
    }
    serde_json::from_slice(&content)
        .map_err(|err| SourceError::Invalid(format!("invalid policy json: {err}")))
}
