// provenance-gate-providers/src/files.rs
// ============================================================================
// Module: Bounded File Access
// Description: Size-limited reads and root-confined path resolution.
// Purpose: Keep untrusted file inputs bounded and inside their root.
// Dependencies: provenance-gate-core
// ============================================================================

//! ## Overview
//! Helpers shared by the file-backed providers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use provenance_gate_core::SourceError;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a file while enforcing a maximum byte limit.
pub(crate) fn read_file_limited(path: &Path, max_bytes: usize) -> Result<Vec<u8>, SourceError> {
    let file = File::open(path)?;
    let limit = u64::try_from(max_bytes.saturating_add(1))
        .map_err(|_| SourceError::Invalid("file size limit exceeds u64".to_string()))?;
    let mut buf = Vec::new();
    file.take(limit).read_to_end(&mut buf)?;
    if buf.len() > max_bytes {
        return Err(SourceError::Invalid(format!(
            "{} exceeds {max_bytes} bytes",
            path.display()
        )));
    }
    Ok(buf)
}

/// Joins `relative` onto `root`, rejecting absolute paths and traversal.
pub(crate) fn resolve_within(root: &Path, relative: &str) -> Result<PathBuf, SourceError> {
    let candidate = Path::new(relative);
    if relative.is_empty()
        || !candidate.components().all(|component| matches!(component, Component::Normal(_)))
    {
        return Err(SourceError::Invalid(format!("path `{relative}` escapes its root")));
    }
    Ok(root.join(candidate))
}
