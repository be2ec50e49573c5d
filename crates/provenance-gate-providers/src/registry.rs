// provenance-gate-providers/src/registry.rs
// ============================================================================
// Module: Directory Attestation Registry
// Description: Attestation registry backed by a local directory tree.
// Purpose: Serve attestation layers exported from an OCI registry to disk.
// Dependencies: provenance-gate-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Each artifact owns one directory under the registry root, named after the
//! artifact digest with `:` replaced by `-` (for example `sha256-ab12`). The
//! directory holds an `index.json` listing its attestation layers:
//!
//! ```json
//! {"attestations": [{"media_type": "application/vnd.dsse.envelope.v1+json",
//!   "payload": "layer-0.json", "signature": "", "certificate": "leaf.pem",
//!   "chain": "chain.pem"}]}
//! ```
//!
//! Layer paths are relative to the artifact directory and may not escape it.
//! An artifact without a directory has no attestations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use provenance_gate_core::AttestationRegistry;
use provenance_gate_core::DSSE_ENVELOPE_MEDIA_TYPE;
use provenance_gate_core::EnvelopeSource;
use provenance_gate_core::SourceError;
use serde::Deserialize;
use serde::Serialize;

use crate::envelope::FileEnvelopeSource;
use crate::files::read_file_limited;
use crate::files::resolve_within;

// ============================================================================
// SECTION: Index Format
// ============================================================================

/// File name of the per-artifact attestation index.
pub const ATTESTATION_INDEX_FILE: &str = "index.json";

/// Maximum index size in bytes.
const MAX_INDEX_BYTES: usize = 1024 * 1024;

/// One attestation layer listed in an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttestationIndexEntry {
    /// Media type declared for the layer.
    #[serde(default = "default_media_type")]
    pub media_type: String,
    /// Envelope file, relative to the artifact directory.
    pub payload: String,
    /// Base64 signature; empty for keyless layers.
    #[serde(default)]
    pub signature: String,
    /// Signing certificate file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    /// Issuing chain file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
}

/// Attestation index of one artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttestationIndex {
    /// Layers in registry order.
    #[serde(default)]
    pub attestations: Vec<AttestationIndexEntry>,
}

/// Default media type for index entries.
fn default_media_type() -> String {
    DSSE_ENVELOPE_MEDIA_TYPE.to_string()
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Attestation registry backed by a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryAttestationRegistry {
    /// Registry root.
    root: PathBuf,
}

impl DirectoryAttestationRegistry {
    /// Creates a registry rooted at `root`.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self {
            root,
        }
    }

    /// Returns the directory that holds `artifact`'s attestations.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Invalid`] when the artifact reference cannot
    /// name a directory inside the root.
    pub fn artifact_directory(&self, artifact: &str) -> Result<PathBuf, SourceError> {
        resolve_within(&self.root, &artifact_directory_name(artifact)?)
    }

    /// Reads the index of an artifact directory.
    fn read_index(directory: &Path) -> Result<AttestationIndex, SourceError> {
        let bytes = read_file_limited(&directory.join(ATTESTATION_INDEX_FILE), MAX_INDEX_BYTES)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| SourceError::Invalid(format!("invalid attestation index: {err}")))
    }
}

impl AttestationRegistry for DirectoryAttestationRegistry {
    fn fetch_attestations(
        &self,
        artifact: &str,
    ) -> Result<Vec<Box<dyn EnvelopeSource + Send + Sync>>, SourceError> {
        let directory = self.artifact_directory(artifact)?;
        if !directory.is_dir() {
            return Ok(Vec::new());
        }
        let index = Self::read_index(&directory)?;
        let mut sources: Vec<Box<dyn EnvelopeSource + Send + Sync>> = Vec::new();
        for entry in index.attestations {
            let mut source = FileEnvelopeSource::new(
                entry.media_type,
                resolve_within(&directory, &entry.payload)?,
            )
            .with_signature(entry.signature);
            if let Some(certificate) = &entry.certificate {
                source = source.with_certificate_path(resolve_within(&directory, certificate)?);
            }
            if let Some(chain) = &entry.chain {
                source = source.with_chain_path(resolve_within(&directory, chain)?);
            }
            sources.push(Box::new(source));
        }
        Ok(sources)
    }
}

/// Maps an artifact reference to its directory name.
fn artifact_directory_name(artifact: &str) -> Result<String, SourceError> {
    let digest = artifact.rsplit_once('@').map_or(artifact, |(_, digest)| digest);
    let name = digest.replace([':', '/'], "-");
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && name.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'));
    if !valid {
        return Err(SourceError::Invalid(format!("unsupported artifact reference `{artifact}`")));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test assertions.")]

    use super::artifact_directory_name;

    #[test]
    fn digest_references_map_to_directory_names() {
        assert_eq!(
            artifact_directory_name("registry.example/app@sha256:ab12").unwrap(),
            "sha256-ab12"
        );
        assert_eq!(artifact_directory_name("registry.example/app:v1").unwrap(), "registry.example-app-v1");
    }

    #[test]
    fn hostile_references_are_rejected() {
        for bad in ["", "..", "app@..", "app@sha256:ab 12", "app@sha256:ab\\12"] {
            assert!(artifact_directory_name(bad).is_err(), "accepted {bad}");
        }
    }
}
