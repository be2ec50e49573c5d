// provenance-gate-core/src/runtime/report.rs
// ============================================================================
// Module: Audit Reports
// Description: Line-delimited JSON renderings of extraction results.
// Purpose: Hand raw statements and verification summaries to audit storage.
// Dependencies: crate::{core, runtime::verify}, serde, serde_json
// ============================================================================

//! ## Overview
//! Statements are rendered byte-for-byte as they were decoded from their
//! envelopes, one per line. Verification summaries are one JSON object per
//! artifact.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::ErrorKind;
use crate::core::ContentDigest;
use crate::core::ProvenanceRecord;
use crate::runtime::verify::ArtifactVerification;

// ============================================================================
// SECTION: Statements
// ============================================================================

/// Joins the raw statement bytes of `records` with newlines.
#[must_use]
pub fn render_statements(records: &[ProvenanceRecord]) -> Vec<u8> {
    let parts: Vec<&[u8]> = records.iter().map(ProvenanceRecord::raw_payload).collect();
    parts.join(&b'\n')
}

// ============================================================================
// SECTION: Verification Summary
// ============================================================================

/// Summary line for one artifact.
#[derive(Debug, Serialize)]
struct ReportLine<'a> {
    /// Artifact reference.
    artifact: &'a str,
    /// Number of extracted records.
    record_count: usize,
    /// Extracted records.
    records: Vec<RecordSummary<'a>>,
    /// Rejected attestations.
    failures: Vec<FailureSummary>,
}

/// Summary of one extracted record.
#[derive(Debug, Serialize)]
struct RecordSummary<'a> {
    /// Predicate type URI.
    predicate_type: &'a str,
    /// Digest of the raw statement.
    payload_digest: &'a ContentDigest,
    /// Digest of the canonical statement.
    statement_digest: &'a ContentDigest,
    /// Signing method label.
    signer: &'static str,
}

/// Summary of one rejected attestation.
#[derive(Debug, Serialize)]
struct FailureSummary {
    /// Attestation index.
    index: usize,
    /// Stable error code.
    code: &'static str,
    /// Error kind.
    kind: ErrorKind,
    /// Error message.
    message: String,
}

/// Renders a verification summary as one JSON line.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when serialization fails.
pub fn render_report(verification: &ArtifactVerification) -> Result<Vec<u8>, serde_json::Error> {
    let line = ReportLine {
        artifact: &verification.artifact,
        record_count: verification.records.len(),
        records: verification
            .records
            .iter()
            .map(|record| RecordSummary {
                predicate_type: record.predicate_type(),
                payload_digest: record.payload_digest(),
                statement_digest: record.statement_digest(),
                signer: record.signer().method(),
            })
            .collect(),
        failures: verification
            .failures
            .iter()
            .map(|failure| FailureSummary {
                index: failure.index,
                code: failure.error.code(),
                kind: failure.error.kind(),
                message: failure.error.chain_message(),
            })
            .collect(),
    };
    let mut bytes = serde_json::to_vec(&line)?;
    bytes.push(b'\n');
    Ok(bytes)
}
