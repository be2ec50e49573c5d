// provenance-gate-core/src/core/diagnostics.rs
// ============================================================================
// Module: Diagnostic Events
// Description: Structured warning and info events emitted by resolvers.
// Purpose: Surface recoverable conditions without failing the caller.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Diagnostic events are JSON-line records routed through a
//! [`crate::interfaces::DiagnosticSink`]. They report conditions that do not
//! stop processing, such as a substituted policy time bound or a rejected
//! sibling attestation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    /// Informational event.
    Info,
    /// Recoverable problem worth operator attention.
    Warning,
}

/// Structured diagnostic event payload.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Event severity.
    pub level: DiagnosticLevel,
    /// Artifact the event relates to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Additional structured fields.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl DiagnosticEvent {
    /// Creates a new event with a consistent timestamp.
    #[must_use]
    pub fn new(event: &'static str, level: DiagnosticLevel, message: impl Into<String>) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            timestamp_ms,
            level,
            artifact: None,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Creates a warning event.
    #[must_use]
    pub fn warning(event: &'static str, message: impl Into<String>) -> Self {
        Self::new(event, DiagnosticLevel::Warning, message)
    }

    /// Attaches the artifact reference.
    #[must_use]
    pub fn with_artifact(mut self, artifact: impl Into<String>) -> Self {
        self.artifact = Some(artifact.into());
        self
    }

    /// Attaches a structured field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}
