// provenance-gate-core/src/core/sign_off.rs
// ============================================================================
// Module: Sign-off Evidence Types
// Description: Build sources, sign-off patterns, and sign-off records.
// Purpose: Describe where accountability evidence was found and what it says.
// Dependencies: regex, serde
// ============================================================================

//! ## Overview
//! Sign-off evidence is an issue-tracker reference recovered from the build
//! history recorded in a provenance record. A [`SignOffPattern`] wraps a
//! compiled regular expression; the reference is the last participating
//! capture group of the first match.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::core::error::GateError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default case-insensitive issue reference pattern.
pub const DEFAULT_SIGN_OFF_PATTERN: &str = r"(?i)RedHat JIRA Issue: ([a-zA-Z]+-\d+)";

// ============================================================================
// SECTION: Build Source
// ============================================================================

/// Source repository and commit recorded by a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSource {
    /// Repository URL without scheme prefix or ref suffix.
    pub repository_url: String,
    /// Commit identifier.
    pub commit_sha: String,
}

impl BuildSource {
    /// Creates a build source.
    #[must_use]
    pub fn new(repository_url: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        Self {
            repository_url: repository_url.into(),
            commit_sha: commit_sha.into(),
        }
    }
}

// ============================================================================
// SECTION: Sign-off Record
// ============================================================================

/// Where sign-off evidence was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignOffOrigin {
    /// A commit message in source control.
    Commit {
        /// Repository URL.
        repository_url: String,
        /// Commit identifier.
        commit_sha: String,
    },
    /// String values recorded in the build invocation.
    BuildParameters,
}

impl fmt::Display for SignOffOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commit {
                repository_url,
                commit_sha,
            } => write!(f, "commit {commit_sha} of {repository_url}"),
            Self::BuildParameters => f.write_str("build invocation parameters"),
        }
    }
}

impl From<&BuildSource> for SignOffOrigin {
    fn from(source: &BuildSource) -> Self {
        Self::Commit {
            repository_url: source.repository_url.clone(),
            commit_sha: source.commit_sha.clone(),
        }
    }
}

/// Sign-off references recovered for one provenance record; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignOffRecord {
    /// Issue references in discovery order.
    pub references: Vec<String>,
    /// Where the references were found.
    pub origin: SignOffOrigin,
}

// ============================================================================
// SECTION: Pattern
// ============================================================================

/// Compiled sign-off reference pattern.
#[derive(Debug, Clone)]
pub struct SignOffPattern {
    /// Compiled expression.
    regex: Regex,
}

impl SignOffPattern {
    /// Compiles a sign-off pattern.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidSignOffPattern`] when the expression does
    /// not compile.
    pub fn new(pattern: &str) -> Result<Self, GateError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Returns the default issue-reference pattern.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidSignOffPattern`] if the built-in pattern
    /// fails to compile.
    pub fn default_issue_reference() -> Result<Self, GateError> {
        Self::new(DEFAULT_SIGN_OFF_PATTERN)
    }

    /// Returns the pattern source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Finds the reference in `text`: the last participating capture group
    /// of the first match, or the whole match when no group participated.
    #[must_use]
    pub fn find_reference(&self, text: &str) -> Option<String> {
        let captures = self.regex.captures(text)?;
        let reference = captures.iter().skip(1).flatten().last().or_else(|| captures.get(0))?;
        Some(reference.as_str().to_string())
    }
}
