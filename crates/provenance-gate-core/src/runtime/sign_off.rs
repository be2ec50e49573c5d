// provenance-gate-core/src/runtime/sign_off.rs
// ============================================================================
// Module: Sign-off Resolution
// Description: Recovers issue-tracker references from recorded build history.
// Purpose: Provide interchangeable sign-off sources over a provenance record.
// Dependencies: crate::{core, interfaces}, serde_json
// ============================================================================

//! ## Overview
//! [`CommitSignOffSource`] locates the commit that produced a build and
//! searches its message. [`IssueTrackerSignOffSource`] searches the string
//! values recorded in the build invocation instead. Both apply the same
//! [`SignOffPattern`] and treat zero matches as a hard failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::core::BuildSource;
use crate::core::GateError;
use crate::core::ProvenanceRecord;
use crate::core::SignOffOrigin;
use crate::core::SignOffPattern;
use crate::core::SignOffRecord;
use crate::core::SlsaPredicate;
use crate::interfaces::BuildSourceLocator;
use crate::interfaces::CommitMessageProvider;
use crate::interfaces::SignOffSource;

// ============================================================================
// SECTION: Build Source Locator
// ============================================================================

/// Digest algorithm naming the commit in SLSA source digests.
const COMMIT_DIGEST_KEY: &str = "sha1";

/// Locates the build source from a SLSA v0.2 predicate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlsaBuildSourceLocator;

impl BuildSourceLocator for SlsaBuildSourceLocator {
    fn locate(&self, record: &ProvenanceRecord) -> Result<BuildSource, GateError> {
        let predicate = slsa_predicate(record)?;
        let config_source = &predicate.invocation.config_source;
        if let Some(commit) = config_source.digest.get(COMMIT_DIGEST_KEY)
            && !config_source.uri.is_empty()
            && !commit.is_empty()
        {
            return Ok(BuildSource::new(normalize_repository_url(&config_source.uri), commit));
        }
        predicate
            .materials
            .iter()
            .find_map(|material| {
                let commit = material.digest.get(COMMIT_DIGEST_KEY)?;
                (!material.uri.is_empty() && !commit.is_empty())
                    .then(|| BuildSource::new(normalize_repository_url(&material.uri), commit))
            })
            .ok_or_else(|| {
                GateError::BuildSourceUnavailable(
                    "no config source or material records a sha1 commit".to_string(),
                )
            })
    }
}

/// Strips a `git+` scheme prefix and an `@<ref>` suffix.
fn normalize_repository_url(uri: &str) -> String {
    let uri = uri.strip_prefix("git+").unwrap_or(uri);
    let path_start = match uri.find("://") {
        Some(scheme_end) => {
            let authority = scheme_end + 3;
            uri[authority ..].find('/').map_or(uri.len(), |offset| authority + offset)
        }
        None => uri.find(':').map_or(0, |offset| offset + 1),
    };
    match uri[path_start ..].find('@') {
        Some(offset) => uri[.. path_start + offset].to_string(),
        None => uri.to_string(),
    }
}

/// Decodes the SLSA view or reports the source as unavailable.
fn slsa_predicate(record: &ProvenanceRecord) -> Result<SlsaPredicate, GateError> {
    record
        .slsa_predicate()
        .map_err(|err| GateError::BuildSourceUnavailable(format!("unreadable predicate: {err}")))
}

// ============================================================================
// SECTION: Commit Sign-off
// ============================================================================

/// Searches the message of the commit that produced a build.
#[derive(Debug, Clone)]
pub struct CommitSignOffSource<L, P> {
    /// Build source locator.
    locator: L,
    /// Commit message provider.
    provider: P,
    /// Reference pattern.
    pattern: SignOffPattern,
}

impl<L, P> CommitSignOffSource<L, P>
where
    L: BuildSourceLocator,
    P: CommitMessageProvider,
{
    /// Creates a commit-backed sign-off source.
    #[must_use]
    pub const fn new(locator: L, provider: P, pattern: SignOffPattern) -> Self {
        Self {
            locator,
            provider,
            pattern,
        }
    }
}

impl<L, P> SignOffSource for CommitSignOffSource<L, P>
where
    L: BuildSourceLocator,
    P: CommitMessageProvider,
{
    fn sign_off(&self, record: &ProvenanceRecord) -> Result<SignOffRecord, GateError> {
        let source = self.locator.locate(record)?;
        let message = self
            .provider
            .commit_message(&source.repository_url, &source.commit_sha)
            .map_err(|err| GateError::CommitLookupFailed {
                repository: source.repository_url.clone(),
                commit: source.commit_sha.clone(),
                source: err,
            })?;
        let origin = SignOffOrigin::from(&source);
        match self.pattern.find_reference(&message) {
            Some(reference) => Ok(SignOffRecord {
                references: vec![reference],
                origin,
            }),
            None => Err(GateError::NoSignOffReference {
                origin: origin.to_string(),
            }),
        }
    }
}

// ============================================================================
// SECTION: Issue Tracker Sign-off
// ============================================================================

/// Searches string values recorded in the build invocation.
#[derive(Debug, Clone)]
pub struct IssueTrackerSignOffSource {
    /// Reference pattern.
    pattern: SignOffPattern,
}

impl IssueTrackerSignOffSource {
    /// Creates an invocation-backed sign-off source.
    #[must_use]
    pub const fn new(pattern: SignOffPattern) -> Self {
        Self {
            pattern,
        }
    }

    /// Collects distinct references from every string in `map`.
    fn collect(&self, map: &Map<String, Value>, references: &mut Vec<String>) {
        for value in map.values() {
            self.collect_value(value, references);
        }
    }

    /// Collects references from one JSON value.
    fn collect_value(&self, value: &Value, references: &mut Vec<String>) {
        match value {
            Value::String(text) => {
                if let Some(reference) = self.pattern.find_reference(text)
                    && !references.contains(&reference)
                {
                    references.push(reference);
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.collect_value(item, references);
                }
            }
            Value::Object(map) => self.collect(map, references),
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }
}

impl SignOffSource for IssueTrackerSignOffSource {
    fn sign_off(&self, record: &ProvenanceRecord) -> Result<SignOffRecord, GateError> {
        let predicate = slsa_predicate(record)?;
        let mut references = Vec::new();
        self.collect(&predicate.invocation.parameters, &mut references);
        self.collect(&predicate.invocation.environment, &mut references);
        let origin = SignOffOrigin::BuildParameters;
        if references.is_empty() {
            return Err(GateError::NoSignOffReference {
                origin: origin.to_string(),
            });
        }
        Ok(SignOffRecord {
            references,
            origin,
        })
    }
}

// ============================================================================
// SECTION: Default Resolution
// ============================================================================

/// Resolves sign-off from the build commit with the default pattern.
///
/// # Errors
///
/// Returns [`GateError`] when the source cannot be located, the lookup
/// fails, or the message carries no reference.
pub fn resolve_sign_off<P>(record: &ProvenanceRecord, lookup: &P) -> Result<SignOffRecord, GateError>
where
    P: CommitMessageProvider + ?Sized,
{
    let pattern = SignOffPattern::default_issue_reference()?;
    CommitSignOffSource::new(SlsaBuildSourceLocator, lookup, pattern).sign_off(record)
}
