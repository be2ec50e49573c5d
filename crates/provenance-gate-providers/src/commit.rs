// provenance-gate-providers/src/commit.rs
// ============================================================================
// Module: HTTP Commit Message Provider
// Description: Commit message lookup through a GitHub-compatible REST API.
// Purpose: Resolve build commits to messages with strict network limits.
// Dependencies: provenance-gate-core, reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! The provider maps a repository URL such as `https://github.com/org/app`
//! to `{api_base_url}/repos/org/app/commits/{sha}` and returns the
//! `commit.message` field of the response. It enforces scheme restrictions,
//! an optional host allowlist, disabled redirects, and a response size limit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::io::Read;
use std::time::Duration;

use provenance_gate_core::CommitMessageProvider;
use provenance_gate_core::SourceError;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use serde::Deserialize;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the HTTP commit message provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpCommitProviderConfig {
    /// Base URL of the REST API.
    pub api_base_url: String,
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// Optional API host allowlist.
    pub allowed_hosts: Option<BTreeSet<String>>,
    /// User agent string for outbound requests.
    pub user_agent: String,
    /// Optional bearer token sent with each request.
    pub token: Option<String>,
}

impl Default for HttpCommitProviderConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            allow_http: false,
            timeout_ms: 5_000,
            max_response_bytes: 1024 * 1024,
            allowed_hosts: None,
            user_agent: "provenance-gate/0.1".to_string(),
            token: None,
        }
    }
}

// ============================================================================
// SECTION: Response Shape
// ============================================================================

/// Subset of the commit response used by the provider.
#[derive(Debug, Deserialize)]
struct CommitResponse {
    /// Commit details.
    commit: CommitDetails,
}

/// Commit details carrying the message.
#[derive(Debug, Deserialize)]
struct CommitDetails {
    /// Full commit message.
    message: String,
}

// ============================================================================
// SECTION: Provider Implementation
// ============================================================================

/// Commit message provider backed by a REST API.
pub struct HttpCommitMessageProvider {
    /// Provider configuration, including limits and policy.
    config: HttpCommitProviderConfig,
    /// Parsed API base URL.
    api_base: Url,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl HttpCommitMessageProvider {
    /// Creates a new provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the base URL is not allowed or the HTTP
    /// client cannot be created.
    pub fn new(config: HttpCommitProviderConfig) -> Result<Self, SourceError> {
        let api_base = Url::parse(&config.api_base_url)
            .map_err(|err| SourceError::Invalid(format!("invalid api base url: {err}")))?;
        validate_url(&api_base, &config)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| SourceError::Unavailable(format!("http client build failed: {err}")))?;
        Ok(Self {
            config,
            api_base,
            client,
        })
    }

    /// Builds the commit endpoint for a repository and commit.
    fn commit_url(&self, scm_url: &str, commit_sha: &str) -> Result<Url, SourceError> {
        if commit_sha.is_empty() || !commit_sha.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(SourceError::Invalid(format!("invalid commit id `{commit_sha}`")));
        }
        let (owner, repo) = repository_slug(scm_url)?;
        let base = self.api_base.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/repos/{owner}/{repo}/commits/{commit_sha}"))
            .map_err(|err| SourceError::Invalid(format!("invalid commit url: {err}")))
    }
}

impl CommitMessageProvider for HttpCommitMessageProvider {
    fn commit_message(&self, scm_url: &str, commit_sha: &str) -> Result<String, SourceError> {
        let url = self.commit_url(scm_url, commit_sha)?;
        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        let mut response = request
            .send()
            .map_err(|err| SourceError::Unavailable(format!("http request failed: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Unavailable(format!(
                "commit lookup returned http {}",
                status.as_u16()
            )));
        }
        let body = read_response_limited(&mut response, self.config.max_response_bytes)?;
        let parsed: CommitResponse = serde_json::from_slice(&body)
            .map_err(|err| SourceError::Invalid(format!("invalid commit response: {err}")))?;
        Ok(parsed.commit.message)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Extracts `(owner, repo)` from a repository URL.
fn repository_slug(scm_url: &str) -> Result<(String, String), SourceError> {
    let url = Url::parse(scm_url)
        .map_err(|err| SourceError::Invalid(format!("invalid repository url: {err}")))?;
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();
    let &[owner, repo] = segments.as_slice() else {
        return Err(SourceError::Invalid(format!("repository url `{scm_url}` has no owner/repo")));
    };
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    let valid = |part: &str| {
        !part.is_empty()
            && part.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'))
    };
    if !valid(owner) || !valid(repo) {
        return Err(SourceError::Invalid(format!("unsupported repository url `{scm_url}`")));
    }
    Ok((owner.to_string(), repo.to_string()))
}

/// Validates URL scheme and allowlist policy.
fn validate_url(url: &Url, config: &HttpCommitProviderConfig) -> Result<(), SourceError> {
    match url.scheme() {
        "https" => {}
        "http" if config.allow_http => {}
        other => return Err(SourceError::Invalid(format!("unsupported url scheme `{other}`"))),
    }
    if let Some(allowlist) = &config.allowed_hosts {
        let host =
            url.host_str().ok_or_else(|| SourceError::Invalid("url host required".to_string()))?;
        if !allowlist.contains(host) {
            return Err(SourceError::Invalid(format!("url host `{host}` not allowed")));
        }
    }
    Ok(())
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: &mut reqwest::blocking::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, SourceError> {
    let expected_len = response.content_length();
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| SourceError::Invalid("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(SourceError::Invalid("http response exceeds size limit".to_string()));
    }
    let mut buf = Vec::new();
    let mut handle = response.take(max_bytes_u64.saturating_add(1));
    handle.read_to_end(&mut buf)?;
    if buf.len() > max_bytes {
        return Err(SourceError::Invalid("http response exceeds size limit".to_string()));
    }
    Ok(buf)
}
