// provenance-gate-config/src/config.rs
// ============================================================================
// Module: Gate Config
// Description: Config loader, validation, and collaborator wiring.
// Purpose: Provide config-driven construction of extractor, clock, and sinks.
// Dependencies: provenance-gate-core, provenance-gate-providers, serde, time, toml
// ============================================================================

//! ## Overview
//! The loader resolves the config path (explicit argument, then
//! [`CONFIG_ENV_VAR`], then [`DEFAULT_CONFIG_NAME`]), enforces path, size,
//! and encoding limits, parses TOML, and validates every section before
//! returning. Builders on [`GateConfig`] assume a validated config but still
//! report wiring failures as [`ConfigError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use provenance_gate_core::CommitSignOffSource;
use provenance_gate_core::CriteriaResolver;
use provenance_gate_core::DEFAULT_SIGN_OFF_PATTERN;
use provenance_gate_core::DiagnosticSink;
use provenance_gate_core::EffectiveTimeProvider;
use provenance_gate_core::ExtractorConfig;
use provenance_gate_core::IssueTrackerSignOffSource;
use provenance_gate_core::PolicySource;
use provenance_gate_core::ProvenanceExtractor;
use provenance_gate_core::SignOffPattern;
use provenance_gate_core::SignOffSource;
use provenance_gate_core::SlsaBuildSourceLocator;
use provenance_gate_providers::FileDiagnosticSink;
use provenance_gate_providers::FixedEffectiveTime;
use provenance_gate_providers::HttpCommitMessageProvider;
use provenance_gate_providers::HttpCommitProviderConfig;
use provenance_gate_providers::NoopDiagnosticSink;
use provenance_gate_providers::StderrDiagnosticSink;
use provenance_gate_providers::SystemClock;
use provenance_gate_providers::load_policy_source;
use serde::Deserialize;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default config filename.
pub const DEFAULT_CONFIG_NAME: &str = "provenance-gate.toml";
/// Environment variable override for config path.
pub const CONFIG_ENV_VAR: &str = "PROVENANCE_GATE_CONFIG";
/// Maximum allowed config file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum total path length for config-related paths.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Upper bound for `attestation.max_payload_bytes`.
const MAX_PAYLOAD_LIMIT: usize = 64 * 1024 * 1024;
/// Upper bound for `commit_provider.max_response_bytes`.
const MAX_RESPONSE_LIMIT: usize = 16 * 1024 * 1024;
/// Minimum commit provider timeout in milliseconds.
const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum commit provider timeout in milliseconds.
const MAX_TIMEOUT_MS: u64 = 30_000;
/// `criteria.effective_time` value selecting the system clock.
const EFFECTIVE_TIME_NOW: &str = "now";

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Provenance Gate configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Attestation extraction settings.
    #[serde(default)]
    pub attestation: AttestationConfig,
    /// Criteria resolution settings.
    #[serde(default)]
    pub criteria: CriteriaConfig,
    /// Sign-off resolution settings.
    #[serde(default)]
    pub sign_off: SignOffConfig,
    /// HTTP commit message provider settings.
    #[serde(default)]
    pub commit_provider: HttpCommitProviderConfig,
    /// Diagnostic sink settings.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    /// Inline policy source.
    #[serde(default)]
    pub policy: Option<PolicySource>,
}

/// Attestation extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttestationConfig {
    /// Media type every attestation layer must declare.
    pub media_type: String,
    /// Predicate type every statement must carry.
    pub predicate_type: String,
    /// Maximum envelope size in bytes.
    pub max_payload_bytes: usize,
}

impl Default for AttestationConfig {
    fn default() -> Self {
        let defaults = ExtractorConfig::default();
        Self {
            media_type: defaults.media_type,
            predicate_type: defaults.predicate_type,
            max_payload_bytes: defaults.max_payload_bytes,
        }
    }
}

/// Criteria resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CriteriaConfig {
    /// `"now"` or an RFC 3339 instant pinning policy evaluation.
    pub effective_time: String,
    /// Policy document (JSON or YAML) used when no inline policy is set.
    pub policy_path: Option<PathBuf>,
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            effective_time: EFFECTIVE_TIME_NOW.to_string(),
            policy_path: None,
        }
    }
}

/// Where sign-off evidence is searched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignOffMode {
    /// The message of the commit that produced the build.
    #[default]
    Commit,
    /// The build invocation parameters recorded in the provenance.
    BuildParameters,
}

/// Sign-off resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignOffConfig {
    /// Evidence source.
    pub mode: SignOffMode,
    /// Reference pattern.
    pub pattern: String,
}

impl Default for SignOffConfig {
    fn default() -> Self {
        Self {
            mode: SignOffMode::Commit,
            pattern: DEFAULT_SIGN_OFF_PATTERN.to_string(),
        }
    }
}

/// Diagnostic sink settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Emit diagnostics at all.
    pub enabled: bool,
    /// Append JSON lines to this file instead of stderr.
    pub path: Option<PathBuf>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

/// Config errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("config io error: {0}")]
    Io(String),
    /// Parse error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration.
    #[error("config invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Loading and Validation
// ============================================================================

impl GateConfig {
    /// Loads configuration from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved, "config path")?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let attestation = &self.attestation;
        if attestation.media_type.trim().is_empty() {
            return Err(invalid("attestation.media_type must be non-empty"));
        }
        if attestation.predicate_type.trim().is_empty() {
            return Err(invalid("attestation.predicate_type must be non-empty"));
        }
        if attestation.max_payload_bytes == 0 || attestation.max_payload_bytes > MAX_PAYLOAD_LIMIT
        {
            return Err(invalid("attestation.max_payload_bytes out of range"));
        }

        parse_effective_time(&self.criteria.effective_time)?;
        if let Some(path) = &self.criteria.policy_path {
            if self.policy.is_some() {
                return Err(invalid("criteria.policy_path conflicts with inline policy"));
            }
            validate_path(path, "policy path")?;
        }

        if self.sign_off.pattern.is_empty() {
            return Err(invalid("sign_off.pattern must be non-empty"));
        }
        self.sign_off_pattern()?;

        self.validate_commit_provider()?;

        if let Some(path) = &self.diagnostics.path {
            validate_path(path, "diagnostics path")?;
        }
        Ok(())
    }

    /// Validates the commit provider section.
    fn validate_commit_provider(&self) -> Result<(), ConfigError> {
        let provider = &self.commit_provider;
        let base = provider.api_base_url.as_str();
        let scheme_ok =
            base.starts_with("https://") || (provider.allow_http && base.starts_with("http://"));
        if !scheme_ok {
            return Err(invalid("commit_provider.api_base_url must use https"));
        }
        if !(MIN_TIMEOUT_MS ..= MAX_TIMEOUT_MS).contains(&provider.timeout_ms) {
            return Err(invalid("commit_provider.timeout_ms out of range"));
        }
        if provider.max_response_bytes == 0 || provider.max_response_bytes > MAX_RESPONSE_LIMIT {
            return Err(invalid("commit_provider.max_response_bytes out of range"));
        }
        if provider.user_agent.trim().is_empty() {
            return Err(invalid("commit_provider.user_agent must be non-empty"));
        }
        if let Some(hosts) = &provider.allowed_hosts
            && hosts.iter().any(|host| host.trim().is_empty())
        {
            return Err(invalid("commit_provider.allowed_hosts entries must be non-empty"));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Wiring
// ============================================================================

impl GateConfig {
    /// Returns the extractor settings.
    #[must_use]
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            media_type: self.attestation.media_type.clone(),
            predicate_type: self.attestation.predicate_type.clone(),
            max_payload_bytes: self.attestation.max_payload_bytes,
        }
    }

    /// Builds the provenance extractor.
    #[must_use]
    pub fn extractor(&self) -> ProvenanceExtractor {
        ProvenanceExtractor::new(self.extractor_config())
    }

    /// Builds the effective-time provider.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the effective time is malformed.
    pub fn effective_time_provider(
        &self,
    ) -> Result<Box<dyn EffectiveTimeProvider + Send + Sync>, ConfigError> {
        Ok(match parse_effective_time(&self.criteria.effective_time)? {
            Some(instant) => Box::new(FixedEffectiveTime::new(instant)),
            None => Box::new(SystemClock),
        })
    }

    /// Builds the diagnostic sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the diagnostics file cannot be opened.
    pub fn diagnostic_sink(&self) -> Result<Arc<dyn DiagnosticSink>, ConfigError> {
        if !self.diagnostics.enabled {
            return Ok(Arc::new(NoopDiagnosticSink));
        }
        match &self.diagnostics.path {
            Some(path) => {
                let sink =
                    FileDiagnosticSink::new(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
            None => Ok(Arc::new(StderrDiagnosticSink)),
        }
    }

    /// Builds a criteria resolver from the configured clock and sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the clock or sink cannot be built.
    pub fn criteria_resolver(
        &self,
    ) -> Result<
        CriteriaResolver<Box<dyn EffectiveTimeProvider + Send + Sync>, Arc<dyn DiagnosticSink>>,
        ConfigError,
    > {
        Ok(CriteriaResolver::new(self.effective_time_provider()?, self.diagnostic_sink()?))
    }

    /// Returns the policy source: inline, loaded from `criteria.policy_path`,
    /// or empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the policy document cannot be loaded.
    pub fn policy_source(&self) -> Result<PolicySource, ConfigError> {
        if let Some(policy) = &self.policy {
            return Ok(policy.clone());
        }
        match &self.criteria.policy_path {
            Some(path) => load_policy_source(path).map_err(|err| ConfigError::Io(err.to_string())),
            None => Ok(PolicySource::default()),
        }
    }

    /// Compiles the sign-off pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the pattern does not compile.
    pub fn sign_off_pattern(&self) -> Result<SignOffPattern, ConfigError> {
        SignOffPattern::new(&self.sign_off.pattern)
            .map_err(|err| ConfigError::Invalid(format!("sign_off.pattern: {err}")))
    }

    /// Builds the HTTP commit message provider.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the provider rejects its settings.
    pub fn commit_message_provider(&self) -> Result<HttpCommitMessageProvider, ConfigError> {
        HttpCommitMessageProvider::new(self.commit_provider.clone())
            .map_err(|err| ConfigError::Invalid(format!("commit_provider: {err}")))
    }

    /// Builds the sign-off source selected by `sign_off.mode`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the pattern or commit provider is invalid.
    pub fn sign_off_source(&self) -> Result<Box<dyn SignOffSource + Send + Sync>, ConfigError> {
        let pattern = self.sign_off_pattern()?;
        Ok(match self.sign_off.mode {
            SignOffMode::Commit => Box::new(CommitSignOffSource::new(
                SlsaBuildSourceLocator,
                self.commit_message_provider()?,
                pattern,
            )),
            SignOffMode::BuildParameters => Box::new(IssueTrackerSignOffSource::new(pattern)),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds an invalid-config error.
fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}

/// Parses `criteria.effective_time`; `None` selects the system clock.
fn parse_effective_time(raw: &str) -> Result<Option<OffsetDateTime>, ConfigError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case(EFFECTIVE_TIME_NOW) {
        return Ok(None);
    }
    OffsetDateTime::parse(raw, &Rfc3339)
        .map(Some)
        .map_err(|err| ConfigError::Invalid(format!("criteria.effective_time `{raw}`: {err}")))
}

/// Resolves the config path from explicit input or environment.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(invalid("config path exceeds max length"));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a path's total length and component lengths.
fn validate_path(path: &Path, label: &str) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{label} exceeds max length")));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{label} component too long")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test assertions.")]

    use super::parse_effective_time;

    #[test]
    fn effective_time_accepts_now_and_rfc3339() {
        assert!(parse_effective_time("now").unwrap().is_none());
        assert!(parse_effective_time(" NOW ").unwrap().is_none());
        let pinned = parse_effective_time("2023-06-01T00:00:00Z").unwrap().unwrap();
        assert_eq!(pinned.year(), 2023);
        assert!(parse_effective_time("yesterday").is_err());
    }
}
