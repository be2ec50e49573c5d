// provenance-gate-config/src/lib.rs
// ============================================================================
// Module: Provenance Gate Config
// Description: Canonical configuration model, loading, and validation.
// Purpose: Turn `provenance-gate.toml` into wired core collaborators.
// Dependencies: provenance-gate-core, provenance-gate-providers, toml
// ============================================================================

//! ## Overview
//! [`GateConfig`] is loaded from TOML, validated fail-closed, and then used
//! to build the extractor, clock, sign-off source, and diagnostic sink the
//! core resolvers need.

pub mod config;

pub use config::AttestationConfig;
pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::CriteriaConfig;
pub use config::DEFAULT_CONFIG_NAME;
pub use config::DiagnosticsConfig;
pub use config::GateConfig;
pub use config::SignOffConfig;
pub use config::SignOffMode;
