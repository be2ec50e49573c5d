// provenance-gate-core/src/core/criteria.rs
// ============================================================================
// Module: Policy Criteria Types
// Description: Policy sources, time-scoped rules, and effective criteria.
// Purpose: Model the include/exclude rule sets narrowed per artifact.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`PolicySource`] combines static include/exclude lists, volatile rules
//! with activation windows, and a deprecated legacy configuration shape. The
//! criteria resolver narrows a source into [`EffectiveCriteria`] for one
//! artifact without ever mutating the source.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Include entry used when no criteria apply.
pub const WILDCARD_CRITERION: &str = "*";

// ============================================================================
// SECTION: Policy Source
// ============================================================================

/// Static include/exclude lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticCriteria {
    /// Rules to include.
    #[serde(default)]
    pub include: Vec<String>,
    /// Rules to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Rule whose activation is bounded in time and optionally scoped to one image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolatileRule {
    /// Rule value appended when active.
    pub value: String,
    /// RFC 3339 instant from which the rule is active (inclusive).
    #[serde(default, alias = "effective_on", skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<String>,
    /// RFC 3339 instant until which the rule is active (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_until: Option<String>,
    /// Image reference the rule is scoped to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl VolatileRule {
    /// Creates an unbounded rule for the given value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Sets the activation window.
    #[must_use]
    pub fn with_window(mut self, from: impl Into<String>, until: impl Into<String>) -> Self {
        self.effective_from = Some(from.into());
        self.effective_until = Some(until.into());
        self
    }

    /// Scopes the rule to one image reference.
    #[must_use]
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }
}

/// Time-scoped include/exclude rules, filtered independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolatileCriteria {
    /// Volatile include rules in source order.
    #[serde(default)]
    pub include: Vec<VolatileRule>,
    /// Volatile exclude rules in source order.
    #[serde(default)]
    pub exclude: Vec<VolatileRule>,
}

/// Deprecated policy configuration shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyConfiguration {
    /// Rules to include.
    #[serde(default)]
    pub include: Vec<String>,
    /// Rules to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Collection names, expanded to `@<collection>` include entries.
    #[serde(default)]
    pub collections: Vec<String>,
}

/// Policy source owned by the caller and treated as immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySource {
    /// Static include/exclude configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<StaticCriteria>,
    /// Time-scoped rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatile_config: Option<VolatileCriteria>,
    /// Deprecated configuration shape, consulted only when nothing else applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<LegacyConfiguration>,
}

// ============================================================================
// SECTION: Effective Criteria
// ============================================================================

/// Include/exclude rule set effective for one artifact at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveCriteria {
    /// Effective include entries; never empty.
    include: Vec<String>,
    /// Effective exclude entries.
    exclude: Vec<String>,
}

impl EffectiveCriteria {
    /// Builds criteria, applying the wildcard floor to an empty include list.
    #[must_use]
    pub fn new(mut include: Vec<String>, exclude: Vec<String>) -> Self {
        if include.is_empty() {
            include.push(WILDCARD_CRITERION.to_string());
        }
        Self {
            include,
            exclude,
        }
    }

    /// Returns the include entries in resolution order.
    #[must_use]
    pub fn include(&self) -> &[String] {
        &self.include
    }

    /// Returns the exclude entries in resolution order.
    #[must_use]
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Consumes the criteria and returns `(include, exclude)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.include, self.exclude)
    }
}

// ============================================================================
// SECTION: Diagnostics
// ============================================================================

/// Activation bound of a volatile rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBound {
    /// The `effective_from` bound.
    EffectiveFrom,
    /// The `effective_until` bound.
    EffectiveUntil,
}

impl fmt::Display for TimeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EffectiveFrom => f.write_str("effective_from"),
            Self::EffectiveUntil => f.write_str("effective_until"),
        }
    }
}

/// Unparsable bound replaced by the evaluation instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriteriaDiagnostic {
    /// Value of the affected rule.
    pub value: String,
    /// Bound that failed to parse.
    pub bound: TimeBound,
    /// Raw bound text.
    pub raw: String,
    /// Parser failure description.
    pub reason: String,
}

impl fmt::Display for CriteriaDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unable to parse {} for criteria \"{}\", was given \"{}\": {}",
            self.bound, self.value, self.raw, self.reason
        )
    }
}

/// Resolver output: criteria plus substitutions the caller must surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaResolution {
    /// Effective criteria.
    pub criteria: EffectiveCriteria,
    /// One entry per unparsable bound.
    pub diagnostics: Vec<CriteriaDiagnostic>,
}
