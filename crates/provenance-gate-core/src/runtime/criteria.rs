// provenance-gate-core/src/runtime/criteria.rs
// ============================================================================
// Module: Criteria Resolution
// Description: Narrows a policy source to the rules effective for one artifact.
// Purpose: Apply static, time-scoped, and legacy rules in a fixed precedence.
// Dependencies: crate::{core, interfaces}, time
// ============================================================================

//! ## Overview
//! Resolution never fails. Static lists seed the result, active volatile
//! rules are appended in source order, the legacy shape is consulted only
//! when nothing else applied, and an empty include list degrades to the
//! wildcard. A bound that is present but unparsable collapses to the
//! evaluation instant and is reported as a [`CriteriaDiagnostic`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::CriteriaDiagnostic;
use crate::core::CriteriaResolution;
use crate::core::DiagnosticEvent;
use crate::core::EffectiveCriteria;
use crate::core::PolicySource;
use crate::core::TimeBound;
use crate::core::VolatileRule;
use crate::interfaces::DiagnosticSink;
use crate::interfaces::EffectiveTimeProvider;

// ============================================================================
// SECTION: Pure Resolution
// ============================================================================

/// Resolves the criteria effective for `artifact` at `now`.
///
/// The source is only read; the returned lists are owned copies.
#[must_use]
pub fn resolve_criteria(
    source: &PolicySource,
    artifact: &str,
    now: OffsetDateTime,
) -> CriteriaResolution {
    let mut include = Vec::new();
    let mut exclude = Vec::new();
    let mut diagnostics = Vec::new();

    if let Some(config) = &source.config
        && (!config.include.is_empty() || !config.exclude.is_empty())
    {
        include.extend(config.include.iter().cloned());
        exclude.extend(config.exclude.iter().cloned());
    }

    if let Some(volatile) = &source.volatile_config {
        append_active(&mut include, &volatile.include, artifact, now, &mut diagnostics);
        append_active(&mut exclude, &volatile.exclude, artifact, now, &mut diagnostics);
    }

    if include.is_empty()
        && exclude.is_empty()
        && let Some(legacy) = &source.legacy
    {
        include.extend(legacy.include.iter().cloned());
        exclude.extend(legacy.exclude.iter().cloned());
        include.extend(legacy.collections.iter().map(|collection| format!("@{collection}")));
    }

    CriteriaResolution {
        criteria: EffectiveCriteria::new(include, exclude),
        diagnostics,
    }
}

/// Appends the values of every active rule in source order.
fn append_active(
    out: &mut Vec<String>,
    rules: &[VolatileRule],
    artifact: &str,
    now: OffsetDateTime,
    diagnostics: &mut Vec<CriteriaDiagnostic>,
) {
    for rule in rules {
        let from = bound_or_now(rule, TimeBound::EffectiveFrom, now, diagnostics);
        let until = bound_or_now(rule, TimeBound::EffectiveUntil, now, diagnostics);
        if from <= now && now <= until && applies_to(rule, artifact) {
            out.push(rule.value.clone());
        }
    }
}

/// Returns true when the rule is unscoped or scoped to `artifact`.
fn applies_to(rule: &VolatileRule, artifact: &str) -> bool {
    match rule.image_ref.as_deref() {
        None | Some("") => true,
        Some(image_ref) => image_ref == artifact,
    }
}

/// Parses one bound; missing bounds collapse silently, unparsable ones loudly.
fn bound_or_now(
    rule: &VolatileRule,
    bound: TimeBound,
    now: OffsetDateTime,
    diagnostics: &mut Vec<CriteriaDiagnostic>,
) -> OffsetDateTime {
    let raw = match bound {
        TimeBound::EffectiveFrom => rule.effective_from.as_deref(),
        TimeBound::EffectiveUntil => rule.effective_until.as_deref(),
    };
    let Some(raw) = raw.filter(|value| !value.is_empty()) else {
        return now;
    };
    match OffsetDateTime::parse(raw, &Rfc3339) {
        Ok(instant) => instant,
        Err(err) => {
            diagnostics.push(CriteriaDiagnostic {
                value: rule.value.clone(),
                bound,
                raw: raw.to_string(),
                reason: err.to_string(),
            });
            now
        }
    }
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Criteria resolver bound to a clock and a diagnostic sink.
pub struct CriteriaResolver<T, S> {
    /// Source of the evaluation instant.
    clock: T,
    /// Destination for substitution warnings.
    sink: S,
}

impl<T, S> CriteriaResolver<T, S>
where
    T: EffectiveTimeProvider,
    S: DiagnosticSink,
{
    /// Creates a resolver.
    #[must_use]
    pub const fn new(clock: T, sink: S) -> Self {
        Self {
            clock,
            sink,
        }
    }

    /// Resolves criteria at the provider's effective time, emitting a
    /// `criteria_bound_substituted` warning per unparsable bound.
    #[must_use]
    pub fn resolve(&self, source: &PolicySource, artifact: &str) -> EffectiveCriteria {
        let now = self.clock.effective_time();
        let resolution = resolve_criteria(source, artifact, now);
        for diagnostic in &resolution.diagnostics {
            let event = DiagnosticEvent::warning("criteria_bound_substituted", diagnostic.to_string())
                .with_artifact(artifact)
                .with_field("value", diagnostic.value.clone())
                .with_field("bound", diagnostic.bound.to_string())
                .with_field("raw", diagnostic.raw.clone());
            self.sink.record(&event);
        }
        resolution.criteria
    }
}
