// provenance-gate-core/tests/proptest_criteria.rs
// ============================================================================
// Module: Criteria Resolver Property Tests
// Description: Determinism and ownership properties of criteria resolution.
// ============================================================================
//! ## Overview
//! Generates arbitrary policy sources and checks that resolution is
//! deterministic, never mutates its input, and never yields an empty
//! include list.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use proptest::prelude::*;
use provenance_gate_core::LegacyConfiguration;
use provenance_gate_core::PolicySource;
use provenance_gate_core::StaticCriteria;
use provenance_gate_core::VolatileCriteria;
use provenance_gate_core::VolatileRule;
use provenance_gate_core::resolve_criteria;
use time::OffsetDateTime;

fn bound() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("2023-01-01T00:00:00Z".to_string())),
        Just(Some("2023-12-31T00:00:00Z".to_string())),
        Just(Some("not a time".to_string())),
        Just(Some(String::new())),
    ]
}

fn rule() -> impl Strategy<Value = VolatileRule> {
    ("[a-z]{1,4}", bound(), bound(), prop::option::of(prop_oneof![Just("img-A"), Just("img-B")]))
        .prop_map(|(value, effective_from, effective_until, image_ref)| VolatileRule {
            value,
            effective_from,
            effective_until,
            image_ref: image_ref.map(ToString::to_string),
        })
}

fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,4}", 0 .. 4)
}

fn policy_source() -> impl Strategy<Value = PolicySource> {
    (
        prop::option::of((names(), names())),
        prop::option::of((
            prop::collection::vec(rule(), 0 .. 4),
            prop::collection::vec(rule(), 0 .. 4),
        )),
        prop::option::of((names(), names(), names())),
    )
        .prop_map(|(config, volatile, legacy)| PolicySource {
            config: config.map(|(include, exclude)| StaticCriteria {
                include,
                exclude,
            }),
            volatile_config: volatile.map(|(include, exclude)| VolatileCriteria {
                include,
                exclude,
            }),
            legacy: legacy.map(|(include, exclude, collections)| LegacyConfiguration {
                include,
                exclude,
                collections,
            }),
        })
}

fn instant() -> impl Strategy<Value = OffsetDateTime> {
    (1_640_995_200i64 .. 1_735_689_600i64)
        .prop_map(|secs| OffsetDateTime::from_unix_timestamp(secs).unwrap())
}

proptest! {
    #[test]
    fn resolution_is_deterministic(
        source in policy_source(),
        artifact in prop_oneof![Just("img-A"), Just("img-B")],
        now in instant(),
    ) {
        let first = resolve_criteria(&source, artifact, now);
        let second = resolve_criteria(&source, artifact, now);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn include_is_never_empty(source in policy_source(), now in instant()) {
        let resolution = resolve_criteria(&source, "img-A", now);
        prop_assert!(!resolution.criteria.include().is_empty());
    }

    #[test]
    fn source_is_never_mutated(source in policy_source(), now in instant()) {
        let snapshot = source.clone();
        let (mut include, _) = resolve_criteria(&source, "img-B", now).criteria.into_parts();
        include.push("appended".to_string());
        prop_assert_eq!(source, snapshot);
    }
}
