// provenance-gate-providers/src/clock.rs
// ============================================================================
// Module: Effective-Time Clocks
// Description: Wall-clock and pinned effective-time providers.
// Purpose: Supply the instant policy windows are evaluated at.
// Dependencies: provenance-gate-core, time
// ============================================================================

//! ## Overview
//! [`SystemClock`] reads the current UTC time on every call.
//! [`FixedEffectiveTime`] pins evaluation to one instant, which keeps policy
//! evaluation reproducible when replaying a past decision.

// ============================================================================
// SECTION: Imports
// ============================================================================

use provenance_gate_core::EffectiveTimeProvider;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Clocks
// ============================================================================

/// Effective time read from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl EffectiveTimeProvider for SystemClock {
    fn effective_time(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Effective time pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEffectiveTime {
    /// Pinned instant.
    instant: OffsetDateTime,
}

impl FixedEffectiveTime {
    /// Pins the effective time to `instant`.
    #[must_use]
    pub const fn new(instant: OffsetDateTime) -> Self {
        Self {
            instant,
        }
    }
}

impl EffectiveTimeProvider for FixedEffectiveTime {
    fn effective_time(&self) -> OffsetDateTime {
        self.instant
    }
}
