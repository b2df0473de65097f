//! Elixir economy.
//!
//! Both sides gain one elixir per regeneration tick, capped at the
//! configured maximum. The tick period halves in overtime.

use crate::core::{Cadences, TeamMap};

/// Regeneration period for the current phase.
#[must_use]
pub const fn regen_period(cadences: &Cadences, overtime: bool) -> u64 {
    if overtime {
        cadences.overtime_elixir_ms
    } else {
        cadences.elixir_ms
    }
}

/// Add one elixir to each side, clamped to `max`.
pub fn regenerate(elixir: &mut TeamMap<u8>, max: u8) {
    elixir.for_each_mut(|_, amount| *amount = amount.saturating_add(1).min(max));
}

/// Elixir left after paying `cost`, or `None` if `have` is not enough.
///
/// ```
/// use arena_clash::sim::try_spend;
///
/// assert_eq!(try_spend(5, 3), Some(2));
/// assert_eq!(try_spend(2, 3), None);
/// ```
#[must_use]
pub fn try_spend(have: u8, cost: u8) -> Option<u8> {
    have.checked_sub(cost)
}
