//! Troop tick: targeting, movement and damage.
//!
//! The tick runs in two passes over a single store:
//!
//! 1. **Decide.** Every troop evaluates its target and movement against the
//!    pre-tick store. Troops that are in reach and off cooldown emit a
//!    `Hit` and stamp their attack time.
//! 2. **Apply.** The decided troops are committed, then every collected hit
//!    is applied. Troops at 0 health are purged.
//!
//! Because hits are gathered before any damage lands, two troops that
//! strike each other in the same tick both deal their damage regardless
//! of store order.

use smallvec::SmallVec;

use super::movement::{plan_step, Step};
use super::targeting::{evaluate, TargetDecision};
use crate::arena::{EntityStore, TargetRef, Troop, TroopState};
use crate::core::{EntityId, MatchConfig};

/// A single strike waiting to be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    /// Who strikes.
    pub attacker: EntityId,
    /// Who is struck.
    pub target: TargetRef,
    /// Damage dealt.
    pub damage: i32,
}

/// What a damage pass removed from the field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Troops purged at the end of the pass.
    pub defeated: Vec<Troop>,
    /// Towers destroyed during the pass.
    pub destroyed_towers: Vec<EntityId>,
}

impl TickReport {
    /// Whether the pass removed anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defeated.is_empty() && self.destroyed_towers.is_empty()
    }
}

/// Decide one troop's next state against `store`.
///
/// Returns the updated troop and the hit it lands this tick, if any.
#[must_use]
pub fn decide(
    store: &EntityStore,
    troop: &Troop,
    now_ms: u64,
    config: &MatchConfig,
) -> (Troop, Option<Hit>) {
    let mut next = troop.clone();
    if !troop.is_alive() {
        next.state = TroopState::Dead;
        return (next, None);
    }

    let target = match evaluate(store, troop) {
        TargetDecision::Keep(target) => target,
        TargetDecision::Acquired(target) => {
            next.target = Some(target);
            next.state = TroopState::Moving;
            return (next, None);
        }
        TargetDecision::Dropped | TargetDecision::Idle => {
            next.target = None;
            next.state = TroopState::Moving;
            return (next, None);
        }
    };

    // Keep only returns targets that resolve.
    let Some(target_pos) = store.resolve(target) else {
        next.target = None;
        next.state = TroopState::Moving;
        return (next, None);
    };

    match plan_step(troop, target_pos, config) {
        Step::Engage => {
            next.state = TroopState::Attacking;
            if troop.cooldown_ready(now_ms, config.attack_cooldown_ms) {
                next.last_attack_ms = Some(now_ms);
                let hit = Hit {
                    attacker: troop.id,
                    target,
                    damage: troop.damage,
                };
                return (next, Some(hit));
            }
        }
        Step::Move(position) => {
            next.position = position;
            next.state = TroopState::Moving;
        }
        Step::Hold => next.state = TroopState::Moving,
    }
    (next, None)
}

/// Apply collected hits to the store and purge the dead.
pub fn apply_hits(store: &mut EntityStore, hits: &[Hit]) -> TickReport {
    let mut report = TickReport::default();
    for hit in hits {
        if store.damage(hit.target, hit.damage) && hit.target.is_tower() {
            report.destroyed_towers.push(hit.target.id());
        }
    }
    report.defeated = store.purge_dead();
    report
}

/// Run one full troop tick.
pub fn tick_troops(store: &mut EntityStore, now_ms: u64, config: &MatchConfig) -> TickReport {
    let mut hits: SmallVec<[Hit; 8]> = SmallVec::new();
    let decided = store
        .troops()
        .iter()
        .map(|troop| {
            let (next, hit) = decide(store, troop, now_ms, config);
            hits.extend(hit);
            next
        })
        .collect();

    store.replace_troops(decided);
    apply_hits(store, &hits)
}
