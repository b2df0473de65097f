//! Target selection.
//!
//! Each troop tick starts here. A troop without a target picks the closest
//! enemy troop in its vision radius, falling back to the closest living
//! enemy tower. A troop walking toward a tower switches to an enemy troop
//! that wanders into vision, unless it is a siege troop, which only ever
//! goes for towers.
//!
//! Ties on distance keep the first candidate in store order, so selection
//! is reproducible for identical positions.

use crate::arena::{EntityStore, TargetRef, Troop};
use crate::cards::TroopClass;
use crate::core::EntityId;

/// Outcome of the targeting step for one troop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetDecision {
    /// Current target is still valid; proceed to movement/attack.
    Keep(TargetRef),
    /// A new target was picked. The troop acts on it from the next tick.
    Acquired(TargetRef),
    /// The current target is gone. Selection happens next tick.
    Dropped,
    /// Nothing to fight.
    Idle,
}

/// Closest living enemy troop within the troop's vision radius.
#[must_use]
pub fn closest_enemy_troop(store: &EntityStore, troop: &Troop) -> Option<EntityId> {
    let mut best: Option<(EntityId, f32)> = None;
    for enemy in store.living_troops(troop.team.opponent()) {
        let d = troop.position.distance(enemy.position);
        if d > troop.vision_radius {
            continue;
        }
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((enemy.id, d));
        }
    }
    best.map(|(id, _)| id)
}

/// Closest living enemy tower of either kind.
#[must_use]
pub fn closest_enemy_tower(store: &EntityStore, troop: &Troop) -> Option<EntityId> {
    let mut best: Option<(EntityId, f32)> = None;
    for tower in store.towers_of(troop.team.opponent()) {
        if !tower.is_alive() {
            continue;
        }
        let d = troop.position.distance(tower.position);
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((tower.id, d));
        }
    }
    best.map(|(id, _)| id)
}

/// Pick a fresh target, ignoring the troop's current one.
#[must_use]
pub fn select_target(store: &EntityStore, troop: &Troop) -> Option<TargetRef> {
    if troop.class != TroopClass::Siege {
        if let Some(id) = closest_enemy_troop(store, troop) {
            return Some(TargetRef::Troop(id));
        }
    }
    closest_enemy_tower(store, troop).map(TargetRef::Tower)
}

/// Run the targeting step for `troop` against the current store.
#[must_use]
pub fn evaluate(store: &EntityStore, troop: &Troop) -> TargetDecision {
    let Some(current) = troop.target else {
        return match select_target(store, troop) {
            Some(target) => TargetDecision::Acquired(target),
            None => TargetDecision::Idle,
        };
    };

    if store.resolve(current).is_none() {
        return TargetDecision::Dropped;
    }

    if current.is_tower() && troop.class != TroopClass::Siege {
        if let Some(id) = closest_enemy_troop(store, troop) {
            return TargetDecision::Acquired(TargetRef::Troop(id));
        }
    }

    TargetDecision::Keep(current)
}
