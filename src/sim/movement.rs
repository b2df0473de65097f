//! Troop movement.
//!
//! A troop within `range * engage_factor` of its target stops and attacks.
//! Otherwise it steps `speed * step_factor` toward the target, with one
//! gate: a step that would put the troop in the river off a bridge is
//! replaced by steering toward the nearest bridge. A troop already on a
//! bridge keeps walking straight across until it clears the river band,
//! since a diagonal step from the span edge would leave the bridge. If no
//! legal step exists the troop holds position for the tick.

use smallvec::SmallVec;

use crate::arena::{can_cross, is_in_river, nearest_bridge, side_of, Position, Side, Troop};
use crate::core::MatchConfig;

/// Movement decision for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Target is within reach; switch to attacking.
    Engage,
    /// Move to the given position.
    Move(Position),
    /// No legal step this tick.
    Hold,
}

/// Decide how `troop` moves toward `target`.
#[must_use]
pub fn plan_step(troop: &Troop, target: Position, config: &MatchConfig) -> Step {
    let from = troop.position;
    if from.distance(target) <= troop.reach(config.engage_factor) {
        return Step::Engage;
    }

    let step = troop.speed * config.step_factor;
    let direct = from.step_toward(target, step);
    if can_cross(direct.x, direct.y) {
        return Step::Move(direct);
    }
    if is_in_river(from.y) {
        let exit = river_exit(from, target, step);
        return if can_cross(exit.x, exit.y) {
            Step::Move(exit)
        } else {
            Step::Hold
        };
    }
    if side_of(from.y) == side_of(target.y) {
        return Step::Hold;
    }

    bridge_candidates(from, step)
        .into_iter()
        .find(|p| *p != from && can_cross(p.x, p.y))
        .map_or(Step::Hold, Step::Move)
}

/// Straight step along the bridge toward the target's half.
fn river_exit(from: Position, target: Position, step: f32) -> Position {
    let dy = match side_of(target.y) {
        Side::Top => -step,
        Side::Bottom => step,
    };
    Position::new(from.x, from.y + dy)
}

/// Steps that bring a troop onto the nearest bridge, in preference order.
fn bridge_candidates(from: Position, step: f32) -> SmallVec<[Position; 2]> {
    let bridge = nearest_bridge(from);
    let mut candidates = SmallVec::new();

    let center = bridge.center();
    if from.distance(center) > 1.0 {
        candidates.push(from.step_toward(center, step));
    }
    let dx = bridge.x - from.x;
    if dx.abs() > f32::EPSILON {
        candidates.push(Position::new(from.x + dx.signum() * step.min(dx.abs()), from.y));
    }
    candidates
}
