//! Spell casting and spell-marker expiry.
//!
//! A spell deals its damage the moment it is cast: every enemy troop within
//! `spell_radius` of the impact takes the spell's raw damage, every enemy
//! tower within the radius takes the spell's tower damage instead.

use im::Vector;
use smallvec::SmallVec;

use super::combat::{apply_hits, Hit, TickReport};
use crate::arena::{EntityStore, Position, SpellEffect, TargetRef};
use crate::cards::SpellStats;
use crate::core::{EntityId, Team};

/// Enemy entities a spell cast by `caster` at `center` would hit.
#[must_use]
pub fn spell_hits(
    store: &EntityStore,
    caster: Team,
    spell: &SpellStats,
    center: Position,
    radius: f32,
    source: EntityId,
) -> SmallVec<[Hit; 8]> {
    let enemy = caster.opponent();
    let troops = store
        .living_troops(enemy)
        .filter(|t| t.position.distance(center) <= radius)
        .map(|t| Hit {
            attacker: source,
            target: TargetRef::Troop(t.id),
            damage: spell.damage,
        });
    let towers = store
        .towers_of(enemy)
        .filter(|t| t.is_alive() && t.position.distance(center) <= radius)
        .map(|t| Hit {
            attacker: source,
            target: TargetRef::Tower(t.id),
            damage: spell.tower_damage,
        });
    troops.chain(towers).collect()
}

/// Cast a spell and apply its damage. `source` is the id of the spell
/// marker recorded for the cast.
pub fn cast_spell(
    store: &mut EntityStore,
    caster: Team,
    spell: &SpellStats,
    center: Position,
    radius: f32,
    source: EntityId,
) -> TickReport {
    let hits = spell_hits(store, caster, spell, center, radius, source);
    apply_hits(store, &hits)
}

/// Points a spell from `caster` may be aimed at: living enemy troops and
/// standing enemy princess towers.
#[must_use]
pub fn spell_targets(store: &EntityStore, caster: Team) -> SmallVec<[Position; 8]> {
    let enemy = caster.opponent();
    store
        .living_troops(enemy)
        .map(|t| t.position)
        .chain(
            store
                .towers_of(enemy)
                .filter(|t| t.is_alive() && !t.is_king())
                .map(|t| t.position),
        )
        .collect()
}

/// Drop expired spell markers.
#[must_use]
pub fn sweep_effects(effects: &Vector<SpellEffect>, now_ms: u64, lifetime_ms: u64) -> Vector<SpellEffect> {
    effects
        .iter()
        .filter(|e| !e.is_expired(now_ms, lifetime_ms))
        .cloned()
        .collect()
}
