//! Troops and target references.
//!
//! A troop never holds its target directly. It holds a `TargetRef` (an id
//! tagged with the entity kind) that is resolved against the entity store
//! every tick, so a target removed between ticks resolves to nothing
//! instead of leaving a dangling handle.

use serde::{Deserialize, Serialize};

use super::geometry::Position;
use crate::cards::{CardId, CardTemplate, TroopClass, TroopStats};
use crate::core::{EntityId, Team};

/// Weak reference to what a troop is fighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    /// An enemy troop.
    Troop(EntityId),
    /// An enemy tower.
    Tower(EntityId),
}

impl TargetRef {
    /// The referenced entity id.
    #[must_use]
    pub const fn id(self) -> EntityId {
        match self {
            TargetRef::Troop(id) | TargetRef::Tower(id) => id,
        }
    }

    /// Whether the reference points at a tower.
    #[must_use]
    pub const fn is_tower(self) -> bool {
        matches!(self, TargetRef::Tower(_))
    }
}

/// Troop lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TroopState {
    /// Walking toward its target (or idle without one).
    Moving,
    /// Within reach of its target; strikes when its cooldown allows.
    Attacking,
    /// Health reached 0; removed by the next purge.
    Dead,
}

/// A mobile combat entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Troop {
    /// Entity id.
    pub id: EntityId,
    /// Card the troop was deployed from.
    pub card_id: CardId,
    /// Display name.
    pub name: String,
    /// Owning team.
    pub team: Team,
    /// Current position.
    pub position: Position,
    /// Current health.
    pub health: i32,
    /// Starting health.
    pub max_health: i32,
    /// Damage per hit.
    pub damage: i32,
    /// Movement speed multiplier.
    pub speed: f32,
    /// Attack range multiplier.
    pub range: f32,
    /// Distance within which enemy troops draw this troop's attention.
    pub vision_radius: f32,
    /// Display icon.
    pub icon: String,
    /// Combat class.
    pub class: TroopClass,
    /// What the troop is fighting, if anything.
    pub target: Option<TargetRef>,
    /// Simulation time of the last hit. `None` until the first one.
    pub last_attack_ms: Option<u64>,
    /// Lifecycle state.
    pub state: TroopState,
}

impl Troop {
    /// Instantiate a troop from a card template.
    #[must_use]
    pub fn deploy(
        id: EntityId,
        template: &CardTemplate,
        stats: &TroopStats,
        team: Team,
        position: Position,
        vision_radius: f32,
    ) -> Self {
        Self {
            id,
            card_id: template.id,
            name: template.name.clone(),
            team,
            position,
            health: stats.health,
            max_health: stats.health,
            damage: stats.damage,
            speed: stats.speed,
            range: stats.range,
            vision_radius,
            icon: template.icon.clone(),
            class: stats.class,
            target: None,
            last_attack_ms: None,
            state: TroopState::Moving,
        }
    }

    /// Whether the troop is still fighting.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0 && self.state != TroopState::Dead
    }

    /// Apply damage, clamping health at 0.
    ///
    /// Returns true if this hit killed the troop.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.health > 0;
        self.health = (self.health - amount.max(0)).max(0);
        if self.health == 0 {
            self.state = TroopState::Dead;
        }
        was_alive && self.health == 0
    }

    /// Whether the attack cooldown has elapsed at `now_ms`.
    #[must_use]
    pub fn cooldown_ready(&self, now_ms: u64, cooldown_ms: u64) -> bool {
        self.last_attack_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= cooldown_ms)
    }

    /// Distance at which the troop stops and attacks.
    #[must_use]
    pub fn reach(&self, engage_factor: f32) -> f32 {
        self.range * engage_factor
    }
}
