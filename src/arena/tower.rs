//! Towers.
//!
//! Three per side, created at match start in a fixed layout and never
//! recreated. Health only goes down; a tower at 0 health is destroyed for
//! the rest of the match.

use serde::{Deserialize, Serialize};

use super::geometry::Position;
use crate::core::{EntityId, Team};

/// Tower category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Central tower. Losing it loses the match.
    King,
    /// Flanking tower.
    Princess,
}

/// A stationary defensive structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    /// Entity id (0..6).
    pub id: EntityId,
    /// King or princess.
    pub kind: TowerKind,
    /// Owning team.
    pub team: Team,
    /// Current health, never negative.
    pub health: i32,
    /// Starting health.
    pub max_health: i32,
    /// Fixed position.
    pub position: Position,
    /// King only: whether the tower shoots. Always false for princesses.
    pub activated: bool,
}

impl Tower {
    /// Health of a fresh king tower.
    pub const KING_HEALTH: i32 = 2000;
    /// Health of a fresh princess tower.
    pub const PRINCESS_HEALTH: i32 = 1000;

    fn new(id: u32, kind: TowerKind, team: Team, x: f32, y: f32) -> Self {
        let health = match kind {
            TowerKind::King => Self::KING_HEALTH,
            TowerKind::Princess => Self::PRINCESS_HEALTH,
        };
        Self {
            id: EntityId(id),
            kind,
            team,
            health,
            max_health: health,
            position: Position::new(x, y),
            activated: false,
        }
    }

    /// Whether the tower still stands.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Whether this is a king tower.
    #[must_use]
    pub fn is_king(&self) -> bool {
        self.kind == TowerKind::King
    }

    /// Whether the tower has taken any damage.
    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.health < self.max_health
    }

    /// Apply damage, clamping health at 0.
    ///
    /// Returns true if this hit destroyed the tower.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.is_alive();
        self.health = (self.health - amount.max(0)).max(0);
        was_alive && !self.is_alive()
    }
}

/// The six towers of a fresh match: player king, left, right, then the
/// enemy's in the same order.
#[must_use]
pub fn initial_towers() -> Vec<Tower> {
    vec![
        Tower::new(0, TowerKind::King, Team::Player, 50.0, 85.0),
        Tower::new(1, TowerKind::Princess, Team::Player, 25.0, 75.0),
        Tower::new(2, TowerKind::Princess, Team::Player, 75.0, 75.0),
        Tower::new(3, TowerKind::King, Team::Enemy, 50.0, 15.0),
        Tower::new(4, TowerKind::Princess, Team::Enemy, 25.0, 25.0),
        Tower::new(5, TowerKind::Princess, Team::Enemy, 75.0, 25.0),
    ]
}
