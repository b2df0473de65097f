//! Battlefield geometry.
//!
//! Pure predicates over percentage coordinates (`0..=100` on both axes,
//! y grows downward: the enemy holds the top half, the player the bottom).
//! A horizontal river splits the arena; troops may only stand in it on one
//! of the two bridges.

use serde::{Deserialize, Serialize};

use crate::core::Team;

/// Upper edge of the river band (inclusive).
pub const RIVER_TOP: f32 = 45.0;
/// Lower edge of the river band (inclusive).
pub const RIVER_BOTTOM: f32 = 55.0;
/// y coordinate splitting the two halves.
pub const MIDLINE: f32 = 50.0;
/// Arena extent on both axes.
pub const ARENA_SIZE: f32 = 100.0;

/// A river crossing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bridge {
    /// Centre x.
    pub x: f32,
    /// Width of the span.
    pub width: f32,
}

impl Bridge {
    /// Whether `x` lies on this bridge's span.
    #[must_use]
    pub fn spans(&self, x: f32) -> bool {
        x >= self.x - self.width / 2.0 && x <= self.x + self.width / 2.0
    }

    /// Centre of the bridge, at the river midline.
    #[must_use]
    pub fn center(&self) -> Position {
        Position::new(self.x, MIDLINE)
    }
}

/// The two bridges, left then right.
pub const BRIDGES: [Bridge; 2] = [Bridge { x: 30.0, width: 8.0 }, Bridge { x: 70.0, width: 8.0 }];

/// Half of the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// y < 50.
    Top,
    /// y >= 50.
    Bottom,
}

/// A point in percentage space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Position) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Move up to `step` toward `target`. Never overshoots.
    #[must_use]
    pub fn step_toward(self, target: Position, step: f32) -> Position {
        let d = self.distance(target);
        if d <= step || d <= f32::EPSILON {
            return target;
        }
        Position::new(
            self.x + (target.x - self.x) / d * step,
            self.y + (target.y - self.y) / d * step,
        )
    }

    /// Whether both coordinates lie within the arena.
    #[must_use]
    pub fn in_bounds(self) -> bool {
        (0.0..=ARENA_SIZE).contains(&self.x) && (0.0..=ARENA_SIZE).contains(&self.y)
    }
}

/// Whether `y` lies in the river band.
#[must_use]
pub fn is_in_river(y: f32) -> bool {
    (RIVER_TOP..=RIVER_BOTTOM).contains(&y)
}

/// Whether a troop may stand at `(x, y)`: anywhere outside the river, or on
/// a bridge span inside it.
#[must_use]
pub fn can_cross(x: f32, y: f32) -> bool {
    !is_in_river(y) || BRIDGES.iter().any(|b| b.spans(x))
}

/// Half of the arena `y` belongs to.
#[must_use]
pub fn side_of(y: f32) -> Side {
    if y < MIDLINE {
        Side::Top
    } else {
        Side::Bottom
    }
}

/// Whether `pos` is a legal troop deployment cell for `team`.
///
/// The player deploys where y >= 50, the enemy where y <= 50, and a river
/// cell is only legal on a bridge.
#[must_use]
pub fn can_deploy(team: Team, pos: Position) -> bool {
    let own_half = match team {
        Team::Player => pos.y >= MIDLINE,
        Team::Enemy => pos.y <= MIDLINE,
    };
    pos.in_bounds() && own_half && can_cross(pos.x, pos.y)
}

/// Bridge whose centre is closest to `pos`. Ties go to the left bridge.
#[must_use]
pub fn nearest_bridge(pos: Position) -> Bridge {
    let [left, right] = BRIDGES;
    if pos.distance(right.center()) < pos.distance(left.center()) {
        right
    } else {
        left
    }
}
