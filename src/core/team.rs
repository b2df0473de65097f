//! Team identification and per-team data storage.
//!
//! ## Team
//!
//! The two sides of a match. The player defends the bottom half of the
//! arena, the enemy the top half.
//!
//! ## TeamMap
//!
//! Per-team storage with O(1) access, indexable by `Team`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// The human side (bottom half).
    Player,
    /// The policy-driven side (top half).
    Enemy,
}

impl Team {
    /// Both teams, player first. This is the canonical iteration order.
    pub const ALL: [Team; 2] = [Team::Player, Team::Enemy];

    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }

    /// Map a y coordinate expressed in the enemy's frame (top half = own
    /// half) into arena coordinates for this team.
    ///
    /// ```
    /// use arena_clash::core::Team;
    ///
    /// assert_eq!(Team::Enemy.from_enemy_frame(20.0), 20.0);
    /// assert_eq!(Team::Player.from_enemy_frame(20.0), 80.0);
    /// ```
    #[must_use]
    pub fn from_enemy_frame(self, y: f32) -> f32 {
        match self {
            Team::Enemy => y,
            Team::Player => 100.0 - y,
        }
    }

    /// Position of this team in `Team::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Team::Player => 0,
            Team::Enemy => 1,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Player => write!(f, "player"),
            Team::Enemy => write!(f, "enemy"),
        }
    }
}

/// Per-team data storage with O(1) access.
///
/// ```
/// use arena_clash::core::{Team, TeamMap};
///
/// let mut elixir: TeamMap<u8> = TeamMap::with_value(5);
/// elixir[Team::Enemy] = 7;
///
/// assert_eq!(elixir[Team::Player], 5);
/// assert_eq!(elixir[Team::Enemy], 7);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    /// Player entry.
    pub player: T,
    /// Enemy entry.
    pub enemy: T,
}

impl<T> TeamMap<T> {
    /// Create a new TeamMap with values from a factory function.
    pub fn new(mut factory: impl FnMut(Team) -> T) -> Self {
        Self {
            player: factory(Team::Player),
            enemy: factory(Team::Enemy),
        }
    }

    /// Create a new TeamMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            player: value.clone(),
            enemy: value,
        }
    }

    /// Iterate over (Team, &T) pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        [(Team::Player, &self.player), (Team::Enemy, &self.enemy)].into_iter()
    }

    /// Apply `f` to both entries.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(Team, &mut T)) {
        f(Team::Player, &mut self.player);
        f(Team::Enemy, &mut self.enemy);
    }
}

impl<T> Index<Team> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        match team {
            Team::Player => &self.player,
            Team::Enemy => &self.enemy,
        }
    }
}

impl<T> IndexMut<Team> for TeamMap<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        match team {
            Team::Player => &mut self.player,
            Team::Enemy => &mut self.enemy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Team::Player.opponent(), Team::Enemy);
        assert_eq!(Team::Enemy.opponent(), Team::Player);
        assert_eq!(format!("{}", Team::Player), "player");
    }

    #[test]
    fn test_team_map_new() {
        let map: TeamMap<usize> = TeamMap::new(|t| t.index() * 10);

        assert_eq!(map[Team::Player], 0);
        assert_eq!(map[Team::Enemy], 10);
    }

    #[test]
    fn test_team_map_mutation() {
        let mut map: TeamMap<i32> = TeamMap::with_value(0);

        map[Team::Player] = 10;
        map.for_each_mut(|_, v| *v += 1);

        assert_eq!(map[Team::Player], 11);
        assert_eq!(map[Team::Enemy], 1);
    }

    #[test]
    fn test_team_map_iter_order() {
        let map: TeamMap<i32> = TeamMap::new(|t| t.index() as i32);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Team::Player, &0), (Team::Enemy, &1)]);
    }

    #[test]
    fn test_mirror_frame() {
        assert_eq!(Team::Enemy.from_enemy_frame(10.0), 10.0);
        assert!((Team::Player.from_enemy_frame(40.0) - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_team_map_serialization() {
        let map: TeamMap<u8> = TeamMap::new(|t| t.index() as u8 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: TeamMap<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
