//! Match phases and adjudication.
//!
//! ## Phase machine
//!
//! ```text
//! Playing ──► Overtime ──► Victory | Defeat
//!    └──────────────────► Victory | Defeat
//! ```
//!
//! `Victory` and `Defeat` are terminal and are always from the player's
//! point of view. The verdict functions here are pure: they read the
//! store and return the phase the match should move to.

use serde::{Deserialize, Serialize};

use crate::arena::EntityStore;
use crate::core::{Team, TeamMap};

/// Phase of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Regular play.
    Playing,
    /// Tie-breaking period after an even regular time.
    Overtime,
    /// The player won.
    Victory,
    /// The player lost.
    Defeat,
}

impl Phase {
    /// Whether the match is still being played.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Phase::Playing | Phase::Overtime)
    }

    /// Whether the match has ended.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !self.is_active()
    }

    /// Winning team of a finished match.
    #[must_use]
    pub const fn winner(self) -> Option<Team> {
        match self {
            Phase::Victory => Some(Team::Player),
            Phase::Defeat => Some(Team::Enemy),
            Phase::Playing | Phase::Overtime => None,
        }
    }

    /// Terminal phase for a match won by `team`.
    #[must_use]
    pub const fn won_by(team: Team) -> Self {
        match team {
            Team::Player => Phase::Victory,
            Team::Enemy => Phase::Defeat,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Playing => "playing",
            Phase::Overtime => "overtime",
            Phase::Victory => "victory",
            Phase::Defeat => "defeat",
        };
        f.write_str(name)
    }
}

/// A fallen king ends the match. The player's king is checked first.
#[must_use]
pub fn king_verdict(store: &EntityStore) -> Option<Phase> {
    Team::ALL
        .into_iter()
        .find(|&team| store.king(team).map_or(true, |king| !king.is_alive()))
        .map(|fallen| Phase::won_by(fallen.opponent()))
}

/// Verdict when the match clock runs out: fewer destroyed towers wins,
/// an even count goes to overtime.
#[must_use]
pub fn time_up_verdict(store: &EntityStore) -> Phase {
    let player_lost = store.destroyed_tower_count(Team::Player);
    let enemy_lost = store.destroyed_tower_count(Team::Enemy);
    match player_lost.cmp(&enemy_lost) {
        std::cmp::Ordering::Less => Phase::Victory,
        std::cmp::Ordering::Greater => Phase::Defeat,
        std::cmp::Ordering::Equal => Phase::Overtime,
    }
}

/// Alive tower counts taken on entering overtime.
#[must_use]
pub fn overtime_snapshot(store: &EntityStore) -> TeamMap<usize> {
    TeamMap::new(|team| store.alive_tower_count(team))
}

/// Sudden death: the first side to drop below its overtime snapshot loses.
///
/// If both sides dropped within the same task, the side that lost more
/// towers loses; an even drop is a defeat.
#[must_use]
pub fn sudden_death_verdict(store: &EntityStore, snapshot: &TeamMap<usize>) -> Option<Phase> {
    let lost = TeamMap::new(|team| snapshot[team].saturating_sub(store.alive_tower_count(team)));
    match (lost.player > 0, lost.enemy > 0) {
        (false, false) => None,
        (true, false) => Some(Phase::Defeat),
        (false, true) => Some(Phase::Victory),
        (true, true) if lost.enemy > lost.player => Some(Phase::Victory),
        (true, true) => Some(Phase::Defeat),
    }
}

/// Verdict when the overtime clock runs out: the side whose weakest
/// standing tower is lower loses. An exact tie goes to the player.
#[must_use]
pub fn overtime_expiry_verdict(store: &EntityStore) -> Phase {
    let player_min = store.min_tower_health(Team::Player).unwrap_or(0);
    let enemy_min = store.min_tower_health(Team::Enemy).unwrap_or(0);
    if player_min < enemy_min {
        Phase::Defeat
    } else {
        Phase::Victory
    }
}
