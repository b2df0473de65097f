//! Read-only match snapshot for renderers.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::events::MatchEvent;
use super::phase::Phase;
use super::state::MatchState;
use crate::arena::{SpellEffect, Tower, Troop};
use crate::cards::CardTemplate;
use crate::core::{Team, TeamMap};
use crate::deck::Hand;

/// Everything a renderer needs to draw one frame.
///
/// A snapshot is a value: the match never mutates a snapshot it has
/// already handed out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Simulation time.
    pub now_ms: u64,
    /// Elixir of both teams.
    pub elixir: TeamMap<u8>,
    /// Player hand.
    pub hand: Hand,
    /// Player preview card.
    pub next_card: CardTemplate,
    /// All six towers.
    pub towers: Vec<Tower>,
    /// Troops on the field.
    pub troops: Vector<Troop>,
    /// Spell markers on the field.
    pub effects: Vector<SpellEffect>,
    /// Current phase.
    pub phase: Phase,
    /// Match clock, in seconds.
    pub time_remaining: u32,
    /// Overtime clock, in seconds.
    pub overtime_remaining: u32,
    /// Player's selected hand slot.
    pub selected: Option<usize>,
    /// Event log.
    pub events: Vector<MatchEvent>,
}

impl MatchSnapshot {
    /// Capture `state`.
    #[must_use]
    pub fn capture(state: &MatchState) -> Self {
        let player = &state.decks[Team::Player];
        Self {
            now_ms: state.now_ms,
            elixir: state.elixir.clone(),
            hand: player.hand.clone(),
            next_card: player.next_card.clone(),
            towers: state.store.towers().to_vec(),
            troops: state.store.troops().clone(),
            effects: state.effects.clone(),
            phase: state.phase,
            time_remaining: state.time_remaining,
            overtime_remaining: state.overtime_remaining,
            selected: state.selected,
            events: state.events.clone(),
        }
    }

    /// Towers of `team`.
    pub fn towers_of(&self, team: Team) -> impl Iterator<Item = &Tower> {
        self.towers.iter().filter(move |t| t.team == team)
    }

    /// Troops of `team`.
    pub fn troops_of(&self, team: Team) -> impl Iterator<Item = &Troop> {
        self.troops.iter().filter(move |t| t.team == team)
    }
}
