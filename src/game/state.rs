//! Match state.
//!
//! `MatchState` is the single owner of everything that changes during a
//! match. The controller is the only writer; systems get borrowed pieces
//! of it for the duration of one task.

use im::Vector;
use log::debug;

use super::events::{EventKind, MatchEvent};
use super::phase::Phase;
use crate::arena::{EntityStore, SpellEffect};
use crate::cards::CardCatalog;
use crate::core::{GameRng, IdAllocator, MatchConfig, TeamMap};
use crate::deck::DeckState;
use crate::sim::TickReport;

/// Complete mutable state of a match.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchState {
    /// Simulation time.
    pub now_ms: u64,
    /// Elixir per team, within `0..=max_elixir`.
    pub elixir: TeamMap<u8>,
    /// Deck, hand and preview per team.
    pub decks: TeamMap<DeckState>,
    /// Towers and troops.
    pub store: EntityStore,
    /// Spell markers still on screen.
    pub effects: Vector<SpellEffect>,
    /// Player's selected hand slot.
    pub selected: Option<usize>,
    /// Current phase.
    pub phase: Phase,
    /// Match clock, in seconds.
    pub time_remaining: u32,
    /// Overtime clock, in seconds.
    pub overtime_remaining: u32,
    /// Alive tower counts taken on entering overtime.
    pub overtime_snapshot: Option<TeamMap<usize>>,
    /// Id source for troops and spell markers.
    pub ids: IdAllocator,
    /// Everything that happened so far.
    pub events: Vector<MatchEvent>,
}

impl MatchState {
    /// A fresh match: shuffled decks, starting elixir, full towers.
    pub fn fresh(config: &MatchConfig, catalog: &CardCatalog, rng: &mut GameRng) -> Self {
        let decks = TeamMap::new(|_| DeckState::deal(catalog, config.hand_size, rng));
        Self {
            now_ms: 0,
            elixir: TeamMap::with_value(config.starting_elixir),
            decks,
            store: EntityStore::new(),
            effects: Vector::new(),
            selected: None,
            phase: Phase::Playing,
            time_remaining: config.match_seconds,
            overtime_remaining: config.overtime_seconds,
            overtime_snapshot: None,
            ids: IdAllocator::new(),
            events: Vector::new(),
        }
    }

    /// Append an event stamped with the current time.
    pub fn record(&mut self, kind: EventKind) {
        self.events.push_back(MatchEvent::new(self.now_ms, kind));
    }

    /// Log the removals of a damage pass.
    pub fn record_report(&mut self, report: &TickReport) {
        for id in &report.destroyed_towers {
            if let Some(tower) = self.store.tower(*id) {
                debug!("{} {:?} tower {} destroyed", tower.team, tower.kind, id);
                let kind = EventKind::TowerDestroyed {
                    id: *id,
                    team: tower.team,
                    kind: tower.kind,
                };
                self.record(kind);
            }
        }
        for troop in &report.defeated {
            self.record(EventKind::TroopDefeated {
                id: troop.id,
                team: troop.team,
                card: troop.card_id,
            });
        }
    }
}
