//! Match event log.
//!
//! Discrete things that happened, in order, so a renderer can animate them
//! without diffing snapshots.

use serde::{Deserialize, Serialize};

use super::phase::Phase;
use crate::arena::{Position, TowerKind};
use crate::cards::{CardId, SpellKind};
use crate::core::{EntityId, Team};

/// What happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A card left a hand (troop or spell).
    CardPlayed {
        team: Team,
        card: CardId,
        position: Position,
    },
    /// A spell landed.
    SpellCast {
        team: Team,
        kind: SpellKind,
        position: Position,
    },
    /// A troop was purged at 0 health.
    TroopDefeated {
        id: EntityId,
        team: Team,
        card: CardId,
    },
    /// A tower fell.
    TowerDestroyed {
        id: EntityId,
        team: Team,
        kind: TowerKind,
    },
    /// The match moved to a new phase.
    PhaseChanged { from: Phase, to: Phase },
}

/// A time-stamped event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Simulation time of the event.
    pub at_ms: u64,
    /// What happened.
    pub kind: EventKind,
}

impl MatchEvent {
    /// Create a new event.
    #[must_use]
    pub fn new(at_ms: u64, kind: EventKind) -> Self {
        Self { at_ms, kind }
    }
}
