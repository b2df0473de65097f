//! # arena-clash
//!
//! Simulation core of a real-time, two-sided tower battle. A player and an
//! opponent spend regenerating elixir to deploy troops and cast spells on a
//! river-split arena; troops walk, cross on bridges and fight; towers shoot
//! back; the match ends when a king tower falls or the clocks run out.
//!
//! ## Design Principles
//!
//! 1. **Single Owner**: All mutable state lives in one `Match`. Periodic
//!    systems run one at a time from a cooperative scheduler and never see
//!    each other's half-applied updates.
//!
//! 2. **Id-Based References**: Troops target by `TargetRef` and resolve it
//!    against the `EntityStore` every tick. Removed entities simply stop
//!    resolving.
//!
//! 3. **Explicit Randomness**: Every shuffle, opponent decision and
//!    fallback draw takes a seeded `GameRng`, so a seed replays a match.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Troops, decks and the event log are
//!   `im` vectors, so snapshots are O(1) clones.
//!
//! - **Simulated Time**: The core owns a millisecond clock. A driver calls
//!   `Match::advance` with wall-clock deltas; tests call it with whatever
//!   they like.
//!
//! ## Modules
//!
//! - `core`: Entity ids, teams, RNG, configuration
//! - `cards`: Card templates and the catalog
//! - `deck`: Shuffling, hands and the preview card
//! - `arena`: Geometry, towers, troops and the entity store
//! - `sim`: Targeting, movement, combat, tower AI, economy, spells
//! - `ai`: Opponent policies
//! - `game`: Phases, scheduler, commands, snapshots

pub mod core;
pub mod cards;
pub mod deck;
pub mod arena;
pub mod sim;
pub mod ai;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    EntityId, Team, TeamMap,
    GameRng, GameRngState, RngStream,
    MatchConfig, Cadences, DeployBand,
};

pub use crate::cards::{
    CardId, CardCategory, CardTemplate, CardCatalog,
    TroopClass, TroopStats, SpellKind, SpellStats,
};

pub use crate::deck::{DeckState, Deck, Hand};

pub use crate::arena::{
    Position, EntityStore, Tower, TowerKind,
    Troop, TroopState, TargetRef, SpellEffect,
};

pub use crate::ai::{OpponentPolicy, Play, PolicyView, RandomOpponent, PassiveOpponent};

pub use crate::game::{
    Match, MatchBuilder, Phase, CommandError,
    MatchSnapshot, MatchEvent, EventKind, Task,
};
