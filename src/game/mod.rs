//! Match control: phases, scheduling, commands and snapshots.
//!
//! ## Key Types
//!
//! - `Match`: Owns a match and is the only writer of its state
//! - `MatchBuilder`: Seed, config, catalog and opponent policy
//! - `Phase`: `Playing`, `Overtime`, `Victory`, `Defeat`
//! - `Scheduler` / `Task`: Cooperative periodic task scheduling
//! - `MatchSnapshot`: Read-only view for renderers
//! - `MatchEvent`: Time-stamped log of discrete events
//! - `CommandError`: Why a command was not applied

pub mod controller;
pub mod error;
pub mod events;
pub mod phase;
pub mod scheduler;
pub mod snapshot;
pub mod state;

pub use controller::{Match, MatchBuilder};
pub use error::CommandError;
pub use events::{EventKind, MatchEvent};
pub use phase::{
    king_verdict, overtime_expiry_verdict, overtime_snapshot, sudden_death_verdict,
    time_up_verdict, Phase,
};
pub use scheduler::{Scheduler, Task};
pub use snapshot::MatchSnapshot;
pub use state::MatchState;
