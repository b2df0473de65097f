//! Core types: entity ids, teams, RNG, configuration.
//!
//! Everything here is independent of the battlefield and the match rules.

pub mod config;
pub mod entity;
pub mod rng;
pub mod team;

pub use config::{Cadences, DeployBand, MatchConfig};
pub use entity::{EntityId, IdAllocator, TOWER_COUNT};
pub use rng::{GameRng, GameRngState, RngStream};
pub use team::{Team, TeamMap};
