//! Opponent decision making.
//!
//! ## Key Types
//!
//! - `OpponentPolicy`: Trait deciding a card play for one side
//! - `RandomOpponent`: Random affordable card, random band position
//! - `PassiveOpponent`: Never plays

pub mod policy;

pub use policy::{OpponentPolicy, PassiveOpponent, Play, PolicyView, RandomOpponent};
