//! Command errors.
//!
//! A rejected command leaves the match untouched. The error only says why,
//! so a renderer can ignore it and a test can assert on it.

use std::fmt;

/// Why a command was not applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandError {
    /// The match is over (or torn down).
    MatchInactive,
    /// `place_card` without a selected card.
    NoCardSelected,
    /// Hand slot does not exist.
    SlotOutOfRange { index: usize },
    /// Not enough elixir for the card.
    InsufficientElixir { have: u8, need: u8 },
    /// Coordinates outside the arena.
    OutOfBounds { x: f32, y: f32 },
    /// Troop cell on the wrong half or in the river off a bridge.
    IllegalPlacement { x: f32, y: f32 },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::MatchInactive => write!(f, "match is not active"),
            CommandError::NoCardSelected => write!(f, "no card selected"),
            CommandError::SlotOutOfRange { index } => write!(f, "hand slot {index} out of range"),
            CommandError::InsufficientElixir { have, need } => {
                write!(f, "insufficient elixir: have {have}, need {need}")
            }
            CommandError::OutOfBounds { x, y } => write!(f, "({x}, {y}) is outside the arena"),
            CommandError::IllegalPlacement { x, y } => write!(f, "cannot deploy a troop at ({x}, {y})"),
        }
    }
}

impl std::error::Error for CommandError {}
