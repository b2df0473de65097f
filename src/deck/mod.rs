//! Deck management: shuffling, dealing and the hand/preview refill cycle.

pub mod manager;

pub use manager::{draw_hand, draw_next_unique, play_slot, shuffle, Deck, DeckState, Hand};
