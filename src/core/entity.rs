//! Entity identification system.
//!
//! Every object on the battlefield (tower, troop, spell effect) has a unique
//! `EntityId`.
//!
//! ## ID Layout
//!
//! - `0..TOWER_COUNT`: Reserved for the six towers (fixed layout)
//! - `TOWER_COUNT..`: Troops and spell effects, allocated in creation order
//!
//! Ids are never reused within a match, so a stale id can only resolve to
//! nothing, never to a different entity.
//!
//! ```
//! use arena_clash::core::EntityId;
//!
//! assert!(EntityId(0).is_tower());
//! assert!(EntityId(5).is_tower());
//! assert!(!EntityId(6).is_tower());
//! ```

use serde::{Deserialize, Serialize};

/// Number of towers in a match (three per side).
pub const TOWER_COUNT: u32 = 6;

/// Unique identifier for any battlefield entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Whether this id lies in the reserved tower range.
    #[must_use]
    pub const fn is_tower(self) -> bool {
        self.0 < TOWER_COUNT
    }

    /// Index into the tower table, for tower ids only.
    #[must_use]
    pub const fn tower_slot(self) -> Option<usize> {
        if self.is_tower() {
            Some(self.0 as usize)
        } else {
            None
        }
    }

    /// Raw value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out troop and spell marker ids, starting at [`TOWER_COUNT`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: TOWER_COUNT }
    }
}

impl IdAllocator {
    /// Allocator for a fresh match.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unused id.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Id the next `alloc` will return.
    #[must_use]
    pub fn peek(&self) -> EntityId {
        EntityId(self.next)
    }
}
