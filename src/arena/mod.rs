//! The battlefield: geometry, towers, troops, spell markers and the store
//! that owns them.
//!
//! ## Key Types
//!
//! - `Position`: A point in percentage space
//! - `Tower` / `Troop` / `SpellEffect`: The entities on the field
//! - `TargetRef`: Id-based reference from a troop to what it fights
//! - `EntityStore`: Owner of every tower and troop

pub mod geometry;
pub mod spell;
pub mod store;
pub mod tower;
pub mod troop;

pub use geometry::{
    can_cross, can_deploy, is_in_river, nearest_bridge, side_of, Bridge, Position, Side, BRIDGES,
};
pub use spell::SpellEffect;
pub use store::EntityStore;
pub use tower::{initial_towers, Tower, TowerKind};
pub use troop::{TargetRef, Troop, TroopState};
