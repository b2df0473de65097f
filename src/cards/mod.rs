//! Card system: templates and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card templates
//! - `CardTemplate`: Immutable card data (cost, category, stats)
//! - `CardCatalog`: Ordered template lookup

pub mod catalog;
pub mod definition;

pub use catalog::{ids, CardCatalog};
pub use definition::{
    CardCategory, CardId, CardKind, CardTemplate, Rarity, SpellKind, SpellStats, TroopClass,
    TroopStats,
};
