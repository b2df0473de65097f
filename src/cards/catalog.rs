//! Card catalog for template lookup.
//!
//! The `CardCatalog` stores every card template of a match, in a stable
//! order (deck construction and therefore seeded replays depend on it), and
//! provides lookup by `CardId`.

use rustc_hash::FxHashMap;

use super::definition::{CardId, CardTemplate, Rarity, SpellKind, TroopClass};
use crate::core::GameRng;

/// Ids of the standard catalog, in catalog order.
pub mod ids {
    use super::CardId;

    /// Archers.
    pub const ARCHERS: CardId = CardId::new(0);
    /// Knight.
    pub const KNIGHT: CardId = CardId::new(1);
    /// Fireball.
    pub const FIREBALL: CardId = CardId::new(2);
    /// Giant.
    pub const GIANT: CardId = CardId::new(3);
    /// Wizard.
    pub const WIZARD: CardId = CardId::new(4);
    /// Skeletons.
    pub const SKELETONS: CardId = CardId::new(5);
    /// Arrows.
    pub const ARROWS: CardId = CardId::new(6);
    /// Barbarians.
    pub const BARBARIANS: CardId = CardId::new(7);
}

/// Ordered registry of card templates.
///
/// ## Example
///
/// ```
/// use arena_clash::cards::{CardCatalog, ids};
///
/// let catalog = CardCatalog::standard();
///
/// assert_eq!(catalog.len(), 8);
/// assert_eq!(catalog.get(ids::GIANT).unwrap().name, "Giant");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    templates: Vec<CardTemplate>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The eight-card catalog the game ships with.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        catalog.register(
            CardTemplate::troop(ids::ARCHERS, "Archers", 3)
                .with_stats(350, 80, 1.0, 4.0, TroopClass::Ranged)
                .with_icon("🏹"),
        );
        catalog.register(
            CardTemplate::troop(ids::KNIGHT, "Knight", 3)
                .with_stats(350, 120, 0.8, 1.0, TroopClass::Melee)
                .with_icon("⚔️"),
        );
        catalog.register(
            CardTemplate::spell(ids::FIREBALL, "Fireball", 4, SpellKind::Fireball, 300, 90)
                .with_rarity(Rarity::Rare)
                .with_icon("🔥"),
        );
        catalog.register(
            CardTemplate::troop(ids::GIANT, "Giant", 5)
                .with_stats(1400, 150, 0.5, 1.0, TroopClass::Siege)
                .with_rarity(Rarity::Rare)
                .with_icon("👹"),
        );
        catalog.register(
            CardTemplate::troop(ids::WIZARD, "Wizard", 5)
                .with_stats(350, 140, 0.9, 3.0, TroopClass::Ranged)
                .with_rarity(Rarity::Rare)
                .with_icon("🧙"),
        );
        catalog.register(
            CardTemplate::troop(ids::SKELETONS, "Skeletons", 1)
                .with_stats(65, 67, 1.2, 1.0, TroopClass::Melee)
                .with_icon("💀"),
        );
        catalog.register(
            CardTemplate::spell(ids::ARROWS, "Arrows", 3, SpellKind::Arrows, 150, 50)
                .with_icon("➹"),
        );
        catalog.register(
            CardTemplate::troop(ids::BARBARIANS, "Barbarians", 5)
                .with_stats(400, 110, 0.8, 1.0, TroopClass::Melee)
                .with_icon("🪓"),
        );

        catalog
    }

    /// Register a card template.
    ///
    /// Panics if a template with the same ID already exists.
    pub fn register(&mut self, template: CardTemplate) {
        if self.index.contains_key(&template.id) {
            panic!("Card with ID {:?} already registered", template.id);
        }
        self.index.insert(template.id, self.templates.len());
        self.templates.push(template);
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardTemplate> {
        self.index.get(&id).map(|&i| &self.templates[i])
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.index.contains_key(&id)
    }

    /// All templates in catalog order.
    #[must_use]
    pub fn templates(&self) -> &[CardTemplate] {
        &self.templates
    }

    /// Get the number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over all templates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.iter()
    }

    /// Pick a uniformly random template (value copy).
    ///
    /// Returns `None` only for an empty catalog.
    pub fn random(&self, rng: &mut GameRng) -> Option<CardTemplate> {
        rng.pick(&self.templates).cloned()
    }
}
