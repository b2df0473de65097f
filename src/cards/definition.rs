//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a card: cost, category,
//! and the stats a troop is instantiated with (or the damage a spell deals).
//! Hands and decks hold value copies of templates; the catalog's own
//! templates are never mutated.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    /// Deploys a troop.
    Troop,
    /// Casts an instant area spell.
    Spell,
}

/// Card rarity (display only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    /// Common.
    Common,
    /// Rare.
    Rare,
    /// Epic.
    Epic,
    /// Legendary.
    Legendary,
}

/// Combat class of a troop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TroopClass {
    /// Close-range fighter.
    Melee,
    /// Attacks from a distance. An activated king tower only engages ranged
    /// troops inside the princess radius.
    Ranged,
    /// Ignores enemy troops and always heads for the closest tower.
    Siege,
}

/// Visual kind of a spell effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellKind {
    /// Fireball.
    Fireball,
    /// Arrows.
    Arrows,
}

/// Stats a troop is instantiated with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TroopStats {
    /// Starting (and maximum) health.
    pub health: i32,
    /// Damage per hit.
    pub damage: i32,
    /// Movement speed multiplier.
    pub speed: f32,
    /// Attack range multiplier.
    pub range: f32,
    /// Combat class.
    pub class: TroopClass,
}

/// Damage a spell deals.
///
/// Troops take `damage`; towers take `tower_damage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellStats {
    /// Visual kind.
    pub kind: SpellKind,
    /// Damage dealt to troops in the area.
    pub damage: i32,
    /// Damage dealt to towers in the area.
    pub tower_damage: i32,
}

/// Category-specific card payload.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardKind {
    /// A troop card.
    Troop(TroopStats),
    /// A spell card.
    Spell(SpellStats),
}

/// Static card template.
///
/// ## Example
///
/// ```
/// use arena_clash::cards::{CardTemplate, CardId, Rarity, TroopClass};
///
/// let knight = CardTemplate::troop(CardId::new(1), "Knight", 3)
///     .with_stats(350, 120, 0.8, 1.0, TroopClass::Melee)
///     .with_rarity(Rarity::Common);
///
/// assert_eq!(knight.cost, 3);
/// assert_eq!(knight.troop_stats().unwrap().damage, 120);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Unique identifier for this template.
    pub id: CardId,
    /// Display name.
    pub name: String,
    /// Elixir cost.
    pub cost: u8,
    /// Rarity.
    pub rarity: Rarity,
    /// Display icon.
    pub icon: String,
    /// Troop stats or spell damage.
    pub kind: CardKind,
}

impl CardTemplate {
    /// Create a troop template with placeholder stats.
    #[must_use]
    pub fn troop(id: CardId, name: impl Into<String>, cost: u8) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            rarity: Rarity::Common,
            icon: String::new(),
            kind: CardKind::Troop(TroopStats {
                health: 100,
                damage: 50,
                speed: 1.0,
                range: 1.0,
                class: TroopClass::Melee,
            }),
        }
    }

    /// Create a spell template.
    #[must_use]
    pub fn spell(
        id: CardId,
        name: impl Into<String>,
        cost: u8,
        kind: SpellKind,
        damage: i32,
        tower_damage: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            rarity: Rarity::Common,
            icon: String::new(),
            kind: CardKind::Spell(SpellStats {
                kind,
                damage,
                tower_damage,
            }),
        }
    }

    /// Set troop stats (builder pattern). Turns the card into a troop card.
    #[must_use]
    pub fn with_stats(
        mut self,
        health: i32,
        damage: i32,
        speed: f32,
        range: f32,
        class: TroopClass,
    ) -> Self {
        self.kind = CardKind::Troop(TroopStats {
            health,
            damage,
            speed,
            range,
            class,
        });
        self
    }

    /// Set rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set icon (builder pattern).
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Card category.
    #[must_use]
    pub fn category(&self) -> CardCategory {
        match self.kind {
            CardKind::Troop(_) => CardCategory::Troop,
            CardKind::Spell(_) => CardCategory::Spell,
        }
    }

    /// Troop stats, if this is a troop card.
    #[must_use]
    pub fn troop_stats(&self) -> Option<&TroopStats> {
        match &self.kind {
            CardKind::Troop(stats) => Some(stats),
            CardKind::Spell(_) => None,
        }
    }

    /// Spell stats, if this is a spell card.
    #[must_use]
    pub fn spell_stats(&self) -> Option<&SpellStats> {
        match &self.kind {
            CardKind::Spell(stats) => Some(stats),
            CardKind::Troop(_) => None,
        }
    }

    /// Base damage, for troops and spells alike.
    #[must_use]
    pub fn damage(&self) -> i32 {
        match &self.kind {
            CardKind::Troop(stats) => stats.damage,
            CardKind::Spell(stats) => stats.damage,
        }
    }
}
