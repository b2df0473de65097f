//! Opponent policies.
//!
//! A policy looks at one side's elixir, hand and the battlefield and
//! decides what (if anything) to play. It never mutates the match: the
//! controller executes the returned `Play` through the same deploy path a
//! player command uses, so elixir checks, placement rules and hand refill
//! apply identically.

use crate::arena::{EntityStore, Position};
use crate::cards::{CardCategory, CardTemplate};
use crate::core::{DeployBand, GameRng, MatchConfig, Team};
use crate::sim::spell_targets;

// =============================================================================
// Policy Interface
// =============================================================================

/// A decided card play.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Play {
    /// Hand slot to play.
    pub slot: usize,
    /// Deploy position (troops) or impact point (spells).
    pub position: Position,
}

/// What a policy gets to see when deciding for one side.
#[derive(Clone, Copy, Debug)]
pub struct PolicyView<'a> {
    /// Current elixir of the acting side.
    pub elixir: u8,
    /// Hand of the acting side.
    pub hand: &'a [CardTemplate],
    /// The battlefield.
    pub store: &'a EntityStore,
}

impl PolicyView<'_> {
    /// Hand slots whose card the acting side can afford.
    #[must_use]
    pub fn affordable_slots(&self) -> Vec<usize> {
        self.hand
            .iter()
            .enumerate()
            .filter(|(_, card)| card.cost <= self.elixir)
            .map(|(slot, _)| slot)
            .collect()
    }
}

/// Policy deciding card plays for a side.
pub trait OpponentPolicy: Send + Sync {
    /// Choose a play for `team`.
    ///
    /// Returns `None` to pass this decision tick.
    fn decide(&self, view: &PolicyView<'_>, team: Team, rng: &mut GameRng) -> Option<Play>;
}

// =============================================================================
// Random Opponent
// =============================================================================

/// Plays a uniformly random affordable card on a fraction of its ticks.
///
/// Troops land at a random point of the deploy band (mirrored for the
/// bottom side). Spells aim at a random living enemy troop or enemy
/// princess tower; with no such target the tick is passed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomOpponent {
    /// Probability of sitting out a decision tick.
    pub skip_chance: f64,
    /// Troop deploy rectangle, in the enemy's frame.
    pub band: DeployBand,
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::from_config(&MatchConfig::default())
    }
}

impl RandomOpponent {
    /// Policy using the config's skip chance and deploy band.
    #[must_use]
    pub fn from_config(config: &MatchConfig) -> Self {
        Self {
            skip_chance: config.opponent_skip_chance,
            band: config.deploy_band,
        }
    }

    /// Set the skip chance (builder pattern).
    #[must_use]
    pub fn with_skip_chance(mut self, chance: f64) -> Self {
        self.skip_chance = chance;
        self
    }

    fn troop_position(&self, team: Team, rng: &mut GameRng) -> Position {
        let x = rng.uniform(self.band.x_min, self.band.x_max);
        let y = rng.uniform(self.band.y_min, self.band.y_max);
        Position::new(x, team.from_enemy_frame(y))
    }
}

impl OpponentPolicy for RandomOpponent {
    fn decide(&self, view: &PolicyView<'_>, team: Team, rng: &mut GameRng) -> Option<Play> {
        if rng.chance(self.skip_chance) {
            return None;
        }

        let affordable = view.affordable_slots();
        let slot = *rng.pick(&affordable)?;
        let card = &view.hand[slot];

        let position = match card.category() {
            CardCategory::Troop => self.troop_position(team, rng),
            CardCategory::Spell => {
                let targets = spell_targets(view.store, team);
                *rng.pick(&targets)?
            }
        };

        Some(Play { slot, position })
    }
}

// =============================================================================
// Passive Opponent
// =============================================================================

/// Never plays anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassiveOpponent;

impl OpponentPolicy for PassiveOpponent {
    fn decide(&self, _view: &PolicyView<'_>, _team: Team, _rng: &mut GameRng) -> Option<Play> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{can_deploy, TargetRef, Troop};
    use crate::cards::{ids, CardCatalog, CardId};
    use crate::core::EntityId;

    fn hand(catalog: &CardCatalog, cards: &[CardId]) -> Vec<CardTemplate> {
        cards
            .iter()
            .filter_map(|&id| catalog.get(id).cloned())
            .collect()
    }

    #[test]
    fn test_skips_always() {
        let catalog = CardCatalog::standard();
        let store = EntityStore::new();
        let cards = hand(&catalog, &[ids::KNIGHT]);
        let view = PolicyView {
            elixir: 10,
            hand: &cards,
            store: &store,
        };
        let policy = RandomOpponent::default().with_skip_chance(1.0);
        let mut rng = GameRng::new(1);

        for _ in 0..50 {
            assert!(policy.decide(&view, Team::Enemy, &mut rng).is_none());
        }
    }

    #[test]
    fn test_only_affordable_cards() {
        let catalog = CardCatalog::standard();
        let store = EntityStore::new();
        let cards = hand(&catalog, &[ids::GIANT, ids::SKELETONS, ids::WIZARD, ids::BARBARIANS]);
        let view = PolicyView {
            elixir: 2,
            hand: &cards,
            store: &store,
        };
        let policy = RandomOpponent::default().with_skip_chance(0.0);
        let mut rng = GameRng::new(2);

        for _ in 0..50 {
            let play = policy.decide(&view, Team::Enemy, &mut rng).unwrap();
            assert_eq!(play.slot, 1);
        }

        let broke = PolicyView { elixir: 0, ..view };
        assert!(policy.decide(&broke, Team::Enemy, &mut rng).is_none());
    }

    #[test]
    fn test_troops_land_in_band() {
        let catalog = CardCatalog::standard();
        let store = EntityStore::new();
        let cards = hand(&catalog, &[ids::KNIGHT, ids::ARCHERS]);
        let view = PolicyView {
            elixir: 10,
            hand: &cards,
            store: &store,
        };
        let policy = RandomOpponent::default().with_skip_chance(0.0);
        let mut rng = GameRng::new(3);

        for team in Team::ALL {
            for _ in 0..100 {
                let play = policy.decide(&view, team, &mut rng).unwrap();
                let p = play.position;
                assert!((25.0..75.0).contains(&p.x));
                let own_frame_y = team.from_enemy_frame(p.y);
                assert!((10.0..=40.0).contains(&own_frame_y), "{team}: {p:?}");
                assert!(can_deploy(team, p));
            }
        }
    }

    #[test]
    fn test_spell_needs_target() {
        let catalog = CardCatalog::standard();
        let mut store = EntityStore::new();
        // Both player princesses down, no troops: nothing to aim at
        store.damage(TargetRef::Tower(EntityId(1)), 1000);
        store.damage(TargetRef::Tower(EntityId(2)), 1000);
        let cards = hand(&catalog, &[ids::FIREBALL]);
        let view = PolicyView {
            elixir: 10,
            hand: &cards,
            store: &store,
        };
        let policy = RandomOpponent::default().with_skip_chance(0.0);
        let mut rng = GameRng::new(4);

        assert!(policy.decide(&view, Team::Enemy, &mut rng).is_none());

        let template = catalog.get(ids::KNIGHT).unwrap();
        store.insert_troop(Troop::deploy(
            EntityId(6),
            template,
            template.troop_stats().unwrap(),
            Team::Player,
            Position::new(40.0, 70.0),
            12.0,
        ));
        let view = PolicyView {
            elixir: 10,
            hand: &cards,
            store: &store,
        };
        let play = policy.decide(&view, Team::Enemy, &mut rng).unwrap();
        assert_eq!(play.position, Position::new(40.0, 70.0));
    }

    #[test]
    fn test_passive_never_plays() {
        let catalog = CardCatalog::standard();
        let store = EntityStore::new();
        let cards = hand(&catalog, &[ids::SKELETONS]);
        let view = PolicyView {
            elixir: 10,
            hand: &cards,
            store: &store,
        };

        assert!(PassiveOpponent
            .decide(&view, Team::Enemy, &mut GameRng::new(5))
            .is_none());
    }
}
