//! Property-based tests for match invariants.
//!
//! Random command/time sequences are thrown at a match; after every step
//! the economy, placement and combat invariants must still hold.

use proptest::prelude::*;

use arena_clash::ai::PassiveOpponent;
use arena_clash::arena::{can_cross, EntityStore, Position, TargetRef, Troop};
use arena_clash::cards::{CardCatalog, CardCategory};
use arena_clash::core::{EntityId, Team};
use arena_clash::game::{Match, MatchBuilder};
use arena_clash::sim::{king_should_activate, tick_towers};
use arena_clash::MatchConfig;

/// One step of a random driver.
#[derive(Clone, Debug)]
enum Op {
    Advance(u64),
    Deploy {
        enemy: bool,
        slot: usize,
        x: f32,
        y: f32,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u64..3000).prop_map(Op::Advance),
        (any::<bool>(), 0usize..5, -5.0f32..105.0, -5.0f32..105.0)
            .prop_map(|(enemy, slot, x, y)| Op::Deploy { enemy, slot, x, y }),
    ]
}

fn apply(game: &mut Match, op: &Op) {
    match *op {
        Op::Advance(ms) => game.advance(ms),
        Op::Deploy { enemy, slot, x, y } => {
            let team = if enemy { Team::Enemy } else { Team::Player };
            let _ = game.deploy(team, slot, x, y);
        }
    }
}

fn check_invariants(game: &Match) -> Result<(), TestCaseError> {
    let max = game.config().max_elixir;
    for team in Team::ALL {
        prop_assert!(game.elixir(team) <= max);
    }
    for troop in game.store().troops() {
        prop_assert!(troop.health > 0, "dead troop retained: {:?}", troop.id);
        prop_assert!(
            can_cross(troop.position.x, troop.position.y),
            "troop {:?} in the river at {:?}",
            troop.id,
            troop.position
        );
    }
    for tower in game.store().towers() {
        prop_assert!(tower.health >= 0);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Elixir stays capped, no troop stands in the river off a bridge and
    /// no dead troop survives a pass, for any command sequence.
    #[test]
    fn prop_match_invariants(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..60)
    ) {
        let mut game = MatchBuilder::new().seed(seed).build();
        for op in &ops {
            apply(&mut game, op);
            check_invariants(&game)?;
        }
    }

    /// A successful play costs exactly the card's cost; a rejected one
    /// costs nothing.
    #[test]
    fn prop_exact_elixir_deduction(
        seed in any::<u64>(),
        elixir in 0u8..=10,
        slot in 0usize..4,
        x in 0.0f32..=100.0,
        y in 0.0f32..=100.0
    ) {
        let mut game = MatchBuilder::new().seed(seed).policy(PassiveOpponent).build();
        game.set_elixir(Team::Player, elixir);
        let card = game.deck(Team::Player).hand[slot].clone();

        let result = game.deploy(Team::Player, slot, x, y);

        if result.is_ok() {
            prop_assert!(card.cost <= elixir);
            prop_assert_eq!(game.elixir(Team::Player), elixir - card.cost);
        } else {
            prop_assert_eq!(game.elixir(Team::Player), elixir);
        }
        if card.category() == CardCategory::Troop && result.is_ok() {
            let troop = game.store().troops().back().cloned().unwrap();
            prop_assert!(can_cross(troop.position.x, troop.position.y));
            prop_assert!(troop.position.y >= 50.0);
        }
    }

    /// King activation equals "fewer than two princesses or a damaged king"
    /// right after every tower tick.
    #[test]
    fn prop_king_activation(
        damage in prop::collection::vec(0i32..1200, 6),
        troops in prop::collection::vec((0.0f32..100.0, 0.0f32..100.0, any::<bool>()), 0..8)
    ) {
        let catalog = CardCatalog::standard();
        let config = MatchConfig::default();
        let mut store = EntityStore::new();
        for (id, amount) in damage.iter().enumerate() {
            // Keep kings standing; only the activation rule is under test
            let amount = if id == 0 || id == 3 { (*amount).min(1999) } else { *amount };
            store.damage(TargetRef::Tower(EntityId(id as u32)), amount);
        }
        for (i, &(x, y, enemy)) in troops.iter().enumerate() {
            let template = catalog.templates()[i % 2].clone();
            if let Some(stats) = template.troop_stats() {
                let team = if enemy { Team::Enemy } else { Team::Player };
                store.insert_troop(Troop::deploy(
                    EntityId(6 + i as u32),
                    &template,
                    stats,
                    team,
                    Position::new(x, y),
                    config.vision_radius,
                ));
            }
        }

        tick_towers(&mut store, &config);

        for team in Team::ALL {
            let king = store.king(team).unwrap();
            prop_assert_eq!(king.activated, king_should_activate(&store, team));
            let princesses = store
                .towers_of(team)
                .filter(|t| !t.is_king() && t.is_alive())
                .count();
            prop_assert_eq!(king.activated, princesses < 2 || king.health < king.max_health);
        }
        prop_assert!(store.troops().iter().all(|t| t.health > 0));
    }
}
