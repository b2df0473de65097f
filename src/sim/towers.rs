//! Tower AI.
//!
//! Runs on its own cadence, independent of the troop tick. Each standing
//! princess tower shoots the closest enemy troop inside `princess_radius`.
//! A king tower only shoots once activated (a princess of its team is down,
//! or the king itself has been damaged) and then reaches out to
//! `king_radius`, except against ranged troops, which it can only engage
//! inside `princess_radius`.

use smallvec::SmallVec;

use super::combat::{apply_hits, Hit, TickReport};
use crate::arena::{EntityStore, TargetRef, Tower};
use crate::cards::TroopClass;
use crate::core::{EntityId, MatchConfig, Team};

/// Whether `team`'s king tower should be active in the current store.
#[must_use]
pub fn king_should_activate(store: &EntityStore, team: Team) -> bool {
    let princesses_alive = store
        .towers_of(team)
        .filter(|t| !t.is_king() && t.is_alive())
        .count();
    let king_damaged = store.king(team).is_some_and(Tower::is_damaged);
    princesses_alive < 2 || king_damaged
}

/// Recompute the activation flag of both kings.
pub fn refresh_activation(store: &mut EntityStore) {
    let flags = [
        (Team::Player, king_should_activate(store, Team::Player)),
        (Team::Enemy, king_should_activate(store, Team::Enemy)),
    ];
    for tower in store.towers_mut() {
        if tower.is_king() {
            if let Some(&(_, active)) = flags.iter().find(|(team, _)| *team == tower.team) {
                tower.activated = active;
            }
        }
    }
}

/// Closest enemy troop `tower` may shoot this tick.
#[must_use]
pub fn tower_target(store: &EntityStore, tower: &Tower, config: &MatchConfig) -> Option<EntityId> {
    if !tower.is_alive() || (tower.is_king() && !tower.activated) {
        return None;
    }

    let radius = if tower.is_king() {
        config.king_radius
    } else {
        config.princess_radius
    };

    let mut best: Option<(EntityId, f32)> = None;
    for troop in store.living_troops(tower.team.opponent()) {
        let d = tower.position.distance(troop.position);
        if d > radius {
            continue;
        }
        if tower.is_king() && troop.class == TroopClass::Ranged && d > config.princess_radius {
            continue;
        }
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((troop.id, d));
        }
    }
    best.map(|(id, _)| id)
}

/// Run one tower tick: refresh king activation, then every standing tower
/// fires at its target.
pub fn tick_towers(store: &mut EntityStore, config: &MatchConfig) -> TickReport {
    refresh_activation(store);

    let hits: SmallVec<[Hit; 6]> = store
        .towers()
        .iter()
        .filter_map(|tower| {
            tower_target(store, tower, config).map(|id| Hit {
                attacker: tower.id,
                target: TargetRef::Troop(id),
                damage: config.tower_damage,
            })
        })
        .collect();

    apply_hits(store, &hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Position, Troop};
    use crate::cards::{ids, CardCatalog, CardId};

    fn spawn(store: &mut EntityStore, id: u32, card: CardId, team: Team, x: f32, y: f32) {
        let catalog = CardCatalog::standard();
        let template = catalog.get(card).unwrap();
        store.insert_troop(Troop::deploy(
            EntityId(id),
            template,
            template.troop_stats().unwrap(),
            team,
            Position::new(x, y),
            12.0,
        ));
    }

    fn king(store: &EntityStore, team: Team) -> Tower {
        store.king(team).cloned().unwrap()
    }

    #[test]
    fn test_king_inactive_at_start() {
        let mut store = EntityStore::new();
        refresh_activation(&mut store);

        assert!(!king(&store, Team::Player).activated);
        assert!(!king(&store, Team::Enemy).activated);
    }

    #[test]
    fn test_activation_on_princess_loss() {
        let mut store = EntityStore::new();
        store.damage(TargetRef::Tower(EntityId(5)), 1000);
        refresh_activation(&mut store);

        assert!(king(&store, Team::Enemy).activated);
        assert!(!king(&store, Team::Player).activated);
    }

    #[test]
    fn test_activation_on_king_damage() {
        let mut store = EntityStore::new();
        store.damage(TargetRef::Tower(EntityId(0)), 1);

        assert!(king_should_activate(&store, Team::Player));
        assert!(!king_should_activate(&store, Team::Enemy));
    }

    #[test]
    fn test_princess_shoots_closest_in_radius() {
        let mut store = EntityStore::new();
        let config = MatchConfig::default();
        // Enemy left princess at (25, 25)
        spawn(&mut store, 6, ids::KNIGHT, Team::Player, 25.0, 35.0);
        spawn(&mut store, 7, ids::KNIGHT, Team::Player, 25.0, 30.0);
        spawn(&mut store, 8, ids::KNIGHT, Team::Player, 25.0, 40.0);

        let report = tick_towers(&mut store, &config);

        assert!(report.is_empty());
        assert_eq!(store.troop(EntityId(7)).map(|t| t.health), Some(300));
        assert_eq!(store.troop(EntityId(6)).map(|t| t.health), Some(350));
        assert_eq!(store.troop(EntityId(8)).map(|t| t.health), Some(350));
    }

    #[test]
    fn test_inactive_king_holds_fire() {
        let mut store = EntityStore::new();
        let config = MatchConfig::default();
        spawn(&mut store, 6, ids::KNIGHT, Team::Player, 50.0, 20.0);

        tick_towers(&mut store, &config);

        assert_eq!(store.troop(EntityId(6)).map(|t| t.health), Some(350));
    }

    #[test]
    fn test_active_king_ranged_exception() {
        let mut store = EntityStore::new();
        let config = MatchConfig::default();
        store.damage(TargetRef::Tower(EntityId(3)), 10);
        // 15 units below the enemy king at (50, 15)
        spawn(&mut store, 6, ids::ARCHERS, Team::Player, 50.0, 30.0);

        tick_towers(&mut store, &config);
        assert_eq!(store.troop(EntityId(6)).map(|t| t.health), Some(350));

        // Same distance, melee troop: in reach
        spawn(&mut store, 7, ids::KNIGHT, Team::Player, 50.0, 30.0);
        tick_towers(&mut store, &config);
        assert_eq!(store.troop(EntityId(7)).map(|t| t.health), Some(300));
        assert_eq!(store.troop(EntityId(6)).map(|t| t.health), Some(350));

        // Ranged troop inside the princess radius is fair game
        let archers = store.troop_mut(EntityId(6)).unwrap();
        archers.position = Position::new(50.0, 20.0);
        tick_towers(&mut store, &config);
        assert_eq!(store.troop(EntityId(6)).map(|t| t.health), Some(300));
    }

    #[test]
    fn test_tower_kills_are_purged() {
        let mut store = EntityStore::new();
        let config = MatchConfig::default();
        spawn(&mut store, 6, ids::SKELETONS, Team::Enemy, 25.0, 70.0);

        let report = tick_towers(&mut store, &config);
        assert!(report.defeated.is_empty());
        let report = tick_towers(&mut store, &config);

        assert_eq!(report.defeated.len(), 1);
        assert!(store.troops().is_empty());
    }
}
