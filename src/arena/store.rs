//! Entity storage.
//!
//! `EntityStore` owns every tower and troop on the field. Towers live in a
//! fixed `Vec` indexed by their id (0..6); troops live in an `im::Vector`
//! so cloning the store for a snapshot or a compute-then-commit pass is
//! O(1).
//!
//! Nothing outside the store holds a reference to an entity: troops keep a
//! `TargetRef` and resolve it here each tick.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::geometry::Position;
use super::tower::{initial_towers, Tower};
use super::troop::{TargetRef, Troop};
use crate::core::{EntityId, Team};

/// Towers and troops of both teams.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    towers: Vec<Tower>,
    troops: Vector<Troop>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    /// Fresh store: full-health towers, no troops.
    #[must_use]
    pub fn new() -> Self {
        Self {
            towers: initial_towers(),
            troops: Vector::new(),
        }
    }

    // === Towers ===

    /// All six towers, in id order.
    #[must_use]
    pub fn towers(&self) -> &[Tower] {
        &self.towers
    }

    /// Mutable access to all towers.
    pub fn towers_mut(&mut self) -> &mut [Tower] {
        &mut self.towers
    }

    /// Look up a tower by id.
    #[must_use]
    pub fn tower(&self, id: EntityId) -> Option<&Tower> {
        self.towers.get(id.tower_slot()?)
    }

    /// Mutable tower lookup.
    pub fn tower_mut(&mut self, id: EntityId) -> Option<&mut Tower> {
        self.towers.get_mut(id.tower_slot()?)
    }

    /// Towers belonging to `team`, dead or alive.
    pub fn towers_of(&self, team: Team) -> impl Iterator<Item = &Tower> {
        self.towers.iter().filter(move |t| t.team == team)
    }

    /// The king tower of `team`.
    #[must_use]
    pub fn king(&self, team: Team) -> Option<&Tower> {
        self.towers_of(team).find(|t| t.is_king())
    }

    /// Number of standing towers of `team`.
    #[must_use]
    pub fn alive_tower_count(&self, team: Team) -> usize {
        self.towers_of(team).filter(|t| t.is_alive()).count()
    }

    /// Number of destroyed towers of `team`.
    #[must_use]
    pub fn destroyed_tower_count(&self, team: Team) -> usize {
        self.towers_of(team).filter(|t| !t.is_alive()).count()
    }

    /// Lowest health among the standing towers of `team`.
    #[must_use]
    pub fn min_tower_health(&self, team: Team) -> Option<i32> {
        self.towers_of(team)
            .filter(|t| t.is_alive())
            .map(|t| t.health)
            .min()
    }

    // === Troops ===

    /// All troops, in deployment order.
    #[must_use]
    pub fn troops(&self) -> &Vector<Troop> {
        &self.troops
    }

    /// Look up a troop by id.
    #[must_use]
    pub fn troop(&self, id: EntityId) -> Option<&Troop> {
        self.troops.iter().find(|t| t.id == id)
    }

    /// Mutable troop lookup.
    pub fn troop_mut(&mut self, id: EntityId) -> Option<&mut Troop> {
        let index = self.troops.iter().position(|t| t.id == id)?;
        self.troops.get_mut(index)
    }

    /// Living troops of `team`.
    pub fn living_troops(&self, team: Team) -> impl Iterator<Item = &Troop> {
        self.troops
            .iter()
            .filter(move |t| t.team == team && t.is_alive())
    }

    /// Add a freshly deployed troop.
    pub fn insert_troop(&mut self, troop: Troop) {
        self.troops.push_back(troop);
    }

    /// Replace the whole troop list (commit of a compute pass).
    pub fn replace_troops(&mut self, troops: Vector<Troop>) {
        self.troops = troops;
    }

    /// Remove every troop at 0 health. Returns the removed troops.
    pub fn purge_dead(&mut self) -> Vec<Troop> {
        let (alive, dead): (Vector<Troop>, Vector<Troop>) =
            self.troops.iter().cloned().partition(|t| t.is_alive());
        self.troops = alive;
        dead.into_iter().collect()
    }

    // === Targets ===

    /// Position of the referenced entity if it is still alive.
    #[must_use]
    pub fn resolve(&self, target: TargetRef) -> Option<Position> {
        match target {
            TargetRef::Troop(id) => self
                .troop(id)
                .filter(|t| t.is_alive())
                .map(|t| t.position),
            TargetRef::Tower(id) => self
                .tower(id)
                .filter(|t| t.is_alive())
                .map(|t| t.position),
        }
    }

    /// Apply `amount` damage to the referenced entity.
    ///
    /// Returns true if this hit destroyed a tower or killed a troop. A
    /// missing referent is ignored.
    pub fn damage(&mut self, target: TargetRef, amount: i32) -> bool {
        match target {
            TargetRef::Troop(id) => self.troop_mut(id).is_some_and(|t| t.take_damage(amount)),
            TargetRef::Tower(id) => self.tower_mut(id).is_some_and(|t| t.take_damage(amount)),
        }
    }
}
