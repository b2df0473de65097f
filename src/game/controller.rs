//! Match controller.
//!
//! `Match` owns the match state, the scheduler, the RNG and the opponent
//! policy. It is the only place state changes: player commands, opponent
//! plays and scheduled tasks all go through it, and every one of them is
//! followed by adjudication.
//!
//! ## Example
//!
//! ```
//! use arena_clash::ai::PassiveOpponent;
//! use arena_clash::game::{MatchBuilder, Phase};
//!
//! let mut game = MatchBuilder::new().seed(42).policy(PassiveOpponent).build();
//!
//! game.advance(2800);
//! assert_eq!(game.snapshot().elixir.player, 6);
//! assert_eq!(game.phase(), Phase::Playing);
//! ```

use log::{debug, info, trace};

use super::error::CommandError;
use super::events::EventKind;
use super::phase::{
    king_verdict, overtime_expiry_verdict, overtime_snapshot, sudden_death_verdict,
    time_up_verdict, Phase,
};
use super::scheduler::{Scheduler, Task};
use super::snapshot::MatchSnapshot;
use super::state::MatchState;
use crate::ai::{OpponentPolicy, PolicyView, RandomOpponent};
use crate::arena::{can_deploy, EntityStore, Position, SpellEffect, Troop};
use crate::cards::{CardCatalog, CardCategory, CardKind, SpellStats};
use crate::core::{GameRng, MatchConfig, Team, TeamMap};
use crate::deck::DeckState;
use crate::sim::{cast_spell, regenerate, sweep_effects, tick_towers, tick_troops, try_spend};

// =============================================================================
// Builder
// =============================================================================

/// Builder for creating a `Match`.
pub struct MatchBuilder {
    seed: u64,
    config: MatchConfig,
    catalog: CardCatalog,
    policy: Option<Box<dyn OpponentPolicy>>,
}

impl Default for MatchBuilder {
    fn default() -> Self {
        Self {
            seed: 0,
            config: MatchConfig::default(),
            catalog: CardCatalog::standard(),
            policy: None,
        }
    }
}

impl MatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed of the match RNG.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(mut self, catalog: CardCatalog) -> Self {
        assert!(!catalog.is_empty(), "Catalog must have at least 1 card");
        self.catalog = catalog;
        self
    }

    /// Policy driving the enemy side. Defaults to a `RandomOpponent`
    /// configured from the match config.
    pub fn policy(mut self, policy: impl OpponentPolicy + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    pub fn build(self) -> Match {
        self.config.validate();
        let policy = self
            .policy
            .unwrap_or_else(|| Box::new(RandomOpponent::from_config(&self.config)));
        Match::new(self.config, self.catalog, policy, self.seed)
    }
}

// =============================================================================
// Match
// =============================================================================

/// A running match.
pub struct Match {
    config: MatchConfig,
    catalog: CardCatalog,
    policy: Box<dyn OpponentPolicy>,
    /// Source of per-match streams; each reset forks a new one.
    master_rng: GameRng,
    rng: GameRng,
    state: MatchState,
    scheduler: Scheduler,
}

impl Match {
    fn new(
        config: MatchConfig,
        catalog: CardCatalog,
        policy: Box<dyn OpponentPolicy>,
        seed: u64,
    ) -> Self {
        let mut master_rng = GameRng::new(seed);
        let mut rng = master_rng.fork();
        let state = MatchState::fresh(&config, &catalog, &mut rng);
        let scheduler = Scheduler::new(&config.cadences, 0);
        info!("match started (seed {seed})");

        Self {
            config,
            catalog,
            policy,
            master_rng,
            rng,
            state,
            scheduler,
        }
    }

    // === Commands ===

    /// Toggle selection of the player's hand slot `index`.
    ///
    /// Only an affordable card can be selected, and only while the match is
    /// active. Selecting the selected slot again clears the selection.
    pub fn select_card(&mut self, index: usize) -> Result<(), CommandError> {
        self.try_select(index)
            .inspect_err(|e| trace!("select_card({index}) rejected: {e}"))
    }

    fn try_select(&mut self, index: usize) -> Result<(), CommandError> {
        self.ensure_active()?;
        let card = self.state.decks[Team::Player]
            .card(index)
            .ok_or(CommandError::SlotOutOfRange { index })?;
        let have = self.state.elixir[Team::Player];
        if card.cost > have {
            return Err(CommandError::InsufficientElixir {
                have,
                need: card.cost,
            });
        }

        self.state.selected = if self.state.selected == Some(index) {
            None
        } else {
            Some(index)
        };
        Ok(())
    }

    /// Play the selected card at `(x, y)` (percent coordinates).
    pub fn place_card(&mut self, x: f32, y: f32) -> Result<(), CommandError> {
        let Some(slot) = self.state.selected else {
            trace!("place_card({x}, {y}) rejected: no card selected");
            return Err(CommandError::NoCardSelected);
        };
        self.deploy(Team::Player, slot, x, y)
    }

    /// Play hand slot `slot` of `team` at `(x, y)`.
    ///
    /// This is the single path every card play takes: the player's
    /// `place_card`, the opponent policy and external tooling. On error the
    /// match is unchanged.
    pub fn deploy(&mut self, team: Team, slot: usize, x: f32, y: f32) -> Result<(), CommandError> {
        self.try_deploy(team, slot, Position::new(x, y))
            .inspect_err(|e| trace!("{team} deploy of slot {slot} at ({x}, {y}) rejected: {e}"))
    }

    fn try_deploy(&mut self, team: Team, slot: usize, position: Position) -> Result<(), CommandError> {
        self.ensure_active()?;
        let card = self.state.decks[team]
            .card(slot)
            .ok_or(CommandError::SlotOutOfRange { index: slot })?;
        let have = self.state.elixir[team];
        let remaining = try_spend(have, card.cost).ok_or(CommandError::InsufficientElixir {
            have,
            need: card.cost,
        })?;
        if !position.in_bounds() {
            return Err(CommandError::OutOfBounds {
                x: position.x,
                y: position.y,
            });
        }
        if card.category() == CardCategory::Troop && !can_deploy(team, position) {
            return Err(CommandError::IllegalPlacement {
                x: position.x,
                y: position.y,
            });
        }

        let (played, deck) = self.state.decks[team]
            .play(slot, &self.catalog, &mut self.rng)
            .ok_or(CommandError::SlotOutOfRange { index: slot })?;
        self.state.elixir[team] = remaining;
        self.state.decks[team] = deck;
        if team == Team::Player {
            self.state.selected = None;
        }
        self.state.record(EventKind::CardPlayed {
            team,
            card: played.id,
            position,
        });

        match played.kind {
            CardKind::Troop(stats) => {
                let id = self.state.ids.alloc();
                let troop = Troop::deploy(id, &played, &stats, team, position, self.config.vision_radius);
                self.state.store.insert_troop(troop);
            }
            CardKind::Spell(stats) => self.cast(team, &stats, position),
        }

        self.adjudicate();
        Ok(())
    }

    fn cast(&mut self, team: Team, spell: &SpellStats, position: Position) {
        let id = self.state.ids.alloc();
        self.state.effects.push_back(SpellEffect {
            id,
            kind: spell.kind,
            team,
            position,
            created_ms: self.state.now_ms,
        });
        self.state.record(EventKind::SpellCast {
            team,
            kind: spell.kind,
            position,
        });

        let report = cast_spell(
            &mut self.state.store,
            team,
            spell,
            position,
            self.config.spell_radius,
            id,
        );
        self.state.record_report(&report);
    }

    /// Start a fresh match: new decks from a new RNG stream, starting
    /// elixir, full towers, no troops, full clocks. Restarts a torn-down
    /// scheduler.
    pub fn reset(&mut self) {
        self.rng = self.master_rng.fork();
        self.state = MatchState::fresh(&self.config, &self.catalog, &mut self.rng);
        self.scheduler = Scheduler::new(&self.config.cadences, 0);
        info!("match reset");
    }

    /// Stop every scheduled task. `advance` becomes a no-op and commands
    /// are rejected until the next `reset`.
    pub fn teardown(&mut self) {
        self.scheduler.stop();
        info!("match torn down at {}ms", self.state.now_ms);
    }

    // === Time ===

    /// Advance simulation time by `elapsed_ms`, running every task that
    /// falls due, in time order.
    ///
    /// The clock saturates at `u64::MAX`. Once the match is decided and the
    /// last spell marker is swept, no task can change the state and the
    /// clock jumps straight to the end of the interval.
    pub fn advance(&mut self, elapsed_ms: u64) {
        if !self.scheduler.is_running() {
            return;
        }

        let until = self.state.now_ms.saturating_add(elapsed_ms);
        loop {
            if self.state.phase.is_over() && self.state.effects.is_empty() {
                break;
            }
            let overtime = self.state.phase == Phase::Overtime;
            let Some((task, at)) = self.scheduler.pop_due(until, &self.config.cadences, overtime) else {
                break;
            };
            self.state.now_ms = at;
            self.run_task(task);
            self.adjudicate();
        }
        self.state.now_ms = until;
    }

    fn run_task(&mut self, task: Task) {
        let phase = self.state.phase;
        let active = phase.is_active();
        match task {
            Task::Elixir if active => regenerate(&mut self.state.elixir, self.config.max_elixir),
            Task::Opponent if active => self.opponent_turn(),
            Task::Troops if active => {
                let report = tick_troops(&mut self.state.store, self.state.now_ms, &self.config);
                self.state.record_report(&report);
            }
            Task::Towers if active => {
                let report = tick_towers(&mut self.state.store, &self.config);
                self.state.record_report(&report);
            }
            Task::MatchClock if phase == Phase::Playing => {
                self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
                if self.state.time_remaining == 0 {
                    let verdict = time_up_verdict(&self.state.store);
                    self.set_phase(verdict);
                }
            }
            Task::OvertimeClock if phase == Phase::Overtime => {
                self.state.overtime_remaining = self.state.overtime_remaining.saturating_sub(1);
                if self.state.overtime_remaining == 0 {
                    let verdict = overtime_expiry_verdict(&self.state.store);
                    self.set_phase(verdict);
                }
            }
            Task::SpellSweep => {
                self.state.effects = sweep_effects(
                    &self.state.effects,
                    self.state.now_ms,
                    self.config.spell_lifetime_ms,
                );
            }
            _ => {}
        }
    }

    fn opponent_turn(&mut self) {
        let team = Team::Enemy;
        let view = PolicyView {
            elixir: self.state.elixir[team],
            hand: &self.state.decks[team].hand[..],
            store: &self.state.store,
        };
        let Some(play) = self.policy.decide(&view, team, &mut self.rng) else {
            return;
        };

        debug!(
            "{team} plays slot {} at ({:.1}, {:.1})",
            play.slot, play.position.x, play.position.y
        );
        // A rejected play is already traced by `deploy`.
        let _ = self.deploy(team, play.slot, play.position.x, play.position.y);
    }

    // === Adjudication ===

    fn adjudicate(&mut self) {
        if !self.state.phase.is_active() {
            return;
        }
        if let Some(verdict) = king_verdict(&self.state.store) {
            self.set_phase(verdict);
            return;
        }
        if self.state.phase == Phase::Overtime {
            let verdict = self
                .state
                .overtime_snapshot
                .as_ref()
                .and_then(|snapshot| sudden_death_verdict(&self.state.store, snapshot));
            if let Some(verdict) = verdict {
                self.set_phase(verdict);
            }
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        let from = self.state.phase;
        if from == phase || from.is_over() {
            return;
        }

        let now = self.state.now_ms;
        debug!("phase {from} -> {phase} at {now}ms");
        self.state.phase = phase;
        self.state.record(EventKind::PhaseChanged { from, to: phase });

        let overtime = phase == Phase::Overtime;
        if overtime {
            self.state.overtime_remaining = self.config.overtime_seconds;
            self.state.overtime_snapshot = Some(overtime_snapshot(&self.state.store));
            self.scheduler
                .rearm(Task::OvertimeClock, now, &self.config.cadences, true);
        }
        if phase.is_over() {
            self.state.selected = None;
        }
        self.scheduler
            .rearm(Task::Elixir, now, &self.config.cadences, overtime);
    }

    fn ensure_active(&self) -> Result<(), CommandError> {
        if self.scheduler.is_running() && self.state.phase.is_active() {
            Ok(())
        } else {
            Err(CommandError::MatchInactive)
        }
    }

    // === Queries ===

    /// Read-only copy of the state a renderer draws from.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(&self.state)
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Simulation time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.state.now_ms
    }

    /// Elixir of `team`.
    #[must_use]
    pub fn elixir(&self, team: Team) -> u8 {
        self.state.elixir[team]
    }

    /// Deck, hand and preview of `team`.
    #[must_use]
    pub fn deck(&self, team: Team) -> &DeckState {
        &self.state.decks[team]
    }

    /// Player's selected hand slot.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.state.selected
    }

    /// Match clock, in seconds.
    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.state.time_remaining
    }

    /// Overtime clock, in seconds.
    #[must_use]
    pub fn overtime_remaining(&self) -> u32 {
        self.state.overtime_remaining
    }

    /// Alive tower counts taken on entering overtime.
    #[must_use]
    pub fn overtime_snapshot(&self) -> Option<&TeamMap<usize>> {
        self.state.overtime_snapshot.as_ref()
    }

    /// Towers and troops.
    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.state.store
    }

    /// Mutable access to towers and troops, for scenario setup.
    ///
    /// Changes take effect from the next task or command.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.state.store
    }

    /// Set `team`'s elixir, clamped to the cap. For scenario setup.
    pub fn set_elixir(&mut self, team: Team, amount: u8) {
        self.state.elixir[team] = amount.min(self.config.max_elixir);
    }

    /// Whether the scheduler is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// The scheduler, for inspecting task due times.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Match configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Card catalog.
    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::PassiveOpponent;
    use crate::cards::CardId;

    fn passive(seed: u64) -> Match {
        MatchBuilder::new().seed(seed).policy(PassiveOpponent).build()
    }

    /// First player hand slot holding a card of `category`.
    fn slot_of(game: &Match, category: CardCategory) -> Option<usize> {
        game.deck(Team::Player)
            .hand
            .iter()
            .position(|c| c.category() == category)
    }

    #[test]
    fn test_select_toggles() {
        let mut game = passive(1);
        game.set_elixir(Team::Player, 10);

        game.select_card(2).unwrap();
        assert_eq!(game.selected(), Some(2));
        game.select_card(0).unwrap();
        assert_eq!(game.selected(), Some(0));
        game.select_card(0).unwrap();
        assert_eq!(game.selected(), None);

        assert_eq!(
            game.select_card(4),
            Err(CommandError::SlotOutOfRange { index: 4 })
        );
    }

    #[test]
    fn test_select_requires_elixir() {
        let mut game = passive(2);
        game.set_elixir(Team::Player, 0);

        let need = game.deck(Team::Player).hand[0].cost;
        assert_eq!(
            game.select_card(0),
            Err(CommandError::InsufficientElixir { have: 0, need })
        );
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_place_without_selection() {
        let mut game = passive(3);
        assert_eq!(game.place_card(50.0, 80.0), Err(CommandError::NoCardSelected));
    }

    #[test]
    fn test_place_troop_spends_and_refills() {
        for seed in 0..20 {
            let mut game = passive(seed);
            game.set_elixir(Team::Player, 10);
            let Some(slot) = slot_of(&game, CardCategory::Troop) else {
                continue;
            };
            let card = game.deck(Team::Player).hand[slot].clone();
            let preview = game.deck(Team::Player).next_card.clone();

            game.select_card(slot).unwrap();
            game.place_card(40.0, 80.0).unwrap();

            assert_eq!(game.elixir(Team::Player), 10 - card.cost);
            assert_eq!(game.selected(), None);
            assert_eq!(game.deck(Team::Player).hand[slot], preview);
            let troops = game.store().troops();
            assert_eq!(troops.len(), 1);
            assert_eq!(troops[0].card_id, card.id);
            assert_eq!(troops[0].team, Team::Player);
            assert_eq!(troops[0].id.raw(), 6);
            return;
        }
        panic!("no seed dealt a troop card");
    }

    #[test]
    fn test_illegal_troop_cells_rejected() {
        let mut game = passive(4);
        game.set_elixir(Team::Player, 10);
        let slot = slot_of(&game, CardCategory::Troop).unwrap();
        let before = game.snapshot();

        assert_eq!(
            game.deploy(Team::Player, slot, 50.0, 50.0),
            Err(CommandError::IllegalPlacement { x: 50.0, y: 50.0 })
        );
        assert_eq!(
            game.deploy(Team::Player, slot, 50.0, 30.0),
            Err(CommandError::IllegalPlacement { x: 50.0, y: 30.0 })
        );
        assert_eq!(
            game.deploy(Team::Player, slot, 50.0, 101.0),
            Err(CommandError::OutOfBounds { x: 50.0, y: 101.0 })
        );

        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_spell_anywhere() {
        for seed in 0..40 {
            let mut game = passive(seed);
            game.set_elixir(Team::Player, 10);
            let Some(slot) = slot_of(&game, CardCategory::Spell) else {
                continue;
            };
            let card: CardId = game.deck(Team::Player).hand[slot].id;

            game.deploy(Team::Player, slot, 25.0, 25.0).unwrap();

            let snapshot = game.snapshot();
            assert_eq!(snapshot.effects.len(), 1);
            assert!(snapshot.troops.is_empty());
            let tower = game.store().towers()[4].clone();
            let expected = game.catalog().get(card).and_then(|t| t.spell_stats()).map(|s| s.tower_damage);
            assert_eq!(Some(tower.max_health - tower.health), expected);

            // Marker expires after its lifetime
            game.advance(1000);
            assert!(game.snapshot().effects.is_empty());
            return;
        }
        panic!("no seed dealt a spell card");
    }

    #[test]
    fn test_elixir_regen_and_cap() {
        let mut game = passive(5);

        game.advance(2800);
        assert_eq!(game.elixir(Team::Player), 6);
        assert_eq!(game.elixir(Team::Enemy), 6);

        game.advance(2800 * 10);
        assert_eq!(game.elixir(Team::Player), 10);
    }

    #[test]
    fn test_teardown_stops_everything() {
        let mut game = passive(6);
        game.teardown();

        game.advance(10_000);

        assert_eq!(game.now_ms(), 0);
        assert_eq!(game.elixir(Team::Player), 5);
        assert_eq!(game.time_remaining(), 180);
        assert_eq!(game.select_card(0), Err(CommandError::MatchInactive));
    }

    #[test]
    fn test_advance_saturates_clock() {
        let mut game = passive(8);
        game.advance(1_000);

        game.advance(u64::MAX);

        assert_eq!(game.now_ms(), u64::MAX);
        assert_eq!(game.phase(), Phase::Victory);
        assert_eq!(game.overtime_remaining(), 0);

        game.advance(u64::MAX);
        assert_eq!(game.now_ms(), u64::MAX);
    }

    #[test]
    fn test_reset_restarts() {
        let mut game = passive(7);
        game.advance(30_000);
        game.teardown();

        game.reset();

        assert!(game.is_running());
        assert_eq!(game.now_ms(), 0);
        assert_eq!(game.time_remaining(), 180);
        assert!(game.snapshot().events.is_empty());
    }
}
