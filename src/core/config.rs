//! Match configuration.
//!
//! Every tunable of the simulation lives here rather than being hardcoded
//! in the systems that use it:
//! - `Cadences`: periods of the independently scheduled tasks
//! - `DeployBand`: where the opponent policy drops troops
//! - `MatchConfig`: everything else (economy, clocks, combat numbers)
//!
//! Battlefield geometry (river band, bridges, midline) is fixed and lives in
//! `arena::geometry`.

use serde::{Deserialize, Serialize};

/// Periods (milliseconds) of the scheduled tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadences {
    /// Elixir regeneration while playing.
    pub elixir_ms: u64,
    /// Elixir regeneration during overtime.
    pub overtime_elixir_ms: u64,
    /// Opponent decision.
    pub opponent_ms: u64,
    /// Troop targeting, movement and combat.
    pub troops_ms: u64,
    /// Tower attacks and king activation.
    pub towers_ms: u64,
    /// Match clock countdown (one second of match time per tick).
    pub match_clock_ms: u64,
    /// Overtime clock countdown.
    pub overtime_clock_ms: u64,
    /// Expired spell-effect sweep.
    pub spell_sweep_ms: u64,
}

impl Default for Cadences {
    fn default() -> Self {
        Self {
            elixir_ms: 2800,
            overtime_elixir_ms: 1400,
            opponent_ms: 1500,
            troops_ms: 100,
            towers_ms: 800,
            match_clock_ms: 1000,
            overtime_clock_ms: 1000,
            spell_sweep_ms: 100,
        }
    }
}

impl Cadences {
    fn validate(&self) {
        let periods = [
            self.elixir_ms,
            self.overtime_elixir_ms,
            self.opponent_ms,
            self.troops_ms,
            self.towers_ms,
            self.match_clock_ms,
            self.overtime_clock_ms,
            self.spell_sweep_ms,
        ];
        assert!(periods.iter().all(|&p| p > 0), "Cadences must be non-zero");
    }
}

/// Rectangle (in the enemy's frame) where the opponent policy deploys troops.
///
/// For a policy playing the bottom side the y range is mirrored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeployBand {
    /// Minimum x (inclusive).
    pub x_min: f32,
    /// Maximum x (exclusive).
    pub x_max: f32,
    /// Minimum y (inclusive).
    pub y_min: f32,
    /// Maximum y (exclusive).
    pub y_max: f32,
}

impl Default for DeployBand {
    fn default() -> Self {
        Self {
            x_min: 25.0,
            x_max: 75.0,
            y_min: 10.0,
            y_max: 40.0,
        }
    }
}

/// Complete match configuration.
///
/// ```
/// use arena_clash::core::MatchConfig;
///
/// let config = MatchConfig::default();
/// assert_eq!(config.starting_elixir, 5);
/// assert_eq!(config.match_seconds, 180);
/// assert_eq!(config.overtime_seconds, 60);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Elixir each side starts with.
    pub starting_elixir: u8,
    /// Elixir cap.
    pub max_elixir: u8,
    /// Length of regular play, in match seconds.
    pub match_seconds: u32,
    /// Length of overtime, in match seconds.
    pub overtime_seconds: u32,
    /// Number of hand slots.
    pub hand_size: usize,

    /// Distance within which a troop prefers enemy troops over towers.
    pub vision_radius: f32,
    /// A troop attacks once its target is within `range * engage_factor`.
    pub engage_factor: f32,
    /// A troop moves `speed * step_factor` per troop tick.
    pub step_factor: f32,
    /// Minimum time between two hits of the same troop.
    pub attack_cooldown_ms: u64,

    /// Princess tower reach.
    pub princess_radius: f32,
    /// Activated king tower reach (ranged troops only inside `princess_radius`).
    pub king_radius: f32,
    /// Damage of a tower shot.
    pub tower_damage: i32,

    /// Spell area-of-effect radius.
    pub spell_radius: f32,
    /// How long a spell marker stays visible.
    pub spell_lifetime_ms: u64,

    /// Probability the opponent sits out a decision tick.
    pub opponent_skip_chance: f64,
    /// Where the opponent deploys troops.
    pub deploy_band: DeployBand,

    /// Task periods.
    pub cadences: Cadences,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_elixir: 5,
            max_elixir: 10,
            match_seconds: 180,
            overtime_seconds: 60,
            hand_size: 4,
            vision_radius: 12.0,
            engage_factor: 3.0,
            step_factor: 0.3,
            attack_cooldown_ms: 1000,
            princess_radius: 12.0,
            king_radius: 18.0,
            tower_damage: 50,
            spell_radius: 8.0,
            spell_lifetime_ms: 1000,
            opponent_skip_chance: 0.3,
            deploy_band: DeployBand::default(),
            cadences: Cadences::default(),
        }
    }
}

impl MatchConfig {
    /// Panic on configurations no match could run with.
    ///
    /// Called by the match builder; a bad config is a programming error.
    pub fn validate(&self) {
        assert!(self.hand_size > 0, "Hand must have at least 1 slot");
        assert!(self.max_elixir > 0, "Elixir cap must be positive");
        assert!(
            self.starting_elixir <= self.max_elixir,
            "Starting elixir exceeds the cap"
        );
        assert!(self.match_seconds > 0, "Match must last at least 1 second");
        self.cadences.validate();
    }

    /// Set the starting elixir (builder pattern).
    #[must_use]
    pub fn with_starting_elixir(mut self, elixir: u8) -> Self {
        self.starting_elixir = elixir;
        self
    }

    /// Set the match length in seconds (builder pattern).
    #[must_use]
    pub fn with_match_seconds(mut self, seconds: u32) -> Self {
        self.match_seconds = seconds;
        self
    }

    /// Set the overtime length in seconds (builder pattern).
    #[must_use]
    pub fn with_overtime_seconds(mut self, seconds: u32) -> Self {
        self.overtime_seconds = seconds;
        self
    }

    /// Set the opponent skip chance (builder pattern).
    #[must_use]
    pub fn with_opponent_skip_chance(mut self, chance: f64) -> Self {
        self.opponent_skip_chance = chance;
        self
    }

    /// Replace the cadences (builder pattern).
    #[must_use]
    pub fn with_cadences(mut self, cadences: Cadences) -> Self {
        self.cadences = cadences;
        self
    }
}
