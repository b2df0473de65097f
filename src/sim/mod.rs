//! Simulation systems.
//!
//! Stateless functions over an `EntityStore`. The match controller decides
//! when each one runs; nothing here knows about phases or the clock beyond
//! the `now_ms` it is handed.
//!
//! ## Systems
//!
//! - `targeting`: Which enemy each troop goes after
//! - `movement`: Stepping toward a target, river crossing via bridges
//! - `combat`: The two-pass troop tick (decide, then apply hits)
//! - `towers`: King activation and tower fire
//! - `economy`: Elixir regeneration and spending
//! - `spells`: Area damage and spell-marker expiry

pub mod combat;
pub mod economy;
pub mod movement;
pub mod spells;
pub mod targeting;
pub mod towers;

pub use combat::{apply_hits, decide, tick_troops, Hit, TickReport};
pub use economy::{regen_period, regenerate, try_spend};
pub use movement::{plan_step, Step};
pub use spells::{cast_spell, spell_hits, spell_targets, sweep_effects};
pub use targeting::{closest_enemy_tower, closest_enemy_troop, evaluate, select_target, TargetDecision};
pub use towers::{king_should_activate, refresh_activation, tick_towers, tower_target};
