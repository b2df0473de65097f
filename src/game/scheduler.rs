//! Cooperative task scheduler.
//!
//! Every periodic system of the match is a `Task` with its own period and
//! next-due time. `pop_due` hands out due tasks one at a time, earliest
//! first, ties broken by `Task::ALL` order. The caller runs each task to
//! completion against the match state before asking for the next one, so
//! no task ever observes another task's half-applied update.

use serde::{Deserialize, Serialize};

use crate::core::Cadences;
use crate::sim::regen_period;

/// A periodic match system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    /// Elixir regeneration.
    Elixir,
    /// Opponent decision.
    Opponent,
    /// Troop targeting, movement and combat.
    Troops,
    /// Tower fire.
    Towers,
    /// Match clock countdown.
    MatchClock,
    /// Overtime clock countdown.
    OvertimeClock,
    /// Spell-marker expiry.
    SpellSweep,
}

impl Task {
    /// All tasks in priority order.
    pub const ALL: [Task; 7] = [
        Task::Elixir,
        Task::Opponent,
        Task::Troops,
        Task::Towers,
        Task::MatchClock,
        Task::OvertimeClock,
        Task::SpellSweep,
    ];

    /// Position in `Task::ALL`; lower runs first on a tie.
    #[must_use]
    pub const fn priority(self) -> usize {
        match self {
            Task::Elixir => 0,
            Task::Opponent => 1,
            Task::Troops => 2,
            Task::Towers => 3,
            Task::MatchClock => 4,
            Task::OvertimeClock => 5,
            Task::SpellSweep => 6,
        }
    }

    /// Period of this task. Elixir regenerates faster in overtime.
    #[must_use]
    pub const fn period(self, cadences: &Cadences, overtime: bool) -> u64 {
        match self {
            Task::Elixir => regen_period(cadences, overtime),
            Task::Opponent => cadences.opponent_ms,
            Task::Troops => cadences.troops_ms,
            Task::Towers => cadences.towers_ms,
            Task::MatchClock => cadences.match_clock_ms,
            Task::OvertimeClock => cadences.overtime_clock_ms,
            Task::SpellSweep => cadences.spell_sweep_ms,
        }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Next-due times of every task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler {
    next_due: [u64; 7],
    running: bool,
}

impl Scheduler {
    /// Arm every task one period after `now_ms`.
    #[must_use]
    pub fn new(cadences: &Cadences, now_ms: u64) -> Self {
        let mut next_due = [0; 7];
        for task in Task::ALL {
            next_due[task.priority()] = now_ms + task.period(cadences, false);
        }
        Self {
            next_due,
            running: true,
        }
    }

    /// When `task` fires next.
    #[must_use]
    pub fn next_due(&self, task: Task) -> u64 {
        self.next_due[task.priority()]
    }

    /// Restart `task`'s period from `now_ms`.
    pub fn rearm(&mut self, task: Task, now_ms: u64, cadences: &Cadences, overtime: bool) {
        self.next_due[task.priority()] = now_ms + task.period(cadences, overtime);
    }

    /// Take the earliest task due at or before `until_ms`.
    ///
    /// The task is re-armed one period after its due time and returned
    /// together with that due time. Returns `None` when nothing is due or
    /// the scheduler is stopped.
    pub fn pop_due(&mut self, until_ms: u64, cadences: &Cadences, overtime: bool) -> Option<(Task, u64)> {
        if !self.running {
            return None;
        }

        let task = Task::ALL
            .into_iter()
            .filter(|&t| self.next_due(t) <= until_ms)
            .min_by_key(|&t| (self.next_due(t), t.priority()))?;

        let due = self.next_due(task);
        self.next_due[task.priority()] = due.saturating_add(task.period(cadences, overtime));
        Some((task, due))
    }

    /// Stop handing out tasks for good.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the scheduler still hands out tasks.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}
