#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn scheduler deciding when a quest ends.

use treasure_quest_core::{Command, Event, QuestProgress};
use treasure_quest_world::{self as world, query, World};

/// Configuration parameters required to construct the scheduler.
///
/// The default ends the quest once the deposit is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    stop_when_looted: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Config {
    /// Creates a configuration; `stop_when_looted` ends the quest as soon as
    /// no treasure remains buried.
    #[must_use]
    pub const fn new(stop_when_looted: bool) -> Self {
        Self { stop_when_looted }
    }

    /// Reports whether an empty deposit ends the quest.
    #[must_use]
    pub const fn stop_when_looted(&self) -> bool {
        self.stop_when_looted
    }
}

/// Reason the scheduler stopped issuing turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The turn index reached the turn budget.
    BudgetExhausted,
    /// Every treasure unit has been collected.
    TreasureExhausted,
}

/// Outcome of [`run_to_completion`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunSummary {
    /// Turns executed during the run.
    pub turns: u64,
    /// Condition that ended the run.
    pub stop_reason: StopReason,
}

/// Pure system that emits one `AdvanceTurn` per call until the quest ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scheduler {
    config: Config,
}

impl Scheduler {
    /// Creates a new scheduler using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Emits the next turn command, or reports why no further turn is due.
    pub fn handle(&self, progress: &QuestProgress, out: &mut Vec<Command>) -> Option<StopReason> {
        if progress.turn >= progress.turn_budget {
            return Some(StopReason::BudgetExhausted);
        }
        if self.config.stop_when_looted && progress.treasure_remaining == 0 {
            return Some(StopReason::TreasureExhausted);
        }
        out.push(Command::AdvanceTurn);
        None
    }
}

/// Advances `world` until `scheduler` stops it.
///
/// `observe` runs after every turn with the world and the events that turn
/// produced.
pub fn run_to_completion<F>(world: &mut World, scheduler: &Scheduler, mut observe: F) -> RunSummary
where
    F: FnMut(&World, &[Event]),
{
    let mut commands = Vec::new();
    let mut events = Vec::new();
    let mut turns = 0_u64;

    loop {
        commands.clear();
        if let Some(stop_reason) = scheduler.handle(&query::progress(world), &mut commands) {
            return RunSummary { turns, stop_reason };
        }

        events.clear();
        for command in commands.drain(..) {
            world::apply(world, command, &mut events);
        }
        turns = turns.saturating_add(1);
        observe(world, &events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasure_quest_core::QuestPhase;

    fn progress(turn: u64, turn_budget: u64, treasure_remaining: u64) -> QuestProgress {
        QuestProgress {
            phase: QuestPhase::Underway,
            turn,
            turn_budget,
            treasure_remaining,
        }
    }

    #[test]
    fn issues_turns_while_budget_remains() {
        let scheduler = Scheduler::default();
        let mut out = Vec::new();

        assert_eq!(scheduler.handle(&progress(0, 2, 3), &mut out), None);
        assert_eq!(out, vec![Command::AdvanceTurn]);
        assert_eq!(
            scheduler.handle(&progress(2, 2, 3), &mut out),
            Some(StopReason::BudgetExhausted)
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn looted_map_stops_only_when_enabled() {
        let mut out = Vec::new();

        assert_eq!(
            Scheduler::new(Config::new(true)).handle(&progress(1, 5, 0), &mut out),
            Some(StopReason::TreasureExhausted)
        );
        assert!(out.is_empty());
        assert_eq!(
            Scheduler::new(Config::new(false)).handle(&progress(1, 5, 0), &mut out),
            None
        );
    }

    #[test]
    fn default_config_stops_on_empty_deposit() {
        let mut out = Vec::new();
        assert!(Config::default().stop_when_looted());
        assert_eq!(
            Scheduler::default().handle(&progress(1, 5, 0), &mut out),
            Some(StopReason::TreasureExhausted)
        );
        assert!(out.is_empty());
    }

    #[test]
    fn exhausted_budget_wins_over_empty_deposit() {
        let mut out = Vec::new();
        assert_eq!(
            Scheduler::new(Config::new(true)).handle(&progress(5, 5, 0), &mut out),
            Some(StopReason::BudgetExhausted)
        );
    }
}
