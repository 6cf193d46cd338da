#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that turns a scenario into a ready-to-run world.

use treasure_quest_core::{Command, Event, MovePlan, Scenario};
use treasure_quest_world::{self as world, World};

/// Odd constant used to spread adventurer seeds across the generator space.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// How registered adventurers obtain instructions once their script ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MoveMode {
    /// Adventurers idle after their last scripted instruction.
    #[default]
    Scripted,
    /// Adventurers keep drawing random instructions derived from `seed`.
    Improvised {
        /// Run seed shared by the whole roster.
        seed: u64,
    },
}

/// Produces the command batch that constructs a world from a [`Scenario`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Bootstrap {
    mode: MoveMode,
    turn_budget: Option<u64>,
}

impl Bootstrap {
    /// Creates a bootstrap registering adventurers in the provided mode.
    #[must_use]
    pub const fn new(mode: MoveMode) -> Self {
        Self {
            mode,
            turn_budget: None,
        }
    }

    /// Overrides the turn budget derived from the scripts.
    #[must_use]
    pub const fn with_turn_budget(mut self, turns: Option<u64>) -> Self {
        self.turn_budget = turns;
        self
    }

    /// Mode used for adventurer registration.
    #[must_use]
    pub const fn mode(&self) -> MoveMode {
        self.mode
    }

    /// Appends the construction commands for `scenario` in application order:
    /// map, mountains, treasures, adventurers and finally the turn budget.
    pub fn commands(&self, scenario: &Scenario, out: &mut Vec<Command>) {
        out.push(Command::ConfigureMap {
            rows: scenario.rows,
            columns: scenario.columns,
        });
        out.extend(
            scenario
                .mountains
                .iter()
                .map(|cell| Command::PlaceMountain { cell: *cell }),
        );
        out.extend(
            scenario
                .treasures
                .iter()
                .map(|treasure| Command::PlaceTreasure {
                    cell: treasure.cell,
                    amount: treasure.amount,
                }),
        );
        for (index, adventurer) in scenario.adventurers.iter().enumerate() {
            let script = adventurer.moves.clone();
            let plan = match self.mode {
                MoveMode::Scripted => MovePlan::Scripted(script),
                MoveMode::Improvised { seed } => MovePlan::Improvised {
                    script,
                    seed: adventurer_seed(seed, index),
                },
            };
            out.push(Command::RegisterAdventurer {
                name: adventurer.name.clone(),
                cell: adventurer.cell,
                facing: adventurer.facing,
                plan,
                collected: adventurer.collected,
            });
        }
        if self.turn_budget.is_some() {
            out.push(Command::SetTurnBudget {
                turns: self.turn_budget,
            });
        }
    }

    /// Builds a fresh world from `scenario`, reporting every construction
    /// event including rejected placements.
    #[must_use]
    pub fn build_world(&self, scenario: &Scenario, out_events: &mut Vec<Event>) -> World {
        let mut commands = Vec::new();
        self.commands(scenario, &mut commands);

        let mut world = World::new();
        for command in commands {
            world::apply(&mut world, command, out_events);
        }
        world
    }
}

/// Derives the generator seed of the adventurer at roster position `index`.
#[must_use]
pub fn adventurer_seed(seed: u64, index: usize) -> u64 {
    let position = u64::try_from(index).unwrap_or(u64::MAX);
    seed ^ position.wrapping_add(1).wrapping_mul(SEED_STRIDE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasure_quest_core::{AdventurerSpec, Cell, Direction, Instruction, TreasureSpec};

    fn scenario() -> Scenario {
        Scenario {
            rows: 4,
            columns: 3,
            mountains: vec![Cell::new(1, 1)],
            treasures: vec![TreasureSpec {
                cell: Cell::new(3, 0),
                amount: 2,
            }],
            adventurers: vec![AdventurerSpec {
                name: "Lara".to_owned(),
                cell: Cell::new(1, 0),
                facing: Direction::South,
                moves: Instruction::parse_sequence("AA"),
                collected: 0,
            }],
        }
    }

    #[test]
    fn commands_follow_construction_order() {
        let mut commands = Vec::new();
        Bootstrap::default().commands(&scenario(), &mut commands);

        assert_eq!(commands.len(), 4);
        assert_eq!(
            commands[0],
            Command::ConfigureMap {
                rows: 4,
                columns: 3
            }
        );
        assert!(matches!(commands[1], Command::PlaceMountain { .. }));
        assert!(matches!(commands[2], Command::PlaceTreasure { amount: 2, .. }));
        assert!(matches!(
            commands[3],
            Command::RegisterAdventurer {
                plan: MovePlan::Scripted(_),
                ..
            }
        ));
    }

    #[test]
    fn improvised_mode_assigns_distinct_seeds() {
        let mut scenario = scenario();
        let mut second = scenario.adventurers[0].clone();
        second.name = "Indiana".to_owned();
        second.cell = Cell::new(0, 2);
        scenario.adventurers.push(second);

        let mut commands = Vec::new();
        Bootstrap::new(MoveMode::Improvised { seed: 9 }).commands(&scenario, &mut commands);

        let seeds: Vec<u64> = commands
            .iter()
            .filter_map(|command| match command {
                Command::RegisterAdventurer {
                    plan: MovePlan::Improvised { seed, .. },
                    ..
                } => Some(*seed),
                _ => None,
            })
            .collect();
        assert_eq!(seeds, vec![adventurer_seed(9, 0), adventurer_seed(9, 1)]);
        assert_ne!(seeds[0], seeds[1]);
    }

    #[test]
    fn turn_budget_is_appended_only_when_overridden() {
        let mut commands = Vec::new();
        Bootstrap::default()
            .with_turn_budget(Some(12))
            .commands(&scenario(), &mut commands);

        assert_eq!(
            commands.last(),
            Some(&Command::SetTurnBudget { turns: Some(12) })
        );
    }
}
