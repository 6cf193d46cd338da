#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Treasure Quest.
//!
//! The world owns the grid, the treasure deposit and the adventurer roster.
//! It changes only through [`apply`]; everything else reads it through the
//! [`query`] module.

mod adventurer;
mod grid;

use std::collections::BTreeMap;

use adventurer::Adventurer;
use grid::{Grid, OccupancyGrid};
use treasure_quest_core::{
    AdventurerId, Cell, CellType, Command, Direction, Event, Instruction, MoveBlock, MovePlan,
    PlacementError, PlacementTarget, QuestPhase,
};
use treasure_quest_system_movement::MoveSource;

/// Represents the authoritative Treasure Quest world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    occupancy: OccupancyGrid,
    treasures: BTreeMap<Cell, u32>,
    roster: Vec<Adventurer>,
    phase: QuestPhase,
    turn_index: u64,
    budget_override: Option<u64>,
    initial_treasures: Option<BTreeMap<Cell, u32>>,
}

impl World {
    /// Creates an empty world with a zero-sized map.
    #[must_use]
    pub fn new() -> Self {
        Self::with_map(0, 0)
    }

    fn with_map(rows: i32, columns: i32) -> Self {
        Self {
            grid: Grid::new(rows, columns),
            occupancy: OccupancyGrid::new(),
            treasures: BTreeMap::new(),
            roster: Vec::new(),
            phase: QuestPhase::Setup,
            turn_index: 0,
            budget_override: None,
            initial_treasures: None,
        }
    }

    fn turn_budget(&self) -> u64 {
        self.budget_override.unwrap_or_else(|| {
            self.roster
                .iter()
                .map(|adventurer| u64::try_from(adventurer.scripted_len()).unwrap_or(u64::MAX))
                .max()
                .unwrap_or(0)
        })
    }

    fn treasure_total(&self) -> u64 {
        self.treasures.values().map(|amount| u64::from(*amount)).sum()
    }

    /// Shared checks for anything placed on the map during setup.
    fn check_placement(&self, cell: Cell) -> Result<(), PlacementError> {
        if self.phase != QuestPhase::Setup {
            return Err(PlacementError::QuestUnderway);
        }
        match self.grid.cell_type(cell) {
            None => Err(PlacementError::OutOfBounds),
            Some(CellType::Mountain) => Err(PlacementError::Mountain),
            Some(CellType::Plain) => Ok(()),
        }
    }

    fn place_mountain(&mut self, cell: Cell) -> Result<(), PlacementError> {
        self.check_placement(cell)?;
        if self.treasures.contains_key(&cell) {
            return Err(PlacementError::TreasurePresent);
        }
        if self.occupancy.occupant(cell).is_some() {
            return Err(PlacementError::Occupied);
        }
        self.grid.raise_mountain(cell);
        Ok(())
    }

    fn place_treasure(&mut self, cell: Cell, amount: i64) -> Result<u32, PlacementError> {
        self.check_placement(cell)?;
        if amount < 1 {
            return Err(PlacementError::NonPositiveAmount);
        }
        let amount = u32::try_from(amount).map_err(|_| PlacementError::AmountTooLarge)?;
        if self.treasures.contains_key(&cell) {
            return Err(PlacementError::TreasurePresent);
        }
        let _ = self.treasures.insert(cell, amount);
        Ok(amount)
    }

    fn register_adventurer(
        &mut self,
        name: String,
        cell: Cell,
        facing: Direction,
        plan: MovePlan,
        collected: u32,
    ) -> Result<AdventurerId, PlacementError> {
        self.check_placement(cell)?;
        if self.occupancy.occupant(cell).is_some() {
            return Err(PlacementError::Occupied);
        }
        if self.roster.iter().any(|adventurer| adventurer.name() == name) {
            return Err(PlacementError::DuplicateName);
        }

        let id = AdventurerId::new(u32::try_from(self.roster.len()).unwrap_or(u32::MAX));
        let moves = MoveSource::from_plan(plan);
        self.roster
            .push(Adventurer::new(id, name, cell, facing, collected, moves));
        self.occupancy.occupy(id, cell);
        Ok(id)
    }

    fn begin_quest(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == QuestPhase::Underway {
            return;
        }
        self.phase = QuestPhase::Underway;
        self.initial_treasures = Some(self.treasures.clone());
        out_events.push(Event::PhaseChanged {
            phase: QuestPhase::Underway,
        });
    }

    /// Runs one turn: every adventurer, in roster order, executes at most one
    /// instruction.
    ///
    /// Occupancy is checked against the live roster, so an adventurer that
    /// already moved this turn blocks the cell it entered while the cell it
    /// left is immediately free for those later in the roster.
    fn advance_turn(&mut self, out_events: &mut Vec<Event>) {
        self.begin_quest(out_events);
        let turn = self.turn_index;

        for index in 0..self.roster.len() {
            let adventurer = &mut self.roster[index];
            let id = adventurer.id();

            let Some(instruction) = adventurer.next_instruction(turn) else {
                out_events.push(Event::AdventurerIdled { adventurer: id });
                continue;
            };

            match instruction {
                Instruction::Advance => {
                    let from = adventurer.cell();
                    let to = adventurer.next_position();
                    let block = match self.grid.cell_type(to) {
                        None => Some(MoveBlock::OutOfBounds),
                        Some(CellType::Mountain) => Some(MoveBlock::Mountain),
                        Some(CellType::Plain) => self
                            .occupancy
                            .occupant(to)
                            .map(|occupant| MoveBlock::Occupied { occupant }),
                    };

                    if let Some(reason) = block {
                        out_events.push(Event::AdventurerBlocked {
                            adventurer: id,
                            cell: from,
                            toward: to,
                            reason,
                        });
                    } else {
                        self.occupancy.vacate(from);
                        self.occupancy.occupy(id, to);
                        adventurer.advance();
                        out_events.push(Event::AdventurerAdvanced {
                            adventurer: id,
                            from,
                            to,
                        });

                        if let Some(remaining) = take_treasure(&mut self.treasures, to) {
                            adventurer.collect();
                            out_events.push(Event::TreasureCollected {
                                adventurer: id,
                                cell: to,
                                remaining,
                            });
                        }
                    }
                }
                Instruction::Turn(relative) => {
                    adventurer.turn(relative);
                    out_events.push(Event::AdventurerTurned {
                        adventurer: id,
                        turn: relative,
                        facing: adventurer.facing(),
                    });
                }
                Instruction::Unrecognised(code) => {
                    out_events.push(Event::InstructionIgnored {
                        adventurer: id,
                        code,
                    });
                }
            }

            adventurer.record(instruction);
        }

        self.turn_index = self.turn_index.saturating_add(1);
        out_events.push(Event::TurnCompleted {
            turn: self.turn_index,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes one unit from the deposit at `cell`, returning what is left.
fn take_treasure(treasures: &mut BTreeMap<Cell, u32>, cell: Cell) -> Option<u32> {
    let amount = treasures.get_mut(&cell)?;
    *amount = amount.saturating_sub(1);
    let remaining = *amount;
    if remaining == 0 {
        let _ = treasures.remove(&cell);
    }
    Some(remaining)
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Construction commands are only honoured while the quest is in
/// [`QuestPhase::Setup`]; `ConfigureMap` always starts a fresh quest.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureMap { rows, columns } => {
            let was_underway = world.phase == QuestPhase::Underway;
            *world = World::with_map(rows, columns);
            let (rows, columns) = world.grid.dimensions();
            out_events.push(Event::MapConfigured { rows, columns });
            if was_underway {
                out_events.push(Event::PhaseChanged {
                    phase: QuestPhase::Setup,
                });
            }
        }
        Command::PlaceMountain { cell } => match world.place_mountain(cell) {
            Ok(()) => out_events.push(Event::MountainRaised { cell }),
            Err(reason) => out_events.push(Event::PlacementRejected {
                target: PlacementTarget::Mountain,
                cell,
                reason,
            }),
        },
        Command::PlaceTreasure { cell, amount } => match world.place_treasure(cell, amount) {
            Ok(amount) => out_events.push(Event::TreasureBuried { cell, amount }),
            Err(reason) => out_events.push(Event::PlacementRejected {
                target: PlacementTarget::Treasure,
                cell,
                reason,
            }),
        },
        Command::RegisterAdventurer {
            name,
            cell,
            facing,
            plan,
            collected,
        } => match world.register_adventurer(name.clone(), cell, facing, plan, collected) {
            Ok(adventurer) => out_events.push(Event::AdventurerRegistered {
                adventurer,
                name,
                cell,
                facing,
            }),
            Err(reason) => out_events.push(Event::PlacementRejected {
                target: PlacementTarget::Adventurer,
                cell,
                reason,
            }),
        },
        Command::SetTurnBudget { turns } => {
            world.budget_override = turns;
            out_events.push(Event::TurnBudgetChanged {
                turns: world.turn_budget(),
            });
        }
        Command::AdvanceTurn => world.advance_turn(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use treasure_quest_core::{
        AdventurerId, AdventurerSnapshot, AdventurerView, Cell, CellType, Instruction,
        QuestPhase, QuestProgress, QuestSnapshot, Scenario, TreasureSnapshot, TreasureSpec,
    };

    use super::World;

    /// Grid size as `(rows, columns)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        world.grid.dimensions()
    }

    /// Active quest phase.
    #[must_use]
    pub fn phase(world: &World) -> QuestPhase {
        world.phase
    }

    /// Number of turns completed so far.
    #[must_use]
    pub fn turn_index(world: &World) -> u64 {
        world.turn_index
    }

    /// Turn budget: the explicit override, or the longest script in the roster.
    #[must_use]
    pub fn turn_budget(world: &World) -> u64 {
        world.turn_budget()
    }

    /// Terrain of an in-bounds cell; `None` outside the grid.
    #[must_use]
    pub fn cell_type(world: &World, cell: Cell) -> Option<CellType> {
        world.grid.cell_type(cell)
    }

    /// Reports whether the cell lies within the grid and is not a mountain.
    #[must_use]
    pub fn is_accessible(world: &World, cell: Cell) -> bool {
        world.grid.is_accessible(cell)
    }

    /// Reports whether an adventurer stands on the cell.
    #[must_use]
    pub fn is_occupied(world: &World, cell: Cell) -> bool {
        occupant(world, cell).is_some()
    }

    /// Returns the adventurer standing on the cell, if any.
    #[must_use]
    pub fn occupant(world: &World, cell: Cell) -> Option<AdventurerId> {
        world.occupancy.occupant(cell)
    }

    /// Treasure left on the cell; `None` when the cell holds none.
    #[must_use]
    pub fn treasure_count_at(world: &World, cell: Cell) -> Option<u32> {
        world.treasures.get(&cell).copied()
    }

    /// Number of mountain cells on the grid.
    #[must_use]
    pub fn mountain_count(world: &World) -> usize {
        world.grid.mountain_count()
    }

    /// Total treasure units still buried.
    #[must_use]
    pub fn treasure_total(world: &World) -> u64 {
        world.treasure_total()
    }

    /// Mountain cells in row-major order.
    #[must_use]
    pub fn mountains(world: &World) -> Vec<Cell> {
        world.grid.mountains()
    }

    /// Remaining deposits in row-major order.
    #[must_use]
    pub fn treasures(world: &World) -> Vec<TreasureSnapshot> {
        world
            .treasures
            .iter()
            .map(|(cell, amount)| TreasureSnapshot {
                cell: *cell,
                amount: *amount,
            })
            .collect()
    }

    /// Captures a read-only view of the roster.
    #[must_use]
    pub fn adventurer_view(world: &World) -> AdventurerView {
        AdventurerView::from_snapshots(
            world
                .roster
                .iter()
                .map(|adventurer| adventurer.snapshot())
                .collect(),
        )
    }

    /// Snapshot of a single adventurer.
    #[must_use]
    pub fn adventurer(world: &World, id: AdventurerId) -> Option<AdventurerSnapshot> {
        world
            .roster
            .iter()
            .find(|adventurer| adventurer.id() == id)
            .map(|adventurer| adventurer.snapshot())
    }

    /// Instructions an adventurer has executed so far.
    #[must_use]
    pub fn history(world: &World, id: AdventurerId) -> Option<&[Instruction]> {
        world
            .roster
            .iter()
            .find(|adventurer| adventurer.id() == id)
            .map(|adventurer| adventurer.history())
    }

    /// Counters consulted when deciding whether to take another turn.
    #[must_use]
    pub fn progress(world: &World) -> QuestProgress {
        QuestProgress {
            phase: world.phase,
            turn: world.turn_index,
            turn_budget: world.turn_budget(),
            treasure_remaining: world.treasure_total(),
        }
    }

    /// Extracts the current state for reporting.
    #[must_use]
    pub fn final_snapshot(world: &World) -> QuestSnapshot {
        let (rows, columns) = world.grid.dimensions();
        QuestSnapshot {
            rows,
            columns,
            mountains: mountains(world),
            treasures: treasures(world),
            adventurers: adventurer_view(world).into_vec(),
        }
    }

    /// Reconstructs the quest as it stood before the first turn, with each
    /// adventurer's executed instructions as its script.
    ///
    /// Bootstrapping a new world from the result and running it replays this
    /// world turn by turn.
    #[must_use]
    pub fn initial_snapshot(world: &World) -> Scenario {
        let (rows, columns) = world.grid.dimensions();
        let treasures = world
            .initial_treasures
            .as_ref()
            .unwrap_or(&world.treasures)
            .iter()
            .map(|(cell, amount)| TreasureSpec {
                cell: *cell,
                amount: i64::from(*amount),
            })
            .collect();

        Scenario {
            rows: i32::try_from(rows).unwrap_or(i32::MAX),
            columns: i32::try_from(columns).unwrap_or(i32::MAX),
            mountains: mountains(world),
            treasures,
            adventurers: world
                .roster
                .iter()
                .map(|adventurer| adventurer.replay_spec())
                .collect(),
        }
    }
}
