use treasure_quest_core::{
    AdventurerId, AdventurerSnapshot, AdventurerSpec, Cell, Direction, Instruction, RelativeTurn,
};
use treasure_quest_system_movement::MoveSource;

/// Roster entry owned by the world.
///
/// The adventurer holds state and geometry only. Whether a step is legal is
/// decided by the world before [`Adventurer::advance`] is called.
#[derive(Clone, Debug)]
pub(crate) struct Adventurer {
    id: AdventurerId,
    name: String,
    cell: Cell,
    facing: Direction,
    collected: u32,
    origin: Cell,
    initial_facing: Direction,
    initial_collected: u32,
    moves: MoveSource,
    history: Vec<Instruction>,
}

impl Adventurer {
    pub(crate) fn new(
        id: AdventurerId,
        name: String,
        cell: Cell,
        facing: Direction,
        collected: u32,
        moves: MoveSource,
    ) -> Self {
        Self {
            id,
            name,
            cell,
            facing,
            collected,
            origin: cell,
            initial_facing: facing,
            initial_collected: collected,
            moves,
            history: Vec::new(),
        }
    }

    pub(crate) const fn id(&self) -> AdventurerId {
        self.id
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) const fn cell(&self) -> Cell {
        self.cell
    }

    pub(crate) const fn facing(&self) -> Direction {
        self.facing
    }

    pub(crate) fn history(&self) -> &[Instruction] {
        &self.history
    }

    pub(crate) fn scripted_len(&self) -> usize {
        self.moves.scripted_len()
    }

    pub(crate) fn next_instruction(&mut self, turn: u64) -> Option<Instruction> {
        self.moves.instruction_at(turn)
    }

    pub(crate) fn turn(&mut self, turn: RelativeTurn) {
        self.facing = self.facing.rotated(turn);
    }

    /// Cell one step ahead along the current facing.
    pub(crate) const fn next_position(&self) -> Cell {
        self.cell.offset(self.facing)
    }

    pub(crate) fn advance(&mut self) {
        self.cell = self.next_position();
    }

    pub(crate) fn collect(&mut self) {
        self.collected = self.collected.saturating_add(1);
    }

    pub(crate) fn record(&mut self, instruction: Instruction) {
        self.history.push(instruction);
    }

    pub(crate) fn snapshot(&self) -> AdventurerSnapshot {
        AdventurerSnapshot {
            id: self.id,
            name: self.name.clone(),
            cell: self.cell,
            facing: self.facing,
            collected: self.collected,
        }
    }

    /// Registration state paired with every instruction executed so far.
    pub(crate) fn replay_spec(&self) -> AdventurerSpec {
        AdventurerSpec {
            name: self.name.clone(),
            cell: self.origin,
            facing: self.initial_facing,
            moves: self.history.clone(),
            collected: self.initial_collected,
        }
    }
}
