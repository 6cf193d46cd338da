#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Treasure Quest engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Rejected placements and blocked moves never fail; they
//! surface as events so callers can log or ignore them.

use serde::{Deserialize, Serialize};

/// Title printed above every rendered map.
pub const QUEST_TITLE: &str = "The Madre de Dios Treasure Quest !";

/// Lifecycle phase of a quest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestPhase {
    /// The map, treasures and roster may still be configured.
    Setup,
    /// At least one turn was taken; construction commands are rejected.
    Underway,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the map with an all-plain grid of the provided size.
    ///
    /// Negative extents are clamped to zero. Treasures, adventurers and the
    /// turn counter are reset.
    ConfigureMap {
        /// Number of rows in the grid.
        rows: i32,
        /// Number of columns in the grid.
        columns: i32,
    },
    /// Turns a plain cell into a mountain.
    PlaceMountain {
        /// Cell receiving the mountain.
        cell: Cell,
    },
    /// Buries treasure on an accessible cell.
    PlaceTreasure {
        /// Cell receiving the treasure.
        cell: Cell,
        /// Number of treasure units; must be positive.
        amount: i64,
    },
    /// Adds an adventurer to the end of the roster.
    RegisterAdventurer {
        /// Display name, unique within the roster.
        name: String,
        /// Starting cell.
        cell: Cell,
        /// Starting facing.
        facing: Direction,
        /// Where the adventurer's instructions come from.
        plan: MovePlan,
        /// Treasure already carried when the quest starts.
        collected: u32,
    },
    /// Overrides the turn budget derived from the adventurers' scripts.
    SetTurnBudget {
        /// Explicit budget, or `None` to fall back to the longest script.
        turns: Option<u64>,
    },
    /// Advances every adventurer by one instruction.
    AdvanceTurn,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a fresh map replaced the previous one.
    MapConfigured {
        /// Number of rows after clamping.
        rows: u32,
        /// Number of columns after clamping.
        columns: u32,
    },
    /// Confirms that a mountain was raised.
    MountainRaised {
        /// Cell now holding the mountain.
        cell: Cell,
    },
    /// Confirms that treasure was buried.
    TreasureBuried {
        /// Cell holding the deposit.
        cell: Cell,
        /// Units buried.
        amount: u32,
    },
    /// Confirms that an adventurer joined the roster.
    AdventurerRegistered {
        /// Identifier assigned by the world.
        adventurer: AdventurerId,
        /// Name of the adventurer.
        name: String,
        /// Starting cell.
        cell: Cell,
        /// Starting facing.
        facing: Direction,
    },
    /// Reports that a construction command was ignored.
    PlacementRejected {
        /// Kind of entity that was being placed.
        target: PlacementTarget,
        /// Cell named in the request.
        cell: Cell,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces that the quest entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: QuestPhase,
    },
    /// Reports the turn budget now in effect.
    TurnBudgetChanged {
        /// Effective number of turns.
        turns: u64,
    },
    /// Confirms that an adventurer stepped onto a neighbouring cell.
    AdventurerAdvanced {
        /// Identifier of the adventurer that moved.
        adventurer: AdventurerId,
        /// Cell the adventurer left.
        from: Cell,
        /// Cell the adventurer now occupies.
        to: Cell,
    },
    /// Confirms that an adventurer changed facing.
    AdventurerTurned {
        /// Identifier of the adventurer that turned.
        adventurer: AdventurerId,
        /// Rotation that was applied.
        turn: RelativeTurn,
        /// Facing after the rotation.
        facing: Direction,
    },
    /// Reports that an advance instruction was dropped.
    AdventurerBlocked {
        /// Identifier of the adventurer that stayed in place.
        adventurer: AdventurerId,
        /// Cell the adventurer still occupies.
        cell: Cell,
        /// Cell the adventurer tried to enter.
        toward: Cell,
        /// Why the move was refused.
        reason: MoveBlock,
    },
    /// Reports an instruction code that has no meaning and was skipped.
    InstructionIgnored {
        /// Identifier of the adventurer that held the instruction.
        adventurer: AdventurerId,
        /// Raw instruction code.
        code: char,
    },
    /// Reports that an adventurer had nothing to do this turn.
    AdventurerIdled {
        /// Identifier of the idle adventurer.
        adventurer: AdventurerId,
    },
    /// Confirms that an adventurer picked up one unit of treasure.
    TreasureCollected {
        /// Identifier of the collecting adventurer.
        adventurer: AdventurerId,
        /// Cell the treasure was taken from.
        cell: Cell,
        /// Units left on the cell afterwards.
        remaining: u32,
    },
    /// Announces that every adventurer acted for the current turn.
    TurnCompleted {
        /// Number of turns completed so far.
        turn: u64,
    },
}

/// Entity named by a construction command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementTarget {
    /// A mountain placement.
    Mountain,
    /// A treasure placement.
    Treasure,
    /// An adventurer registration.
    Adventurer,
}

/// Reasons a construction command may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The quest already started, so the map is frozen.
    QuestUnderway,
    /// The cell lies outside the grid.
    OutOfBounds,
    /// The cell holds a mountain.
    Mountain,
    /// The cell holds an adventurer.
    Occupied,
    /// The cell already holds treasure.
    TreasurePresent,
    /// The treasure amount was zero or negative.
    NonPositiveAmount,
    /// The treasure amount does not fit a single deposit.
    AmountTooLarge,
    /// Another adventurer already uses the requested name.
    DuplicateName,
}

/// Reasons an advance instruction may be dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveBlock {
    /// The destination lies outside the grid.
    OutOfBounds,
    /// The destination holds a mountain.
    Mountain,
    /// The destination holds another adventurer.
    Occupied {
        /// Adventurer standing on the destination.
        occupant: AdventurerId,
    },
}

/// Unique identifier assigned to an adventurer in registration order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AdventurerId(u32);

impl AdventurerId {
    /// Creates a new adventurer identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as row and column indices.
///
/// Coordinates are signed so that positions one step beyond the top or left
/// edge remain representable; such cells are simply never accessible.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    row: i32,
    column: i32,
}

impl Cell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        let (rows, columns) = direction.displacement();
        Self {
            row: self.row.saturating_add(rows),
            column: self.column.saturating_add(columns),
        }
    }
}

/// Terrain assigned to an in-bounds cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    /// Walkable ground.
    Plain,
    /// Impassable ground.
    Mountain,
}

/// Cardinal directions an adventurer may face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Directions in clockwise order, starting from north.
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit displacement expressed as `(rows, columns)`.
    #[must_use]
    pub const fn displacement(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    /// Position of the direction within [`Direction::CLOCKWISE`].
    #[must_use]
    pub const fn clockwise_index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Facing obtained after applying `turn`.
    #[must_use]
    pub fn rotated(self, turn: RelativeTurn) -> Self {
        let count = Self::CLOCKWISE.len() as i32;
        let index = (self.clockwise_index() as i32 + turn.offset()).rem_euclid(count);
        Self::CLOCKWISE[index as usize]
    }

    /// Decodes a facing code. `O` (ouest) is accepted as west.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' | 'O' => Some(Self::West),
            _ => None,
        }
    }

    /// Code written to scenario files.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'O',
        }
    }
}

/// Rotation relative to the current facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelativeTurn {
    /// Counter-clockwise quarter turn.
    Left,
    /// Clockwise quarter turn.
    Right,
}

impl RelativeTurn {
    /// Signed step applied to the clockwise index.
    #[must_use]
    pub const fn offset(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    /// Decodes a turn code: `L`/`G` for left, `R`/`D` for right.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'L' | 'G' => Some(Self::Left),
            'R' | 'D' => Some(Self::Right),
            _ => None,
        }
    }

    /// Code written to scenario files.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Left => 'G',
            Self::Right => 'D',
        }
    }
}

/// A single step of an adventurer's move queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// Step forward along the current facing.
    Advance,
    /// Rotate in place.
    Turn(RelativeTurn),
    /// Code with no meaning; executed as a no-op and kept in history.
    Unrecognised(char),
}

impl Instruction {
    /// Decodes a single instruction code.
    #[must_use]
    pub const fn from_code(code: char) -> Self {
        if code == 'A' {
            return Self::Advance;
        }
        match RelativeTurn::from_code(code) {
            Some(turn) => Self::Turn(turn),
            None => Self::Unrecognised(code),
        }
    }

    /// Code written to scenario files.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Advance => 'A',
            Self::Turn(turn) => turn.code(),
            Self::Unrecognised(code) => code,
        }
    }

    /// Decodes every character of a move string.
    #[must_use]
    pub fn parse_sequence(moves: &str) -> Vec<Self> {
        moves.chars().map(Self::from_code).collect()
    }

    /// Encodes instructions back into a move string.
    #[must_use]
    pub fn format_sequence(instructions: &[Self]) -> String {
        instructions.iter().map(|instruction| instruction.code()).collect()
    }
}

/// Source of an adventurer's instructions, chosen at registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovePlan {
    /// Executes the script and idles once it runs out.
    Scripted(Vec<Instruction>),
    /// Executes the script, then draws random instructions forever.
    Improvised {
        /// Instructions executed before improvising.
        script: Vec<Instruction>,
        /// Seed for the adventurer's random generator.
        seed: u64,
    },
}

impl MovePlan {
    /// Instructions supplied up front.
    #[must_use]
    pub fn script(&self) -> &[Instruction] {
        match self {
            Self::Scripted(script) | Self::Improvised { script, .. } => script,
        }
    }
}

/// Immutable representation of a single adventurer used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventurerSnapshot {
    /// Identifier assigned at registration.
    pub id: AdventurerId,
    /// Display name.
    pub name: String,
    /// Cell currently occupied.
    pub cell: Cell,
    /// Current facing.
    pub facing: Direction,
    /// Treasure units carried.
    pub collected: u32,
}

/// Read-only snapshot describing every adventurer in roster order.
#[derive(Clone, Debug, Default)]
pub struct AdventurerView {
    snapshots: Vec<AdventurerSnapshot>,
}

impl AdventurerView {
    /// Creates a new view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<AdventurerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &AdventurerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<AdventurerSnapshot> {
        self.snapshots
    }
}

/// Treasure remaining on a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreasureSnapshot {
    /// Cell holding the deposit.
    pub cell: Cell,
    /// Units left; always at least one.
    pub amount: u32,
}

/// Side-effect-free extraction of the current quest state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestSnapshot {
    /// Number of grid rows.
    pub rows: u32,
    /// Number of grid columns.
    pub columns: u32,
    /// Mountain cells in row-major order.
    pub mountains: Vec<Cell>,
    /// Remaining deposits in row-major order.
    pub treasures: Vec<TreasureSnapshot>,
    /// Adventurers in roster order.
    pub adventurers: Vec<AdventurerSnapshot>,
}

/// Treasure placement requested by a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreasureSpec {
    /// Requested cell.
    pub cell: Cell,
    /// Requested amount; non-positive values are rejected by the world.
    pub amount: i64,
}

/// Adventurer registration requested by a scenario.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventurerSpec {
    /// Display name.
    pub name: String,
    /// Starting cell.
    pub cell: Cell,
    /// Starting facing.
    pub facing: Direction,
    /// Scripted instructions.
    pub moves: Vec<Instruction>,
    /// Treasure carried at the start.
    pub collected: u32,
}

/// Complete description of a quest before any turn is taken.
///
/// Scenarios are what adapters parse from text and what the world hands back
/// as its initial-state snapshot, with each adventurer's executed history in
/// place of the original script.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Requested number of rows; negative values clamp to zero.
    pub rows: i32,
    /// Requested number of columns; negative values clamp to zero.
    pub columns: i32,
    /// Requested mountain cells.
    pub mountains: Vec<Cell>,
    /// Requested treasure deposits.
    pub treasures: Vec<TreasureSpec>,
    /// Requested adventurers in roster order.
    pub adventurers: Vec<AdventurerSpec>,
}

/// Progress counters consulted by the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuestProgress {
    /// Active phase.
    pub phase: QuestPhase,
    /// Turns completed so far.
    pub turn: u64,
    /// Turn budget in effect.
    pub turn_budget: u64,
    /// Treasure units still buried.
    pub treasure_remaining: u64,
}
