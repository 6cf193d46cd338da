#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Move sources that feed adventurers one instruction per turn.
//!
//! A source is chosen when the adventurer is registered and never changes
//! afterwards. Scripted sources replay a finite instruction list and then run
//! dry. Improvised sources replay their script and then keep drawing random
//! instructions from a seeded generator, so a given seed always yields the
//! same run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use treasure_quest_core::{Instruction, MovePlan, RelativeTurn};

/// Equally likely outcomes of one improvised draw.
///
/// An advance is three times as likely as either turn, so three draws in
/// five advance.
pub const DRAW_TABLE: [Instruction; 5] = [
    Instruction::Advance,
    Instruction::Advance,
    Instruction::Advance,
    Instruction::Turn(RelativeTurn::Left),
    Instruction::Turn(RelativeTurn::Right),
];

/// Instruction queue owned by a single adventurer.
#[derive(Clone, Debug)]
pub enum MoveSource {
    /// Finite, pre-supplied instructions.
    Scripted(ScriptedMoves),
    /// Pre-supplied instructions followed by lazily drawn random ones.
    Improvised(ImprovisedMoves),
}

impl MoveSource {
    /// Builds the source described by `plan`.
    #[must_use]
    pub fn from_plan(plan: MovePlan) -> Self {
        match plan {
            MovePlan::Scripted(script) => Self::Scripted(ScriptedMoves::new(script)),
            MovePlan::Improvised { script, seed } => {
                Self::Improvised(ImprovisedMoves::new(script, seed))
            }
        }
    }

    /// Instruction scheduled for `turn`, if any.
    ///
    /// Improvised sources extend their queue on demand and therefore always
    /// answer.
    pub fn instruction_at(&mut self, turn: u64) -> Option<Instruction> {
        match self {
            Self::Scripted(moves) => moves.instruction_at(turn),
            Self::Improvised(moves) => moves.instruction_at(turn),
        }
    }

    /// Number of instructions supplied up front.
    #[must_use]
    pub fn scripted_len(&self) -> usize {
        match self {
            Self::Scripted(moves) => moves.instructions.len(),
            Self::Improvised(moves) => moves.scripted,
        }
    }
}

/// Finite instruction list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedMoves {
    instructions: Vec<Instruction>,
}

impl ScriptedMoves {
    /// Wraps the provided script.
    #[must_use]
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    fn instruction_at(&self, turn: u64) -> Option<Instruction> {
        let index = usize::try_from(turn).ok()?;
        self.instructions.get(index).copied()
    }
}

/// Script followed by an endless stream of random instructions.
#[derive(Clone, Debug)]
pub struct ImprovisedMoves {
    queue: Vec<Instruction>,
    scripted: usize,
    rng: ChaCha8Rng,
}

impl ImprovisedMoves {
    /// Creates a source that improvises with a generator seeded by `seed`.
    #[must_use]
    pub fn new(script: Vec<Instruction>, seed: u64) -> Self {
        Self {
            scripted: script.len(),
            queue: script,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn instruction_at(&mut self, turn: u64) -> Option<Instruction> {
        let index = usize::try_from(turn).ok()?;
        while self.queue.len() <= index {
            let drawn = draw_instruction(&mut self.rng);
            self.queue.push(drawn);
        }
        self.queue.get(index).copied()
    }
}

/// Draws one instruction with the advance-biased distribution.
pub fn draw_instruction<R>(rng: &mut R) -> Instruction
where
    R: Rng + ?Sized,
{
    DRAW_TABLE[rng.gen_range(0..DRAW_TABLE.len())]
}
