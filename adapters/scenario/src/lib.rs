#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Plain-text scenario format for Treasure Quest.
//!
//! One record per line, fields separated by `" - "`:
//!
//! ```text
//! C - <columns> - <rows>
//! M - <x> - <y>
//! T - <x> - <y> - <amount>
//! A - <name> - <x> - <y> - <facing> - <moves>
//! ```
//!
//! `x` counts columns and `y` counts rows; the axes are swapped into
//! [`Cell`](treasure_quest_core::Cell) `(row, column)` order on the way in and
//! back on the way out. Blank lines and lines whose first field starts with
//! `#` are skipped.
//!
//! The last `A` field is either a move string or, when it is purely numeric, a
//! collected-treasure count. Final-state files therefore read back as
//! scenarios whose adventurers carry their score and no script. A seventh
//! field carries both: `A - <name> - <x> - <y> - <facing> - <moves> - <count>`.

mod reader;
mod writer;

use thiserror::Error;

pub use reader::parse_scenario;
pub use writer::{format_final, format_scenario};

/// Separator placed between the fields of a record.
pub const FIELD_SEPARATOR: &str = " - ";

/// Errors raised while reading a scenario.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    /// The first field names no known record kind.
    #[error("line {line}: unknown record kind '{kind}'")]
    UnknownRecord {
        /// One-based line number.
        line: usize,
        /// Offending first field.
        kind: String,
    },
    /// A mandatory field is absent.
    #[error("line {line}: '{record}' record is missing its {field} field")]
    MissingField {
        /// One-based line number.
        line: usize,
        /// Record kind being read.
        record: char,
        /// Name of the absent field.
        field: &'static str,
    },
    /// A numeric field does not hold an integer.
    #[error("line {line}: {field} '{value}' is not an integer")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// Name of the field.
        field: &'static str,
        /// Raw field text.
        value: String,
    },
    /// The facing field is not a single character.
    #[error("line {line}: facing '{value}' is not a single character")]
    InvalidFacing {
        /// One-based line number.
        line: usize,
        /// Raw field text.
        value: String,
    },
}
