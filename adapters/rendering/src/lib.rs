#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Treasure Quest adapters.
//!
//! A [`Scene`] is built from a [`QuestSnapshot`] and handed to a
//! [`RenderingBackend`]. The bundled [`TextBackend`] prints the ASCII map
//! followed by the leader board.

use std::{collections::BTreeMap, fmt, io::Write};

use anyhow::{Context, Result as AnyResult};
use treasure_quest_core::{Cell, Direction, QuestSnapshot, QUEST_TITLE};

const ADVENTURER_GLYPH: &str = "\\o/";
const PLAIN_GLYPH: &str = ",,,";
const MOUNTAIN_GLYPH: &str = "/V\\";
const LEADER_BOARD_BANNER: &str = "|\\/o\\/|   Leader Board   |\\/o\\/|";
const LEADER_BOARD_RULE: &str = ".:*~*:.";
const LEADER_BOARD_RULE_REPEAT: usize = 8;

/// Content drawn for a single cell, most prominent layer first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    /// An adventurer stands on the cell.
    Adventurer,
    /// Buried treasure with the remaining unit count.
    Treasure(u32),
    /// Open ground.
    Plain,
    /// Impassable terrain.
    Mountain,
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adventurer => write!(f, "{ADVENTURER_GLYPH} "),
            Self::Treasure(amount) => write!(f, "[{amount}] "),
            Self::Plain => write!(f, "{PLAIN_GLYPH} "),
            Self::Mountain => write!(f, "{MOUNTAIN_GLYPH} "),
        }
    }
}

/// Leader board line for one adventurer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing {
    /// One-based rank.
    pub rank: usize,
    /// Adventurer name.
    pub name: String,
    /// Current cell.
    pub cell: Cell,
    /// Current facing.
    pub facing: Direction,
    /// Treasure collected so far.
    pub collected: u32,
}

/// Scene description combining the map and the leader board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Title printed above the map.
    pub title: String,
    /// Number of grid rows.
    pub rows: u32,
    /// Number of grid columns.
    pub columns: u32,
    /// Tiles other than plain ground, keyed by cell.
    pub tiles: BTreeMap<Cell, Tile>,
    /// Turns completed so far.
    pub turn: u64,
    /// Treasure units still buried.
    pub treasure_remaining: u64,
    /// Adventurers ranked by collected treasure.
    pub standings: Vec<Standing>,
}

impl Scene {
    /// Lays out `snapshot` as tiles and ranks its adventurers.
    ///
    /// Ties keep roster order.
    #[must_use]
    pub fn new(snapshot: &QuestSnapshot, turn: u64) -> Self {
        let mut tiles = BTreeMap::new();
        let layers = snapshot
            .mountains
            .iter()
            .map(|cell| (*cell, Tile::Mountain))
            .chain(
                snapshot
                    .treasures
                    .iter()
                    .map(|treasure| (treasure.cell, Tile::Treasure(treasure.amount))),
            )
            .chain(
                snapshot
                    .adventurers
                    .iter()
                    .map(|adventurer| (adventurer.cell, Tile::Adventurer)),
            );
        for (cell, tile) in layers {
            if within(snapshot.rows, snapshot.columns, cell) {
                let _ = tiles.insert(cell, tile);
            }
        }

        let mut ranked: Vec<_> = snapshot.adventurers.iter().collect();
        ranked.sort_by(|left, right| right.collected.cmp(&left.collected));
        let standings = ranked
            .into_iter()
            .enumerate()
            .map(|(index, adventurer)| Standing {
                rank: index + 1,
                name: adventurer.name.clone(),
                cell: adventurer.cell,
                facing: adventurer.facing,
                collected: adventurer.collected,
            })
            .collect();

        Self {
            title: QUEST_TITLE.to_owned(),
            rows: snapshot.rows,
            columns: snapshot.columns,
            tiles,
            turn,
            treasure_remaining: snapshot
                .treasures
                .iter()
                .map(|treasure| u64::from(treasure.amount))
                .sum(),
            standings,
        }
    }

    /// Tile drawn at `cell`; cells without a layer are plain.
    #[must_use]
    pub fn tile(&self, cell: Cell) -> Tile {
        self.tiles.get(&cell).copied().unwrap_or(Tile::Plain)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for row in 0..self.rows {
            write!(f, "\n\t")?;
            for column in 0..self.columns {
                write!(f, "{}", self.tile(grid_cell(row, column)))?;
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "\nTurn: {:>3}\t\t\t\t\tTreasures: {:>3}\n",
            self.turn, self.treasure_remaining
        )?;
        writeln!(f, "\t\t{LEADER_BOARD_BANNER}")?;
        writeln!(
            f,
            "{}",
            vec![LEADER_BOARD_RULE; LEADER_BOARD_RULE_REPEAT].join("_")
        )?;
        for standing in &self.standings {
            writeln!(
                f,
                "#{}\t{} ({}, {}) {:?}, {} collected",
                standing.rank,
                standing.name,
                standing.cell.column(),
                standing.cell.row(),
                standing.facing,
                standing.collected
            )?;
        }
        Ok(())
    }
}

fn within(rows: u32, columns: u32, cell: Cell) -> bool {
    let inside = |coordinate: i32, extent: u32| {
        u32::try_from(coordinate).map_or(false, |coordinate| coordinate < extent)
    };
    inside(cell.row(), rows) && inside(cell.column(), columns)
}

/// Grid extents never exceed `i32::MAX`, so in-range indices always fit.
fn grid_cell(row: u32, column: u32) -> Cell {
    Cell::new(
        i32::try_from(row).unwrap_or(i32::MAX),
        i32::try_from(column).unwrap_or(i32::MAX),
    )
}

/// Rendering backend capable of presenting Treasure Quest scenes.
pub trait RenderingBackend {
    /// Presents one scene.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Backend printing scenes as ASCII art to any writer.
#[derive(Debug)]
pub struct TextBackend<W> {
    writer: W,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend writing into `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        write!(self.writer, "{scene}").context("failed to write scene")?;
        self.writer.flush().context("failed to flush scene")?;
        Ok(())
    }
}
