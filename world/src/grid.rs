use std::collections::{BTreeMap, BTreeSet};

use treasure_quest_core::{AdventurerId, Cell, CellType};

/// Terrain map: the grid bounds plus the cells raised as mountains.
///
/// Every other in-bounds cell is plain, so storage grows with the number of
/// mountains rather than with the map area.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    rows: u32,
    columns: u32,
    mountains: BTreeSet<Cell>,
}

impl Grid {
    /// Creates an all-plain grid, clamping negative extents to zero.
    pub(crate) fn new(rows: i32, columns: i32) -> Self {
        Self {
            rows: clamp_extent(rows),
            columns: clamp_extent(columns),
            mountains: BTreeSet::new(),
        }
    }

    pub(crate) const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    fn contains(&self, cell: Cell) -> bool {
        let inside = |coordinate: i32, extent: u32| {
            u32::try_from(coordinate).map_or(false, |coordinate| coordinate < extent)
        };
        inside(cell.row(), self.rows) && inside(cell.column(), self.columns)
    }

    pub(crate) fn cell_type(&self, cell: Cell) -> Option<CellType> {
        if !self.contains(cell) {
            None
        } else if self.mountains.contains(&cell) {
            Some(CellType::Mountain)
        } else {
            Some(CellType::Plain)
        }
    }

    pub(crate) fn is_accessible(&self, cell: Cell) -> bool {
        self.cell_type(cell) == Some(CellType::Plain)
    }

    pub(crate) fn raise_mountain(&mut self, cell: Cell) {
        if self.contains(cell) {
            let _ = self.mountains.insert(cell);
        }
    }

    /// Mountain cells in row-major order.
    pub(crate) fn mountains(&self) -> Vec<Cell> {
        self.mountains.iter().copied().collect()
    }

    pub(crate) fn mountain_count(&self) -> usize {
        self.mountains.len()
    }
}

/// Index of the adventurer standing on each occupied cell.
#[derive(Clone, Debug, Default)]
pub(crate) struct OccupancyGrid {
    cells: BTreeMap<Cell, AdventurerId>,
}

impl OccupancyGrid {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn occupant(&self, cell: Cell) -> Option<AdventurerId> {
        self.cells.get(&cell).copied()
    }

    pub(crate) fn occupy(&mut self, adventurer: AdventurerId, cell: Cell) {
        let _ = self.cells.insert(cell, adventurer);
    }

    pub(crate) fn vacate(&mut self, cell: Cell) {
        let _ = self.cells.remove(&cell);
    }
}

fn clamp_extent(extent: i32) -> u32 {
    u32::try_from(extent).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_extents_clamp_to_empty_grid() {
        let grid = Grid::new(-1, -4);
        assert_eq!(grid.dimensions(), (0, 0));
        assert!(!grid.is_accessible(Cell::new(0, 0)));
    }

    #[test]
    fn one_negative_extent_empties_the_grid() {
        let grid = Grid::new(3, -2);
        assert_eq!(grid.dimensions(), (3, 0));
        assert!(!grid.is_accessible(Cell::new(0, 0)));
    }

    #[test]
    fn out_of_bounds_cells_have_no_type() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.cell_type(Cell::new(2, 3)), Some(CellType::Plain));
        assert_eq!(grid.cell_type(Cell::new(3, 0)), None);
        assert_eq!(grid.cell_type(Cell::new(0, 4)), None);
        assert_eq!(grid.cell_type(Cell::new(-1, 0)), None);
        assert_eq!(grid.cell_type(Cell::new(0, -1)), None);
    }

    #[test]
    fn mountains_are_listed_row_major() {
        let mut grid = Grid::new(3, 4);
        grid.raise_mountain(Cell::new(2, 0));
        grid.raise_mountain(Cell::new(0, 3));
        grid.raise_mountain(Cell::new(9, 9));

        assert_eq!(grid.mountains(), vec![Cell::new(0, 3), Cell::new(2, 0)]);
        assert_eq!(grid.mountain_count(), 2);
        assert!(!grid.is_accessible(Cell::new(0, 3)));
    }

    #[test]
    fn largest_grid_answers_corner_queries() {
        let mut grid = Grid::new(i32::MAX, i32::MAX);
        let far = Cell::new(i32::MAX - 1, i32::MAX - 1);
        grid.raise_mountain(far);

        assert_eq!(grid.dimensions(), (i32::MAX as u32, i32::MAX as u32));
        assert_eq!(grid.cell_type(Cell::new(0, 0)), Some(CellType::Plain));
        assert_eq!(grid.cell_type(far), Some(CellType::Mountain));
        assert_eq!(grid.cell_type(Cell::new(i32::MAX, 0)), None);
        assert_eq!(grid.mountains(), vec![far]);
    }

    #[test]
    fn occupancy_tracks_single_occupant_per_cell() {
        let mut occupancy = OccupancyGrid::new();
        let id = AdventurerId::new(4);
        occupancy.occupy(id, Cell::new(1, 1));
        assert_eq!(occupancy.occupant(Cell::new(1, 1)), Some(id));

        occupancy.vacate(Cell::new(1, 1));
        assert_eq!(occupancy.occupant(Cell::new(1, 1)), None);
        assert_eq!(occupancy.occupant(Cell::new(5, 5)), None);
    }
}
