//! Dense occupancy map from grid cells to the defender holding them.

use lane_defence_core::{CellCoord, DefenderId, PlacementError, ProjectedCell};

/// Fixed-size occupancy grid where each cell holds at most one defender.
///
/// Cells outside `[0, rows) x [0, columns)` are a programming error and every
/// accessor panics on them; hosts check [`Grid::contains`] before issuing
/// commands.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<Option<DefenderId>>,
}

impl Grid {
    /// Creates an empty grid with the provided dimensions.
    #[must_use]
    pub fn new(rows: u32, columns: u32) -> Self {
        let capacity_u64 = u64::from(rows) * u64::from(columns);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            rows,
            columns,
            cells: vec![None; capacity],
        }
    }

    /// Number of rows (lanes) in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Converts a projected cell into a grid cell when it lies on the board.
    #[must_use]
    pub fn resolve(&self, projected: ProjectedCell) -> Option<CellCoord> {
        let row = u32::try_from(projected.row).ok()?;
        let column = u32::try_from(projected.column).ok()?;
        let cell = CellCoord::new(row, column);
        self.contains(cell).then_some(cell)
    }

    /// Stores a defender in an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Occupied`] without mutating the grid when the
    /// cell already holds a defender.
    pub fn place(&mut self, cell: CellCoord, defender: DefenderId) -> Result<(), PlacementError> {
        let index = self.index(cell);
        let slot = &mut self.cells[index];
        if slot.is_some() {
            return Err(PlacementError::Occupied);
        }
        *slot = Some(defender);
        Ok(())
    }

    /// Clears a cell, returning the defender that held it.
    pub fn remove(&mut self, cell: CellCoord) -> Option<DefenderId> {
        let index = self.index(cell);
        self.cells[index].take()
    }

    /// Returns the defender occupying the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<DefenderId> {
        self.cells[self.index(cell)]
    }

    fn index(&self, cell: CellCoord) -> usize {
        if !self.contains(cell) {
            panic!(
                "cell {cell} lies outside the {}x{} grid",
                self.rows, self.columns
            );
        }
        cell.row() as usize * self.columns as usize + cell.column() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placing_into_an_occupied_cell_leaves_the_original_occupant() {
        let mut grid = Grid::new(5, 9);
        let cell = CellCoord::new(2, 3);

        assert_eq!(grid.place(cell, DefenderId::new(1)), Ok(()));
        assert_eq!(
            grid.place(cell, DefenderId::new(2)),
            Err(PlacementError::Occupied)
        );
        assert_eq!(grid.occupant(cell), Some(DefenderId::new(1)));
    }

    #[test]
    fn removing_an_empty_cell_is_a_no_op() {
        let mut grid = Grid::new(5, 9);
        let cell = CellCoord::new(4, 8);
        assert_eq!(grid.remove(cell), None);
        assert_eq!(grid.occupant(cell), None);
    }

    #[test]
    fn removal_frees_the_cell_for_a_new_defender() {
        let mut grid = Grid::new(5, 9);
        let cell = CellCoord::new(0, 0);
        assert_eq!(grid.place(cell, DefenderId::new(7)), Ok(()));
        assert_eq!(grid.remove(cell), Some(DefenderId::new(7)));
        assert_eq!(grid.occupant(cell), None);
        assert_eq!(grid.place(cell, DefenderId::new(8)), Ok(()));
    }

    #[test]
    fn bounds_cover_rows_and_columns() {
        let grid = Grid::new(5, 9);
        assert!(grid.contains(CellCoord::new(4, 8)));
        assert!(!grid.contains(CellCoord::new(5, 0)));
        assert!(!grid.contains(CellCoord::new(0, 9)));
    }

    #[test]
    fn projections_off_the_board_do_not_resolve() {
        let grid = Grid::new(5, 9);
        assert_eq!(
            grid.resolve(ProjectedCell { row: 1, column: 8 }),
            Some(CellCoord::new(1, 8))
        );
        assert_eq!(grid.resolve(ProjectedCell { row: 1, column: 9 }), None);
        assert_eq!(grid.resolve(ProjectedCell { row: 1, column: -1 }), None);
    }

    #[test]
    #[should_panic(expected = "outside the 5x9 grid")]
    fn out_of_range_access_fails_fast() {
        let grid = Grid::new(5, 9);
        let _ = grid.occupant(CellCoord::new(5, 0));
    }
}
