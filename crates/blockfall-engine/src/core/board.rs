use std::fmt;

use super::shape::{Cell, ShapeMatrix};

type Row = [Cell; Board::WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; Board::WIDTH];

/// The fixed 10×20 occupancy grid holding locked cells.
///
/// Rows are stored top to bottom (row 0 is the top row), cells left to right.
/// The dimensions never change: clearing a row removes it and inserts an empty
/// row at the top.
///
/// Positions passed to [`Self::is_occupiable`] and [`Self::merge`] are the
/// top-left corner of a shape's bounding box and may lie outside the grid.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, ShapeKind};
///
/// let mut board = Board::EMPTY;
/// let i = ShapeKind::I.matrix();
///
/// assert!(board.is_occupiable(&i, 0, 19));
/// assert!(!board.is_occupiable(&i, 7, 19)); // sticks out on the right
///
/// board.merge(&i, 0, 19);
/// assert!(!board.is_occupiable(&i, 0, 19));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; Board::HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 20;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; Self::HEIGHT],
    };

    /// Returns the cell at column `x`, row `y`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; Board::WIDTH]> {
        self.rows.iter()
    }

    /// Overwrites a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn fill_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.rows.fill(EMPTY_ROW);
    }

    /// Returns `true` if `shape` can be placed with its top-left corner at `(x, y)`.
    ///
    /// A placement is rejected if any occupied cell of the shape lands left of
    /// column 0, right of the last column, below the last row, or on an occupied
    /// board cell. Cells above row 0 are not checked, so pieces may rotate and
    /// spawn partially above the visible grid.
    #[must_use]
    pub fn is_occupiable(&self, shape: &ShapeMatrix, x: i32, y: i32) -> bool {
        shape.occupied_cells().all(|(dx, dy, _)| {
            let (Some(bx), Some(by)) = (offset(x, dx), offset(y, dy)) else {
                return false;
            };
            let Ok(col) = usize::try_from(bx) else {
                return false;
            };
            if col >= Self::WIDTH {
                return false;
            }
            let Ok(row) = usize::try_from(by) else {
                // Above the top edge
                return true;
            };
            row < Self::HEIGHT && self.rows[row][col].is_empty()
        })
    }

    /// Writes every occupied cell of `shape` into the board at `(x, y)`.
    ///
    /// Existing cells are overwritten, so callers must check
    /// [`Self::is_occupiable`] first. Cells that fall outside the grid are dropped.
    pub fn merge(&mut self, shape: &ShapeMatrix, x: i32, y: i32) {
        for (dx, dy, cell) in shape.occupied_cells() {
            let (Some(col), Some(row)) = (
                offset(x, dx).and_then(|bx| usize::try_from(bx).ok()),
                offset(y, dy).and_then(|by| usize::try_from(by).ok()),
            ) else {
                continue;
            };
            if let Some(target) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
                *target = cell;
            }
        }
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned bottom to top. When a full row is removed, the rows above
    /// it shift down by one and an empty row is inserted at the top; the same row
    /// index is then checked again, since it now holds the row that was above.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        let mut y = Self::HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.rows[row].iter().all(|cell| cell.is_occupied()) {
                self.rows.copy_within(0..row, 1);
                self.rows[0] = EMPTY_ROW;
                count += 1;
            } else {
                y -= 1;
            }
        }
        count
    }
}

/// Returns `base + delta`, or `None` if the sum does not fit in an `i32`.
pub(crate) fn offset(base: i32, delta: usize) -> Option<i32> {
    i32::try_from(delta)
        .ok()
        .and_then(|delta| base.checked_add(delta))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Shape(kind) => kind.as_char(),
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::ShapeKind;

    const FILLED: Cell = Cell::Shape(ShapeKind::I);

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..Board::WIDTH {
            board.fill_cell(x, y, FILLED);
        }
    }

    fn fill_row_except(board: &mut Board, y: usize, gap: usize) {
        fill_row(board, y);
        board.fill_cell(gap, y, Cell::Empty);
    }

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        assert_eq!(board.rows().count(), Board::HEIGHT);
        assert!(board.rows().flatten().all(|cell| cell.is_empty()));
        assert_eq!(board.cell(Board::WIDTH, 0), None);
        assert_eq!(board.cell(0, Board::HEIGHT), None);
    }

    #[test]
    fn test_occupiable_walls_and_floor() {
        let board = Board::EMPTY;
        let t = ShapeKind::T.matrix();

        assert!(board.is_occupiable(&t, 0, 0));
        assert!(board.is_occupiable(&t, 7, 18));
        assert!(!board.is_occupiable(&t, -1, 0));
        assert!(!board.is_occupiable(&t, 8, 0));
        assert!(!board.is_occupiable(&t, 0, 19));
    }

    #[test]
    fn test_occupiable_ignores_empty_bounding_box_cells() {
        let board = Board::EMPTY;
        // Column 0 of the L matrix is empty, so it can hang over the left wall.
        let l = ShapeKind::L.matrix();
        assert!(board.is_occupiable(&l, -1, 0));
        assert!(!board.is_occupiable(&l, -2, 0));
    }

    #[test]
    fn test_occupiable_above_top_is_unchecked() {
        let board = Board::EMPTY;
        let i = ShapeKind::I.matrix().rotated_right();
        assert!(board.is_occupiable(&i, 4, -3));
        assert!(board.is_occupiable(&i, 4, -10));
    }

    #[test]
    fn test_occupiable_detects_locked_cells() {
        let mut board = Board::EMPTY;
        board.fill_cell(4, 10, FILLED);
        let o = ShapeKind::O.matrix();

        assert!(!board.is_occupiable(&o, 3, 9));
        assert!(!board.is_occupiable(&o, 4, 10));
        assert!(board.is_occupiable(&o, 5, 9));
        assert!(board.is_occupiable(&o, 2, 9));
    }

    #[test]
    fn test_merge_writes_shape_ids() {
        let mut board = Board::EMPTY;
        let s = ShapeKind::S.matrix();
        board.merge(&s, 2, 18);

        let s_cell = Cell::Shape(ShapeKind::S);
        assert_eq!(board.cell(2, 18), Some(Cell::Empty));
        assert_eq!(board.cell(3, 18), Some(s_cell));
        assert_eq!(board.cell(4, 18), Some(s_cell));
        assert_eq!(board.cell(2, 19), Some(s_cell));
        assert_eq!(board.cell(3, 19), Some(s_cell));
        assert_eq!(board.cell(4, 19), Some(Cell::Empty));
        assert_eq!(board.rows().flatten().filter(|c| c.is_occupied()).count(), 4);
    }

    #[test]
    fn test_merge_overwrites_and_keeps_empty_cells() {
        let mut board = Board::EMPTY;
        board.fill_cell(0, 0, FILLED);
        board.fill_cell(1, 0, FILLED);
        // T matrix has an empty top-left cell: (0, 0) must survive
        board.merge(&ShapeKind::T.matrix(), 0, 0);

        assert_eq!(board.cell(0, 0), Some(FILLED));
        assert_eq!(board.cell(1, 0), Some(Cell::Shape(ShapeKind::T)));
    }

    #[test]
    fn test_merge_drops_cells_above_top() {
        let mut board = Board::EMPTY;
        board.merge(&ShapeKind::O.matrix(), 0, -1);
        assert_eq!(board.cell(0, 0), Some(Cell::Shape(ShapeKind::O)));
        assert_eq!(board.rows().flatten().filter(|c| c.is_occupied()).count(), 2);
    }

    #[test]
    fn test_clear_single_bottom_row() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 19);
        board.fill_cell(3, 18, FILLED);

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.cell(3, 19), Some(FILLED));
        assert_eq!(board.rows().flatten().filter(|c| c.is_occupied()).count(), 1);
    }

    #[test]
    fn test_clear_consecutive_rows_counts_each_once() {
        let mut board = Board::EMPTY;
        for y in 16..20 {
            fill_row(&mut board, y);
        }
        board.fill_cell(0, 15, FILLED);

        assert_eq!(board.clear_full_rows(), 4);
        assert_eq!(board.cell(0, 19), Some(FILLED));
        assert_eq!(board.rows().flatten().filter(|c| c.is_occupied()).count(), 1);
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 19);
        fill_row_except(&mut board, 18, 5);
        fill_row(&mut board, 17);

        assert_eq!(board.clear_full_rows(), 2);

        let mut expected = Board::EMPTY;
        fill_row_except(&mut expected, 19, 5);
        assert_eq!(board, expected);
    }

    #[test]
    fn test_clear_all_rows() {
        let mut board = Board::EMPTY;
        for y in 0..Board::HEIGHT {
            fill_row(&mut board, y);
        }
        assert_eq!(board.clear_full_rows(), Board::HEIGHT);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_clear_without_full_rows_is_identity() {
        let mut board = Board::EMPTY;
        fill_row_except(&mut board, 19, 0);
        fill_row_except(&mut board, 18, 9);
        board.fill_cell(4, 2, Cell::Shape(ShapeKind::Z));
        let before = board.clone();

        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_keeps_dimensions_and_shifts_rows_above() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 12);
        for y in 0..12 {
            board.fill_cell(y % Board::WIDTH, y, Cell::Shape(ShapeKind::J));
        }
        fill_row_except(&mut board, 13, 1);
        let before = board.clone();

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.rows().count(), Board::HEIGHT);
        assert!(board.rows().all(|row| row.len() == Board::WIDTH));
        assert!(board.rows().next().unwrap().iter().all(|c| c.is_empty()));
        for y in 0..12 {
            assert_eq!(board.rows[y + 1], before.rows[y]);
        }
        for y in 13..Board::HEIGHT {
            assert_eq!(board.rows[y], before.rows[y]);
        }
    }

    #[test]
    fn test_extreme_positions_do_not_overflow() {
        let mut board = Board::EMPTY;
        let i = ShapeKind::I.matrix();
        let t = ShapeKind::T.matrix();

        assert!(!board.is_occupiable(&i, i32::MAX, 0));
        assert!(!board.is_occupiable(&i, i32::MAX - 1, 0));
        assert!(!board.is_occupiable(&t, 0, i32::MAX));
        assert!(!board.is_occupiable(&i, i32::MIN, 0));
        // Far above the grid is still unchecked.
        assert!(board.is_occupiable(&t, 3, i32::MIN));

        board.merge(&i, i32::MAX - 1, 0);
        board.merge(&t, 0, i32::MAX);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_clear_resets_board() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 5);
        board.clear();
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_display() {
        let mut board = Board::EMPTY;
        board.merge(&ShapeKind::I.matrix(), 0, 19);
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), Board::HEIGHT);
        assert_eq!(lines[0], "..........");
        assert_eq!(lines[19], "IIII......");
    }
}
