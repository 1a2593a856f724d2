use crate::core::{
    board::{Board, offset},
    shape::{ShapeKind, ShapeMatrix},
};

/// Result of trying to translate the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// The piece moved to the requested position.
    Moved,
    /// A sideways move collided; nothing changed.
    Blocked,
    /// A downward move collided; the piece must be locked where it is.
    Landed,
}

/// Result of trying to rotate the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RotateOutcome {
    Rotated,
    Blocked,
}

/// The currently falling piece.
///
/// The position is the top-left corner of the shape's bounding box in board
/// coordinates. Movement and rotation are validated against a [`Board`] and are
/// only committed when the target placement is free.
///
/// Locking is not a state of the piece itself: a downward move that collides
/// reports [`MoveOutcome::Landed`] and leaves the piece untouched, and the
/// owner decides to merge it and spawn the next one.
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, Board, MoveOutcome, ShapeKind};
///
/// let board = Board::EMPTY;
/// let mut piece = ActivePiece::spawn(ShapeKind::O);
/// assert_eq!((piece.x(), piece.y()), (4, 0));
///
/// assert_eq!(piece.try_move(&board, 1, 0), MoveOutcome::Moved);
/// assert_eq!(piece.x(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: ShapeKind,
    matrix: ShapeMatrix,
    x: i32,
    y: i32,
}

impl ActivePiece {
    /// Creates a piece in its spawn orientation, horizontally centered on row 0.
    ///
    /// The spawn column is `floor(board_width / 2) - ceil(shape_width / 2)`.
    #[must_use]
    pub fn spawn(kind: ShapeKind) -> Self {
        let matrix = kind.matrix();
        let x = offset(0, Board::WIDTH / 2 - matrix.width().div_ceil(2)).unwrap_or_default();
        Self {
            kind,
            matrix,
            x,
            y: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn at(kind: ShapeKind, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Self::spawn(kind)
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Returns the matrix in the current rotation state.
    #[must_use]
    pub fn matrix(&self) -> &ShapeMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns `true` if the piece fits where it currently is.
    #[must_use]
    pub fn fits(&self, board: &Board) -> bool {
        board.is_occupiable(&self.matrix, self.x, self.y)
    }

    /// Iterates over the board cells `(x, y)` covered by the piece.
    ///
    /// Cells outside the grid, such as those above row 0 after a rotation at
    /// the top, are skipped.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.matrix.occupied_cells().filter_map(|(dx, dy, _)| {
            let x = usize::try_from(offset(self.x, dx)?).ok()?;
            let y = usize::try_from(offset(self.y, dy)?).ok()?;
            (x < Board::WIDTH && y < Board::HEIGHT).then_some((x, y))
        })
    }

    /// Moves the piece by `(dx, dy)` if the target placement is free.
    ///
    /// A colliding move straight down (`dx == 0 && dy > 0`) reports
    /// [`MoveOutcome::Landed`]; any other colliding move reports
    /// [`MoveOutcome::Blocked`]. The piece is unchanged in both cases.
    pub fn try_move(&mut self, board: &Board, dx: i32, dy: i32) -> MoveOutcome {
        if let (Some(x), Some(y)) = (self.x.checked_add(dx), self.y.checked_add(dy))
            && board.is_occupiable(&self.matrix, x, y)
        {
            self.x = x;
            self.y = y;
            return MoveOutcome::Moved;
        }
        if dx == 0 && dy > 0 {
            MoveOutcome::Landed
        } else {
            MoveOutcome::Blocked
        }
    }

    /// Rotates the piece 90° clockwise in place if the rotated shape fits at the
    /// current position. There are no wall kicks.
    pub fn try_rotate(&mut self, board: &Board) -> RotateOutcome {
        let rotated = self.matrix.rotated_right();
        if !board.is_occupiable(&rotated, self.x, self.y) {
            return RotateOutcome::Blocked;
        }
        self.matrix = rotated;
        RotateOutcome::Rotated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::Cell;

    #[test]
    fn test_spawn_positions() {
        let expected = [
            (ShapeKind::I, 3),
            (ShapeKind::O, 4),
            (ShapeKind::T, 3),
            (ShapeKind::L, 3),
            (ShapeKind::J, 3),
            (ShapeKind::S, 3),
            (ShapeKind::Z, 3),
        ];
        for (kind, x) in expected {
            let piece = ActivePiece::spawn(kind);
            assert_eq!((piece.x(), piece.y()), (x, 0), "{kind:?}");
            assert_eq!(piece.matrix(), &kind.matrix());
        }
    }

    #[test]
    fn test_move_sideways() {
        let board = Board::EMPTY;
        let mut piece = ActivePiece::spawn(ShapeKind::T);

        assert_eq!(piece.try_move(&board, -1, 0), MoveOutcome::Moved);
        assert_eq!(piece.x(), 2);
        assert_eq!(piece.try_move(&board, 1, 0), MoveOutcome::Moved);
        assert_eq!(piece.try_move(&board, 1, 0), MoveOutcome::Moved);
        assert_eq!(piece.x(), 4);
    }

    #[test]
    fn test_move_left_at_wall_is_blocked() {
        let board = Board::EMPTY;
        let mut piece = ActivePiece::at(ShapeKind::I, 0, 5);
        let before = piece.clone();

        assert_eq!(piece.try_move(&board, -1, 0), MoveOutcome::Blocked);
        assert_eq!(piece, before);
    }

    #[test]
    fn test_move_right_into_locked_cell_is_blocked() {
        let mut board = Board::EMPTY;
        board.fill_cell(5, 1, Cell::Shape(ShapeKind::Z));
        let mut piece = ActivePiece::at(ShapeKind::O, 3, 0);

        assert_eq!(piece.try_move(&board, 1, 0), MoveOutcome::Blocked);
        assert_eq!(piece.x(), 3);
    }

    #[test]
    fn test_move_down_onto_floor_lands() {
        let board = Board::EMPTY;
        let mut piece = ActivePiece::at(ShapeKind::O, 4, 17);

        assert_eq!(piece.try_move(&board, 0, 1), MoveOutcome::Moved);
        assert_eq!(piece.y(), 18);
        assert_eq!(piece.try_move(&board, 0, 1), MoveOutcome::Landed);
        assert_eq!(piece.y(), 18);
    }

    #[test]
    fn test_move_down_onto_stack_lands() {
        let mut board = Board::EMPTY;
        board.fill_cell(4, 10, Cell::Shape(ShapeKind::I));
        let mut piece = ActivePiece::at(ShapeKind::T, 3, 8);

        assert_eq!(piece.try_move(&board, 0, 1), MoveOutcome::Landed);
        assert_eq!((piece.x(), piece.y()), (3, 8));
    }

    #[test]
    fn test_position_fits_after_successful_move() {
        let mut board = Board::EMPTY;
        board.fill_cell(0, 19, Cell::Shape(ShapeKind::J));
        board.fill_cell(9, 19, Cell::Shape(ShapeKind::J));
        for kind in ShapeKind::ALL {
            let mut piece = ActivePiece::spawn(kind);
            for (dx, dy) in [(-1, 0), (0, 1), (1, 0), (0, 1), (-1, 0)] {
                if piece.try_move(&board, dx, dy).is_moved() {
                    assert!(piece.fits(&board), "{kind:?} at ({}, {})", piece.x(), piece.y());
                }
            }
        }
    }

    #[test]
    fn test_rotate() {
        let board = Board::EMPTY;
        let mut piece = ActivePiece::at(ShapeKind::I, 3, 5);

        assert_eq!(piece.try_rotate(&board), RotateOutcome::Rotated);
        assert_eq!((piece.matrix().width(), piece.matrix().height()), (1, 4));
        assert_eq!((piece.x(), piece.y()), (3, 5));
    }

    #[test]
    fn test_rotate_blocked_by_wall_has_no_kick() {
        let board = Board::EMPTY;
        // Vertical I in the last column: rotating back to horizontal would stick out.
        let mut piece = ActivePiece::at(ShapeKind::I, 9, 5);
        piece.matrix = piece.matrix.rotated_right();
        let before = piece.clone();

        assert_eq!(piece.try_rotate(&board), RotateOutcome::Blocked);
        assert_eq!(piece, before);
    }

    #[test]
    fn test_rotate_blocked_by_floor() {
        let board = Board::EMPTY;
        let mut piece = ActivePiece::at(ShapeKind::I, 3, 19);
        assert!(piece.try_rotate(&board).is_blocked());
        assert_eq!(piece.matrix(), &ShapeKind::I.matrix());
    }

    #[test]
    fn test_occupied_positions() {
        let piece = ActivePiece::at(ShapeKind::S, 2, 7);
        let positions: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(positions, vec![(3, 7), (4, 7), (2, 8), (3, 8)]);
    }

    #[test]
    fn test_occupied_positions_skip_cells_above_grid() {
        let mut piece = ActivePiece::at(ShapeKind::I, 3, -2);
        piece.matrix = piece.matrix.rotated_right();
        let positions: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(positions, vec![(3, 0), (3, 1)]);
    }

    #[test]
    fn test_move_by_extreme_offset_does_not_overflow() {
        let board = Board::EMPTY;
        let mut piece = ActivePiece::at(ShapeKind::O, i32::MAX - 1, 5);
        let before = piece.clone();

        assert_eq!(piece.try_move(&board, i32::MAX, 0), MoveOutcome::Blocked);
        assert_eq!(piece.try_move(&board, 0, i32::MAX), MoveOutcome::Landed);
        assert_eq!(piece.try_move(&board, i32::MIN, 0), MoveOutcome::Blocked);
        assert_eq!(piece, before);

        let mut piece = ActivePiece::at(ShapeKind::O, 4, i32::MAX);
        assert_eq!(piece.try_move(&board, 0, 1), MoveOutcome::Landed);
        assert_eq!(piece.y(), i32::MAX);
    }
}
