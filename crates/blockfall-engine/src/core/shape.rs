use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::ShapeError;

use super::board::Board;

/// Enum representing the type of shape.
///
/// The discriminant is the identifier written into board cells when a piece of
/// this shape locks (`0` is reserved for empty cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-shape.
    I = 1,
    /// O-shape.
    O = 2,
    /// T-shape.
    T = 3,
    /// L-shape.
    L = 4,
    /// J-shape.
    J = 5,
    /// S-shape.
    S = 6,
    /// Z-shape.
    Z = 7,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape types (7).
    pub const LEN: usize = 7;

    /// All shapes in identifier order.
    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::O,
        Self::T,
        Self::L,
        Self::J,
        Self::S,
        Self::Z,
    ];

    /// Returns the cell identifier of this shape (1..=7).
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Looks up a shape by its cell identifier.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::I),
            2 => Some(Self::O),
            3 => Some(Self::T),
            4 => Some(Self::L),
            5 => Some(Self::J),
            6 => Some(Self::S),
            7 => Some(Self::Z),
            _ => None,
        }
    }

    /// Returns the single character representation of this shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::Z.as_char(), 'Z');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::I => 'I',
            Self::O => 'O',
            Self::T => 'T',
            Self::L => 'L',
            Self::J => 'J',
            Self::S => 'S',
            Self::Z => 'Z',
        }
    }

    /// Returns a fresh copy of this shape's spawn-orientation matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// let t = ShapeKind::T.matrix();
    /// assert_eq!((t.width(), t.height()), (3, 2));
    /// assert_eq!(t.to_ids(), vec![vec![0, 3, 0], vec![3, 3, 3]]);
    /// ```
    #[must_use]
    pub fn matrix(self) -> ShapeMatrix {
        let layout = SHAPE_LAYOUTS[self as usize - 1];
        let width = layout[0].len();
        let cells = layout
            .iter()
            .flat_map(|row| row.bytes())
            .map(|b| if b == b'#' { Cell::Shape(self) } else { Cell::Empty })
            .collect();
        ShapeMatrix {
            width,
            height: layout.len(),
            cells,
        }
    }
}

// Spawn orientations, indexed by `ShapeKind as usize - 1`.
const SHAPE_LAYOUTS: [&[&str]; ShapeKind::LEN] = [
    // I
    &["####"],
    // O
    &["##", "##"],
    // T
    &[".#.", "###"],
    // L
    &[".#.", ".#.", ".##"],
    // J
    &[".#.", ".#.", "##."],
    // S
    &[".##", "##."],
    // Z
    &["##.", ".##"],
];

/// A single cell of a shape matrix or of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a block of the given shape.
    Shape(ShapeKind),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// Returns the numeric cell value: `0` for empty, otherwise the shape identifier.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Shape(kind) => kind.id(),
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = ShapeError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        if id == 0 {
            return Ok(Self::Empty);
        }
        ShapeKind::from_id(id)
            .map(Self::Shape)
            .ok_or(ShapeError::InvalidCell { id })
    }
}

/// A shape's bounding box in one rotation state.
///
/// Stored row-major. Rotation never mutates a matrix in place: [`Self::rotated_right`]
/// builds a new one, so the catalog originals stay intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMatrix {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl ShapeMatrix {
    /// Builds a matrix from rows of cell identifiers.
    ///
    /// Fails if the matrix is empty or ragged, if an identifier is outside `0..=7`,
    /// or if either side exceeds the board width, since some rotation of such a
    /// matrix could never fit between the walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::{ShapeError, ShapeMatrix};
    ///
    /// let m = ShapeMatrix::from_ids(&[[0u8, 3, 0], [3, 3, 3]]).unwrap();
    /// assert_eq!(m.width(), 3);
    ///
    /// let too_wide = ShapeMatrix::from_ids(&[[1u8; 11]]);
    /// assert!(matches!(too_wide, Err(ShapeError::TooWide { .. })));
    /// ```
    pub fn from_ids<R>(rows: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[u8]>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 {
            return Err(ShapeError::Empty);
        }
        let extent = usize::max(width, height);
        if extent > Board::WIDTH {
            return Err(ShapeError::TooWide {
                width: extent,
                board_width: Board::WIDTH,
            });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ShapeError::Ragged {
                    row: row_index,
                    len: row.len(),
                    expected: width,
                });
            }
            for &id in row {
                cells.push(Cell::try_from(id)?);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns of the bounding box.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows of the bounding box.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at column `x`, row `y`, or `None` outside the bounding box.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Iterates over occupied cells as `(x, y, cell)` relative to the top-left corner.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_occupied())
                .map(move |(x, &cell)| (x, y, cell))
        })
    }

    /// Returns a new matrix rotated 90° clockwise.
    ///
    /// For a matrix with `R` rows and `C` columns the result has `C` rows and `R`
    /// columns, with `rotated[i][j] = self[R - 1 - j][i]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// let i = ShapeKind::I.matrix().rotated_right();
    /// assert_eq!((i.width(), i.height()), (1, 4));
    /// ```
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        let (rows, cols) = (self.height, self.width);
        let mut cells = Vec::with_capacity(self.cells.len());
        for i in 0..cols {
            for j in 0..rows {
                cells.push(self.cells[(rows - 1 - j) * cols + i]);
            }
        }
        Self {
            width: rows,
            height: cols,
            cells,
        }
    }

    /// Returns the matrix as rows of numeric cell values.
    #[must_use]
    pub fn to_ids(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.id()).collect())
            .collect()
    }
}

impl Serialize for ShapeMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: rows of cell identifiers (e.g., [[0,3,0],[3,3,3]])
        serializer.collect_seq(self.to_ids())
    }
}

impl<'de> Deserialize<'de> for ShapeMatrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<Vec<u8>>::deserialize(deserializer)?;
        Self::from_ids(rows.as_slice()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matrices() {
        assert_eq!(ShapeKind::I.matrix().to_ids(), vec![vec![1, 1, 1, 1]]);
        assert_eq!(ShapeKind::O.matrix().to_ids(), vec![vec![2, 2], vec![2, 2]]);
        assert_eq!(
            ShapeKind::T.matrix().to_ids(),
            vec![vec![0, 3, 0], vec![3, 3, 3]]
        );
        assert_eq!(
            ShapeKind::L.matrix().to_ids(),
            vec![vec![0, 4, 0], vec![0, 4, 0], vec![0, 4, 4]]
        );
        assert_eq!(
            ShapeKind::J.matrix().to_ids(),
            vec![vec![0, 5, 0], vec![0, 5, 0], vec![5, 5, 0]]
        );
        assert_eq!(
            ShapeKind::S.matrix().to_ids(),
            vec![vec![0, 6, 6], vec![6, 6, 0]]
        );
        assert_eq!(
            ShapeKind::Z.matrix().to_ids(),
            vec![vec![7, 7, 0], vec![0, 7, 7]]
        );
    }

    #[test]
    fn test_every_shape_has_four_blocks() {
        for kind in ShapeKind::ALL {
            let matrix = kind.matrix();
            assert_eq!(matrix.occupied_cells().count(), 4, "{kind:?}");
            assert!(
                matrix
                    .occupied_cells()
                    .all(|(_, _, cell)| cell == Cell::Shape(kind))
            );
        }
    }

    #[test]
    fn test_id_conversion() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_id(kind.id()), Some(kind));
            assert_eq!(Cell::try_from(kind.id()), Ok(Cell::Shape(kind)));
        }
        assert_eq!(ShapeKind::from_id(0), None);
        assert_eq!(ShapeKind::from_id(8), None);
        assert_eq!(Cell::try_from(0), Ok(Cell::Empty));
        assert_eq!(Cell::try_from(8), Err(ShapeError::InvalidCell { id: 8 }));
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = ShapeKind::T.matrix().rotated_right();
        assert_eq!(
            rotated.to_ids(),
            vec![vec![3, 0], vec![3, 3], vec![3, 0]]
        );
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let s = ShapeKind::S.matrix();
        let rotated = s.rotated_right();
        assert_eq!((rotated.width(), rotated.height()), (s.height(), s.width()));
        let i = ShapeKind::I.matrix().rotated_right();
        assert_eq!(i.to_ids(), vec![vec![1], vec![1], vec![1], vec![1]]);
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        for kind in ShapeKind::ALL {
            let original = kind.matrix();
            let mut matrix = original.clone();
            for step in 1..=4 {
                matrix = matrix.rotated_right();
                if step % 2 == 1 {
                    assert_eq!(matrix.width(), original.height());
                    assert_eq!(matrix.height(), original.width());
                }
            }
            assert_eq!(matrix, original, "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_does_not_touch_catalog() {
        let original = ShapeKind::L.matrix();
        let _ = original.rotated_right();
        assert_eq!(original, ShapeKind::L.matrix());
    }

    #[test]
    fn test_from_ids_errors() {
        let empty: [[u8; 0]; 0] = [];
        assert_eq!(ShapeMatrix::from_ids(&empty), Err(ShapeError::Empty));
        assert_eq!(
            ShapeMatrix::from_ids(&[vec![1u8, 1], vec![1]]),
            Err(ShapeError::Ragged {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            ShapeMatrix::from_ids(&[[0u8, 9]]),
            Err(ShapeError::InvalidCell { id: 9 })
        );
        assert_eq!(
            ShapeMatrix::from_ids(&[[1u8; 11]]),
            Err(ShapeError::TooWide {
                width: 11,
                board_width: Board::WIDTH
            })
        );
        // Tall matrices become too wide once rotated.
        assert!(matches!(
            ShapeMatrix::from_ids(&[[1u8]; 11]),
            Err(ShapeError::TooWide { width: 11, .. })
        ));
    }

    #[test]
    fn test_from_ids_matches_catalog() {
        let m = ShapeMatrix::from_ids(&[[7u8, 7, 0], [0, 7, 7]]).unwrap();
        assert_eq!(m, ShapeKind::Z.matrix());
        assert_eq!(m.get(2, 1), Some(Cell::Shape(ShapeKind::Z)));
        assert_eq!(m.get(2, 0), Some(Cell::Empty));
        assert_eq!(m.get(3, 0), None);
    }

    #[test]
    fn test_matrix_serialization() {
        let matrix = ShapeKind::S.matrix();
        let serialized = serde_json::to_string(&matrix).unwrap();
        assert_eq!(serialized, "[[0,6,6],[6,6,0]]");

        let deserialized: ShapeMatrix = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, matrix);

        assert!(serde_json::from_str::<ShapeMatrix>("[[0,6],[6]]").is_err());
        assert!(serde_json::from_str::<ShapeMatrix>("[[0,42]]").is_err());
    }

    #[test]
    fn test_shape_kind_char() {
        let chars: String = ShapeKind::ALL.iter().map(|k| k.as_char()).collect();
        assert_eq!(chars, "IOTLJSZ");
    }
}
