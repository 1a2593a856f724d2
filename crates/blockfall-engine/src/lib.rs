pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when a shape matrix cannot be used on the board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape matrix has no cells")]
    Empty,
    #[display("shape matrix row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[display("invalid cell identifier {id} (expected 0..=7)")]
    InvalidCell { id: u8 },
    #[display("shape matrix is {width} cells wide, board is only {board_width}")]
    TooWide { width: usize, board_width: usize },
}
