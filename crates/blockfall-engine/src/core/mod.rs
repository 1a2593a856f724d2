//! Core data structures: cells, the shape catalog, and the board grid.
//!
//! - [`ShapeKind`] - The seven catalog shapes and their cell identifiers
//! - [`Cell`] - A single grid cell, empty or occupied by a shape identifier
//! - [`ShapeMatrix`] - A shape's bounding-box matrix in one rotation state
//! - [`Board`] - The 10×20 occupancy grid with collision, merge, and row clearing

pub use self::{board::*, shape::*};

pub(crate) mod board;
pub(crate) mod shape;
