use blockfall_engine::{ShapeKind, ShapeMatrix};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::BlockDisplay;

/// A single shape in its spawn orientation, centered in a 4×3 box.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    matrix: Option<ShapeMatrix>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    /// Widest and tallest catalog shape, in cells.
    pub const MAX_SIZE: (u16, u16) = (4, 3);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn piece(self, kind: ShapeKind) -> Self {
        Self {
            matrix: Some(kind.matrix()),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        Self::MAX_SIZE.0 * BlockDisplay::width()
            + super::block_margin(self.block.as_ref()).width
    }

    pub fn height(&self) -> u16 {
        Self::MAX_SIZE.1 * BlockDisplay::height()
            + super::block_margin(self.block.as_ref()).height
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(matrix) = &self.matrix else {
            return;
        };
        let (Ok(cols), Ok(rows)) = (u16::try_from(matrix.width()), u16::try_from(matrix.height()))
        else {
            return;
        };
        let piece_area = area.centered(
            Constraint::Length(cols * BlockDisplay::width()),
            Constraint::Length(rows * BlockDisplay::height()),
        );

        let col_constraints = (0..cols).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..rows).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                let cell = matrix.get(x, y).unwrap_or_default();
                BlockDisplay::from_cell(cell, false).render(grid_cell, buf);
            }
        }
    }
}
