//! Ratatui widgets for drawing a [`blockfall_engine::GameSession`].

use ratatui::{
    layout::{Rect, Size},
    widgets::Block as BlockWidget,
};

pub use self::{
    block_display::*, board_display::*, next_pieces_display::*, piece_display::*,
    session_display::*, session_stats_display::*,
};

mod block_display;
mod board_display;
mod next_pieces_display;
mod piece_display;
mod session_display;
mod session_stats_display;

mod color {
    use blockfall_engine::ShapeKind;
    use ratatui::style::Color;

    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    pub const fn shape(kind: ShapeKind) -> Color {
        match kind {
            ShapeKind::I => Color::Rgb(0, 255, 255),
            ShapeKind::O => YELLOW,
            ShapeKind::T => Color::Rgb(255, 0, 255),
            ShapeKind::L => Color::Rgb(255, 127, 0),
            ShapeKind::J => Color::Rgb(0, 0, 255),
            ShapeKind::S => Color::Rgb(0, 255, 0),
            ShapeKind::Z => RED,
        }
    }
}

mod style {
    use ratatui::style::Style;

    use crate::view::widgets::color;

    pub const DEFAULT: Style = Style::new().fg(color::WHITE).bg(color::BLACK);
    pub const EMPTY_DOT: Style = Style::new().fg(color::GRAY).bg(color::BLACK);
}

/// Space taken by an optional surrounding block's borders and padding.
fn block_margin(block: Option<&BlockWidget>) -> Size {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(outer, |block| block.inner(outer));
    Size::new(outer.width - inner.width, outer.height - inner.height)
}
