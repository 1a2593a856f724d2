use std::iter;

use blockfall_engine::{GameSession, PieceQueue, ShapeKind};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::PieceDisplay;

/// The NEXT panel: one slot per queued shape, head at the top, with a blank
/// line between slots.
#[derive(Debug)]
pub struct NextPiecesDisplay<'a> {
    upcoming: [Option<ShapeKind>; PieceQueue::LEN],
    block: Option<BlockWidget<'a>>,
}

impl<'a> NextPiecesDisplay<'a> {
    pub fn new(session: &GameSession) -> Self {
        let mut upcoming = [None; PieceQueue::LEN];
        for (slot, kind) in iter::zip(&mut upcoming, session.upcoming()) {
            *slot = Some(kind);
        }
        Self {
            upcoming,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        PieceDisplay::new().width() + super::block_margin(self.block.as_ref()).width
    }

    pub fn height(&self) -> u16 {
        let slot_height = PieceDisplay::new().height();
        let slots: u16 = self.upcoming.iter().map(|_| slot_height + 1).sum();
        slots - 1 + super::block_margin(self.block.as_ref()).height
    }
}

impl Widget for NextPiecesDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &NextPiecesDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let slot = Constraint::Length(PieceDisplay::new().height());
        let layout = Layout::vertical([slot; PieceQueue::LEN]).flex(Flex::SpaceBetween);
        let slot_areas = area.layout::<{ PieceQueue::LEN }>(&layout);

        for (slot_area, kind) in iter::zip(slot_areas, self.upcoming) {
            let display = PieceDisplay::new();
            match kind {
                Some(kind) => display.piece(kind).render(slot_area, buf),
                None => display.render(slot_area, buf),
            }
        }
    }
}
