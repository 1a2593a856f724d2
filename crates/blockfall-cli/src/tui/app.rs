use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// An application driven by [`Tui::run`].
///
/// The runner calls [`Self::start`] once, then dispatches events until
/// [`Self::is_finished`] returns `true`.
pub trait App {
    /// Configures tick rate and render mode before the first event.
    fn start(&mut self, tui: &mut Tui);

    fn is_finished(&self) -> bool;

    /// Handles key presses, resizes, and other terminal input.
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by `elapsed`, the time since the previous tick.
    fn tick(&mut self, tui: &mut Tui, elapsed: Duration);
}
