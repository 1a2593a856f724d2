use std::time::Duration;

use blockfall_engine::{GameSession, InputCommand, SessionState};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    tui::{App, RenderMode, Tui},
    view::widgets::SessionDisplay,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Input(InputCommand),
    Reset,
    TogglePause,
    Quit,
}

impl Action {
    fn from_key(code: KeyCode) -> Option<Self> {
        let action = match code {
            KeyCode::Left => Self::Input(InputCommand::MoveLeft),
            KeyCode::Right => Self::Input(InputCommand::MoveRight),
            KeyCode::Down => Self::Input(InputCommand::SoftDrop),
            KeyCode::Up => Self::Input(InputCommand::Rotate),
            KeyCode::Char('r') => Self::Reset,
            KeyCode::Char('p') => Self::TogglePause,
            KeyCode::Char('q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        Some(action)
    }
}

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    fps: u16,
    is_paused: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, fps: u16) -> Self {
        Self {
            session,
            fps,
            is_paused: false,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Runs the gravity clock at the configured rate, or stops it while paused.
    fn sync_clock(&self, tui: &mut Tui) {
        if self.is_paused {
            tui.set_tick_interval(None);
            tui.set_render_mode(RenderMode::OnDirty);
        } else {
            let fps = f64::from(self.fps);
            tui.set_tick_rate(fps);
            tui.set_render_mode(RenderMode::throttled_from_rate(fps));
        }
    }

    fn apply(&mut self, tui: &mut Tui, action: Action) {
        let is_running = self.session.state().is_running();
        match action {
            Action::Input(input) if is_running && !self.is_paused => {
                if let Some(report) = self.session.handle_input(input)
                    && report.cleared_rows > 0
                {
                    log::debug!("{input:?} cleared {} rows", report.cleared_rows);
                }
            }
            Action::TogglePause if is_running => {
                self.is_paused = !self.is_paused;
                self.sync_clock(tui);
            }
            Action::Input(_) | Action::TogglePause => {}
            Action::Reset => {
                self.session.reset();
                self.is_paused = false;
                self.sync_clock(tui);
            }
            Action::Quit => self.is_exiting = true,
        }
    }
}

impl App for PlayApp {
    fn start(&mut self, tui: &mut Tui) {
        self.sync_clock(tui);
    }

    fn is_finished(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        if let Event::Key(key_event) = event
            && key_event.kind == KeyEventKind::Press
            && let Some(action) = Action::from_key(key_event.code)
        {
            self.apply(tui, action);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session).paused(self.is_paused);
        let help_text = match (self.session.state(), self.is_paused) {
            (SessionState::Running, false) => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | P (Pause) | R (Reset) | Q (Quit)"
            }
            (SessionState::Running, true) => "Controls: P (Resume) | R (Reset) | Q (Quit)",
            (SessionState::GameOver, _) => "Controls: R (Reset) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(session_display.height()), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn tick(&mut self, _tui: &mut Tui, elapsed: Duration) {
        self.session.tick(elapsed);
    }
}
