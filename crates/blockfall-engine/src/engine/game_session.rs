use std::time::Duration;

use rand::Rng as _;
use serde::Serialize;

use crate::core::{
    board::Board,
    shape::{ShapeKind, ShapeMatrix},
};

use super::{
    active_piece::{ActivePiece, MoveOutcome},
    piece_queue::{PieceQueue, PieceSeed},
    progression::Progression,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum SessionState {
    Running,
    GameOver,
}

/// Player input accepted while the session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

/// Every command the session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Input(InputCommand),
    /// Advance gravity by the elapsed frame time.
    Tick(Duration),
    Reset,
}

impl From<InputCommand> for Command {
    fn from(input: InputCommand) -> Self {
        Self::Input(input)
    }
}

/// Outcome of locking a piece and spawning the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    /// Rows removed by the clearing pass that follows the spawn.
    pub cleared_rows: usize,
    /// Whether the drop interval was halved by this clear.
    pub sped_up: bool,
    /// Whether the new piece collided at its spawn position.
    pub topped_out: bool,
}

/// A running game: board, falling piece, lookahead queue, and progression.
///
/// The session is driven from outside. A frame driver calls [`Self::tick`] with
/// the elapsed time once per frame and forwards player input through
/// [`Self::handle_input`]; a renderer reads the state back through the
/// accessors or [`Self::snapshot`].
///
/// # Game Flow
///
/// 1. Gravity accumulates tick time and moves the piece down one row whenever
///    the accumulated time exceeds the drop interval
/// 2. A downward move that collides locks the piece into the board
/// 3. The next piece spawns from the queue, centered on row 0; if it collides
///    there, the session is over
/// 4. Full rows are cleared and scored
///
/// Only [`Command::Reset`] has an effect once the session is over.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{GameSession, InputCommand};
///
/// let mut session = GameSession::new();
/// session.handle_input(InputCommand::MoveLeft);
/// session.handle_input(InputCommand::Rotate);
///
/// // Nothing happens until the accumulated time exceeds the drop interval.
/// session.tick(Duration::from_millis(600));
/// assert_eq!(session.active_piece().y(), 0);
/// session.tick(Duration::from_millis(600));
/// assert_eq!(session.active_piece().y(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active_piece: ActivePiece,
    queue: PieceQueue,
    progression: Progression,
    state: SessionState,
    drop_counter: Duration,
    elapsed: Duration,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a running session with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut queue = PieceQueue::with_seed(seed);
        let active_piece = ActivePiece::spawn(queue.advance());
        log::debug!("new session with seed {seed}");
        Self {
            board: Board::EMPTY,
            active_piece,
            queue,
            progression: Progression::new(),
            state: SessionState::Running,
            drop_counter: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        &self.active_piece
    }

    /// Returns the next shapes to spawn, head first.
    pub fn upcoming(&self) -> impl ExactSizeIterator<Item = ShapeKind> + '_ {
        self.queue.upcoming()
    }

    #[must_use]
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Total tick time received while running.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Applies any command. Returns a report if a piece was locked.
    pub fn apply(&mut self, command: Command) -> Option<LockReport> {
        match command {
            Command::Input(input) => self.handle_input(input),
            Command::Tick(dt) => self.tick(dt),
            Command::Reset => {
                self.reset();
                None
            }
        }
    }

    /// Advances gravity by `dt`. Returns a report if a piece was locked.
    ///
    /// When the accumulated time exceeds the drop interval, the piece moves down
    /// one row (locking it if it cannot) and the accumulator restarts at zero.
    pub fn tick(&mut self, dt: Duration) -> Option<LockReport> {
        if self.state.is_game_over() {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        self.drop_counter = self.drop_counter.saturating_add(dt);
        if self.drop_counter <= self.progression.drop_interval() {
            return None;
        }
        self.drop_counter = Duration::ZERO;
        self.step_down()
    }

    /// Applies player input. Returns a report if a soft drop locked the piece.
    pub fn handle_input(&mut self, input: InputCommand) -> Option<LockReport> {
        if self.state.is_game_over() {
            return None;
        }
        match input {
            InputCommand::MoveLeft => {
                self.active_piece.try_move(&self.board, -1, 0);
            }
            InputCommand::MoveRight => {
                self.active_piece.try_move(&self.board, 1, 0);
            }
            InputCommand::SoftDrop => return self.step_down(),
            InputCommand::Rotate => {
                self.active_piece.try_rotate(&self.board);
            }
        }
        None
    }

    /// Takes the next shape from the queue and makes it the active piece.
    ///
    /// If the new piece collides at its spawn position the session is over.
    /// Full rows are cleared and scored afterwards in either case.
    pub fn spawn_next(&mut self) -> LockReport {
        self.active_piece = ActivePiece::spawn(self.queue.advance());

        let topped_out = !self.active_piece.fits(&self.board);
        if topped_out {
            self.state = SessionState::GameOver;
            log::info!(
                "game over: {:?} blocked at spawn, score {}",
                self.active_piece.kind(),
                self.progression.score()
            );
        }

        let cleared_rows = self.board.clear_full_rows();
        if cleared_rows > 0 {
            log::debug!("cleared {cleared_rows} rows");
        }
        let sped_up = self.progression.apply_line_clear(cleared_rows);

        LockReport {
            cleared_rows,
            sped_up,
            topped_out,
        }
    }

    /// Starts over with an empty board, fresh progression, and a refilled queue.
    pub fn reset(&mut self) {
        self.board.clear();
        self.progression = Progression::new();
        self.queue.refill();
        self.drop_counter = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        self.state = SessionState::Running;
        self.spawn_next();
        log::info!("session reset");
    }

    /// Returns an owned copy of everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self
                .board
                .rows()
                .map(|row| row.iter().map(|cell| cell.id()).collect())
                .collect(),
            active_piece: PieceSnapshot {
                kind: self.active_piece.kind(),
                matrix: self.active_piece.matrix().clone(),
                x: self.active_piece.x(),
                y: self.active_piece.y(),
            },
            upcoming: self.queue.upcoming().collect(),
            score: self.progression.score(),
            total_cleared_rows: self.progression.total_cleared_rows(),
            drop_interval_ms: self.progression.drop_interval().as_secs_f64() * 1000.0,
            state: self.state,
        }
    }

    fn step_down(&mut self) -> Option<LockReport> {
        match self.active_piece.try_move(&self.board, 0, 1) {
            MoveOutcome::Moved | MoveOutcome::Blocked => None,
            MoveOutcome::Landed => Some(self.lock_active_piece()),
        }
    }

    fn lock_active_piece(&mut self) -> LockReport {
        let piece = &self.active_piece;
        self.board.merge(piece.matrix(), piece.x(), piece.y());
        self.progression.record_lock();
        log::debug!(
            "locked {:?} at ({}, {})",
            piece.kind(),
            piece.x(),
            piece.y()
        );
        self.spawn_next()
    }
}

/// Read-only copy of the session state for renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Board rows, top to bottom, as cell identifiers (0 = empty).
    pub cells: Vec<Vec<u8>>,
    pub active_piece: PieceSnapshot,
    pub upcoming: Vec<ShapeKind>,
    pub score: u64,
    pub total_cleared_rows: u64,
    pub drop_interval_ms: f64,
    pub state: SessionState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub matrix: ShapeMatrix,
    pub x: i32,
    pub y: i32,
}
