//! Game logic built on top of the core data structures.
//!
//! - [`ActivePiece`] - The falling piece with collision-checked movement and rotation
//! - [`PieceQueue`] - Seeded lookahead of the next three shapes
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`Progression`] - Score, cleared-row count, and drop speed
//! - [`GameSession`] - The running game that ties everything together
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`], optionally with a [`PieceSeed`]
//! 2. Feed it elapsed frame time with [`GameSession::tick`] and player input
//!    with [`GameSession::handle_input`]
//! 3. A piece that cannot move down is locked, the next one spawns, and full
//!    rows are cleared
//! 4. Repeat until a spawned piece collides, then [`GameSession::reset`]
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{GameSession, InputCommand, PieceSeed};
//!
//! let mut session = GameSession::with_seed(PieceSeed::from_bytes([1; 16]));
//!
//! while session.state().is_running() {
//!     if let Some(report) = session.handle_input(InputCommand::SoftDrop) {
//!         if report.topped_out {
//!             println!("Game over!");
//!         }
//!     }
//!     session.tick(Duration::from_millis(16));
//! }
//! ```

pub use self::{active_piece::*, game_session::*, piece_queue::*, progression::*};

mod active_piece;
mod game_session;
mod piece_queue;
mod progression;
