use std::time::Duration;

use blockfall_engine::{GameSession, InputCommand, PieceSeed};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

const INPUTS: [InputCommand; 4] = [
    InputCommand::MoveLeft,
    InputCommand::MoveRight,
    InputCommand::SoftDrop,
    InputCommand::Rotate,
];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed for pieces and inputs, as 32 hex characters
    #[clap(long)]
    pub(super) seed: Option<PieceSeed>,
    /// Number of frames to simulate (stops early on game over)
    #[clap(long, default_value_t = 3600)]
    pub(super) frames: u32,
    /// Simulated time per frame in milliseconds
    #[clap(long, default_value_t = 16)]
    frame_ms: u64,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        frames,
        frame_ms,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("simulating {frames} frames with seed {seed}");
    let session = simulate(seed, *frames, Duration::from_millis(*frame_ms));

    let snapshot = serde_json::to_string_pretty(&session.snapshot())?;
    println!("{snapshot}");
    Ok(())
}

/// Plays up to `frames` frames, pressing a random key on roughly half of them.
fn simulate(seed: PieceSeed, frames: u32, frame_duration: Duration) -> GameSession {
    let mut session = GameSession::with_seed(seed);
    let mut rng = Pcg32::from_seed(seed.to_bytes());

    for frame in 0..frames {
        if let Some(input) = INPUTS.get(rng.random_range(0..INPUTS.len() * 2)) {
            session.handle_input(*input);
        }
        session.tick(frame_duration);
        if session.state().is_game_over() {
            log::info!("game over after {} frames", frame + 1);
            break;
        }
    }
    session
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([9; 16]);

    #[test]
    fn test_simulation_is_deterministic() {
        let frame = Duration::from_millis(16);
        let session1 = simulate(SEED, 2000, frame);
        let session2 = simulate(SEED, 2000, frame);
        assert_eq!(session1.snapshot(), session2.snapshot());
    }

    #[test]
    fn test_zero_frames_leaves_fresh_session() {
        let session = simulate(SEED, 0, Duration::from_millis(16));
        assert_eq!(session.snapshot(), GameSession::with_seed(SEED).snapshot());
    }

    #[test]
    fn test_simulation_locks_pieces() {
        let session = simulate(SEED, 5000, Duration::from_millis(100));
        assert!(session.progression().locked_pieces() > 0);
    }
}
