use blockfall_engine::{GameSession, PieceSeed};

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence, as 32 hex characters
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Frames per second for gravity ticks and rendering
    #[clap(long, default_value_t = PlayArg::DEFAULT_FPS)]
    fps: u16,
}

impl PlayArg {
    const DEFAULT_FPS: u16 = 60;
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            fps: Self::DEFAULT_FPS,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed, fps } = arg;
    anyhow::ensure!(*fps > 0, "--fps must be at least 1");

    let session = seed.map_or_else(GameSession::new, GameSession::with_seed);
    let mut app = PlayApp::new(session, *fps);
    Tui::new().run(&mut app)?;

    let progression = app.session().progression();
    println!(
        "score: {}, lines: {}",
        progression.score(),
        progression.total_cleared_rows()
    );
    Ok(())
}
