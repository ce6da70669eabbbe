use std::io::{stdout, BufWriter, Write};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_invader::compute::Game;
use space_invader::config::GameConfig;
use space_invader::display::TerminalSurface;
use space_invader::entities::{Bounds, Difficulty, SessionSummary};
use space_invader::input::{read_keys, ControlState};
use space_invader::pacer::SystemClock;

#[derive(Parser)]
#[command(name = "space_invader")]
#[command(about = "Terminal space shooter: survive as many enemy rounds as you can")]
struct Args {
    /// Difficulty: 0 (easy), 1 (middle), 2 (hard), 3 (extremely hard); clamped
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    level: i64,

    /// Seed for enemy spawning and AI (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second; overrides SPACE_INVADER_FPS
    #[arg(long)]
    fps: Option<u32>,
}

fn main() -> Result<()> {
    // Logs go to stderr so they never land on the game screen; redirect with 2>file.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = GameConfig::from_env();
    if let Some(fps) = args.fps {
        config.fps = fps.max(1);
    }
    let difficulty = Difficulty::from_level(args.level);
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Terminals speaking the kitty keyboard protocol report key releases;
    // everywhere else held keys time out in the reader thread instead.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    let controls = Arc::new(ControlState::new());
    let reader = {
        let controls = Arc::clone(&controls);
        thread::spawn(move || read_keys(controls, keyboard_enhanced))
    };

    let result = play(&mut out, config, difficulty, rng, Arc::clone(&controls));

    // Stop the reader before handing the terminal back
    controls.request_exit();
    let _ = reader.join();

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let summary = result?;
    println!("\nThanks for playing Space Invader!");
    println!("{summary}");
    println!();
    Ok(())
}

fn play<W: Write>(
    out: &mut W,
    config: GameConfig,
    difficulty: Difficulty,
    rng: StdRng,
    controls: Arc<ControlState>,
) -> Result<SessionSummary> {
    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    let bounds = Bounds::new(i32::from(cols) - 1, i32::from(rows) - 1);
    tracing::info!(?difficulty, cols, rows, "starting game");

    let mut surface = TerminalSurface::new(out, bounds);
    surface.clear().context("failed to clear screen")?;

    let mut game = Game::new(config, bounds, difficulty, controls, rng, SystemClock::new());
    game.run(&mut surface).context("failed to draw frame")
}
