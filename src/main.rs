mod audio;
mod display;
mod input;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use side_shooter::clock::MonotonicClock;
use side_shooter::{run, GameConfig, RunSummary, Session};

use audio::TerminalBell;
use display::TerminalRenderer;
use input::CrosstermInput;

/// Smallest terminal the HUD fits in.
const MIN_COLS: u16 = 60;
const MIN_ROWS: u16 = 16;

/// Side-scrolling arcade shooter for the terminal.
///
/// W/S or ↑/↓ move, SPACE fires, R reloads, ESC pauses, Q quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed for enemy waves; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Target frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Logical playfield width.
    #[arg(long, default_value_t = 800)]
    width: i32,

    /// Logical playfield height.
    #[arg(long, default_value_t = 600)]
    height: i32,

    /// Disable the terminal bell cues.
    #[arg(long)]
    mute: bool,

    /// Where log output goes; the terminal itself is taken by the game.
    #[arg(long, default_value = "side_shooter.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let config = GameConfig {
        fps: args.fps,
        ..GameConfig::with_screen(args.width, args.height)
    };
    config.validate().context("invalid game configuration")?;

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("seed {}", seed);

    let (cols, rows) = terminal::size().context("cannot query terminal size")?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        bail!("terminal is {cols}x{rows}, need at least {MIN_COLS}x{MIN_ROWS}");
    }

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("cannot enter raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    info!("keyboard enhancement: {}", keyboard_enhanced);

    let result = play(&mut out, cols, rows, config, seed, args.mute, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let summary = result?;
    println!(
        "Score: {}  (waves: {}, shots fired: {})",
        summary.score, summary.waves, summary.shots
    );
    Ok(())
}

fn play<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    config: GameConfig,
    seed: u64,
    mute: bool,
    keyboard_enhanced: bool,
) -> anyhow::Result<RunSummary> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (width, height) = (config.width, config.height);
    let mut session = Session::new(config, &mut rng)?;

    let mut renderer = TerminalRenderer::new(out, cols, rows, width, height);
    let mut input = CrosstermInput::spawn(keyboard_enhanced);
    let mut audio = TerminalBell::new(mute);
    let clock = MonotonicClock::new();

    let summary = run(&mut session, &mut renderer, &mut input, &mut audio, &clock, &mut rng)?;
    Ok(summary)
}
