use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use space_war::assets::Assets;
use space_war::audio::{AudioSink, Mute, TerminalBell};
use space_war::config::Config;
use space_war::display::{self, Viewport};
use space_war::entities::GameEvent;
use space_war::input::KeyTracker;
use space_war::state::Game;
use space_war::storage::HighScoreFile;

#[derive(Parser, Debug)]
#[command(name = "space_war")]
#[command(about = "Two-player vertical shooter for the terminal")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Seed for enemy placement and fire timing
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Where the high score is kept
    #[arg(long)]
    highscore_file: Option<PathBuf>,

    /// Directory holding text-art sprites
    #[arg(long)]
    assets: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(fps) = self.fps {
            config.frame_rate = fps;
        }
        if self.mute {
            config.sound = false;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.log_file.is_some() {
            config.log_file = self.log_file;
        }
        if let Some(path) = self.highscore_file {
            config.highscore_file = path;
        }
        if let Some(dir) = self.assets {
            config.asset_dir = dir;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

struct Host<'a> {
    game: Game,
    assets: &'a Assets,
    store: &'a HighScoreFile,
    audio: Box<dyn AudioSink>,
    tracker: KeyTracker,
    frame_budget: Duration,
}

impl Host<'_> {
    /// Runs until the player quits. Each iteration drains input, advances the
    /// game, dispatches its side effects and draws the result.
    fn run<W: Write>(&mut self, out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<()> {
        let clock = Instant::now();
        let mut last_ms = 0.0;
        let mut frame: u64 = 0;

        loop {
            let frame_start = Instant::now();
            frame += 1;
            let now = clock.elapsed().as_secs_f64() * 1000.0;

            while let Ok(event) = rx.try_recv() {
                let Event::Key(key) = event else {
                    continue;
                };
                if key.kind == KeyEventKind::Press && is_quit(&key) {
                    return Ok(());
                }
                if let Some(action) = self.tracker.on_event(&key, frame) {
                    self.game.handle_action(action, now);
                }
            }

            // No clamp on dt: a long stall produces a burst of spawns on resume.
            let dt = (now - last_ms) / 1000.0;
            last_ms = now;
            let keys = self.tracker.held(frame);
            self.game.advance(now, dt, &keys);

            for event in self.game.drain_events() {
                match event {
                    GameEvent::Sound(cue) => self.audio.play(cue),
                    GameEvent::HighScore(score) => self.store.save(score),
                }
            }

            let (cols, rows) = terminal::size()?;
            display::render(out, &self.game.snapshot(), self.assets, Viewport::new(cols, rows))?;

            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_budget {
                thread::sleep(self.frame_budget - elapsed);
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = Args::parse().into_config()?;
    init_logging(config.log_file.as_deref())?;

    let store = HighScoreFile::new(&config.highscore_file);
    // Every sprite slot resolves (loaded or fallback) before the first frame.
    let assets = Assets::load(&config.asset_dir);
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let audio: Box<dyn AudioSink> = if config.sound {
        Box::new(TerminalBell)
    } else {
        Box::new(Mute)
    };
    tracing::info!(?config, "starting");

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Terminals without the kitty protocol fall back to the hold window.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    // Dedicate a thread to blocking event reads so the frame loop never
    // blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let mut host = Host {
        game: Game::new(store.load(), rng),
        assets: &assets,
        store: &store,
        audio,
        tracker: KeyTracker::new(config.hold_window_frames, keyboard_enhanced),
        frame_budget: Duration::from_secs_f64(1.0 / f64::from(config.frame_rate)),
    };
    let result = host.run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
