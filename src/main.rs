mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
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

use space_invaders::compute::{
    init_state, move_ship_left, move_ship_right, ship_shoot, start_game, tick,
};
use space_invaders::config::Config;
use space_invaders::entities::GameStatus;
use space_invaders::view::Viewport;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many milliseconds.  Covers terminals that don't emit key-release
/// events: OS key-repeat refreshes the key well before it expires.
const HOLD_WINDOW_MS: u64 = 150;

const LEFT_KEYS: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const FIRE_KEYS: &[KeyCode] = &[KeyCode::Char(' ')];

/// Returns true if any of `keys` was seen within the last `HOLD_WINDOW_MS`.
fn any_held(key_seen: &HashMap<KeyCode, u64>, keys: &[KeyCode], now: u64) -> bool {
    keys.iter().any(|key| {
        key_seen
            .get(key)
            .map(|&last| now.saturating_sub(last) <= HOLD_WINDOW_MS)
            .unwrap_or(false)
    })
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Tracing goes to a file, if asked for: the terminal belongs to the game.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we keep a
/// `key_seen` map with the game-clock time of the last press/repeat event for
/// every key.  Each frame we check which keys are still "fresh" and apply all
/// their effects together, so Space and a direction can be held at once.
/// Screen changes (start, restart, quit) fire on the press itself.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let clock = Instant::now();
    let mut state = init_state(config.difficulty, config.world_width, config.world_height, rng);

    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, config.world_width, config.world_height);
    let mut key_seen: HashMap<KeyCode, u64> = HashMap::new();

    loop {
        let frame_start = Instant::now();
        let now = clock.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Resize(c, r) => {
                    view = Viewport::new(c, r, config.world_width, config.world_height);
                }
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_seen.insert(code, now);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char(' ') if state.status == GameStatus::Menu => {
                                state = start_game(&state, now);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if state.status == GameStatus::GameOver =>
                            {
                                state = start_game(&state, now);
                            }
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_seen.insert(code, now);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_seen.remove(&code);
                    }
                },
                _ => {}
            }
        }

        // ── Apply held-key actions every frame ────────────────────────────────
        if state.status == GameStatus::Playing {
            if any_held(&key_seen, LEFT_KEYS, now) {
                state = move_ship_left(&state);
            }
            if any_held(&key_seen, RIGHT_KEYS, now) {
                state = move_ship_right(&state);
            }
            if any_held(&key_seen, FIRE_KEYS, now) {
                state = ship_shoot(&state, now);
            }
        }

        state = tick(&state, now, rng);

        display::render(out, &state, &view, now)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_logging(config.log_file.as_deref())?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(
        difficulty = ?config.difficulty,
        seed = ?config.seed,
        world_width = config.world_width,
        world_height = config.world_height,
        "starting"
    );

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("failed to enter the alternate screen")?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, &config, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    tracing::info!("exiting");
    result.context("game loop failed")
}
