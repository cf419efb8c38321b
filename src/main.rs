//! BLOCKFALL - falling blocks in the terminal

mod input;
mod settings;
mod ui;

use blockfall::{EngineError, GameEngine, GameState, UniformSource};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use input::{Input, KeyMap};
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::{BoardSettings, Settings};
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use ui::HudInfo;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // Log to a file so the UI owns the terminal
    let log_dir = temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "blockfall=debug".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let mut settings = Settings::load();
    let mut game = new_engine(&settings)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut game, &mut settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if game.state() != GameState::GameOver {
        settings.add_score(game.score());
    }
    if let Err(e) = settings.save() {
        eprintln!("Warning: Could not save settings: {}", e);
    }

    if result.is_ok() {
        println!("\nThanks for playing BLOCKFALL!");
        println!("Final Score: {}", game.score());
    }
    result
}

/// Build the engine from settings, falling back to a standard board on bad dimensions
fn new_engine(settings: &Settings) -> Result<GameEngine, EngineError> {
    let source = match settings.gameplay.seed {
        Some(seed) => UniformSource::with_seed(seed),
        None => UniformSource::from_entropy(),
    };
    let (width, height) = (settings.board.width, settings.board.height);
    GameEngine::with_source(width, height, source.clone()).or_else(|e| {
        tracing::warn!("{}; using the default board", e);
        let defaults = BoardSettings::default();
        GameEngine::with_source(defaults.width, defaults.height, source)
    })
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut GameEngine,
    settings: &mut Settings,
) -> io::Result<()> {
    let keys = KeyMap::from_settings(settings);
    let gravity = Duration::from_millis(settings.gameplay.gravity_ms.max(1));
    let mut last_fall = Instant::now();
    let mut recorded = false;

    loop {
        let hud = HudInfo {
            best_score: settings.best_score(),
            keys: &settings.keys,
        };
        let snapshot = game.snapshot();
        terminal.draw(|frame| ui::render_game(frame, &snapshot, &hud))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match keys.map(key) {
                    Some(Input::Quit) => return Ok(()),
                    Some(Input::Restart) => {
                        if !recorded {
                            settings.add_score(game.score());
                        }
                        game.reset();
                        recorded = false;
                        last_fall = Instant::now();
                    }
                    Some(Input::Engine(command)) => {
                        let was_paused = game.state() == GameState::Paused;
                        game.apply(command);
                        if was_paused && game.state() == GameState::Running {
                            last_fall = Instant::now();
                        }
                    }
                    None => {}
                }
            }
        }

        // Gravity runs only while playing; the engine ignores ticks otherwise
        if game.state() == GameState::Running && last_fall.elapsed() >= gravity {
            let result = game.tick();
            if result.rows_cleared > 0 {
                tracing::debug!("tick cleared {} rows", result.rows_cleared);
            }
            last_fall = Instant::now();
        }

        if game.state() == GameState::GameOver && !recorded {
            settings.add_score(game.score());
            recorded = true;
        }
    }
}
