//! BLOCKTRIS - a falling-block puzzle game for the terminal

mod board;
mod game;
mod input;
mod piece;
mod randomizer;
mod score;
mod settings;
mod tetromino;
mod timer;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::{Game, GameState};
use input::{Command, InputHandler};
use randomizer::UniformRandom;
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use timer::IntervalTimer;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Directory for log files
fn log_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blocktris");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // Log to a file; the terminal belongs to the game
    let log_dir = log_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blocktris=debug"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKTRIS starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    if Settings::settings_path().is_some_and(|path| !path.exists()) {
        if let Err(e) = settings.save() {
            tracing::warn!("Could not write default settings: {}", e);
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Ok(game) = &result {
        println!("\nThanks for playing BLOCKTRIS!");
        if game.state() != GameState::Idle {
            let score = game.score();
            println!("Final Score: {}", score.points);
            println!("Level: {} | Lines: {}", score.level, score.lines);
        }
    }

    result.map(|_| ())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> io::Result<Game> {
    let mut game = match settings.gameplay.seed {
        Some(seed) => {
            tracing::info!("Using fixed piece seed {}", seed);
            Game::with_source(IntervalTimer::new(), Box::new(UniformRandom::with_seed(seed)))
        }
        None => Game::default(),
    };
    let input = InputHandler::from_settings(settings);

    loop {
        terminal.draw(|frame| ui::render_game(frame, &game, settings))?;

        // Wait for input, but never past the next gravity tick
        let now = Instant::now();
        let timeout = game
            .scheduler_mut()
            .next_deadline()
            .map_or(FRAME_DURATION, |deadline| {
                deadline.saturating_duration_since(now).min(FRAME_DURATION)
            });

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let over = match input.key_down(key) {
                        Some(Command::Quit) => return Ok(game),
                        Some(Command::Start) => game.start(),
                        Some(Command::Play(action)) => game.process_action(action),
                        None => None,
                    };
                    if let Some(over) = over {
                        tracing::info!("Game over with score {}", over.final_score);
                    }
                }
            }
        }

        let fired = game.scheduler_mut().poll(Instant::now());
        for handle in fired {
            if let Some(over) = game.on_timer(handle) {
                tracing::info!("Game over with score {}", over.final_score);
            }
        }
    }
}
