mod config;
mod constants;
mod difficulty;
mod entities;
mod game;
mod mask;
mod rendering;
mod session;
mod sprites;
mod terminal_io;
mod types;

use std::env;
use std::io::{self, Write};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::constants::{DEBUG_FLAP_PERIOD, DEBUG_QUIT_FRAME, LOG_FILE};
use crate::difficulty::DifficultySchedule;
use crate::game::Game;
use crate::rendering::{GameGrid, OutputTarget, ScreenBuffer};
use crate::session::{GameSession, RunHistory};
use crate::sprites::Sprites;
use crate::terminal_io::SimulatedInput;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = Config::from_args(&args);

    simple_logging::log_to_file(LOG_FILE, config.log_level())?;
    info!("Starting flappy-term: {:?}", config);

    let sprites = Sprites::load().map_err(|e| { error!("Failed to load sprites: {}", e); e })?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = GameSession::new(sprites, DifficultySchedule::default(), rng);

    let history = if config.debug {
        run_headless(&config, session)?
    } else {
        run_in_terminal(&config, session)?
    };

    info!("Exiting. Highest score {} over {} finished runs", history.highest_score, history.runs);
    Ok(())
}

fn run_headless(config: &Config, session: GameSession) -> io::Result<RunHistory> {
    info!("Debug mode enabled, {}x{}", config.width, config.height);
    let stdout_target = OutputTarget::ScreenBuffer(ScreenBuffer::new(config.width, config.height));
    let simulated_input = SimulatedInput::flap_script(DEBUG_FLAP_PERIOD, DEBUG_QUIT_FRAME);
    let mut game = Game::new(
        config.width,
        config.height,
        stdout_target,
        session,
        Some(simulated_input),
        true,
        config.max_frames,
    );
    game.run()
}

fn run_in_terminal(config: &Config, session: GameSession) -> io::Result<RunHistory> {
    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;

    let result = play(config, session);
    let restored = restore_terminal().map_err(|e| { error!("Failed to restore terminal: {}", e); e });
    let history = result?;
    restored?;
    Ok(history)
}

fn play(config: &Config, session: GameSession) -> io::Result<RunHistory> {
    let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", width, height);

    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    GameGrid::new(width, height)
        .clear_screen_manual(&mut stdout_target)
        .map_err(|e| { error!("Failed to clear screen: {}", e); e })?;
    stdout_target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    stdout_target.flush()?;

    let mut game = Game::new(width, height, stdout_target, session, None, false, config.max_frames);
    game.run()
}

fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0), Show)?;
    disable_raw_mode()
}
