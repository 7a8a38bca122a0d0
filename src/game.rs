use std::io::{self, Write};
use std::time::{Duration, Instant};
use crossterm::event::{self, Event};
use log::{debug, error, info};

use crate::constants::*;
use crate::rendering::{GameGrid, OutputTarget};
use crate::session::{GameSession, RunHistory};
use crate::terminal_io::{SimulatedInput, signal_for_event};
use crate::types::{Control, GamePhase};

pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    session: GameSession,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        session: GameSession,
        simulated_input: Option<SimulatedInput>,
        debug_mode_active: bool,
        max_frames: Option<u64>,
    ) -> Self {
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            session,
            simulated_input,
            debug_mode_active,
            max_frames,
        }
    }

    /// Runs frames until quit (or the frame limit) and hands back the
    /// history of every session played.
    pub fn run(&mut self) -> io::Result<RunHistory> {
        let mut game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
        let mut frame_count: u64 = 0;
        let mut last_phase = self.session.phase();

        while self.max_frames.is_none_or(|max| frame_count < max) {
            let frame_start = Instant::now();
            let frame_budget = Duration::from_millis(self.session.frame_delay() + FRAME_DELAY_PADDING_MS);

            if self.handle_input(frame_count, frame_start, frame_budget)? == Control::Exit {
                info!("Quit at frame {}", frame_count);
                break;
            }

            let events = self.session.tick();
            if events.scored {
                debug!("Frame {}: score {}", frame_count, self.session.score());
            }
            if events.landed {
                debug!("Frame {}: bird at rest", frame_count);
            }

            if game_grid.width != self.terminal_width || game_grid.height != self.terminal_height {
                game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
            }

            if events.collided && !self.debug_mode_active {
                self.flash(&mut game_grid)?;
            }

            self.draw(&mut game_grid);
            self.render(&game_grid)?;

            let phase = self.session.phase();
            if phase != last_phase {
                info!("Phase {:?} -> {:?} at frame {}", last_phase, phase, frame_count);
                last_phase = phase;
            }
            frame_count += 1;
        }

        Ok(self.session.history())
    }

    fn handle_input(&mut self, frame_count: u64, frame_start: Instant, frame_budget: Duration) -> io::Result<Control> {
        if self.debug_mode_active {
            if let Some(sim_input) = &mut self.simulated_input {
                if sim_input.poll(frame_count)? {
                    let event = sim_input.read()?;
                    return Ok(self.apply_event(&event));
                }
            }
            return Ok(Control::Continue);
        }

        // The frame delay is spent waiting on input.
        while let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
            if !event::poll(remaining).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
                break;
            }
            let event = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?;
            if self.apply_event(&event) == Control::Exit {
                return Ok(Control::Exit);
            }
        }
        Ok(Control::Continue)
    }

    fn apply_event(&mut self, event: &Event) -> Control {
        if let Event::Resize(new_width, new_height) = *event {
            info!("Terminal resized to {}x{}", new_width, new_height);
            self.terminal_width = new_width;
            self.terminal_height = new_height;
            return Control::Continue;
        }
        match signal_for_event(event) {
            Some(signal) => self.session.handle_input(signal),
            None => Control::Continue,
        }
    }

    fn draw(&self, game_grid: &mut GameGrid) {
        let session = &self.session;
        let sprites = session.sprites();
        game_grid.clear();

        for pipe in session.pipes() {
            pipe.draw(game_grid, sprites);
        }
        session.base().draw(game_grid);
        session.bird().draw(game_grid, sprites);

        let highest_label = format!("Highest Score: {}", session.history().highest_score);
        let score_label = format!("Score: {}", session.score());
        game_grid.write_str_right(0, &highest_label, LABEL_MARGIN);
        game_grid.write_str_right(1, &score_label, LABEL_MARGIN);

        if session.phase() == GamePhase::NotStarted {
            let row = game_grid.row_for_world_y(START_LABEL_Y);
            game_grid.write_str_centered(row, "Press Space to Start");
        }
        if session.awaiting_restart() {
            let exit_row = game_grid.row_for_world_y(EXIT_LABEL_Y);
            let restart_row = game_grid.row_for_world_y(RESTART_LABEL_Y);
            game_grid.write_str_centered(exit_row, "Press Esc to Exit");
            game_grid.write_str_centered(restart_row, "Press Space to Restart");
        }
    }

    fn render(&mut self, game_grid: &GameGrid) -> io::Result<()> {
        game_grid.render(&mut self.stdout_target)?;
        self.stdout_target.flush()?;
        if let OutputTarget::ScreenBuffer(ref sb) = self.stdout_target {
            sb.print_to_log();
        }
        Ok(())
    }

    fn flash(&mut self, game_grid: &mut GameGrid) -> io::Result<()> {
        game_grid.fill(FLASH_CHAR);
        self.render(game_grid)?;
        std::thread::sleep(Duration::from_millis(FLASH_MS));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use crossterm::event::KeyCode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::difficulty::DifficultySchedule;
    use crate::rendering::ScreenBuffer;
    use crate::sprites::Sprites;

    fn headless(script: HashMap<u64, Event>, max_frames: Option<u64>) -> Game {
        let session = GameSession::new(Sprites::load().unwrap(), DifficultySchedule::default(), StdRng::seed_from_u64(1));
        Game::new(
            60,
            40,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(60, 40)),
            session,
            Some(SimulatedInput::new(script)),
            true,
            max_frames,
        )
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    fn screen(game: &Game) -> &ScreenBuffer {
        match &game.stdout_target {
            OutputTarget::ScreenBuffer(sb) => sb,
            OutputTarget::Stdout(_) => panic!("expected a screen buffer"),
        }
    }

    #[test]
    fn start_screen_shows_prompt_and_labels() {
        let mut game = headless(HashMap::from([(5, key(KeyCode::Char('q')))]), None);
        let history = game.run().unwrap();
        assert_eq!(history, RunHistory::default());

        let sb = screen(&game);
        assert!(sb.contains("Press Space to Start"));
        assert!(sb.row(0).ends_with("Highest Score: 0 "));
        assert!(sb.row(1).ends_with("Score: 0 "));
        assert!(sb.contains("@"));
        assert!(sb.row(39).contains('.') || sb.row(39).contains(':'));
        assert_eq!(game.session.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn single_jump_falls_to_the_end_prompt() {
        let mut game = headless(HashMap::from([(1, key(KeyCode::Char(' ')))]), Some(80));
        let history = game.run().unwrap();
        assert_eq!(history.runs, 1);
        assert!(game.session.awaiting_restart());

        let sb = screen(&game);
        assert!(sb.contains("Press Esc to Exit"));
        assert!(sb.contains("Press Space to Restart"));
        assert!(!sb.contains("Press Space to Start"));
    }

    #[test]
    fn restart_from_end_prompt() {
        let script = HashMap::from([(1, key(KeyCode::Up)), (70, key(KeyCode::Char(' ')))]);
        let mut game = headless(script, Some(72));
        game.run().unwrap();
        assert_eq!(game.session.phase(), GamePhase::NotStarted);
        assert!(screen(&game).contains("Press Space to Start"));
    }

    #[test]
    fn quit_stops_before_frame_limit() {
        let script = HashMap::from([(1, key(KeyCode::Char(' '))), (3, key(KeyCode::Esc))]);
        let mut game = headless(script, Some(1000));
        game.run().unwrap();
        assert_eq!(game.session.phase(), GamePhase::Running);
        assert!(game.session.bird().y < crate::constants::BIRD_START_Y);
    }
}
