use log::{debug, info};
use rand::rngs::StdRng;

use crate::constants::*;
use crate::difficulty::DifficultySchedule;
use crate::entities::{Base, Bird, Pipe};
use crate::sprites::Sprites;
use crate::types::{Control, GamePhase, InputSignal, TickEvents};

/// Results that outlive a single session: the best score this process has
/// seen and how many sessions have ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunHistory {
    pub highest_score: u32,
    pub runs: u32,
}

impl RunHistory {
    pub fn record(&mut self, score: u32) {
        self.highest_score = self.highest_score.max(score);
    }
}

/// One play-through from "press space" to resting on the ground, plus the
/// restart back to the beginning.
pub struct GameSession {
    phase: GamePhase,
    resting: bool,
    score: u32,
    frame_delay: u64,
    bird: Bird,
    base: Base,
    pipes: Vec<Pipe>,
    sprites: Sprites,
    schedule: DifficultySchedule,
    rng: StdRng,
    history: RunHistory,
}

impl GameSession {
    pub fn new(sprites: Sprites, schedule: DifficultySchedule, rng: StdRng) -> Self {
        GameSession::with_history(sprites, schedule, rng, RunHistory::default())
    }

    pub fn with_history(sprites: Sprites, schedule: DifficultySchedule, mut rng: StdRng, history: RunHistory) -> Self {
        let first_pipe = Pipe::new(FIRST_PIPE_X, &mut rng, sprites.pipe_height());
        GameSession {
            phase: GamePhase::NotStarted,
            resting: false,
            score: 0,
            frame_delay: schedule.initial_delay(),
            bird: Bird::new(BIRD_START_X, BIRD_START_Y),
            base: Base::new(FLOOR, sprites.ground_width),
            pipes: vec![first_pipe],
            sprites,
            schedule,
            rng,
            history,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    /// Lost and the bird has come to rest: the end prompt is showing.
    pub fn awaiting_restart(&self) -> bool {
        self.phase == GamePhase::Lost && self.resting
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn frame_delay(&self) -> u64 {
        self.frame_delay
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn base(&self) -> &Base {
        &self.base
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn sprites(&self) -> &Sprites {
        &self.sprites
    }

    pub fn history(&self) -> RunHistory {
        self.history
    }

    pub fn handle_input(&mut self, signal: InputSignal) -> Control {
        match (signal, self.phase) {
            (InputSignal::Quit, _) => return Control::Exit,
            (InputSignal::Jump, GamePhase::NotStarted) => {
                self.phase = GamePhase::Running;
                self.bird.jump();
                info!("Session started (high score {})", self.history.highest_score);
            }
            (InputSignal::Jump, GamePhase::Running) => self.bird.jump(),
            (InputSignal::Jump, GamePhase::Lost) => {
                if self.resting {
                    self.restart();
                }
            }
        }
        Control::Continue
    }

    /// Back to a fresh, unstarted session. Only the history carries over.
    pub fn restart(&mut self) {
        info!("Restarting after score {}", self.score);
        self.phase = GamePhase::NotStarted;
        self.resting = false;
        self.score = 0;
        self.frame_delay = self.schedule.initial_delay();
        self.bird = Bird::new(BIRD_START_X, BIRD_START_Y);
        self.base = Base::new(FLOOR, self.sprites.ground_width);
        self.pipes = vec![Pipe::new(FIRST_PIPE_X, &mut self.rng, self.sprites.pipe_height())];
    }

    /// One simulation step. Input for this frame must already be applied.
    pub fn tick(&mut self) -> TickEvents {
        let mut events = TickEvents::default();

        if self.is_started() && !self.resting {
            self.bird.move_step();
        }

        if self.phase != GamePhase::Lost {
            self.base.move_step();
        }

        if self.phase == GamePhase::Running {
            let swept = self.sweep_pipes();
            events.scored = swept.scored;
            events.collided = swept.collided;
        }

        if !self.resting && self.bird.touches_floor(self.sprites.bird_height()) {
            self.bird.rest_on_floor();
            self.resting = true;
            events.landed = true;
            info!("Bird landed with score {}, {} ticks after the last jump", self.score, self.bird.tick_count);
            self.lose();
        }

        if !self.resting {
            self.bird.animate();
        }

        events
    }

    fn sweep_pipes(&mut self) -> TickEvents {
        let mut events = TickEvents::default();
        let (bird_mask, bird_pos) = self.bird.silhouette(&self.sprites.bird_frames);
        let pipe_width = self.sprites.pipe_width();

        for pipe in self.pipes.iter_mut() {
            pipe.move_step();
            if pipe.collide(&bird_mask, bird_pos, &self.sprites) {
                events.collided = true;
            }
            if !pipe.passed && (pipe.x as f64) < self.bird.x {
                pipe.passed = true;
                events.scored = true;
            }
        }

        if events.collided {
            info!("Hit a pipe with score {}", self.score);
            self.lose();
            self.bird.jump();
        }

        if events.scored {
            self.score += 1;
            self.history.record(self.score);
            if let Some(delay) = self.schedule.delay_for(self.score) {
                if delay != self.frame_delay {
                    info!("Score {} reached, frame delay {} -> {} ms", self.score, self.frame_delay, delay);
                }
                self.frame_delay = delay;
            }
            let pipe = Pipe::new(PIPE_SPAWN_X, &mut self.rng, self.sprites.pipe_height());
            debug!("Score {}, spawned pipe with gap center {}", self.score, pipe.height());
            self.pipes.push(pipe);
        }

        self.pipes.retain(|pipe| !pipe.is_off_screen(pipe_width));
        events
    }

    fn lose(&mut self) {
        if self.phase != GamePhase::Lost {
            self.phase = GamePhase::Lost;
            self.history.runs += 1;
        }
    }
}
