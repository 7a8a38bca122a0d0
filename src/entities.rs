use crate::constants::*;
use crate::mask::Mask;
use crate::rendering::GameGrid;
use crate::sprites::Sprites;
use crate::types::Offset;
use rand::Rng;

// --- Bird ---
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub vel: f64,
    pub tilt: f64, // Degrees, positive is nose up
    pub tick_count: u32,
    pub height: f64, // y at the last jump, reference for tilting
    pub img_count: u32,
    pub frame: usize,
}

impl Bird {
    pub fn new(x: f64, y: f64) -> Self {
        Bird {
            x,
            y,
            vel: 0.0,
            tilt: 0.0,
            tick_count: 0,
            height: y,
            img_count: 0,
            frame: 0,
        }
    }

    pub fn jump(&mut self) {
        self.vel = JUMP_VELOCITY;
        self.tick_count = 0;
        self.height = self.y;
    }

    pub fn move_step(&mut self) {
        self.tick_count += 1;
        self.vel += GRAVITY_STEP;
        self.y += self.vel;

        if self.y < self.height + TILT_MARGIN {
            if self.tilt < MAX_ROTATION {
                self.tilt = MAX_ROTATION;
            }
        } else if self.tilt > MIN_ROTATION {
            self.tilt = (self.tilt - ROT_VEL).max(MIN_ROTATION);
        }
    }

    /// Advances the flap cycle 0,1,2,1,0 once per redraw.
    pub fn animate(&mut self) {
        self.img_count += 1;
        self.frame = match self.img_count {
            n if n <= ANIMATION_TIME => 0,
            n if n <= ANIMATION_TIME * 2 => 1,
            n if n <= ANIMATION_TIME * 3 => 2,
            n if n <= ANIMATION_TIME * 4 => 1,
            _ => {
                self.img_count = 0;
                0
            }
        };

        // No flapping in a nose dive
        if self.tilt <= NOSE_DIVE_TILT {
            self.frame = 1;
            self.img_count = ANIMATION_TIME * 2;
        }
    }

    /// Current frame rotated by the tilt, with its world top-left. Rotation
    /// keeps the center of the unrotated sprite fixed.
    pub fn silhouette(&self, frames: &[Mask; 3]) -> (Mask, Offset) {
        let base = &frames[self.frame];
        let rotated = base.rotated(self.tilt);
        let center_x = self.x + base.width() as f64 / 2.0;
        let center_y = self.y.round() + base.height() as f64 / 2.0;
        let left = (center_x - rotated.width() as f64 / 2.0).round() as i32;
        let top = (center_y - rotated.height() as f64 / 2.0).round() as i32;
        (rotated, (left, top))
    }

    pub fn touches_floor(&self, bird_height: i32) -> bool {
        self.y + (bird_height - FLOOR_CLEARANCE) as f64 >= FLOOR as f64
    }

    pub fn rest_on_floor(&mut self) {
        self.y = FLOOR as f64 - RESTING_OFFSET;
    }

    pub fn draw(&self, game_grid: &mut GameGrid, sprites: &Sprites) {
        let (mask, (left, top)) = self.silhouette(&sprites.bird_frames);
        game_grid.blit_mask(&mask, left, top, '@');
    }
}

// --- Pipe ---
pub struct Pipe {
    pub x: i32,
    height: i32,
    top: i32,
    bottom: i32,
    pub passed: bool,
}

impl Pipe {
    /// Gap center is drawn here once and never changes.
    pub fn new(x: i32, rng: &mut impl Rng, pipe_height: i32) -> Self {
        let height = rng.gen_range(PIPE_HEIGHT_MIN..PIPE_HEIGHT_MAX);
        Pipe {
            x,
            height,
            top: height - pipe_height,
            bottom: height + PIPE_GAP,
            passed: false,
        }
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn move_step(&mut self) {
        self.x -= PIPE_VEL;
    }

    pub fn collide(&self, bird_mask: &Mask, (bird_left, bird_top): Offset, sprites: &Sprites) -> bool {
        let top_offset = (self.x - bird_left, self.top - bird_top);
        let bottom_offset = (self.x - bird_left, self.bottom - bird_top);
        bird_mask.overlap(&sprites.pipe_bottom, bottom_offset) || bird_mask.overlap(&sprites.pipe_top, top_offset)
    }

    pub fn is_off_screen(&self, pipe_width: i32) -> bool {
        self.x + pipe_width < 0
    }

    pub fn draw(&self, game_grid: &mut GameGrid, sprites: &Sprites) {
        game_grid.blit_mask(&sprites.pipe_top, self.x, self.top, '#');
        game_grid.blit_mask(&sprites.pipe_bottom, self.x, self.bottom, '#');
    }
}

// --- Base: two ground tiles leapfrogging each other ---
pub struct Base {
    pub y: i32,
    pub x1: i32,
    pub x2: i32,
    pub width: i32,
}

impl Base {
    pub fn new(y: i32, width: i32) -> Self {
        Base { y, x1: 0, x2: width, width }
    }

    pub fn move_step(&mut self) {
        self.x1 -= BASE_VEL;
        self.x2 -= BASE_VEL;
        if self.x1 + self.width < 0 {
            self.x1 = self.x2 + self.width;
        }
        if self.x2 + self.width < 0 {
            self.x2 = self.x1 + self.width;
        }
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        let depth = SCREEN_HEIGHT - self.y;
        for tile_x in [self.x1, self.x2] {
            game_grid.paint_world(tile_x, self.y, self.width, depth, |local_x, local_y| {
                if local_y < 24 {
                    Some('=')
                } else if (local_x / 24) % 2 == 0 {
                    Some(':')
                } else {
                    Some('.')
                }
            });
        }
    }
}
