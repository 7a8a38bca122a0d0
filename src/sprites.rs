use std::io;
use log::info;

use crate::constants::*;
use crate::mask::Mask;

// Bird art, one frame per wing position. Scaled by SPRITE_SCALE to 68x48.
const BIRD_WING_UP: [&str; 12] = [
    ".......######....",
    ".....##########..",
    "..##.###o#######.",
    ".####.#########..",
    "######.####>>>>>.",
    "#####.#####>>>>..",
    ".###.#########...",
    "....##########...",
    ".....########....",
    "......######.....",
    ".................",
    ".................",
];

const BIRD_WING_MID: [&str; 12] = [
    ".................",
    ".......######....",
    ".....##########..",
    "....####o#######.",
    "...############..",
    ".#####.####>>>>>.",
    "######.####>>>>..",
    ".#############...",
    ".....########....",
    "......######.....",
    ".................",
    ".................",
];

const BIRD_WING_DOWN: [&str; 12] = [
    ".................",
    ".................",
    ".......######....",
    ".....##########..",
    "....####o#######.",
    "...#####.######..",
    "...####.###>>>>>.",
    "..####.####>>>>..",
    ".####.#######....",
    ".###..######.....",
    "..#..............",
    ".................",
];

// Pipe geometry in world pixels: a full-width lip over a narrower body.
const PIPE_WIDTH: usize = 104;
const PIPE_LENGTH: usize = 640;
const PIPE_LIP_DEPTH: usize = 48;
const PIPE_BODY_INSET: usize = 4;

const GROUND_WIDTH: i32 = 672;

/// Every image the game needs, built once at startup.
#[derive(Clone, Debug)]
pub struct Sprites {
    pub bird_frames: [Mask; 3],
    pub pipe_bottom: Mask,
    pub pipe_top: Mask,
    pub ground_width: i32,
}

impl Sprites {
    pub fn load() -> io::Result<Self> {
        let bird_frames = [
            Mask::from_art(&BIRD_WING_UP, SPRITE_SCALE)?,
            Mask::from_art(&BIRD_WING_MID, SPRITE_SCALE)?,
            Mask::from_art(&BIRD_WING_DOWN, SPRITE_SCALE)?,
        ];

        let mut pipe_bottom = Mask::new(PIPE_WIDTH, PIPE_LENGTH)?;
        pipe_bottom.fill_rect(0, 0, PIPE_WIDTH, PIPE_LIP_DEPTH);
        pipe_bottom.fill_rect(PIPE_BODY_INSET, PIPE_LIP_DEPTH, PIPE_WIDTH - PIPE_BODY_INSET, PIPE_LENGTH);
        let pipe_top = pipe_bottom.flipped_vertical();

        info!(
            "Sprites loaded: bird {}x{} ({} opaque px), pipe {}x{}",
            bird_frames[0].width(),
            bird_frames[0].height(),
            bird_frames[0].count(),
            pipe_bottom.width(),
            pipe_bottom.height()
        );

        Ok(Sprites { bird_frames, pipe_bottom, pipe_top, ground_width: GROUND_WIDTH })
    }

    pub fn bird_height(&self) -> i32 {
        self.bird_frames[0].height() as i32
    }

    pub fn pipe_width(&self) -> i32 {
        self.pipe_top.width() as i32
    }

    pub fn pipe_height(&self) -> i32 {
        self.pipe_top.height() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_builds_expected_dimensions() {
        let sprites = Sprites::load().unwrap();
        for frame in &sprites.bird_frames {
            assert_eq!((frame.width(), frame.height()), (68, 48));
        }
        assert_eq!(sprites.bird_height(), 48);
        assert_eq!(sprites.pipe_width(), 104);
        assert_eq!(sprites.pipe_height(), 640);
    }

    #[test]
    fn pipe_lip_faces_the_gap() {
        let sprites = Sprites::load().unwrap();
        // Bottom pipe lip is its top rows, top pipe lip is its bottom rows.
        assert!(sprites.pipe_bottom.get(0, 0));
        assert!(!sprites.pipe_bottom.get(0, 600));
        assert!(sprites.pipe_top.get(0, 639));
        assert!(!sprites.pipe_top.get(0, 0));
        assert!(sprites.pipe_top.get(50, 0));
    }
}
