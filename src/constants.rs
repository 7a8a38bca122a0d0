// --- World Constants ---
// All simulation happens in world pixels; the renderer scales down to cells.
pub const SCREEN_WIDTH: i32 = 600;
pub const SCREEN_HEIGHT: i32 = 800;
pub const FLOOR: i32 = 730;

// --- Bird ---
pub const BIRD_START_X: f64 = 230.0;
pub const BIRD_START_Y: f64 = 350.0;
pub const GRAVITY_STEP: f64 = 2.5; // Added to velocity every tick
pub const JUMP_VELOCITY: f64 = -20.0;
pub const TILT_MARGIN: f64 = 25.0; // Pixels below the jump height before nosing down
pub const MAX_ROTATION: f64 = 25.0; // Degrees
pub const MIN_ROTATION: f64 = -90.0;
pub const ROT_VEL: f64 = 20.0; // Degrees per tick
pub const NOSE_DIVE_TILT: f64 = -80.0;
pub const ANIMATION_TIME: u32 = 5; // Ticks per animation frame
pub const FLOOR_CLEARANCE: i32 = 10; // Bird sprite bottom overlaps the ground by this much
pub const RESTING_OFFSET: f64 = 45.0; // Bird rests at FLOOR - RESTING_OFFSET

// --- Pipes ---
pub const PIPE_GAP: i32 = 190;
pub const PIPE_VEL: i32 = 5;
pub const PIPE_SPAWN_X: i32 = SCREEN_WIDTH;
pub const FIRST_PIPE_X: i32 = 700;
pub const PIPE_HEIGHT_MIN: i32 = 50;
pub const PIPE_HEIGHT_MAX: i32 = 450; // Exclusive

// --- Ground ---
pub const BASE_VEL: i32 = 5;

// --- Pacing ---
pub const INITIAL_FRAME_DELAY_MS: u64 = 23;
pub const FRAME_DELAY_PADDING_MS: u64 = 1; // Loop sleeps delay + padding
pub const DIFFICULTY_TABLE: [(u32, u64); 9] = [
    (1, 23),
    (20, 22),
    (50, 21),
    (80, 20),
    (100, 19),
    (130, 18),
    (180, 17),
    (200, 16),
    (250, 15),
];

// --- Sprites ---
pub const MAX_MASK_WIDTH: usize = 128; // One u128 per mask row
pub const SPRITE_SCALE: usize = 4;

// --- Terminal ---
pub const DEFAULT_DEBUG_WIDTH: u16 = 80;
pub const DEFAULT_DEBUG_HEIGHT: u16 = 24;
pub const DEBUG_FLAP_PERIOD: u64 = 15; // A jump every 15 frames roughly holds altitude
pub const DEBUG_QUIT_FRAME: u64 = 600;
pub const LOG_FILE: &str = "flappy-term.log";

// --- Screen layout (world y of the prompts) ---
pub const START_LABEL_Y: i32 = 500;
pub const EXIT_LABEL_Y: i32 = 400;
pub const RESTART_LABEL_Y: i32 = 500;
pub const LABEL_MARGIN: u16 = 1;
pub const FLASH_CHAR: char = '+';
pub const FLASH_MS: u64 = 25;
