// Board
pub const TILE_COUNT: i16 = 20;
pub const START_CELL: (i16, i16) = (10, 10);
pub const START_FOOD: (i16, i16) = (15, 15);

// Speed, in cells per second. Tick interval is 1000 / speed milliseconds.
pub const INITIAL_SPEED: u32 = 5;
pub const SPEED_INCREMENT: u32 = 2;
pub const SPEED_SCORE_INTERVAL: u64 = 100;
pub const MAX_SPEED: u32 = 20;
pub const COMBO_SPEED_BOOST: u32 = 3;

// Combo
pub const COMBO_TIME_WINDOW_SECS: u64 = 5;
pub const COMBO_SCORE_MULTIPLIER: u64 = 2;
pub const COMBO_MULTIPLIER_CAP: u64 = 1_000_000;
pub const FOOD_POINTS: u64 = 10;

// Food placement
pub const FOOD_PLACEMENT_ATTEMPTS: u32 = 500;

// Timers
pub const WALL_CLOCK_INTERVAL_MS: u64 = 1000;
pub const AUTOPLAY_INTERVAL_MS: u64 = 10;
pub const FRAME_POLL_MS: u64 = 16; // upper bound on input poll, ~60 FPS redraw

// Input
pub const DIRECTION_QUEUE_CAPACITY: usize = 8;

// Presentation
pub const EVENT_LOG_CAPACITY: usize = 10;
pub const HISTORY_CAPACITY: usize = 10;

// Files in the data directory
pub const CONFIG_FILE: &str = "config.json";
pub const HISTORY_FILE: &str = "history.json";
