//! Gameplay constants.  All durations are counted in ticks.

/// Width of the playing field in cells
pub const GRID_WIDTH: u16 = 20;

/// Height of the playing field in cells
pub const GRID_HEIGHT: u16 = 20;

/// Speed at the start of a round and the floor that speed never drops below
pub const BASE_SPEED: u32 = 3;

/// Highest speed reachable through score alone
pub const MAX_RAMP_SPEED: u32 = 6;

/// Highest speed reachable with a speed boost active
pub const MAX_BOOSTED_SPEED: u32 = 8;

/// Amount added to the speed by a speed boost
pub const SPEED_BOOST_AMOUNT: u32 = 2;

/// The speed ramps up by one every time the score passes a multiple of this
pub const SPEED_RAMP_INTERVAL: u32 = 50;

/// Points for eating normal food
pub const FOOD_POINTS: u32 = 10;

/// Points for eating special food
pub const SPECIAL_FOOD_POINTS: u32 = 25;

/// Probability that newly-placed food is special
pub const SPECIAL_FOOD_PROBABILITY: f64 = 0.15;

/// Food points are multiplied by this while a mini-game is running
pub const MINI_GAME_MULTIPLIER: u32 = 2;

/// How long an activated power-up lasts
pub const POWER_UP_DURATION: u32 = 300;

/// Ticks between power-up spawns
pub const POWER_UP_SPAWN_INTERVAL: u32 = 600;

/// Maximum number of uncollected power-ups on the field at one time
pub const MAX_FIELD_POWER_UPS: usize = 2;

/// Ticks between coin spawns
pub const COIN_SPAWN_INTERVAL: u32 = 900;

/// Length of a mini-game
pub const MINI_GAME_DURATION: u32 = 180;

/// Bonus points a mini-game must accumulate to earn the completion bonus
pub const MINI_GAME_TARGET: u32 = 50;

/// Points awarded for completing a mini-game at or above the target
pub const MINI_GAME_COMPLETION_BONUS: u32 = 50;

/// Tick-rate multiplier while time is slowed
pub const TIME_SLOW_FACTOR: f64 = 0.5;

/// Zoom factor the renderer should approach while the zoom power-up is
/// active
pub const ZOOM_TARGET: f64 = 1.3;

/// Maximum number of entries kept in the high-score table
pub const MAX_HIGH_SCORES: usize = 10;

/// Format of the timestamps stored with each high score
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
