//! Lumberjack Run - a river-crossing arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (player physics, drifting logs and alligators,
//!   collision rules, particles, session progress)
//! - `settings`: Game configuration
//! - `web`: wasm-bindgen facade for a browser presentation layer

pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{CheckpointPolicy, Settings};

/// Game configuration constants
///
/// All speeds and accelerations are per tick (one tick per displayed frame).
pub mod consts {
    /// Default canvas dimensions
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 400.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 20.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_JUMP_POWER: f32 = 12.0;
    pub const PLAYER_GRAVITY: f32 = 0.5;
    /// Spawn point x; y is `canvas_height - PLAYER_START_LIFT`
    pub const PLAYER_START_X: f32 = 30.0;
    pub const PLAYER_START_LIFT: f32 = 160.0;

    /// River band: top at `height - RIVER_TOP_LIFT`, bottom at `height - GROUND_HEIGHT`
    pub const RIVER_TOP_LIFT: f32 = 120.0;
    pub const GROUND_HEIGHT: f32 = 40.0;
    /// Width of the start and end banks on either side of the river
    pub const BANK_WIDTH: f32 = 80.0;

    pub const ISLAND_WIDTH: f32 = 80.0;
    pub const ISLAND_HEIGHT: f32 = 20.0;
    pub const FLAG_WIDTH: f32 = 20.0;
    pub const FLAG_HEIGHT: f32 = 30.0;

    /// Landing tolerance below a surface while the player is falling onto the island
    pub const ISLAND_LANDING_TOLERANCE: f32 = 8.0;
    /// Tolerance used by the rule engine when deciding the player stands on the island
    pub const ISLAND_SAFE_TOLERANCE: f32 = 5.0;
    /// Log riding band: feet may sit this far above the log top...
    pub const LOG_TOLERANCE_ABOVE: f32 = 5.0;
    /// ...or this far below the log bottom
    pub const LOG_TOLERANCE_BELOW: f32 = 8.0;

    pub const LOG_HEIGHT: f32 = 15.0;
    pub const ALLIGATOR_WIDTH: f32 = 40.0;
    pub const ALLIGATOR_HEIGHT: f32 = 12.0;
    pub const LOG_COLOR: u32 = 0x8B_45_13;
    pub const ALLIGATOR_COLOR: u32 = 0x2F_4F_2F;

    /// Spawn cadence in ticks
    pub const LOG_SPAWN_INTERVAL: u32 = 120;
    pub const LOG_SPAWN_INTERVAL_LEVEL_ONE: u32 = 110;
    pub const LOG_SPAWN_INTERVAL_MIN: u32 = 50;
    pub const ALLIGATOR_SPAWN_INTERVAL: u32 = 180;
    pub const ALLIGATOR_SPAWN_INTERVAL_MIN: u32 = 120;
    pub const CLOUD_SPAWN_INTERVAL: u32 = 300;

    /// First level with alligators in the river
    pub const ALLIGATOR_FIRST_LEVEL: u32 = 3;
    /// Reaching this level ends the run
    pub const MAX_LEVEL: u32 = 10;
    /// Points per level reached, multiplied by the new level
    pub const LEVEL_SCORE_MULTIPLIER: u64 = 100;

    /// Clouds are pruned once their anchor passes this x
    pub const CLOUD_PRUNE_X: f32 = -150.0;
    pub const CLOUD_SPAWN_OFFSET: f32 = 50.0;

    /// Particle physics
    pub const SPLASH_GRAVITY: f32 = 0.1;
    pub const SPLASH_DAMPING: f32 = 0.98;
    pub const RIPPLE_EASE: f32 = 0.1;
    pub const RIPPLE_LIFE: f32 = 30.0;
    pub const RIPPLE_BASE_ALPHA: f32 = 0.8;
    /// Per-tick emission chances
    pub const LOG_SPLASH_CHANCE: f64 = 0.1;
    pub const ALLIGATOR_RIPPLE_CHANCE: f64 = 0.08;
    pub const ALLIGATOR_SPLASH_CHANCE: f64 = 0.05;

    /// Timing (milliseconds)
    pub const STATUS_CLEAR_DELAY_MS: f64 = 2000.0;
    pub const LEVEL_ANNOUNCEMENT_MS: f64 = 2000.0;
    pub const LOADING_DURATION_MS: f64 = 4000.0;

    /// Undrained events kept for the presentation layer
    pub const MAX_PENDING_EVENTS: usize = 64;
}
