//! Gravity Flip - A side-scrolling runner where the player flips gravity
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `game`: Loop driver state machine (Idle / Running / GameOver)
//! - `input`: Key and tap mapping to game actions
//! - `renderer`: Draw list construction and 2D canvas backend
//! - `platform`: Scheduler and score storage ports
//! - `settings`: User preferences

pub mod game;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, Notice};
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one 60 Hz display frame), in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum ticks per scheduled callback to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta accepted by the loop driver (ms)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Logical canvas resolution (portrait)
    pub const CANVAS_WIDTH: f32 = 360.0;
    pub const CANVAS_HEIGHT: f32 = 640.0;

    /// Surface bands
    pub const BAND_HEIGHT: f32 = 40.0;
    pub const CEILING_Y: f32 = BAND_HEIGHT;
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - BAND_HEIGHT;

    /// Player defaults
    pub const PLAYER_X: f32 = 60.0;
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Gravitational acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.6;
    /// Vertical velocity applied on a flip (pixels/tick)
    pub const FLIP_IMPULSE: f32 = 8.0;
    /// Squash/stretch animation length after a flip
    pub const FLIP_ANIM_MS: f64 = 300.0;

    /// Scroll speed (pixels/tick)
    pub const BASE_SPEED: f32 = 4.0;
    pub const MAX_SPEED: f32 = 12.0;

    /// Points awarded per obstacle that scrolls off-screen
    pub const CLEAR_BONUS: u32 = 10;
    /// Score per difficulty level
    pub const POINTS_PER_LEVEL: u32 = 100;

    /// Spawn spacing (ms)
    pub const SPAWN_SPACING_BASE_MS: f64 = 1500.0;
    pub const SPAWN_SPACING_STEP_MS: f64 = 100.0;
    pub const SPAWN_SPACING_MIN_MS: f64 = 800.0;

    /// Particles spawned per flip
    pub const FLIP_BURST: usize = 15;
    /// Touch flips are released after this long if not consumed
    pub const TOUCH_RELEASE_MS: f64 = 100.0;
}

/// Difficulty level for a score (one level per 100 points)
#[inline]
pub fn difficulty_level(score: u32) -> u32 {
    score / consts::POINTS_PER_LEVEL
}

/// Game speed for a difficulty level and distance travelled, clamped to `MAX_SPEED`
#[inline]
pub fn game_speed(level: u32, distance: f32) -> f32 {
    use consts::{BASE_SPEED, MAX_SPEED};
    (BASE_SPEED * (1.0 + 0.3 * level as f32 + 0.0001 * distance)).min(MAX_SPEED)
}

/// Minimum time between obstacle spawns at a difficulty level (ms)
#[inline]
pub fn spawn_spacing_ms(level: u32) -> f64 {
    use consts::*;
    (SPAWN_SPACING_BASE_MS - SPAWN_SPACING_STEP_MS * level as f64).max(SPAWN_SPACING_MIN_MS)
}
