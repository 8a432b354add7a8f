//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_hit};
pub use spawn::{Pattern, maybe_spawn, spawn_pattern};
pub use state::{
    GameEvent, GamePhase, GameState, Gravity, MAX_PARTICLES, Obstacle, ObstacleId, Particle,
    Player,
};
pub use tick::{TickInput, apply_flip, tick};
