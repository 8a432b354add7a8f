//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; the loop driver owns it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Not started, waiting for the first input
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart input
    GameOver,
}

/// Which surface attracts the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gravity {
    /// Pulled toward the floor
    #[default]
    Normal,
    /// Pulled toward the ceiling
    Flipped,
}

impl Gravity {
    /// The opposite orientation
    pub fn inverted(self) -> Self {
        match self {
            Gravity::Normal => Gravity::Flipped,
            Gravity::Flipped => Gravity::Normal,
        }
    }

    /// Sign of acceleration along y (screen y grows downward)
    pub fn sign(self) -> f32 {
        match self {
            Gravity::Normal => 1.0,
            Gravity::Flipped => -1.0,
        }
    }
}

/// The player's runner
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/tick, positive = down)
    pub vel_y: f32,
    pub gravity: Gravity,
    /// Squash/stretch animation running
    pub flipping: bool,
    /// Sim time the current flip started (ms)
    pub flip_started_ms: f64,
    /// Resting on the surface gravity pulls toward
    pub grounded: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_SIZE),
            size: Vec2::splat(PLAYER_SIZE),
            vel_y: 0.0,
            gravity: Gravity::Normal,
            flipping: false,
            flip_started_ms: 0.0,
            grounded: true,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Highest allowed y (resting on the floor)
    pub fn max_y(&self) -> f32 {
        GROUND_Y - self.size.y
    }

    /// Flip animation progress in [0, 1], or None when not animating
    pub fn flip_progress(&self, now_ms: f64) -> Option<f32> {
        if !self.flipping {
            return None;
        }
        let elapsed = (now_ms - self.flip_started_ms).max(0.0);
        Some((elapsed / FLIP_ANIM_MS).min(1.0) as f32)
    }
}

/// Obstacle identity: one spawn event is a batch, each rectangle in it a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId {
    pub batch: u32,
    pub part: u8,
}

/// An obstacle rectangle scrolling toward the player
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Mounted on the ceiling rather than the floor
    pub top: bool,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Trailing edge has passed the left boundary
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,  // 0-1, decreases every tick
    pub decay: f32, // life lost per tick, always > 0
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Things that happened during a tick, drained by the loop driver
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Flipped { gravity: Gravity },
    ObstacleCleared { id: ObstacleId },
    GameOver { score: u32 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Scroll speed (pixels/tick)
    pub speed: f32,
    pub score: u32,
    /// Total pixels scrolled
    pub distance: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated time (ms)
    pub time_ms: f64,
    /// Sim time of the last obstacle spawn (ms)
    pub last_spawn_ms: f64,
    /// Events from recent ticks, not yet drained
    pub events: Vec<GameEvent>,
    next_batch: u32,
}

impl GameState {
    /// Create a new game state with the given seed, in the Idle phase
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            player: Player::default(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            speed: BASE_SPEED,
            score: 0,
            distance: 0.0,
            time_ticks: 0,
            time_ms: 0.0,
            last_spawn_ms: 0.0,
            events: Vec::new(),
            next_batch: 1,
        }
    }

    /// Fresh state that is already running
    pub fn running(seed: u64) -> Self {
        let mut state = Self::new(seed);
        state.phase = GamePhase::Running;
        state
    }

    /// Allocate a spawn batch id
    pub fn next_batch_id(&mut self) -> u32 {
        let id = self.next_batch;
        self.next_batch += 1;
        id
    }

    /// Current difficulty level
    pub fn level(&self) -> u32 {
        crate::difficulty_level(self.score)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
