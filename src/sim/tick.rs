//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, one display frame
//! per call.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState, MAX_PARTICLES, Particle};
use crate::consts::*;

/// How far ahead of the player the autopilot looks for obstacles (pixels)
const AUTOPILOT_LOOKAHEAD: f32 = 110.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flip gravity (one-shot)
    pub flip: bool,
    /// Demo mode - flips automatically to dodge obstacles
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;
    state.time_ms += FRAME_MS;

    spawn::maybe_spawn(state);

    let flip = input.flip || (input.autopilot && autopilot_wants_flip(state));
    if flip {
        apply_flip(state);
    }

    integrate_player(state);
    update_particles(state);
    scroll_obstacles(state);

    state.distance += state.speed;
    state.speed = crate::game_speed(state.level(), state.distance);

    check_collision(state);
}

/// Invert gravity, kick the player toward the new surface and burst particles
pub fn apply_flip(state: &mut GameState) {
    let player = &mut state.player;
    player.gravity = player.gravity.inverted();
    player.vel_y = FLIP_IMPULSE * player.gravity.sign();
    player.flipping = true;
    player.flip_started_ms = state.time_ms;
    player.grounded = false;

    let center = player.center();
    let gravity = player.gravity;
    spawn_burst(state, center);
    state.events.push(GameEvent::Flipped { gravity });
}

/// Semi-implicit Euler under constant gravity, then resolve floor/ceiling contact
fn integrate_player(state: &mut GameState) {
    let now = state.time_ms;
    let player = &mut state.player;

    player.vel_y += GRAVITY * player.gravity.sign();
    player.pos.y += player.vel_y;

    let (min_y, max_y) = (CEILING_Y, player.max_y());
    let attracting = match player.gravity {
        super::state::Gravity::Normal => player.pos.y >= max_y,
        super::state::Gravity::Flipped => player.pos.y <= min_y,
    };
    player.grounded = attracting;
    if player.pos.y < min_y || player.pos.y > max_y || attracting {
        player.pos.y = player.pos.y.clamp(min_y, max_y);
        player.vel_y = 0.0;
    }

    if player.flipping && now - player.flip_started_ms >= FLIP_ANIM_MS {
        player.flipping = false;
    }
}

fn spawn_burst(state: &mut GameState, center: Vec2) {
    for _ in 0..FLIP_BURST {
        let vel = Vec2::new(
            state.rng.random_range(-4.0..=4.0),
            state.rng.random_range(-4.0..=4.0),
        );
        state.particles.push(Particle {
            pos: center,
            vel,
            life: 1.0,
            decay: state.rng.random_range(0.02..=0.05),
        });
    }
    if state.particles.len() > MAX_PARTICLES {
        let excess = state.particles.len() - MAX_PARTICLES;
        state.particles.drain(..excess);
    }
}

fn update_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= particle.decay;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Move obstacles left; anything fully off-screen is removed and scores
fn scroll_obstacles(state: &mut GameState) {
    let speed = state.speed;
    for obstacle in state.obstacles.iter_mut() {
        obstacle.pos.x -= speed;
    }

    let mut cleared = Vec::new();
    state.obstacles.retain(|o| {
        if o.is_offscreen() {
            cleared.push(o.id);
            false
        } else {
            true
        }
    });

    for id in cleared {
        state.score += CLEAR_BONUS;
        state.events.push(GameEvent::ObstacleCleared { id });
    }
}

fn check_collision(state: &mut GameState) {
    if let Some(index) = collision::first_hit(&state.player, &state.obstacles) {
        let hit = state.obstacles.remove(index);
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Hit obstacle {:?} at t={:.0}ms, final score {}",
            hit.id,
            state.time_ms,
            state.score
        );
    }
}

/// Flip when resting on a surface and the next obstacle ahead blocks the player's lane
fn autopilot_wants_flip(state: &GameState) -> bool {
    let player = &state.player;
    if !player.grounded {
        return false;
    }
    let front = player.pos.x + player.size.x;
    let (top, bottom) = (player.pos.y, player.pos.y + player.size.y);

    state
        .obstacles
        .iter()
        .filter(|o| o.pos.x + o.size.x > player.pos.x && o.pos.x - front < AUTOPILOT_LOOKAHEAD)
        .any(|o| o.pos.y < bottom && o.pos.y + o.size.y > top)
}
