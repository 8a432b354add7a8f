//! Draw list generation for 2D primitives
//!
//! Turns a [`GameState`] into back-to-front drawing commands without touching
//! any graphics API, so the same frame can be painted by any backend.

use glam::Vec2;
use std::f32::consts::PI;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, Gravity, Player};

/// Particle square edge length
const PARTICLE_SIZE: f32 = 4.0;

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS color string with the given alpha
    pub fn css(&self, alpha: f32) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const SKY_TOP: Color = Color::rgb(20, 16, 48);
    pub const SKY_BOTTOM: Color = Color::rgb(64, 28, 96);
    pub const BAND: Color = Color::rgb(38, 38, 64);
    pub const PLAYER: Color = Color::rgb(80, 220, 160);
    pub const PLAYER_FLIPPED: Color = Color::rgb(240, 160, 80);
    pub const OBSTACLE: Color = Color::rgb(230, 70, 110);
    pub const PARTICLE: Color = Color::rgb(255, 240, 200);
}

/// A single drawing operation in logical canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole surface with a vertical gradient
    Background { top: Color, bottom: Color },
    /// Fill an axis-aligned rectangle
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
        alpha: f32,
    },
}

impl DrawCmd {
    fn rect(pos: Vec2, size: Vec2, color: Color, alpha: f32) -> Self {
        DrawCmd::Rect {
            pos,
            size,
            color,
            alpha,
        }
    }
}

/// Horizontal squash/stretch factor for the player at the current time
pub fn player_scale_x(player: &Player, now_ms: f64, settings: &Settings) -> f32 {
    if !settings.effective_squash() {
        return 1.0;
    }
    match player.flip_progress(now_ms) {
        Some(progress) => 1.0 + 0.3 * (progress * PI).sin(),
        None => 1.0,
    }
}

/// Build the draw list for one frame
pub fn build_frame(state: &GameState, settings: &Settings) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(4 + state.particles.len() + state.obstacles.len());

    cmds.push(DrawCmd::Background {
        top: colors::SKY_TOP,
        bottom: colors::SKY_BOTTOM,
    });

    // Ceiling and floor bands
    cmds.push(DrawCmd::rect(
        Vec2::ZERO,
        Vec2::new(CANVAS_WIDTH, CEILING_Y),
        colors::BAND,
        1.0,
    ));
    cmds.push(DrawCmd::rect(
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT - GROUND_Y),
        colors::BAND,
        1.0,
    ));

    if settings.particles {
        for particle in &state.particles {
            cmds.push(DrawCmd::rect(
                particle.pos - Vec2::splat(PARTICLE_SIZE / 2.0),
                Vec2::splat(PARTICLE_SIZE),
                colors::PARTICLE,
                particle.life,
            ));
        }
    }

    let player = &state.player;
    let scale = player_scale_x(player, state.time_ms, settings);
    let width = player.size.x * scale;
    let pos = Vec2::new(player.center().x - width / 2.0, player.pos.y);
    let color = match player.gravity {
        Gravity::Normal => colors::PLAYER,
        Gravity::Flipped => colors::PLAYER_FLIPPED,
    };
    cmds.push(DrawCmd::rect(pos, Vec2::new(width, player.size.y), color, 1.0));

    for obstacle in &state.obstacles {
        cmds.push(DrawCmd::rect(
            obstacle.pos,
            obstacle.size,
            colors::OBSTACLE,
            1.0,
        ));
    }

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Pattern, apply_flip, spawn_pattern};

    fn rects_of(cmds: &[DrawCmd], wanted: Color) -> Vec<(Vec2, Vec2, f32)> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Rect {
                    pos,
                    size,
                    color,
                    alpha,
                } if *color == wanted => Some((*pos, *size, *alpha)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_frame_order() {
        let mut state = GameState::running(1);
        spawn_pattern(&mut state, Pattern::DoubleStack);
        let cmds = build_frame(&state, &Settings::default());

        assert!(matches!(cmds[0], DrawCmd::Background { .. }));
        assert_eq!(rects_of(&cmds, colors::BAND).len(), 2);
        assert_eq!(rects_of(&cmds, colors::OBSTACLE).len(), 2);
        assert!(matches!(
            cmds.last(),
            Some(DrawCmd::Rect { color, .. }) if *color == colors::OBSTACLE
        ));
    }

    #[test]
    fn test_particle_alpha_is_life() {
        let mut state = GameState::running(1);
        apply_flip(&mut state);
        state.particles[0].life = 0.25;
        let cmds = build_frame(&state, &Settings::default());
        let particles = rects_of(&cmds, colors::PARTICLE);
        assert_eq!(particles.len(), FLIP_BURST);
        assert_eq!(particles[0].2, 0.25);
    }

    #[test]
    fn test_particles_can_be_disabled() {
        let mut state = GameState::running(1);
        apply_flip(&mut state);
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let cmds = build_frame(&state, &settings);
        assert!(rects_of(&cmds, colors::PARTICLE).is_empty());
    }

    #[test]
    fn test_player_squash_peaks_mid_flip() {
        let mut state = GameState::running(1);
        apply_flip(&mut state);
        let settings = Settings::default();

        assert!((player_scale_x(&state.player, 0.0, &settings) - 1.0).abs() < 1e-5);
        assert!((player_scale_x(&state.player, 150.0, &settings) - 1.3).abs() < 1e-5);

        state.time_ms = 150.0;
        let cmds = build_frame(&state, &settings);
        let (pos, size, _) = rects_of(&cmds, colors::PLAYER_FLIPPED)[0];
        assert!((size.x - PLAYER_SIZE * 1.3).abs() < 1e-3);
        assert!((pos.x + size.x / 2.0 - state.player.center().x).abs() < 1e-3);
    }

    #[test]
    fn test_reduced_motion_skips_squash() {
        let mut state = GameState::running(1);
        apply_flip(&mut state);
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(player_scale_x(&state.player, 150.0, &settings), 1.0);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(Color::rgb(1, 2, 3).css(0.5), "rgba(1, 2, 3, 0.500)");
        assert_eq!(Color::rgb(1, 2, 3).css(2.0), "rgba(1, 2, 3, 1.000)");
    }
}
