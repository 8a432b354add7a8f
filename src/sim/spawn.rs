//! Obstacle pattern generation
//!
//! Patterns unlock with difficulty: every two levels adds one variant, up to four.
//! All rectangles spawn at or beyond the right edge of the canvas, so nothing ever
//! appears inside the player's column.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleId};
use crate::consts::*;

/// Gap between the halves of a double stack (centred)
pub const DOUBLE_STACK_GAP: f32 = 240.0;
/// Gap between the halves of a narrow-gap pair
pub const NARROW_GAP: f32 = 160.0;
/// Minimum distance between a narrow gap and either surface
pub const NARROW_GAP_MARGIN: f32 = 60.0;
/// Spike width and horizontal pitch
pub const SPIKE_WIDTH: f32 = 20.0;
pub const SPIKE_PITCH: f32 = 70.0;

/// Obstacle layout variants, in unlock order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Single,
    DoubleStack,
    NarrowGap,
    Spikes,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::Single,
        Pattern::DoubleStack,
        Pattern::NarrowGap,
        Pattern::Spikes,
    ];

    /// Number of variants available at a difficulty level
    pub fn unlocked(level: u32) -> usize {
        (1 + level as usize / 2).min(Self::ALL.len())
    }
}

/// Spawn a pattern if enough time has passed since the last one.
///
/// Returns the pattern spawned, if any.
pub fn maybe_spawn(state: &mut GameState) -> Option<Pattern> {
    let spacing = crate::spawn_spacing_ms(state.level());
    if state.time_ms - state.last_spawn_ms <= spacing {
        return None;
    }

    let unlocked = Pattern::unlocked(state.level());
    let pattern = Pattern::ALL[state.rng.random_range(0..unlocked)];
    spawn_pattern(state, pattern);
    state.last_spawn_ms = state.time_ms;
    Some(pattern)
}

/// Append the rectangles of one pattern to the obstacle collection
pub fn spawn_pattern(state: &mut GameState, pattern: Pattern) {
    let batch = state.next_batch_id();
    let rects = match pattern {
        Pattern::Single => single(&mut state.rng),
        Pattern::DoubleStack => double_stack(&mut state.rng),
        Pattern::NarrowGap => narrow_gap(&mut state.rng),
        Pattern::Spikes => spikes(&mut state.rng),
    };

    log::debug!(
        "Spawned {:?} (batch {}, {} parts) at t={:.0}ms",
        pattern,
        batch,
        rects.len(),
        state.time_ms
    );

    for (part, (pos, size, top)) in rects.into_iter().enumerate() {
        debug_assert!(size.x > 0.0 && size.y > 0.0);
        state.obstacles.push(Obstacle {
            id: ObstacleId {
                batch,
                part: part as u8,
            },
            pos,
            size,
            top,
        });
    }
}

type Part = (Vec2, Vec2, bool);

fn mounted(x: f32, width: f32, height: f32, top: bool) -> Part {
    let y = if top { CEILING_Y } else { GROUND_Y - height };
    (Vec2::new(x, y), Vec2::new(width, height), top)
}

/// One obstacle on a random surface
fn single(rng: &mut impl Rng) -> Vec<Part> {
    let width = rng.random_range(30.0..=50.0);
    let height = rng.random_range(60.0..=180.0);
    let top = rng.random_bool(0.5);
    vec![mounted(CANVAS_WIDTH, width, height, top)]
}

/// Top and bottom halves around a fixed centred gap
fn double_stack(rng: &mut impl Rng) -> Vec<Part> {
    let width = rng.random_range(30.0..=50.0);
    let height = (GROUND_Y - CEILING_Y - DOUBLE_STACK_GAP) / 2.0;
    vec![
        mounted(CANVAS_WIDTH, width, height, true),
        mounted(CANVAS_WIDTH, width, height, false),
    ]
}

/// Top and bottom halves around a narrow gap at a random height
fn narrow_gap(rng: &mut impl Rng) -> Vec<Part> {
    let width = rng.random_range(30.0..=50.0);
    let gap_top =
        rng.random_range(CEILING_Y + NARROW_GAP_MARGIN..=GROUND_Y - NARROW_GAP_MARGIN - NARROW_GAP);
    let top_height = gap_top - CEILING_Y;
    let bottom_height = GROUND_Y - (gap_top + NARROW_GAP);
    vec![
        mounted(CANVAS_WIDTH, width, top_height, true),
        mounted(CANVAS_WIDTH, width, bottom_height, false),
    ]
}

/// Three to five short spikes, alternating surfaces
fn spikes(rng: &mut impl Rng) -> Vec<Part> {
    let count = rng.random_range(3..=5);
    let mut top = rng.random_bool(0.5);
    let mut parts = Vec::with_capacity(count);
    for i in 0..count {
        let height = rng.random_range(30.0..=60.0);
        let x = CANVAS_WIDTH + i as f32 * SPIKE_PITCH;
        parts.push(mounted(x, SPIKE_WIDTH, height, top));
        top = !top;
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameState;

    #[test]
    fn test_unlocked_variants() {
        assert_eq!(Pattern::unlocked(0), 1);
        assert_eq!(Pattern::unlocked(1), 1);
        assert_eq!(Pattern::unlocked(2), 2);
        assert_eq!(Pattern::unlocked(4), 3);
        assert_eq!(Pattern::unlocked(6), 4);
        assert_eq!(Pattern::unlocked(40), 4);
    }

    #[test]
    fn test_no_spawn_before_spacing() {
        let mut state = GameState::running(1);
        state.time_ms = 1500.0;
        assert_eq!(maybe_spawn(&mut state), None);
        assert!(state.obstacles.is_empty());

        state.time_ms = 1501.0;
        assert_eq!(maybe_spawn(&mut state), Some(Pattern::Single));
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.last_spawn_ms, 1501.0);
    }

    #[test]
    fn test_level_zero_only_singles() {
        let mut state = GameState::running(42);
        for i in 1..50 {
            state.time_ms = i as f64 * 2000.0;
            assert_eq!(maybe_spawn(&mut state), Some(Pattern::Single));
        }
    }

    #[test]
    fn test_high_level_uses_all_patterns() {
        let mut state = GameState::running(3);
        state.score = 1000;
        let mut seen = Vec::new();
        for i in 1..200 {
            state.time_ms = i as f64 * 1000.0;
            if let Some(p) = maybe_spawn(&mut state) {
                if !seen.contains(&p) {
                    seen.push(p);
                }
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_patterns_stay_in_bounds() {
        let mut state = GameState::running(99);
        for _ in 0..50 {
            for pattern in Pattern::ALL {
                spawn_pattern(&mut state, pattern);
            }
        }
        let player = state.player.rect();
        for o in &state.obstacles {
            assert!(o.size.x > 0.0 && o.size.y > 0.0);
            assert!(o.pos.x >= CANVAS_WIDTH);
            assert!(o.pos.x > player.max().x);
            assert!(o.pos.y >= CEILING_Y - 1e-3);
            assert!(o.pos.y + o.size.y <= GROUND_Y + 1e-3);
        }
    }

    #[test]
    fn test_gap_patterns_leave_gap() {
        let mut state = GameState::running(5);
        spawn_pattern(&mut state, Pattern::DoubleStack);
        let (top, bottom) = (&state.obstacles[0], &state.obstacles[1]);
        assert!(top.top && !bottom.top);
        let gap = bottom.pos.y - (top.pos.y + top.size.y);
        assert!((gap - DOUBLE_STACK_GAP).abs() < 1e-3);

        state.obstacles.clear();
        spawn_pattern(&mut state, Pattern::NarrowGap);
        let (top, bottom) = (&state.obstacles[0], &state.obstacles[1]);
        let gap = bottom.pos.y - (top.pos.y + top.size.y);
        assert!((gap - NARROW_GAP).abs() < 1e-3);
        assert!(top.size.y >= NARROW_GAP_MARGIN - 1e-3);
        assert!(bottom.size.y >= NARROW_GAP_MARGIN - 1e-3);
    }

    #[test]
    fn test_batch_ids_distinguish_parts() {
        let mut state = GameState::running(8);
        spawn_pattern(&mut state, Pattern::Spikes);
        spawn_pattern(&mut state, Pattern::DoubleStack);
        let ids: Vec<ObstacleId> = state.obstacles.iter().map(|o| o.id).collect();
        let first_batch = ids[0].batch;
        let spikes = ids.iter().filter(|id| id.batch == first_batch).count();
        assert!((3..=5).contains(&spikes));
        for (i, id) in ids.iter().take(spikes).enumerate() {
            assert_eq!(id.part as usize, i);
        }
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
    }
}
