//! Property tests for simulation invariants

use proptest::prelude::*;

use gravity_flip::HighScore;
use gravity_flip::consts::*;
use gravity_flip::platform::{MemoryStore, ScoreStore};
use gravity_flip::sim::{GamePhase, GameState, TickInput, tick};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_every_tick(
        seed in any::<u64>(),
        flips in prop::collection::vec(prop::bool::weighted(0.08), 100..900),
        autopilot in any::<bool>(),
    ) {
        let mut state = GameState::running(seed);
        let mut last_score = 0;
        let mut last_speed = state.speed;

        for flip in flips {
            tick(&mut state, &TickInput { flip, autopilot });

            let player = &state.player;
            prop_assert!(player.pos.y >= CEILING_Y);
            prop_assert!(player.pos.y <= GROUND_Y - player.size.y);

            prop_assert!(state.score >= last_score);
            prop_assert_eq!((state.score - last_score) % CLEAR_BONUS, 0);
            last_score = state.score;

            prop_assert!(state.speed >= last_speed);
            prop_assert!(state.speed <= MAX_SPEED);
            last_speed = state.speed;

            for obstacle in &state.obstacles {
                prop_assert!(obstacle.size.x > 0.0 && obstacle.size.y > 0.0);
            }
            for particle in &state.particles {
                prop_assert!(particle.life > 0.0 && particle.life <= 1.0);
            }
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }

    #[test]
    fn high_score_is_running_max(
        initial in 0u32..500,
        scores in prop::collection::vec(0u32..1000, 0..20),
    ) {
        let mut best = HighScore::load(MemoryStore::with_score(initial));
        let mut expected = initial;
        for score in scores {
            let beat = best.submit(score);
            prop_assert_eq!(beat, score > expected);
            expected = expected.max(score);
            prop_assert_eq!(best.best(), expected);
        }
        prop_assert_eq!(best.into_store().get(), expected);
    }
}

#[test]
fn clearing_single_obstacle_awards_ten() {
    use gravity_flip::sim::{Pattern, spawn_pattern};

    // Keep re-seeding until the single obstacle sits on the ceiling, away from the player
    let mut state = (0..64)
        .map(|seed| {
            let mut s = GameState::running(seed);
            spawn_pattern(&mut s, Pattern::Single);
            s
        })
        .find(|s| s.obstacles[0].top)
        .expect("some seed mounts the obstacle on the ceiling");

    let mut ticks = 0;
    while !state.obstacles.is_empty() && ticks < 500 {
        state.last_spawn_ms = state.time_ms;
        tick(&mut state, &TickInput::default());
        ticks += 1;
    }

    assert_eq!(state.phase, GamePhase::Running);
    assert!(state.obstacles.is_empty());
    assert_eq!(state.score, 10);
}
