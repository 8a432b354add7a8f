//! Game loop driver
//!
//! Owns the simulation state and moves it through Idle → Running → GameOver,
//! restarting back into Running on input. While Running, every scheduled frame
//! runs whole fixed-step ticks and asks the scheduler for the next one; leaving
//! Running cancels the schedule before any further tick can run.

use crate::consts::*;
use crate::highscores::HighScore;
use crate::input::{Action, FlipLatch, InputSource, action_for};
use crate::platform::{ScoreStore, Scheduler};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Tolerance for accumulated frame time rounding
const ACCUMULATOR_EPSILON: f64 = 1e-6;

/// User-facing notifications (shown as toasts by the shell)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    GameStarted,
    NewHighScore(u32),
}

/// Game instance holding all state
pub struct Game<S, Sc> {
    state: GameState,
    scores: HighScore<S>,
    scheduler: Sc,
    flip: FlipLatch,
    autopilot: bool,
    accumulator: f64,
    last_time: Option<f64>,
    base_seed: u64,
    runs: u64,
    notices: Vec<Notice>,
    // FPS tracking
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl<S: ScoreStore, Sc: Scheduler> Game<S, Sc> {
    /// Mount the game: reads the high score once, starts Idle with nothing scheduled
    pub fn new(store: S, scheduler: Sc, seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            scores: HighScore::load(store),
            scheduler,
            flip: FlipLatch::default(),
            autopilot: false,
            accumulator: 0.0,
            last_time: None,
            base_seed: seed,
            runs: 0,
            notices: Vec::new(),
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access (debug tooling and tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_score(&self) -> u32 {
        self.scores.best()
    }

    pub fn scheduler(&self) -> &Sc {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Sc {
        &mut self.scheduler
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
        log::info!("Autopilot: {}", on);
    }

    /// Take pending notices
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Give the score store back (e.g. to remount)
    pub fn into_store(self) -> S {
        self.scores.into_store()
    }

    /// Handle the single logical press: start, flip or restart depending on phase
    pub fn press(&mut self, source: InputSource, now_ms: f64) -> Action {
        let action = action_for(self.state.phase);
        match action {
            Action::Start | Action::Restart => self.start(),
            Action::Flip => self.flip.press(source, now_ms),
        }
        action
    }

    /// Run one scheduled frame. Returns the number of ticks simulated.
    ///
    /// The simulation advances at a fixed 60 Hz (`FRAME_MS`) regardless of the
    /// display rate: a 120 Hz display ticks on every other callback.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        if self.state.phase != GamePhase::Running {
            self.scheduler.cancel();
            return 0;
        }

        self.track_fps(now_ms);

        let dt = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => FRAME_MS,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator + ACCUMULATOR_EPSILON >= FRAME_MS && substeps < MAX_SUBSTEPS {
            self.flip.expire(now_ms);
            let input = TickInput {
                flip: self.flip.take(),
                autopilot: self.autopilot,
            };
            tick(&mut self.state, &input);
            self.accumulator -= FRAME_MS;
            substeps += 1;

            self.handle_events();
            if self.state.phase != GamePhase::Running {
                break;
            }
        }
        if substeps == MAX_SUBSTEPS {
            // Drop backlog rather than catching up
            self.accumulator = self.accumulator.min(FRAME_MS);
        }

        if self.state.phase == GamePhase::Running {
            self.scheduler.schedule_next_tick();
        } else {
            self.scheduler.cancel();
        }
        substeps
    }

    /// Reset the simulation into a fresh running game
    fn start(&mut self) {
        self.runs += 1;
        let seed = self.base_seed.wrapping_add(self.runs);
        self.state = GameState::running(seed);
        self.flip.clear();
        self.accumulator = 0.0;
        self.last_time = None;
        self.notices.push(Notice::GameStarted);
        self.scheduler.schedule_next_tick();
        log::info!("Game started with seed: {}", seed);
    }

    fn handle_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::GameOver { score } => {
                    log::info!("Game over with score {}", score);
                    if self.scores.submit(score) {
                        log::info!("New high score: {}", score);
                        self.notices.push(Notice::NewHighScore(score));
                    }
                }
                GameEvent::ObstacleCleared { id } => {
                    log::trace!("Cleared {:?}", id);
                }
                GameEvent::Flipped { gravity } => {
                    log::trace!("Flipped to {:?}", gravity);
                }
            }
        }
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % 60;

        // Calculate FPS from oldest to newest frame
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (59_000.0 / elapsed).round() as u32;
            }
        }
    }
}
