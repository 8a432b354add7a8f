//! Platform abstraction layer
//!
//! Ports the game core talks to instead of the browser directly:
//! - [`Scheduler`]: next-frame callbacks (requestAnimationFrame on web)
//! - [`ScoreStore`]: the persisted high score (LocalStorage on web)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Schedules the loop driver's next tick.
///
/// The callback itself is bound when the scheduler is built; the driver only
/// asks for "one more" or "no more". At most one tick is ever pending.
pub trait Scheduler {
    /// Request a callback on the next display refresh, replacing any pending one
    fn schedule_next_tick(&mut self);
    /// Drop the pending callback, if any
    fn cancel(&mut self);
}

/// Persisted high score
pub trait ScoreStore {
    /// Stored value, 0 when absent or unreadable
    fn get(&self) -> u32;
    fn set(&mut self, score: u32);
}

/// Scheduler that only records requests; the caller drives frames by hand.
///
/// Used natively and in tests.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    pending: bool,
    pub scheduled: u32,
    pub cancelled: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a tick is waiting to run
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending tick; returns false if none was scheduled
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_next_tick(&mut self) {
        self.pending = true;
        self.scheduled += 1;
    }

    fn cancel(&mut self) {
        if self.pending {
            self.cancelled += 1;
        }
        self.pending = false;
    }
}

/// In-memory score store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    value: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self { value: Some(score) }
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn set(&mut self, score: u32) {
        self.value = Some(score);
    }
}
