//! Input mapping
//!
//! One key and one pointer/tap target drive the whole game; what they mean
//! depends only on the current phase.

use crate::sim::GamePhase;

/// Where a press came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Key,
    Pointer,
    /// Touch presses release themselves shortly after if not consumed
    Touch,
}

/// Semantic action for a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Flip,
    Restart,
}

/// Map a press to an action for the current phase
pub fn action_for(phase: GamePhase) -> Action {
    match phase {
        GamePhase::Idle => Action::Start,
        GamePhase::Running => Action::Flip,
        GamePhase::GameOver => Action::Restart,
    }
}

/// One-shot flip flag shared between input handlers and the tick.
#[derive(Debug, Default, Clone)]
pub struct FlipLatch {
    pending: bool,
    /// Time the latch auto-releases (touch presses only)
    release_at_ms: Option<f64>,
}

impl FlipLatch {
    /// Latch a flip. Touch presses release after `TOUCH_RELEASE_MS`.
    pub fn press(&mut self, source: InputSource, now_ms: f64) {
        self.pending = true;
        self.release_at_ms = match source {
            InputSource::Touch => Some(now_ms + crate::consts::TOUCH_RELEASE_MS),
            _ => None,
        };
    }

    /// Drop a touch flip whose release time has passed
    pub fn expire(&mut self, now_ms: f64) {
        if let Some(at) = self.release_at_ms {
            if now_ms >= at {
                self.clear();
            }
        }
    }

    /// Read and clear the flag
    pub fn take(&mut self) -> bool {
        let pending = self.pending;
        self.clear();
        pending
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = false;
        self.release_at_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_for_phase() {
        assert_eq!(action_for(GamePhase::Idle), Action::Start);
        assert_eq!(action_for(GamePhase::Running), Action::Flip);
        assert_eq!(action_for(GamePhase::GameOver), Action::Restart);
    }

    #[test]
    fn test_latch_is_one_shot() {
        let mut latch = FlipLatch::default();
        latch.press(InputSource::Key, 0.0);
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn test_key_latch_does_not_expire() {
        let mut latch = FlipLatch::default();
        latch.press(InputSource::Key, 0.0);
        latch.expire(10_000.0);
        assert!(latch.is_pending());
    }

    #[test]
    fn test_touch_latch_expires() {
        let mut latch = FlipLatch::default();
        latch.press(InputSource::Touch, 1000.0);
        latch.expire(1050.0);
        assert!(latch.is_pending());
        latch.expire(1100.0);
        assert!(!latch.is_pending());
    }
}
