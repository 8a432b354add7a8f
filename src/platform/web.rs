//! Browser implementations of the platform ports

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::{ScoreStore, Scheduler};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame`-backed scheduler.
///
/// The callback lives in a shared slot so the closure can reschedule itself.
pub struct RafScheduler {
    callback: Rc<RefCell<Option<FrameCallback>>>,
    handle: Option<i32>,
}

impl Default for RafScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RafScheduler {
    pub fn new() -> Self {
        Self {
            callback: Rc::new(RefCell::new(None)),
            handle: None,
        }
    }

    /// Slot the frame callback is installed into once the game exists
    pub fn callback_slot(&self) -> Rc<RefCell<Option<FrameCallback>>> {
        self.callback.clone()
    }
}

impl Scheduler for RafScheduler {
    fn schedule_next_tick(&mut self) {
        self.cancel();
        let Some(window) = web_sys::window() else {
            return;
        };
        let slot = self.callback.borrow();
        if let Some(callback) = slot.as_ref() {
            match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                Ok(handle) => self.handle = Some(handle),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }
}

/// High score kept in LocalStorage as a JSON number
pub struct LocalStorageStore {
    key: &'static str,
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "gravity_flip_high_score";

    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl ScoreStore for LocalStorageStore {
    fn get(&self) -> u32 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score defaults to 0");
            return 0;
        };
        match storage.get_item(self.key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable high score {:?}: {}", raw, e);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("High score read failed: {:?}", e);
                0
            }
        }
    }

    fn set(&mut self, score: u32) {
        if let Some(storage) = Self::storage() {
            if let Ok(json) = serde_json::to_string(&score) {
                if storage.set_item(self.key, &json).is_ok() {
                    log::info!("High score saved ({})", score);
                    return;
                }
            }
        }
        log::warn!("High score {} could not be saved", score);
    }
}
