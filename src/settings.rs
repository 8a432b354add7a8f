//! Game settings and preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Draw flip particle bursts
    pub particles: bool,
    /// Reduced motion (no squash/stretch on flip)
    pub reduced_motion: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Controls ===
    /// `KeyboardEvent.key` value that flips gravity
    pub flip_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            reduced_motion: false,
            show_fps: false,
            flip_key: " ".to_string(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "gravity_flip_settings";

    /// Whether the flip animation should squash the player
    pub fn effective_squash(&self) -> bool {
        !self.reduced_motion
    }

    /// Toggle the FPS counter, returning the new value
    pub fn toggle_fps(&mut self) -> bool {
        self.show_fps = !self.show_fps;
        self.show_fps
    }

    /// Whether a `KeyboardEvent.key` value is the flip key
    pub fn is_flip_key(&self, key: &str) -> bool {
        key == self.flip_key
    }

    /// Parse settings JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                log::warn!("Stored settings unreadable, using defaults");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
