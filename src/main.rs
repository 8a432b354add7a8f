//! Gravity Flip entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gravity_flip::input::InputSource;
    use gravity_flip::platform::web::{LocalStorageStore, RafScheduler};
    use gravity_flip::renderer::{CanvasRenderer, build_frame};
    use gravity_flip::sim::GamePhase;
    use gravity_flip::{Game, Notice, Settings};

    /// How long a toast stays visible (ms)
    const TOAST_MS: i32 = 2000;

    type WebGame = Game<LocalStorageStore, RafScheduler>;

    /// Browser shell around the game: canvas, HUD and toasts
    struct Shell {
        game: WebGame,
        renderer: CanvasRenderer,
        settings: Settings,
    }

    impl Shell {
        fn render(&self) {
            let cmds = build_frame(self.game.state(), &self.settings);
            self.renderer.render(&cmds);
        }

        /// Run after every frame or press
        fn refresh(&mut self) {
            self.render();
            self.update_hud();
            for notice in self.game.drain_notices() {
                let text = match notice {
                    Notice::GameStarted => "Go! Tap or press Space to flip".to_string(),
                    Notice::NewHighScore(score) => format!("New high score: {}", score),
                };
                show_toast(&text);
            }
        }

        fn press(&mut self, source: InputSource) {
            let action = self.game.press(source, performance_now());
            log::debug!("{:?} -> {:?}", source, action);
            self.refresh();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.game.state();

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                el.set_text_content(Some(&self.game.high_score().to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&format!("{} fps", self.game.fps())));
                    let _ = el.set_attribute("class", "hud-item");
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            set_visible(&document, "start-prompt", state.phase == GamePhase::Idle);
            set_visible(&document, "game-over", state.phase == GamePhase::GameOver);
            if state.phase == GamePhase::GameOver {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&state.score.to_string()));
                }
            }
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn performance_now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// Show a transient message in the #toast element
    fn show_toast(text: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(el) = window.document().and_then(|d| d.get_element_by_id("toast")) else {
            log::info!("{}", text);
            return;
        };
        el.set_text_content(Some(text));
        let _ = el.set_attribute("class", "toast show");

        let hide = Closure::once_into_js(move || {
            let _ = el.set_attribute("class", "toast");
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            hide.unchecked_ref(),
            TOAST_MS,
        );
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Gravity Flip starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let settings = Settings::load();
        let scheduler = RafScheduler::new();
        let slot = scheduler.callback_slot();

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(LocalStorageStore::default(), scheduler, seed);
        let shell = Rc::new(RefCell::new(Shell {
            game,
            renderer: CanvasRenderer::new(&canvas),
            settings,
        }));

        log::info!("Game mounted with seed: {}", seed);

        // Frame callback; the scheduler re-requests it while the game runs
        {
            let shell = shell.clone();
            *slot.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                let mut s = shell.borrow_mut();
                s.game.frame(time);
                s.refresh();
            }));
        }

        setup_input_handlers(&canvas, shell.clone())?;

        shell.borrow_mut().refresh();
        log::info!("Gravity Flip ready");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        shell: Rc<RefCell<Shell>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Keyboard
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut s = shell.borrow_mut();
                if s.settings.is_flip_key(&key) {
                    event.prevent_default();
                    if !event.repeat() {
                        s.press(InputSource::Key);
                    }
                } else if key == "i" || key == "I" {
                    let on = !s.game.autopilot();
                    s.game.set_autopilot(on);
                } else if key == "f" || key == "F" {
                    let on = s.settings.toggle_fps();
                    s.settings.save();
                    log::info!("FPS counter: {}", on);
                    s.update_hud();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start (flip); suppresses the emulated mouse event
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                shell.borrow_mut().press(InputSource::Touch);
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse click
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                shell.borrow_mut().press(InputSource::Pointer);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gravity_flip::Game;
    use gravity_flip::consts::FRAME_MS;
    use gravity_flip::input::InputSource;
    use gravity_flip::platform::{ManualScheduler, MemoryStore};
    use gravity_flip::sim::GamePhase;

    /// Headless runs stop after this many frames (five minutes at 60 Hz)
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    env_logger::init();
    log::info!("Gravity Flip (native) starting...");
    log::info!("Native mode runs a headless autopilot game - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let mut game = Game::new(MemoryStore::new(), ManualScheduler::new(), seed);
    game.set_autopilot(true);
    game.press(InputSource::Key, 0.0);

    let mut now = 0.0;
    let mut frames = 0;
    while frames < MAX_FRAMES && game.scheduler_mut().take_pending() {
        game.frame(now);
        now += FRAME_MS;
        frames += 1;
    }

    let state = game.state();
    let outcome = if state.phase == GamePhase::GameOver {
        "crashed"
    } else {
        "survived"
    };
    log::info!(
        "Autopilot {} after {} ticks: score {}, distance {:.0}px, speed {:.2}",
        outcome,
        state.time_ticks,
        state.score,
        state.distance,
        state.speed
    );
    println!("seed {} -> score {} ({})", seed, state.score, outcome);
}
