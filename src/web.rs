//! Browser bindings
//!
//! The page owns the canvas, DOM, buttons and music. It forwards key and
//! button events here, calls `frame()` from `requestAnimationFrame`, and
//! draws whatever `snapshot_json()` describes. Call `drain_events_json()`
//! every frame; undrained events past `MAX_PENDING_EVENTS` are dropped,
//! oldest first.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{GameState, InputState, UiAction, tick};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(message: &str);
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    match console_log::init_with_level(log::Level::Info) {
        Ok(()) => log::info!("Lumberjack Run core loaded"),
        Err(e) => console_error(&format!("Failed to init logger: {e}")),
    }
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Game instance driven by the page
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    input: InputState,
}

#[wasm_bindgen]
impl WebGame {
    /// New game with default settings at the given canvas size
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let settings = Settings {
            canvas_width: width,
            canvas_height: height,
            ..Settings::default()
        };
        Self::from_settings(settings)
    }

    /// New game from a JSON settings object (missing fields use defaults)
    pub fn with_settings_json(json: &str) -> Result<WebGame, JsValue> {
        let settings =
            Settings::from_json(json).map_err(|e| JsValue::from_str(&format!("bad settings: {e}")))?;
        Ok(Self::from_settings(settings))
    }

    pub fn key_down(&mut self, code: &str) {
        self.input.code_down(code);
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.code_up(code);
    }

    pub fn restart(&mut self) {
        self.state.apply_action(UiAction::Restart, now_ms());
    }

    pub fn full_reset(&mut self) {
        self.state.apply_action(UiAction::FullReset, now_ms());
    }

    pub fn toggle_audio(&mut self) {
        self.state.apply_action(UiAction::ToggleAudio, now_ms());
    }

    /// Run one simulation tick
    pub fn frame(&mut self) {
        let input = self.input.take_tick_input();
        tick(&mut self.state, &input, now_ms());
    }

    /// Current state for drawing, as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.snapshot(now_ms()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, as a JSON array (for sound cues)
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.drain_events())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn timer_text(&self) -> String {
        self.state.timer.formatted(now_ms())
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn can_restart(&self) -> bool {
        self.state.can_restart()
    }
}

impl WebGame {
    fn from_settings(settings: Settings) -> WebGame {
        let seed = settings.seed.unwrap_or_else(|| now_ms() as u64);
        log::info!("New game with seed: {seed}");
        WebGame {
            state: GameState::new(settings, seed),
            input: InputState::new(),
        }
    }
}
