//! Browser host bindings
//!
//! The Mini App's render loop owns a `WebGame`, calls `tick` once per
//! animation frame and draws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{Simulation, TickInput, tick};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("SkyHop core loaded");
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    state: Simulation,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a session. An empty settings string means defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, settings_json: &str) -> Result<WebGame, JsValue> {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Ok(Self {
            state: Simulation::new(seed, settings),
        })
    }

    /// Advance one frame (`dt` in seconds)
    pub fn tick(&mut self, dt: f32, jump: bool, dash: bool) {
        tick(&mut self.state, &TickInput { jump, dash }, dt);
    }

    pub fn score(&self) -> u64 {
        self.state.player.score
    }

    pub fn alive(&self) -> bool {
        self.state.player.alive
    }

    pub fn height(&self) -> f32 {
        self.state.max_height()
    }

    /// Render state as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, as a JSON array
    pub fn events_json(&mut self) -> Result<String, JsValue> {
        let events = self.state.drain_events();
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
