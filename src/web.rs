//! Browser adapter
//!
//! Exposes `Arena` to the page script. The page owns the 20 ms interval, the
//! DOM elements and the input listeners; it calls into this class and redraws
//! from `frame_json()`.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::arena::Arena;
use crate::settings::Settings;
use crate::sim::Direction;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Bubble Arena module loaded");
}

/// Arena handle for JavaScript
#[wasm_bindgen]
pub struct WebArena {
    arena: Arena,
}

#[wasm_bindgen]
impl WebArena {
    /// Create with default settings, or from a JSON settings string
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> WebArena {
        let settings = match settings_json.as_deref().map(Settings::from_json) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("Bad settings JSON, using defaults: {}", e);
                Settings::default()
            }
            None => Settings::default(),
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("Arena created with seed: {}", seed);
        WebArena {
            arena: Arena::new(settings, seed),
        }
    }

    pub fn reset(&mut self) {
        self.arena.reset();
    }

    #[wasm_bindgen(js_name = setAim)]
    pub fn set_aim(&mut self, angle: f32) {
        self.arena.set_aim(angle);
    }

    /// Pointer position relative to the arena's top-left corner
    #[wasm_bindgen(js_name = aimAt)]
    pub fn aim_at(&mut self, x: f32, y: f32) {
        self.arena.aim_at(Vec2::new(x, y));
    }

    #[wasm_bindgen(js_name = moveLeft)]
    pub fn move_left(&mut self) {
        self.arena.move_launcher(Direction::Left);
    }

    #[wasm_bindgen(js_name = moveRight)]
    pub fn move_right(&mut self) {
        self.arena.move_launcher(Direction::Right);
    }

    pub fn shoot(&mut self) {
        self.arena.shoot();
    }

    pub fn tick(&mut self) {
        self.arena.tick();
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.arena.is_game_over()
    }

    /// Preview landing point as `[x, y]`
    #[wasm_bindgen(js_name = previewLanding)]
    pub fn preview_landing(&mut self) -> Vec<f32> {
        let landing = self.arena.preview().landing;
        vec![landing.x, landing.y]
    }

    /// Current frame as JSON
    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(&self) -> Result<String, JsValue> {
        self.arena
            .frame()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Pending events as JSON, clearing the queue
    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.arena.drain_events())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
