//! Browser binding
//!
//! Exposes the simulation to a JS host. The host forwards input events and
//! `requestAnimationFrame` timestamps, then draws from `frame_json`.

use wasm_bindgen::prelude::*;

use super::input::{RawInput, TriggerMap};
use crate::config::{Profile, SimConfig};
use crate::persistence::LocalStorageScore;
use crate::renderer::layout;
use crate::sim::{FixedStepDriver, GamePhase, Simulation};

/// Install the panic hook and console logger
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("flappy-sim starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    sim: Simulation<LocalStorageScore>,
    driver: FixedStepDriver,
    triggers: TriggerMap,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    /// `profile` is "classic" or "touch"; unknown names fall back to classic
    #[wasm_bindgen(constructor)]
    pub fn new(profile: &str, width: f32, height: f32, seed: u64) -> WebGame {
        let profile = Profile::from_str(profile).unwrap_or_default();
        let config = SimConfig::from_profile(profile, width, height);
        if let Err(e) = config.validate() {
            log::error!("{}, using classic profile", e);
            return Self::with_config(SimConfig::classic(), seed);
        }
        Self::with_config(config, seed)
    }

    pub fn pointer_press(&mut self) {
        self.input(RawInput::PointerPress);
    }

    pub fn touch_start(&mut self) {
        self.input(RawInput::TouchStart);
    }

    /// `code` is `KeyboardEvent.code`
    pub fn key_down(&mut self, code: &str) {
        self.input(RawInput::Key(code.to_string()));
    }

    /// "Play again" button
    pub fn restart(&mut self) {
        self.sim.restart();
    }

    /// Advance to `time_ms` (a `requestAnimationFrame` timestamp)
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time_ms);
        self.driver.advance(dt, &mut self.sim)
    }

    pub fn is_game_over(&self) -> bool {
        self.sim.phase() == GamePhase::GameOver
    }

    pub fn score(&self) -> u64 {
        self.sim.state.score()
    }

    pub fn best_score(&self) -> u64 {
        self.sim.state.best_score()
    }

    /// Draw list for the current state as JSON
    pub fn frame_json(&self) -> String {
        to_json_or_empty(&layout(&self.sim.state, self.sim.config()))
    }

    /// Events since the last call as JSON (sounds, HUD updates)
    pub fn drain_events_json(&mut self) -> String {
        to_json_or_empty(&self.sim.drain_events())
    }
}

impl WebGame {
    fn with_config(config: SimConfig, seed: u64) -> WebGame {
        WebGame {
            sim: Simulation::new(config, LocalStorageScore::new(), seed),
            driver: FixedStepDriver::default(),
            triggers: TriggerMap::default(),
            last_time: None,
        }
    }

    fn input(&mut self, input: RawInput) {
        if self.triggers.is_trigger(&input) {
            self.driver.trigger();
        }
    }
}

/// Serialize a list for the host, logging and sending `[]` on failure
fn to_json_or_empty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("Failed to serialize for the host: {}", e);
        "[]".to_string()
    })
}
