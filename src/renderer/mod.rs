//! Rendering contract
//!
//! The simulation never calls a renderer. Hosts hand each frame's state to a
//! `Renderer`; `layout` turns that state into an ordered draw list so every
//! backend draws the same scene.

pub mod ascii;
pub mod layout;

pub use ascii::AsciiRenderer;
pub use layout::{DrawCmd, PIPE_CAP_HEIGHT, SCORE_Y, layout};

use crate::config::SimConfig;
use crate::sim::GameState;

/// Something that can draw a simulation snapshot
pub trait Renderer {
    fn render(&mut self, state: &GameState, config: &SimConfig);
}

/// Renderer that draws nothing (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState, _config: &SimConfig) {}
}
