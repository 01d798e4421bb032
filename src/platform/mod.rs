//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (pointer, touch, keyboard) mapped to the single trigger
//! - Browser binding (wasm32)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{RawInput, TriggerMap};
