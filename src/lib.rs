//! Flappy Sim - a gated-pipe arcade game simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `config`: Profiles and tuning constants
//! - `renderer`: Frame layout and renderers
//! - `platform`: Input mapping and browser binding
//! - `persistence`: Best score storage

pub mod config;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{Profile, SimConfig};
pub use persistence::{MemoryScore, ScoreStore};
pub use renderer::Renderer;
pub use sim::{FixedStepDriver, GamePhase, GameState, Simulation};

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (physics constants are per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Longest frame the driver will catch up on (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
