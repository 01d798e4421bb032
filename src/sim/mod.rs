//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable pipe order (creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod driver;
pub mod state;
pub mod tick;

pub use collision::{Aabb, boundary_collision, pipe_collision};
pub use driver::FixedStepDriver;
pub use state::{Bird, DifficultyState, GamePhase, GameState, Pipe, SimEvent};
pub use tick::Simulation;
