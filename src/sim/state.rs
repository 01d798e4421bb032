//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::{BirdConfig, SimConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting for the first input
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended, waiting for a reset
    GameOver,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    RunStarted,
    Flap,
    PipeSpawned { gap_y: f32, spacing: f32 },
    PipePassed { score: u64 },
    DifficultyRaised { score: u64, pipe_speed: f32, pipe_gap: f32 },
    NewBest { score: u64 },
    GameOver { score: u64, best: u64 },
}

/// The player-controlled bird
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner; x never changes after creation
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = down)
    pub velocity: f32,
    /// Visual tilt in radians, in [-π/2, π/2]
    pub rotation: f32,
    pub gravity: f32,
    pub jump: f32,
    pub rotation_speed: f32,
}

impl Bird {
    pub fn new(config: &BirdConfig, start_y: f32) -> Self {
        Self {
            pos: Vec2::new(config.x, start_y),
            size: Vec2::new(config.width, config.height),
            velocity: 0.0,
            rotation: 0.0,
            gravity: config.gravity,
            jump: config.jump,
            rotation_speed: config.rotation_speed,
        }
    }

    /// Advance one tick of free fall
    pub fn integrate(&mut self) {
        self.velocity += self.gravity;
        self.pos.y += self.velocity;
        self.rotation = (self.velocity * self.rotation_speed).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Replace the current velocity with the jump impulse
    pub fn flap(&mut self) {
        self.velocity = self.jump;
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// A pipe pair with a gap the bird must fly through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Top of the gap
    pub gap_y: f32,
    /// Set once the bird has flown past
    pub passed: bool,
    /// Distance the next pipe waits for before spawning
    pub spacing: f32,
}

impl Pipe {
    #[inline]
    pub fn right_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Score and the values the difficulty ramp changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    pub pipe_speed: f32,
    pub pipe_gap: f32,
    pub score: u64,
    pub best_score: u64,
    /// Interval steps applied so far this run
    pub level: u64,
}

impl DifficultyState {
    pub fn new(config: &SimConfig, best_score: u64) -> Self {
        Self {
            pipe_speed: config.pipe.initial_speed,
            pipe_gap: config.pipe.initial_gap,
            score: 0,
            best_score,
            level: 0,
        }
    }
}

/// Complete game state (serializable snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Ticks simulated while running
    pub time_ticks: u64,
    pub bird: Bird,
    /// Oldest pipe first
    pub pipes: Vec<Pipe>,
    pub difficulty: DifficultyState,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<SimEvent>,
}

impl GameState {
    pub fn new(config: &SimConfig, seed: u64, best_score: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::NotStarted,
            time_ticks: 0,
            bird: Bird::new(&config.bird, config.canvas_height / 3.0),
            pipes: Vec::new(),
            difficulty: DifficultyState::new(config, best_score),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.difficulty.score
    }

    #[inline]
    pub fn best_score(&self) -> u64 {
        self.difficulty.best_score
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn push_event(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}
