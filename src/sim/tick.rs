//! Per-tick simulation
//!
//! `Simulation` owns the game state, the seeded RNG and the score store, and
//! advances everything one tick at a time. Physics constants are per tick, so
//! the caller decides the tick rate (see `FixedStepDriver`).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{boundary_collision, pipe_collision};
use super::difficulty;
use super::state::{DifficultyState, GamePhase, GameState, Pipe, SimEvent};
use crate::config::{PipeSpacing, SimConfig};
use crate::persistence::ScoreStore;

/// The game simulation
pub struct Simulation<S: ScoreStore> {
    /// Public so hosts and tests can inspect or stage state directly
    pub state: GameState,
    config: SimConfig,
    store: S,
    rng: Pcg32,
}

impl<S: ScoreStore> Simulation<S> {
    /// Create a simulation and load the best score from `store`
    pub fn new(config: SimConfig, store: S, seed: u64) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid config: {:?}", config.validate());
        let mut sim = Self {
            state: GameState::new(&config, seed, 0),
            config,
            store,
            rng: Pcg32::seed_from_u64(seed),
        };
        sim.initialize();
        sim
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Fresh NotStarted state with the best score re-read from the store
    pub fn initialize(&mut self) {
        let best = self.store.get();
        self.reset_with_best(best);
        log::info!("Simulation initialized (best score {})", best);
    }

    /// Back to NotStarted, keeping the in-memory best score
    pub fn reset(&mut self) {
        let best = self.state.difficulty.best_score;
        self.reset_with_best(best);
    }

    fn reset_with_best(&mut self, best: u64) {
        let seed = self.state.seed;
        self.state = GameState::new(&self.config, seed, best);
    }

    /// Reset and immediately start a new run
    pub fn restart(&mut self) {
        self.reset();
        self.handle_input();
    }

    /// The single player action: start a run, or flap while running
    pub fn handle_input(&mut self) {
        match self.state.phase {
            GamePhase::NotStarted => {
                self.state.phase = GamePhase::Running;
                self.state.push_event(SimEvent::RunStarted);
                log::info!("Run started");
                self.spawn_pipe();
            }
            GamePhase::Running => {
                self.state.bird.flap();
                self.state.push_event(SimEvent::Flap);
            }
            GamePhase::GameOver => {}
        }
    }

    /// Append a pipe at the right edge of the field
    pub fn spawn_pipe(&mut self) {
        let margin = self.config.pipe.min_gap_position;
        let max_gap_y = self.config.canvas_height - self.state.difficulty.pipe_gap - margin;
        let gap_y = self.rng.random_range(margin..=max_gap_y.max(margin));

        let spacing = match self.config.pipe.spacing {
            PipeSpacing::Fixed { spacing } => spacing,
            PipeSpacing::Random { min, max } => self.rng.random_range(min..=max.max(min)),
        };

        self.state.pipes.push(Pipe {
            x: self.config.canvas_width,
            gap_y,
            passed: false,
            spacing,
        });
        self.state.push_event(SimEvent::PipeSpawned { gap_y, spacing });
        log::debug!("Pipe spawned: gap_y={:.1} spacing={:.1}", gap_y, spacing);
    }

    /// Advance one tick. Does nothing unless a run is in progress.
    ///
    /// There is no `dt`: gravity, jump and pipe speed are per-tick constants.
    pub fn update(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.state.time_ticks += 1;

        self.state.bird.integrate();
        let bird_box = self.state.bird.aabb();
        let bird_x = self.state.bird.pos.x;
        let pipe_width = self.config.pipe.width;
        let speed_factor = self.config.speed_factor();

        // Newest first so removing by index keeps the remaining indices valid.
        // A hit does not stop the loop: the other pipes still move and can
        // still score this tick. Speed and gap are reread per pipe, so a pass
        // that raises the difficulty applies to the pipes after it.
        for i in (0..self.state.pipes.len()).rev() {
            let step = self.state.difficulty.pipe_speed * speed_factor;
            let gap = self.state.difficulty.pipe_gap;
            let pipe = &mut self.state.pipes[i];
            pipe.x -= step;

            let hit = pipe_collision(&bird_box, pipe, pipe_width, gap);
            let newly_passed = !pipe.passed && pipe.x < bird_x;
            if newly_passed {
                pipe.passed = true;
            }
            let off_screen = pipe.right_edge(pipe_width) < 0.0;

            if hit {
                self.end_run();
            }
            if newly_passed {
                self.register_pass();
            }
            if off_screen {
                self.state.pipes.remove(i);
            }
        }

        let should_spawn = match self.state.pipes.last() {
            None => true,
            Some(last) => last.x < self.config.canvas_width - last.spacing,
        };
        if should_spawn {
            self.spawn_pipe();
        }

        if boundary_collision(&self.state.bird, self.config.ground_y()) {
            self.end_run();
        }
    }

    fn register_pass(&mut self) {
        let d = &mut self.state.difficulty;
        d.score += 1;
        let score = d.score;
        self.state.push_event(SimEvent::PipePassed { score });

        if difficulty::apply_pass(&mut self.state.difficulty, &self.config.difficulty) {
            let DifficultyState {
                pipe_speed, pipe_gap, ..
            } = self.state.difficulty;
            self.state.push_event(SimEvent::DifficultyRaised {
                score,
                pipe_speed,
                pipe_gap,
            });
            log::debug!(
                "Difficulty raised at {}: speed={:.3} gap={:.1}",
                score,
                pipe_speed,
                pipe_gap
            );
        }

        if score > self.state.difficulty.best_score {
            self.state.difficulty.best_score = score;
            self.store.set(score);
            self.state.push_event(SimEvent::NewBest { score });
        }
    }

    fn end_run(&mut self) {
        if self.state.phase == GamePhase::GameOver {
            return;
        }
        self.state.phase = GamePhase::GameOver;
        let score = self.state.difficulty.score;
        let best = self.state.difficulty.best_score;
        self.state.push_event(SimEvent::GameOver { score, best });
        log::info!("Game over: score {} (best {})", score, best);
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.state.events)
    }
}
