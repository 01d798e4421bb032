//! Fixed timestep driver
//!
//! Decouples the simulation rate from display refresh: each display frame
//! adds its duration to an accumulator, whole ticks are run out of it, and the
//! renderer is called exactly once.

use super::tick::Simulation;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::persistence::ScoreStore;
use crate::renderer::Renderer;

#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
    pending_triggers: u32,
}

impl Default for FixedStepDriver {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStepDriver {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        debug_assert!(step > 0.0);
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
            pending_triggers: 0,
        }
    }

    /// Queue a player trigger for the next tick
    pub fn trigger(&mut self) {
        self.pending_triggers += 1;
    }

    pub fn pending_triggers(&self) -> u32 {
        self.pending_triggers
    }

    /// Run the ticks owed for `frame_dt` seconds, then render once
    ///
    /// Returns the number of ticks run.
    pub fn frame<S, R>(&mut self, frame_dt: f32, sim: &mut Simulation<S>, renderer: &mut R) -> u32
    where
        S: ScoreStore,
        R: Renderer + ?Sized,
    {
        let ticks = self.advance(frame_dt, sim);
        renderer.render(&sim.state, sim.config());
        ticks
    }

    /// Like `frame` without rendering
    pub fn advance<S: ScoreStore>(&mut self, frame_dt: f32, sim: &mut Simulation<S>) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            // Inputs apply before the first tick; repeated flaps just reset velocity
            for _ in 0..std::mem::take(&mut self.pending_triggers) {
                sim.handle_input();
            }
            sim.update();
            self.accumulator -= self.step;
            substeps += 1;
        }

        // Drop the backlog once the substep cap is hit
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::persistence::MemoryScore;
    use crate::sim::{GameState, GamePhase};

    #[derive(Default)]
    struct CountingRenderer {
        frames: u32,
        last_ticks: u64,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, state: &GameState, _config: &SimConfig) {
            self.frames += 1;
            self.last_ticks = state.time_ticks;
        }
    }

    fn sim() -> Simulation<MemoryScore> {
        Simulation::new(SimConfig::classic(), MemoryScore::default(), 5)
    }

    #[test]
    fn test_one_render_per_frame() {
        let mut sim = sim();
        let mut driver = FixedStepDriver::new(0.01, 5);
        let mut renderer = CountingRenderer::default();
        driver.trigger();
        for _ in 0..10 {
            driver.frame(0.02, &mut sim, &mut renderer);
        }
        assert_eq!(renderer.frames, 10);
        assert!(renderer.last_ticks >= 18);
    }

    #[test]
    fn test_trigger_waits_for_a_tick() {
        let mut sim = sim();
        let mut driver = FixedStepDriver::new(0.01, 5);
        driver.trigger();
        assert_eq!(driver.advance(0.005, &mut sim), 0);
        assert_eq!(sim.phase(), GamePhase::NotStarted);
        assert_eq!(driver.pending_triggers(), 1);

        assert_eq!(driver.advance(0.006, &mut sim), 1);
        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(driver.pending_triggers(), 0);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut sim = sim();
        sim.handle_input();
        let mut driver = FixedStepDriver::new(0.01, 3);
        assert_eq!(driver.advance(0.1, &mut sim), 3);
        assert_eq!(sim.state.time_ticks, 3);
        // Backlog was dropped: a tiny frame runs at most one more tick
        assert!(driver.advance(0.0, &mut sim) <= 1);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut sim = sim();
        sim.handle_input();
        let mut driver = FixedStepDriver::new(MAX_FRAME_DT / 4.0, 100);
        assert_eq!(driver.advance(10.0, &mut sim), 4);
    }
}
