//! Score-driven difficulty ramp
//!
//! Up to the ceiling, every `interval` points (at most `max_steps` times) the
//! pipes get faster and the gap narrows. Past the ceiling only speed keeps
//! rising, every `post_ceiling_interval` points, and the gap stays frozen.

use super::state::DifficultyState;
use crate::config::DifficultyConfig;

/// Apply the ramp for the score just reached
///
/// Returns true when speed or gap changed.
pub fn apply_pass(state: &mut DifficultyState, config: &DifficultyConfig) -> bool {
    let score = state.score;
    if score == 0 {
        return false;
    }

    if score <= config.ceiling {
        let on_step = score % config.interval == 0 && score / config.interval <= config.max_steps;
        if on_step {
            state.pipe_speed += config.speed_increase;
            state.pipe_gap = (state.pipe_gap - config.gap_decrease).max(config.min_gap);
            state.level += 1;
            return true;
        }
    } else if score % config.post_ceiling_interval == 0 {
        state.pipe_speed += config.speed_increase;
        return true;
    }

    false
}
