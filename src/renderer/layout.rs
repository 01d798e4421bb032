//! Frame layout: what to draw, in back-to-front order

use glam::Vec2;
use serde::Serialize;

use crate::config::SimConfig;
use crate::sim::{Aabb, GamePhase, GameState};

/// Height of the pipe cap drawn at each gap boundary
pub const PIPE_CAP_HEIGHT: f32 = 26.0;
/// Baseline of the score text
pub const SCORE_Y: f32 = 40.0;

/// A single draw operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCmd {
    Background { rect: Aabb },
    /// Stretched pipe body; `flipped` for the upper half
    PipeBody { rect: Aabb, flipped: bool },
    /// Fixed-height cap at the gap edge; `flipped` for the upper half
    PipeCap { rect: Aabb, flipped: bool },
    Ground { rect: Aabb },
    Bird { center: Vec2, size: Vec2, rotation: f32 },
    /// Centered score text, only while running
    Score { value: u64, pos: Vec2 },
}

/// Build the draw list for one frame
pub fn layout(state: &GameState, config: &SimConfig) -> Vec<DrawCmd> {
    let w = config.canvas_width;
    let h = config.canvas_height;
    let pipe_w = config.pipe.width;
    let gap = state.difficulty.pipe_gap;

    let mut cmds = Vec::with_capacity(3 + state.pipes.len() * 4 + 1);
    cmds.push(DrawCmd::Background {
        rect: Aabb::new(Vec2::ZERO, Vec2::new(w, h)),
    });

    for pipe in &state.pipes {
        let left = pipe.x;
        let right = pipe.x + pipe_w;
        let gap_top = pipe.gap_y;
        let gap_bottom = pipe.gap_y + gap;

        // Upper half hangs from the ceiling
        cmds.push(DrawCmd::PipeBody {
            rect: Aabb::new(Vec2::new(left, 0.0), Vec2::new(right, gap_top)),
            flipped: true,
        });
        cmds.push(DrawCmd::PipeCap {
            rect: Aabb::new(Vec2::new(left, gap_top - PIPE_CAP_HEIGHT), Vec2::new(right, gap_top)),
            flipped: true,
        });

        // Lower half runs to the bottom of the canvas, under the ground strip
        cmds.push(DrawCmd::PipeBody {
            rect: Aabb::new(Vec2::new(left, gap_bottom), Vec2::new(right, h)),
            flipped: false,
        });
        cmds.push(DrawCmd::PipeCap {
            rect: Aabb::new(
                Vec2::new(left, gap_bottom),
                Vec2::new(right, gap_bottom + PIPE_CAP_HEIGHT),
            ),
            flipped: false,
        });
    }

    cmds.push(DrawCmd::Ground {
        rect: Aabb::new(Vec2::new(0.0, config.ground_y()), Vec2::new(w, h)),
    });

    let bird = &state.bird;
    cmds.push(DrawCmd::Bird {
        center: bird.center(),
        size: bird.size,
        rotation: bird.rotation,
    });

    if state.phase == GamePhase::Running {
        cmds.push(DrawCmd::Score {
            value: state.difficulty.score,
            pos: Vec2::new(w / 2.0, SCORE_Y),
        });
    }

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Pipe;

    fn state_with_pipe(config: &SimConfig) -> GameState {
        let mut state = GameState::new(config, 1, 0);
        state.pipes.push(Pipe {
            x: 100.0,
            gap_y: 150.0,
            passed: false,
            spacing: 160.0,
        });
        state
    }

    #[test]
    fn test_pipe_halves() {
        let config = SimConfig::classic();
        let cmds = layout(&state_with_pipe(&config), &config);

        let bodies: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::PipeBody { rect, flipped } => Some((*rect, *flipped)),
                _ => None,
            })
            .collect();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0].0, Aabb::new(Vec2::new(100.0, 0.0), Vec2::new(142.0, 150.0)));
        assert!(bodies[0].1);
        assert_eq!(bodies[1].0, Aabb::new(Vec2::new(100.0, 300.0), Vec2::new(142.0, 480.0)));
        assert!(!bodies[1].1);

        let caps: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::PipeCap { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(caps[0].max.y, 150.0);
        assert_eq!(caps[0].max.y - caps[0].min.y, PIPE_CAP_HEIGHT);
        assert_eq!(caps[1].min.y, 300.0);
        assert_eq!(caps[1].max.y - caps[1].min.y, PIPE_CAP_HEIGHT);
    }

    #[test]
    fn test_draw_order() {
        let config = SimConfig::classic();
        let mut state = state_with_pipe(&config);
        state.phase = GamePhase::Running;
        let cmds = layout(&state, &config);
        assert!(matches!(cmds.first(), Some(DrawCmd::Background { .. })));
        assert!(matches!(cmds[cmds.len() - 3], DrawCmd::Ground { .. }));
        assert!(matches!(cmds[cmds.len() - 2], DrawCmd::Bird { .. }));
        assert!(matches!(cmds.last(), Some(DrawCmd::Score { value: 0, .. })));
    }

    #[test]
    fn test_score_hidden_unless_running() {
        let config = SimConfig::classic();
        let mut state = state_with_pipe(&config);
        for phase in [GamePhase::NotStarted, GamePhase::GameOver] {
            state.phase = phase;
            let cmds = layout(&state, &config);
            assert!(!cmds.iter().any(|c| matches!(c, DrawCmd::Score { .. })));
        }
    }

    #[test]
    fn test_bird_pose() {
        let config = SimConfig::classic();
        let mut state = GameState::new(&config, 1, 0);
        state.bird.rotation = 0.5;
        let cmds = layout(&state, &config);
        let bird = cmds.iter().find_map(|c| match c {
            DrawCmd::Bird { center, rotation, .. } => Some((*center, *rotation)),
            _ => None,
        });
        assert_eq!(bird, Some((Vec2::new(67.0, 172.0), 0.5)));
    }
}
