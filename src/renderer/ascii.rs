//! Character-grid renderer for terminals and logs

use glam::Vec2;

use super::layout::{DrawCmd, layout};
use super::Renderer;
use crate::config::SimConfig;
use crate::sim::{Aabb, GameState};

const BACKGROUND: char = ' ';
const PIPE_BODY: char = '#';
const PIPE_CAP: char = '=';
const GROUND: char = '.';
const BIRD: char = '@';

/// Rasterizes the frame layout into a `cols` x `rows` character grid
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
    frames: u64,
}

impl AsciiRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![BACKGROUND; cols * rows],
            frames: 0,
        }
    }

    /// Number of frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The last rendered frame, one line per row
    pub fn frame_text(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }

    fn fill(&mut self, rect: &Aabb, cell: Vec2, c: char) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                // Sample at the cell center
                let p = Vec2::new((col as f32 + 0.5) * cell.x, (row as f32 + 0.5) * cell.y);
                if rect.contains(p) {
                    self.cells[row * self.cols + col] = c;
                }
            }
        }
    }

    fn text(&mut self, text: &str, center: Vec2, cell: Vec2) {
        let row = ((center.y / cell.y) as usize).min(self.rows - 1);
        let len = text.chars().count();
        let mid = (center.x / cell.x) as usize;
        let start = mid.saturating_sub(len / 2);
        for (i, ch) in text.chars().enumerate() {
            let col = start + i;
            if col < self.cols {
                self.cells[row * self.cols + col] = ch;
            }
        }
    }
}

impl Renderer for AsciiRenderer {
    fn render(&mut self, state: &GameState, config: &SimConfig) {
        let cell = Vec2::new(
            config.canvas_width / self.cols as f32,
            config.canvas_height / self.rows as f32,
        );
        self.cells.fill(BACKGROUND);

        for cmd in layout(state, config) {
            match cmd {
                DrawCmd::Background { .. } => {}
                DrawCmd::PipeBody { rect, .. } => self.fill(&rect, cell, PIPE_BODY),
                DrawCmd::PipeCap { rect, .. } => self.fill(&rect, cell, PIPE_CAP),
                DrawCmd::Ground { rect } => self.fill(&rect, cell, GROUND),
                // Rotation is not representable on a grid
                DrawCmd::Bird { center, size, .. } => {
                    let rect = Aabb::from_pos_size(center - size / 2.0, size);
                    self.fill(&rect, cell, BIRD);
                }
                DrawCmd::Score { value, pos } => self.text(&value.to_string(), pos, cell),
            }
        }
        self.frames += 1;
    }
}
