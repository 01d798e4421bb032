//! Axis-aligned collision tests
//!
//! The bird collides with a pipe when it overlaps the pipe column horizontally
//! while any part of it sits outside the gap band.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bird, Pipe};

/// Axis-aligned bounding box, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Open-interval overlap on the x axis (touching edges do not overlap)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let inside_x = point.x >= self.min.x && point.x < self.max.x;
        inside_x && point.y >= self.min.y && point.y < self.max.y
    }
}

/// Check whether the bird hits the pipe pair
///
/// `gap` is the current gap height, shared by every pipe on screen.
pub fn pipe_collision(bird: &Aabb, pipe: &Pipe, pipe_width: f32, gap: f32) -> bool {
    let column = Aabb::new(
        Vec2::new(pipe.x, f32::NEG_INFINITY),
        Vec2::new(pipe.right_edge(pipe_width), f32::INFINITY),
    );
    bird.overlaps_x(&column) && (bird.min.y < pipe.gap_y || bird.max.y > pipe.gap_y + gap)
}

/// Check whether the bird touches the ground or leaves through the ceiling
pub fn boundary_collision(bird: &Bird, ground_y: f32) -> bool {
    let bounds = bird.aabb();
    bounds.max.y > ground_y || bounds.min.y < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use proptest::prelude::*;

    fn pipe_at(x: f32, gap_y: f32) -> Pipe {
        Pipe {
            x,
            gap_y,
            passed: false,
            spacing: 150.0,
        }
    }

    fn bird_box(x: f32, y: f32) -> Aabb {
        Aabb::from_pos_size(Vec2::new(x, y), Vec2::new(34.0, 24.0))
    }

    #[test]
    fn test_bird_inside_gap_misses() {
        let pipe = pipe_at(60.0, 150.0);
        // Fully inside [150, 300] with horizontal overlap
        assert!(!pipe_collision(&bird_box(50.0, 200.0), &pipe, 42.0, 150.0));
        // Edges flush with the band still count as inside
        assert!(!pipe_collision(&bird_box(50.0, 150.0), &pipe, 42.0, 150.0));
        assert!(!pipe_collision(&bird_box(50.0, 276.0), &pipe, 42.0, 150.0));
    }

    #[test]
    fn test_bird_above_or_below_gap_hits() {
        let pipe = pipe_at(60.0, 150.0);
        assert!(pipe_collision(&bird_box(50.0, 149.0), &pipe, 42.0, 150.0));
        assert!(pipe_collision(&bird_box(50.0, 277.0), &pipe, 42.0, 150.0));
    }

    #[test]
    fn test_no_horizontal_overlap_misses() {
        // Bird spans [50, 84); pipe starts exactly at its right edge
        let pipe = pipe_at(84.0, 150.0);
        assert!(!pipe_collision(&bird_box(50.0, 0.0), &pipe, 42.0, 150.0));
        // Pipe ends exactly at the bird's left edge
        let pipe = pipe_at(8.0, 150.0);
        assert!(!pipe_collision(&bird_box(50.0, 0.0), &pipe, 42.0, 150.0));
    }

    #[test]
    fn test_boundary_exact_ground_contact() {
        let config = SimConfig::classic();
        let ground_y = config.ground_y();
        let mut bird = Bird::new(&config.bird, ground_y - config.bird.height);
        assert!(!boundary_collision(&bird, ground_y));

        bird.pos.y = ground_y - config.bird.height + 0.0001;
        assert!(boundary_collision(&bird, ground_y));
    }

    #[test]
    fn test_boundary_ceiling() {
        let config = SimConfig::classic();
        let mut bird = Bird::new(&config.bird, 0.0);
        assert!(!boundary_collision(&bird, config.ground_y()));
        bird.pos.y = -0.01;
        assert!(boundary_collision(&bird, config.ground_y()));
    }

    #[test]
    fn test_aabb_contains_is_half_open() {
        let b = Aabb::from_pos_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(b.contains(Vec2::ZERO));
        assert!(!b.contains(Vec2::new(10.0, 5.0)));
        assert!(!b.contains(Vec2::new(5.0, 10.0)));
        assert!(b.overlaps_x(&Aabb::from_pos_size(Vec2::new(9.0, 50.0), Vec2::ONE)));
        assert!(!b.overlaps_x(&Aabb::from_pos_size(Vec2::new(10.0, 0.0), Vec2::ONE)));
    }

    proptest! {
        #[test]
        fn collision_iff_overlap_and_outside_gap(
            bird_x in 0.0f32..300.0,
            bird_y in 0.0f32..400.0,
            pipe_x in -50.0f32..320.0,
            gap_y in 120.0f32..210.0,
            gap in 90.0f32..150.0,
        ) {
            let bird = bird_box(bird_x, bird_y);
            let pipe = pipe_at(pipe_x, gap_y);
            let overlap = bird.max.x > pipe.x && bird.min.x < pipe.x + 42.0;
            let outside = bird.min.y < gap_y || bird.max.y > gap_y + gap;
            prop_assert_eq!(pipe_collision(&bird, &pipe, 42.0, gap), overlap && outside);
        }
    }
}
