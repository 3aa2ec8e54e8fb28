//! Single-tile movement steps
//!
//! Diagonal steps cover √2 tiles, so they advance at 1/√2 of the orthogonal
//! rate and every step takes time proportional to its Euclidean length.

use serde::{Deserialize, Serialize};

use crate::core::types::{Coord, Vec2};

const SQRT_TWO: f32 = std::f32::consts::SQRT_2;
const ONE_OVER_SQRT_TWO: f32 = 1.0 / SQRT_TWO;

/// An in-progress move from one tile to a neighbour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveStep {
    pub from: Coord,
    pub to: Coord,
    pub start_pos: Vec2,
    pub target_pos: Vec2,
    /// 0.0 at `from`, 1.0 at `to`
    pub progress: f32,
    pub speed_factor: f32,
    pub arc_factor: f32,
}

impl MoveStep {
    pub fn new(from: Coord, to: Coord, start_pos: Vec2, target_pos: Vec2) -> Self {
        let diagonal = from.sqr_distance(&to) > 1;
        Self {
            from,
            to,
            start_pos,
            target_pos,
            progress: 0.0,
            speed_factor: if diagonal { ONE_OVER_SQRT_TWO } else { 1.0 },
            arc_factor: if diagonal { SQRT_TWO } else { 1.0 },
        }
    }

    pub fn is_diagonal(&self) -> bool {
        self.from.sqr_distance(&self.to) > 1
    }

    /// Advance by `dt` seconds; returns true once the step has finished
    pub fn advance(&mut self, dt: f32, move_speed: f32) -> bool {
        self.progress = (self.progress + dt * move_speed * self.speed_factor).min(1.0);
        self.progress >= 1.0
    }

    /// Interpolated ground position
    pub fn position(&self) -> Vec2 {
        self.start_pos.lerp(&self.target_pos, self.progress)
    }

    /// Hop height, peaking halfway through the step. Cosmetic.
    pub fn height(&self, arc_height: f32) -> f32 {
        let t = self.progress - 0.5;
        (1.0 - 4.0 * t * t) * arc_height * self.arc_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn step(from: Coord, to: Coord) -> MoveStep {
        MoveStep::new(from, to, from.into(), to.into())
    }

    fn time_to_finish(mut s: MoveStep, dt: f32, speed: f32) -> f32 {
        let mut elapsed = 0.0;
        while !s.advance(dt, speed) {
            elapsed += dt;
        }
        elapsed + dt
    }

    #[test]
    fn test_orthogonal_factors() {
        let s = step(Coord::new(0, 0), Coord::new(1, 0));
        assert!(!s.is_diagonal());
        assert_eq!(s.speed_factor, 1.0);
        assert_eq!(s.arc_factor, 1.0);
    }

    #[test]
    fn test_diagonal_factors() {
        let s = step(Coord::new(0, 0), Coord::new(1, 1));
        assert!(s.is_diagonal());
        assert!((s.speed_factor - 0.70710677).abs() < 1e-5);
        assert!((s.arc_factor - 1.4142135).abs() < 1e-5);
    }

    #[test]
    fn test_progress_clamps_at_one() {
        let mut s = step(Coord::new(0, 0), Coord::new(1, 0));
        assert!(s.advance(10.0, 1.5));
        assert_eq!(s.progress, 1.0);
        assert_eq!(s.position(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_height_peaks_midway() {
        let mut s = step(Coord::new(0, 0), Coord::new(1, 0));
        assert_eq!(s.height(0.2), 0.0);
        s.progress = 0.5;
        assert!((s.height(0.2) - 0.2).abs() < 1e-6);
        s.progress = 1.0;
        assert!(s.height(0.2).abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_time_scales_with_distance() {
        let speed = 1.5;
        let dt = 0.001;
        let ortho = time_to_finish(step(Coord::new(0, 0), Coord::new(0, 1)), dt, speed);
        let diag = time_to_finish(step(Coord::new(0, 0), Coord::new(1, 1)), dt, speed);

        // Same time per unit of Euclidean distance
        let ortho_rate = ortho / 1.0;
        let diag_rate = diag / SQRT_TWO;
        assert!((ortho_rate - diag_rate).abs() < 0.01, "{} vs {}", ortho_rate, diag_rate);
    }

    proptest! {
        #[test]
        fn prop_progress_monotonic_and_bounded(dts in prop::collection::vec(0.0f32..0.5, 1..50)) {
            let mut s = step(Coord::new(3, 3), Coord::new(4, 2));
            let mut last = 0.0;
            for dt in dts {
                s.advance(dt, 1.5);
                prop_assert!(s.progress >= last);
                prop_assert!(s.progress <= 1.0);
                last = s.progress;
            }
        }
    }
}
