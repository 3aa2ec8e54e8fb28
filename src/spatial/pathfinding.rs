//! A* pathfinding over the tile grid
//!
//! 8-connected, with diagonal steps costing √2 and no corner cutting past
//! blocked tiles. The goal tile itself may be blocked (creatures path to a
//! water tile and stop beside it).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ahash::AHashMap;
use ordered_float::OrderedFloat;

use crate::core::types::Coord;
use crate::spatial::grid::Grid;

/// Route search used by the behavior engine
pub trait Pathfinder {
    /// Ordered route from `start` (excluded) to `goal` (included)
    ///
    /// Empty if the goal is unreachable or equal to `start`.
    fn find_path(&self, start: Coord, goal: Coord) -> Vec<Coord>;
}

/// A* over a walkability grid
#[derive(Debug, Clone)]
pub struct GridPathfinder {
    walkable: Grid<bool>,
}

impl GridPathfinder {
    pub fn new(walkable: Grid<bool>) -> Self {
        Self { walkable }
    }

    fn is_walkable(&self, coord: Coord) -> bool {
        self.walkable.get(coord).copied().unwrap_or(false)
    }

    /// Octile distance, admissible for 8-connected movement
    fn heuristic(a: Coord, b: Coord) -> f32 {
        let dx = (a.x - b.x).abs() as f32;
        let dy = (a.y - b.y).abs() as f32;
        let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
        hi + (std::f32::consts::SQRT_2 - 1.0) * lo
    }

    fn step_allowed(&self, from: Coord, to: Coord, goal: Coord) -> bool {
        if !self.walkable.contains(to) {
            return false;
        }
        if to != goal && !self.is_walkable(to) {
            return false;
        }
        if from.x != to.x && from.y != to.y {
            // Both orthogonal tiles must be open to cross diagonally
            return self.is_walkable(Coord::new(to.x, from.y))
                && self.is_walkable(Coord::new(from.x, to.y));
        }
        true
    }
}

impl Pathfinder for GridPathfinder {
    fn find_path(&self, start: Coord, goal: Coord) -> Vec<Coord> {
        if start == goal || !self.walkable.contains(goal) {
            return Vec::new();
        }

        let mut open_set = BinaryHeap::new();
        let mut came_from: AHashMap<Coord, Coord> = AHashMap::new();
        let mut g_scores: AHashMap<Coord, f32> = AHashMap::new();

        g_scores.insert(start, 0.0);
        open_set.push(Reverse((OrderedFloat(Self::heuristic(start, goal)), start.x, start.y)));

        while let Some(Reverse((_, x, y))) = open_set.pop() {
            let current = Coord::new(x, y);
            if current == goal {
                return reconstruct_path(&came_from, start, goal);
            }

            let current_g = *g_scores.get(&current).unwrap_or(&f32::INFINITY);

            for neighbor in current.neighbours() {
                if !self.step_allowed(current, neighbor, goal) {
                    continue;
                }

                let move_cost = if current.sqr_distance(&neighbor) > 1 {
                    std::f32::consts::SQRT_2
                } else {
                    1.0
                };
                let tentative_g = current_g + move_cost;
                let neighbor_g = *g_scores.get(&neighbor).unwrap_or(&f32::INFINITY);

                if tentative_g < neighbor_g {
                    came_from.insert(neighbor, current);
                    g_scores.insert(neighbor, tentative_g);

                    let f_cost = tentative_g + Self::heuristic(neighbor, goal);
                    open_set.push(Reverse((OrderedFloat(f_cost), neighbor.x, neighbor.y)));
                }
            }
        }

        Vec::new()
    }
}

/// Walk `came_from` back to `start`, returning the route without it
fn reconstruct_path(came_from: &AHashMap<Coord, Coord>, start: Coord, goal: Coord) -> Vec<Coord> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
