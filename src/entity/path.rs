//! Cached route toward the current goal tile

use crate::core::types::Coord;
use crate::spatial::pathfinding::Pathfinder;

/// A route plus cursor, rebuilt only when it can no longer be trusted
///
/// `route` excludes the tile it was planned from; `origin` stands in for the
/// step before the first element so a fresh route can be validated the same
/// way as a partly walked one.
#[derive(Debug, Clone, Default)]
pub struct PathCache {
    origin: Coord,
    route: Vec<Coord>,
    cursor: usize,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the cached route leads to `goal` from where the creature is
    ///
    /// Returns true when a new search was run.
    pub fn ensure(
        &mut self,
        goal: Coord,
        current: Coord,
        last_move_target: Coord,
        pathfinder: &dyn Pathfinder,
    ) -> bool {
        if !self.is_stale(goal, last_move_target) {
            return false;
        }

        self.route = pathfinder.find_path(current, goal);
        self.origin = current;
        self.cursor = 0;

        tracing::trace!(?current, ?goal, len = self.route.len(), "path rebuilt");
        true
    }

    fn is_stale(&self, goal: Coord, last_move_target: Coord) -> bool {
        let Some(last) = self.route.last() else {
            return true;
        };
        if self.cursor >= self.route.len() || *last != goal {
            return true;
        }
        let preceding = match self.cursor {
            0 => self.origin,
            n => self.route[n - 1],
        };
        preceding != last_move_target
    }

    /// Next tile to step onto, advancing the cursor
    pub fn next_step(&mut self) -> Option<Coord> {
        let step = self.route.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(step)
    }

    /// True when the last search found no route
    pub fn is_unreachable(&self) -> bool {
        self.route.is_empty()
    }

    pub fn route(&self) -> &[Coord] {
        &self.route
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.route.clear();
        self.cursor = 0;
    }
}
