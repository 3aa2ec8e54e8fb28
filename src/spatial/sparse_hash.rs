//! Sparse hash grid for efficient neighbourhood queries on tile coordinates

use ahash::AHashMap;

use crate::core::types::{Coord, EntityId};

/// Buckets entities by square cells of `cell_size` tiles
#[derive(Debug, Clone)]
pub struct SparseHashGrid {
    cell_size: i32,
    cells: AHashMap<(i32, i32), Vec<EntityId>>,
    coords: AHashMap<EntityId, Coord>,
}

impl SparseHashGrid {
    pub fn new(cell_size: i32) -> Self {
        Self {
            cell_size: cell_size.max(1),
            cells: AHashMap::new(),
            coords: AHashMap::new(),
        }
    }

    #[inline]
    fn cell_coord(&self, coord: Coord) -> (i32, i32) {
        (
            coord.x.div_euclid(self.cell_size),
            coord.y.div_euclid(self.cell_size),
        )
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.coords.contains_key(&entity)
    }

    pub fn coord_of(&self, entity: EntityId) -> Option<Coord> {
        self.coords.get(&entity).copied()
    }

    pub fn insert(&mut self, entity: EntityId, coord: Coord) {
        if self.coords.contains_key(&entity) {
            self.remove(entity);
        }
        let cell = self.cell_coord(coord);
        self.cells.entry(cell).or_default().push(entity);
        self.coords.insert(entity, coord);
    }

    /// Returns the coordinate the entity was stored at
    pub fn remove(&mut self, entity: EntityId) -> Option<Coord> {
        let coord = self.coords.remove(&entity)?;
        let cell = self.cell_coord(coord);
        if let Some(bucket) = self.cells.get_mut(&cell) {
            bucket.retain(|&e| e != entity);
            if bucket.is_empty() {
                self.cells.remove(&cell);
            }
        }
        Some(coord)
    }

    pub fn move_entity(&mut self, entity: EntityId, to: Coord) {
        if self.remove(entity).is_some() {
            self.insert(entity, to);
        }
    }

    /// Entities whose tile lies within `radius` tiles (Euclidean) of `center`
    pub fn query_radius(&self, center: Coord, radius: i32) -> Vec<(EntityId, Coord)> {
        let radius_sq = radius * radius;
        let (min_cx, min_cy) = self.cell_coord(Coord::new(center.x - radius, center.y - radius));
        let (max_cx, max_cy) = self.cell_coord(Coord::new(center.x + radius, center.y + radius));

        let mut found = Vec::new();
        for cx in min_cx..=max_cx {
            for cy in min_cy..=max_cy {
                let Some(bucket) = self.cells.get(&(cx, cy)) else {
                    continue;
                };
                for &entity in bucket {
                    if let Some(&coord) = self.coords.get(&entity) {
                        if coord.sqr_distance(&center) <= radius_sq {
                            found.push((entity, coord));
                        }
                    }
                }
            }
        }
        found
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, Coord)> + '_ {
        self.coords.iter().map(|(&e, &c)| (e, c))
    }
}
