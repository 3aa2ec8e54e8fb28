//! Generic grid for per-tile data

use crate::core::types::{Coord, Vec2};

/// Generic 2D grid addressed by tile coordinate
#[derive(Debug, Clone)]
pub struct Grid<T: Clone + Default> {
    pub width: usize,
    pub height: usize,
    pub cell_size: f32,
    pub origin: Vec2,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize, cell_size: f32, origin: Vec2) -> Self {
        Self {
            width,
            height,
            cell_size,
            origin,
            data: vec![T::default(); width * height],
        }
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as usize) < self.width && (coord.y as usize) < self.height
    }

    #[inline]
    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.y as usize * self.width + coord.x as usize)
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> Option<&T> {
        self.index(coord).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut T> {
        self.index(coord).map(move |i| &mut self.data[i])
    }

    #[inline]
    pub fn set(&mut self, coord: Coord, value: T) {
        if let Some(i) = self.index(coord) {
            self.data[i] = value;
        }
    }

    /// Every coordinate in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height as i32).flat_map(move |y| (0..self.width as i32).map(move |x| Coord::new(x, y)))
    }

    /// Tile centre in world coordinates
    pub fn cell_center(&self, coord: Coord) -> Vec2 {
        Vec2::new(
            self.origin.x + (coord.x as f32 + 0.5) * self.cell_size,
            self.origin.y + (coord.y as f32 + 0.5) * self.cell_size,
        )
    }
}
