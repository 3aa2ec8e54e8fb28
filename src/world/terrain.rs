//! Land and water tiles

use rand::Rng;
use rand::RngCore;

use crate::core::config::WorldConfig;
use crate::core::types::{Coord, Vec2};
use crate::spatial::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Land,
    Water,
}

/// Static tile map
#[derive(Debug, Clone)]
pub struct Terrain {
    tiles: Grid<Tile>,
}

impl Terrain {
    /// All-land map
    pub fn flat(width: usize, height: usize) -> Self {
        Self {
            tiles: Grid::new(width, height, 1.0, Vec2::default()),
        }
    }

    /// Land with circular lakes scattered by `rng`
    pub fn generate(config: &WorldConfig, rng: &mut dyn RngCore) -> Self {
        let mut terrain = Self::flat(config.width, config.height);
        for _ in 0..config.lake_count {
            let centre = Coord::new(
                rng.gen_range(0..config.width as i32),
                rng.gen_range(0..config.height as i32),
            );
            let radius = rng.gen_range(1..=config.lake_radius.max(1));
            terrain.add_lake(centre, radius);
        }
        terrain
    }

    pub fn add_lake(&mut self, centre: Coord, radius: i32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set(Coord::new(centre.x + dx, centre.y + dy), Tile::Water);
                }
            }
        }
    }

    pub fn set(&mut self, coord: Coord, tile: Tile) {
        self.tiles.set(coord, tile);
    }

    pub fn width(&self) -> usize {
        self.tiles.width
    }

    pub fn height(&self) -> usize {
        self.tiles.height
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.tiles.contains(coord)
    }

    pub fn is_water(&self, coord: Coord) -> bool {
        self.tiles.get(coord) == Some(&Tile::Water)
    }

    pub fn is_walkable(&self, coord: Coord) -> bool {
        self.tiles.get(coord) == Some(&Tile::Land)
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.tiles.coords()
    }

    pub fn land_tiles(&self) -> Vec<Coord> {
        self.coords().filter(|c| self.is_walkable(*c)).collect()
    }

    pub fn tile_centre(&self, coord: Coord) -> Vec2 {
        self.tiles.cell_center(coord)
    }

    /// Walkable neighbours of a tile
    pub fn walkable_neighbours(&self, coord: Coord) -> Vec<Coord> {
        coord
            .neighbours()
            .into_iter()
            .filter(|c| self.is_walkable(*c))
            .collect()
    }

    pub fn walkable_grid(&self) -> Grid<bool> {
        let mut grid = Grid::new(self.width(), self.height(), self.tiles.cell_size, self.tiles.origin);
        for coord in self.coords() {
            grid.set(coord, self.is_walkable(coord));
        }
        grid
    }

    /// True when every tile strictly between `from` and `to` is land
    pub fn line_of_sight(&self, from: Coord, to: Coord) -> bool {
        bresenham(from, to)
            .into_iter()
            .filter(|c| *c != from && *c != to)
            .all(|c| self.is_walkable(c))
    }
}

fn bresenham(from: Coord, to: Coord) -> Vec<Coord> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);
    let mut line = Vec::new();

    loop {
        line.push(Coord::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_lake_blocks_walking() {
        let mut terrain = Terrain::flat(10, 10);
        terrain.add_lake(Coord::new(5, 5), 1);
        assert!(terrain.is_water(Coord::new(5, 5)));
        assert!(terrain.is_water(Coord::new(5, 6)));
        assert!(!terrain.is_walkable(Coord::new(5, 6)));
        assert!(terrain.is_walkable(Coord::new(6, 6)));
    }

    #[test]
    fn test_out_of_bounds_is_neither() {
        let terrain = Terrain::flat(4, 4);
        assert!(!terrain.is_walkable(Coord::new(-1, 0)));
        assert!(!terrain.is_water(Coord::new(-1, 0)));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = WorldConfig::default();
        let a = Terrain::generate(&config, &mut ChaCha8Rng::seed_from_u64(3));
        let b = Terrain::generate(&config, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a.land_tiles(), b.land_tiles());
        assert!(a.land_tiles().len() < config.width * config.height);
    }

    #[test]
    fn test_line_of_sight_blocked_by_water() {
        let mut terrain = Terrain::flat(10, 10);
        terrain.set(Coord::new(3, 0), Tile::Water);
        assert!(!terrain.line_of_sight(Coord::new(0, 0), Coord::new(6, 0)));
        assert!(terrain.line_of_sight(Coord::new(0, 1), Coord::new(6, 1)));
        // The endpoint itself may be water
        assert!(terrain.line_of_sight(Coord::new(0, 0), Coord::new(3, 0)));
    }

    #[test]
    fn test_bresenham_endpoints() {
        let line = bresenham(Coord::new(0, 0), Coord::new(3, -2));
        assert_eq!(line.first(), Some(&Coord::new(0, 0)));
        assert_eq!(line.last(), Some(&Coord::new(3, -2)));
    }
}
