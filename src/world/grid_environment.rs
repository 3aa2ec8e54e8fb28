//! Tile-map environment with per-species population maps

use ahash::AHashMap;
use rand::Rng;
use rand::RngCore;

use crate::core::types::{Coord, EntityId, Species, Vec2};
use crate::entity::action::{FoodKind, FoodSource};
use crate::spatial::grid::Grid;
use crate::spatial::sparse_hash::SparseHashGrid;
use crate::world::environment::{Environment, FoodPenalty, Occupant};
use crate::world::plant::Plant;
use crate::world::terrain::Terrain;

/// Chance an explorer keeps going straight when the tile ahead is open
const FORWARD_PROBABILITY: f64 = 0.2;

/// Random neighbours sampled when picking the most forward-aligned one
const WEIGHTING_ITERATIONS: usize = 3;

pub struct GridEnvironment {
    terrain: Terrain,
    view_distance: i32,
    species_maps: AHashMap<Species, SparseHashGrid>,
    occupants: AHashMap<EntityId, Occupant>,
    plants: AHashMap<EntityId, Plant>,
    /// Closest visible water for every tile, precomputed
    nearest_water: Grid<Option<Coord>>,
}

impl GridEnvironment {
    pub fn new(terrain: Terrain, view_distance: i32) -> Self {
        let nearest_water = compute_nearest_water(&terrain, view_distance);
        Self {
            terrain,
            view_distance,
            species_maps: AHashMap::new(),
            occupants: AHashMap::new(),
            plants: AHashMap::new(),
            nearest_water,
        }
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Register a new plant and return its id
    pub fn add_plant(&mut self, coord: Coord, plant: Plant) -> EntityId {
        let id = EntityId::new();
        self.plants.insert(id, plant);
        self.add(Occupant { id, species: Species::Plant, sex: None }, coord);
        id
    }

    pub fn plant(&self, id: EntityId) -> Option<&Plant> {
        self.plants.get(&id)
    }

    pub fn regrow_plants(&mut self, dt: f32) {
        for plant in self.plants.values_mut() {
            plant.regrow(dt);
        }
    }

    pub fn occupant(&self, id: EntityId) -> Option<&Occupant> {
        self.occupants.get(&id)
    }

    /// Live count for one species
    pub fn population(&self, species: Species) -> usize {
        self.species_maps.get(&species).map_or(0, |m| m.len())
    }

    fn map_for(&mut self, species: Species) -> &mut SparseHashGrid {
        let cell = self.view_distance.max(1);
        self.species_maps
            .entry(species)
            .or_insert_with(|| SparseHashGrid::new(cell))
    }

    fn random_walkable_neighbour(&self, coord: Coord, rng: &mut dyn RngCore) -> Coord {
        let neighbours = self.terrain.walkable_neighbours(coord);
        if neighbours.is_empty() {
            return coord;
        }
        neighbours[rng.gen_range(0..neighbours.len())]
    }
}

fn compute_nearest_water(terrain: &Terrain, view_distance: i32) -> Grid<Option<Coord>> {
    let mut nearest = Grid::new(terrain.width(), terrain.height(), 1.0, Vec2::default());
    let radius_sq = view_distance * view_distance;

    for coord in terrain.coords() {
        if !terrain.is_walkable(coord) {
            continue;
        }
        let mut best: Option<(i32, Coord)> = None;
        for dy in -view_distance..=view_distance {
            for dx in -view_distance..=view_distance {
                let candidate = Coord::new(coord.x + dx, coord.y + dy);
                let dist = dx * dx + dy * dy;
                if dist > radius_sq || !terrain.is_water(candidate) {
                    continue;
                }
                if best.map_or(true, |(d, _)| dist < d) && terrain.line_of_sight(coord, candidate) {
                    best = Some((dist, candidate));
                }
            }
        }
        nearest.set(coord, best.map(|(_, c)| c));
    }
    nearest
}

impl Environment for GridEnvironment {
    fn sense_food(&self, coord: Coord, diet: &[Species], penalty: FoodPenalty<'_>) -> Option<FoodSource> {
        let mut candidates: Vec<(EntityId, Coord, Species)> = diet
            .iter()
            .filter_map(|species| self.species_maps.get(species).map(|m| (species, m)))
            .flat_map(|(species, map)| {
                map.query_radius(coord, self.view_distance)
                    .into_iter()
                    .map(move |(id, c)| (id, c, *species))
            })
            .collect();

        candidates.sort_by_key(|(_, c, _)| penalty(coord, *c));

        candidates
            .into_iter()
            .find(|(_, c, _)| self.terrain.line_of_sight(coord, *c))
            .map(|(id, _, species)| FoodSource {
                id,
                kind: if species == Species::Plant {
                    FoodKind::Plant
                } else {
                    FoodKind::Creature
                },
            })
    }

    fn sense_water(&self, coord: Coord) -> Option<Coord> {
        self.nearest_water.get(coord).copied().flatten()
    }

    fn sense_potential_mates(&self, coord: Coord, seeker: &Occupant) -> Vec<EntityId> {
        let Some(seeker_sex) = seeker.sex else {
            return Vec::new();
        };
        let Some(map) = self.species_maps.get(&seeker.species) else {
            return Vec::new();
        };

        map.query_radius(coord, self.view_distance)
            .into_iter()
            .filter(|(id, c)| {
                *id != seeker.id
                    && self.occupants.get(id).and_then(|o| o.sex) == Some(seeker_sex.opposite())
                    && self.terrain.line_of_sight(coord, *c)
            })
            .map(|(id, _)| id)
            .collect()
    }

    fn next_weighted_explore_tile(&self, coord: Coord, previous: Coord, rng: &mut dyn RngCore) -> Coord {
        if coord == previous {
            return self.random_walkable_neighbour(coord, rng);
        }

        let offset = coord - previous;
        if rng.gen_bool(FORWARD_PROBABILITY) {
            let forward = Coord::new(coord.x + offset.x, coord.y + offset.y);
            if self.terrain.is_walkable(forward) {
                return forward;
            }
        }

        let neighbours = self.terrain.walkable_neighbours(coord);
        if neighbours.is_empty() {
            return coord;
        }

        // Of a few random neighbours, keep the one most aligned with the heading
        let forward_dir = Vec2::from(offset).normalize();
        let mut best_score = f32::MIN;
        let mut best = coord;
        for _ in 0..WEIGHTING_ITERATIONS {
            let neighbour = neighbours[rng.gen_range(0..neighbours.len())];
            let score = Vec2::from(neighbour - coord).normalize().dot(&forward_dir);
            if score > best_score {
                best_score = score;
                best = neighbour;
            }
        }
        best
    }

    fn tile_centre(&self, coord: Coord) -> Vec2 {
        self.terrain.tile_centre(coord)
    }

    fn register_move(&mut self, entity: EntityId, from: Coord, to: Coord) {
        let Some(species) = self.occupants.get(&entity).map(|o| o.species) else {
            return;
        };
        tracing::trace!(?entity, ?from, ?to, "move registered");
        self.map_for(species).move_entity(entity, to);
    }

    fn add(&mut self, occupant: Occupant, coord: Coord) {
        self.occupants.insert(occupant.id, occupant);
        self.map_for(occupant.species).insert(occupant.id, coord);
    }

    fn remove(&mut self, entity: EntityId) -> bool {
        let Some(occupant) = self.occupants.remove(&entity) else {
            return false;
        };
        self.plants.remove(&entity);
        if let Some(map) = self.species_maps.get_mut(&occupant.species) {
            map.remove(entity);
        }
        true
    }

    fn coord_of(&self, entity: EntityId) -> Option<Coord> {
        let occupant = self.occupants.get(&entity)?;
        self.species_maps.get(&occupant.species)?.coord_of(entity)
    }

    fn consume_plant(&mut self, plant: EntityId, amount: f32) -> f32 {
        let Some(p) = self.plants.get_mut(&plant) else {
            return 0.0;
        };
        let eaten = p.consume(amount);
        if p.is_exhausted() {
            tracing::debug!(?plant, "plant exhausted");
            self.remove(plant);
        }
        eaten
    }
}
