//! Scripted collaborators for driving the behavior engine in isolation

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use wildgrid::core::config::BehaviorConfig;
use wildgrid::core::types::{Coord, EntityId, Species, Vec2};
use wildgrid::entity::action::FoodSource;
use wildgrid::entity::creature::Creature;
use wildgrid::entity::species::{FullDrivePolicy, SpeciesProfile};
use wildgrid::simulation::action_select::BehaviorContext;
use wildgrid::simulation::lifecycle::LifecycleCommand;
use wildgrid::spatial::pathfinding::Pathfinder;
use wildgrid::world::environment::{Environment, FoodPenalty, Occupant};

/// Environment with fixed sensing answers and a plain index
#[derive(Default)]
pub struct ScriptedEnvironment {
    pub index: HashMap<EntityId, (Occupant, Coord)>,
    /// Returned by `sense_food` while it is still registered
    pub food: Option<FoodSource>,
    pub water: Option<Coord>,
    pub plants: HashMap<EntityId, f32>,
    pub explore_calls: Cell<u32>,
}

impl ScriptedEnvironment {
    pub fn add_plant(&mut self, coord: Coord, amount: f32) -> EntityId {
        let id = EntityId::new();
        self.plants.insert(id, amount);
        self.add(Occupant { id, species: Species::Plant, sex: None }, coord);
        id
    }
}

impl Environment for ScriptedEnvironment {
    fn sense_food(&self, _coord: Coord, _diet: &[Species], _penalty: FoodPenalty<'_>) -> Option<FoodSource> {
        self.food.filter(|f| self.index.contains_key(&f.id))
    }

    fn sense_water(&self, _coord: Coord) -> Option<Coord> {
        self.water
    }

    fn sense_potential_mates(&self, _coord: Coord, seeker: &Occupant) -> Vec<EntityId> {
        self.index
            .values()
            .filter(|(o, _)| o.id != seeker.id && o.species == seeker.species && o.sex.is_some() && o.sex != seeker.sex)
            .map(|(o, _)| o.id)
            .collect()
    }

    /// Always heads +x
    fn next_weighted_explore_tile(&self, coord: Coord, _previous: Coord, _rng: &mut dyn RngCore) -> Coord {
        self.explore_calls.set(self.explore_calls.get() + 1);
        Coord::new(coord.x + 1, coord.y)
    }

    fn tile_centre(&self, coord: Coord) -> Vec2 {
        Vec2::new(coord.x as f32 + 0.5, coord.y as f32 + 0.5)
    }

    fn register_move(&mut self, entity: EntityId, _from: Coord, to: Coord) {
        if let Some(entry) = self.index.get_mut(&entity) {
            entry.1 = to;
        }
    }

    fn add(&mut self, occupant: Occupant, coord: Coord) {
        self.index.insert(occupant.id, (occupant, coord));
    }

    fn remove(&mut self, entity: EntityId) -> bool {
        self.plants.remove(&entity);
        self.index.remove(&entity).is_some()
    }

    fn coord_of(&self, entity: EntityId) -> Option<Coord> {
        self.index.get(&entity).map(|(_, c)| *c)
    }

    fn consume_plant(&mut self, plant: EntityId, amount: f32) -> f32 {
        let Some(left) = self.plants.get_mut(&plant) else {
            return 0.0;
        };
        let eaten = amount.min(*left);
        *left -= eaten;
        if *left <= 0.0 {
            self.remove(plant);
        }
        eaten
    }
}

/// Straight-line routes on an open grid, counting every search
#[derive(Default)]
pub struct CountingPathfinder {
    pub calls: Cell<u32>,
}

impl Pathfinder for CountingPathfinder {
    fn find_path(&self, start: Coord, goal: Coord) -> Vec<Coord> {
        self.calls.set(self.calls.get() + 1);
        let mut route = Vec::new();
        let mut at = start;
        while at != goal {
            at = Coord::new(at.x + (goal.x - at.x).signum(), at.y + (goal.y - at.y).signum());
            route.push(at);
        }
        route
    }
}

pub struct Harness {
    pub config: BehaviorConfig,
    pub env: ScriptedEnvironment,
    pub pathfinder: CountingPathfinder,
    pub rng: ChaCha8Rng,
    pub commands: Vec<LifecycleCommand>,
    pub now: f32,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            config: BehaviorConfig::default(),
            env: ScriptedEnvironment::default(),
            pathfinder: CountingPathfinder::default(),
            rng: ChaCha8Rng::seed_from_u64(7),
            commands: Vec::new(),
            now: 0.0,
        }
    }

    pub fn ctx(&mut self) -> BehaviorContext<'_> {
        BehaviorContext {
            config: &self.config,
            environment: &mut self.env,
            pathfinder: &self.pathfinder,
            rng: &mut self.rng,
            now: self.now,
            tick: 0,
            commands: &mut self.commands,
        }
    }

    /// Registered, stationary creature with zeroed drives
    pub fn creature(&mut self, species: Species, diet: Vec<Species>, coord: Coord) -> Creature {
        let profile = Arc::new(SpeciesProfile::new(species, diet));
        let position = self.env.tile_centre(coord);
        let creature = Creature::new(profile, coord, position, 0, &mut self.rng);
        self.env.add(creature.occupant(), coord);
        creature
    }

    pub fn rabbit(&mut self, coord: Coord) -> Creature {
        self.creature(Species::Rabbit, vec![Species::Plant], coord)
    }

    /// Rabbit that also rests and seeks mates
    pub fn full_drive_rabbit(&mut self, coord: Coord) -> Creature {
        let profile = SpeciesProfile::new(Species::Rabbit, vec![Species::Plant]).with_behavior(Arc::new(FullDrivePolicy));
        let position = self.env.tile_centre(coord);
        let creature = Creature::new(Arc::new(profile), coord, position, 0, &mut self.rng);
        self.env.add(creature.occupant(), coord);
        creature
    }

    /// Re-register after editing genes so the index sees the new sex
    pub fn reregister(&mut self, creature: &Creature) {
        self.env.add(creature.occupant(), creature.coord);
    }
}
