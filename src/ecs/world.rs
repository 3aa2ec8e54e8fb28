//! World - owns the population, the map and the clock
//!
//! One `update(dt)` is one fixed-timestep tick:
//! 1. needs for everyone (parallel over large populations)
//! 2. per creature, in order: death check, then movement or interaction
//! 3. plant regrowth
//! 4. commit deferred kills and births
//! 5. drop the dead

use std::sync::Arc;

use ahash::AHashMap;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Coord, EntityId, Species, Tick};
use crate::entity::creature::Creature;
use crate::entity::species::SpeciesProfile;
use crate::simulation::action_select::BehaviorContext;
use crate::simulation::lifecycle::{self, LifecycleCommand};
use crate::simulation::stats::PopulationStats;
use crate::simulation::tick::{self, SimulationEvent};
use crate::spatial::pathfinding::GridPathfinder;
use crate::world::grid_environment::GridEnvironment;
use crate::world::plant::Plant;
use crate::world::terrain::Terrain;

pub struct World {
    pub current_tick: Tick,
    /// Simulated seconds since the world was created
    pub elapsed: f32,
    config: SimulationConfig,
    environment: GridEnvironment,
    pathfinder: GridPathfinder,
    profiles: AHashMap<Species, Arc<SpeciesProfile>>,
    creatures: Vec<Creature>,
    index: AHashMap<EntityId, usize>,
    rng: ChaCha8Rng,
    stats: PopulationStats,
}

impl World {
    /// Generate terrain from the seed and place the initial plants and creatures
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.world.seed);
        let terrain = Terrain::generate(&config.world, &mut rng);

        let mut world = Self::build(config, terrain, rng);
        world.populate()?;
        Ok(world)
    }

    /// Empty world on a given map; nothing is placed
    pub fn with_terrain(config: SimulationConfig, terrain: Terrain) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.world.seed);
        Ok(Self::build(config, terrain, rng))
    }

    fn build(config: SimulationConfig, terrain: Terrain, rng: ChaCha8Rng) -> Self {
        let pathfinder = GridPathfinder::new(terrain.walkable_grid());
        let environment = GridEnvironment::new(terrain, config.behavior.max_view_distance);
        let profiles = config
            .species
            .iter()
            .map(|s| (s.species, Arc::new(SpeciesProfile::from_config(s))))
            .collect();

        Self {
            current_tick: 0,
            elapsed: 0.0,
            config,
            environment,
            pathfinder,
            profiles,
            creatures: Vec::new(),
            index: AHashMap::new(),
            rng,
            stats: PopulationStats::default(),
        }
    }

    fn populate(&mut self) -> Result<()> {
        let land = self.environment.terrain().land_tiles();
        if land.is_empty() {
            tracing::warn!("map has no land, nothing placed");
            return Ok(());
        }

        for _ in 0..self.config.world.plant_count {
            if let Some(&coord) = land.choose(&mut self.rng) {
                self.add_plant(coord);
            }
        }

        let counts: Vec<(Species, usize)> = self
            .config
            .species
            .iter()
            .map(|s| (s.species, s.initial_count))
            .collect();
        for (species, count) in counts {
            for _ in 0..count {
                if let Some(&coord) = land.choose(&mut self.rng) {
                    self.spawn(species, coord)?;
                }
            }
        }

        self.refresh_population();
        tracing::info!(
            plants = self.environment.population(Species::Plant),
            creatures = self.creatures.len(),
            "world populated"
        );
        Ok(())
    }

    pub fn add_plant(&mut self, coord: Coord) -> EntityId {
        let world = &self.config.world;
        let plant = Plant::new(world.plant_amount, world.plant_regrowth_rate);
        self.environment.add_plant(coord, plant)
    }

    /// Place a new creature; it picks its first action immediately
    pub fn spawn(&mut self, species: Species, coord: Coord) -> Result<EntityId> {
        let profile = self
            .profiles
            .get(&species)
            .cloned()
            .ok_or(SimError::UnknownSpecies(species))?;

        let (now, tick) = (self.elapsed, self.current_tick);
        let mut commands = Vec::new();
        let World { config, environment, pathfinder, rng, .. } = self;
        let mut ctx = BehaviorContext {
            config: &config.behavior,
            environment,
            pathfinder,
            rng,
            now,
            tick,
            commands: &mut commands,
        };
        let creature = lifecycle::spawn(profile, coord, &mut ctx);

        let id = creature.id;
        self.index.insert(id, self.creatures.len());
        self.creatures.push(creature);
        Ok(id)
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) -> Vec<SimulationEvent> {
        let current = self.current_tick;
        self.elapsed += dt;
        let now = self.elapsed;

        let mut events = Vec::new();
        let mut commands = Vec::new();

        tick::tick_needs(&mut self.creatures, dt, &self.config.behavior);

        {
            let World { config, environment, pathfinder, rng, creatures, .. } = self;
            let mut ctx = BehaviorContext {
                config: &config.behavior,
                environment,
                pathfinder,
                rng,
                now,
                tick: current,
                commands: &mut commands,
            };

            for creature in creatures.iter_mut() {
                // Eaten earlier this tick
                if !creature.is_alive() || !ctx.environment.is_alive(creature.id) {
                    continue;
                }
                if let Some(cause) = tick::resolve(creature, dt, &mut ctx) {
                    events.push(SimulationEvent::Died {
                        id: creature.id,
                        species: creature.species(),
                        coord: creature.coord,
                        cause,
                        tick: current,
                    });
                }
            }
        }

        self.environment.regrow_plants(dt);
        self.commit(commands, now, &mut events);

        self.creatures.retain(|c| c.is_alive());
        self.index = self
            .creatures
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();

        for event in &events {
            self.stats.record(event);
        }
        self.refresh_population();
        self.current_tick += 1;
        events
    }

    fn commit(&mut self, commands: Vec<LifecycleCommand>, now: f32, events: &mut Vec<SimulationEvent>) {
        let tick = self.current_tick;
        let mut births = Vec::new();

        for command in commands {
            match command {
                LifecycleCommand::Kill { id, cause } => {
                    let Some(creature) = self.index.get(&id).map(|&i| &mut self.creatures[i]) else {
                        continue;
                    };
                    if !creature.is_alive() {
                        continue;
                    }
                    creature.cause_of_death = Some(cause);
                    tracing::debug!(?id, species = ?creature.species(), ?cause, "died");
                    events.push(SimulationEvent::Died {
                        id,
                        species: creature.species(),
                        coord: creature.coord,
                        cause,
                        tick,
                    });
                }
                LifecycleCommand::Reproduce { parent, profile, coord } => {
                    let World { config, environment, pathfinder, rng, .. } = self;
                    let mut ctx = BehaviorContext {
                        config: &config.behavior,
                        environment,
                        pathfinder,
                        rng,
                        now,
                        tick,
                        // A newborn only picks its first action, which never kills or mates
                        commands: &mut Vec::new(),
                    };
                    let child = lifecycle::reproduce(parent, profile, coord, &mut ctx);
                    events.push(SimulationEvent::Born {
                        id: child.id,
                        species: child.species(),
                        coord,
                        parent: Some(parent),
                        tick,
                    });
                    births.push(child);
                }
            }
        }

        for child in births {
            self.index.insert(child.id, self.creatures.len());
            self.creatures.push(child);
        }
    }

    fn refresh_population(&mut self) {
        self.stats.population = self
            .profiles
            .keys()
            .map(|&species| (species, self.environment.population(species)))
            .collect();
    }

    pub fn creature(&self, id: EntityId) -> Option<&Creature> {
        self.index.get(&id).map(|&i| &self.creatures[i])
    }

    pub fn creature_mut(&mut self, id: EntityId) -> Option<&mut Creature> {
        self.index.get(&id).map(|&i| &mut self.creatures[i])
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    /// Live count for one species, plants included
    pub fn population(&self, species: Species) -> usize {
        self.environment.population(species)
    }

    pub fn environment(&self) -> &GridEnvironment {
        &self.environment
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn stats(&self) -> &PopulationStats {
        &self.stats
    }
}
