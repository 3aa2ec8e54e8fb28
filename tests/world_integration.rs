//! Integration tests for whole-world ticks
//!
//! These run the real grid environment and A* pathfinder:
//! - births land in the population index under the parent's species
//! - one mating encounter produces exactly one offspring
//! - long runs keep every creature on land and never mid-step while interacting
//! - configuration loaded from TOML drives the run

use wildgrid::core::config::{PolicyKind, SimulationConfig, WorldConfig};
use wildgrid::core::types::{Coord, Species};
use wildgrid::ecs::world::World;
use wildgrid::entity::action::Action;
use wildgrid::simulation::tick::SimulationEvent;
use wildgrid::world::terrain::{Terrain, Tile};

fn empty_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world = WorldConfig { plant_count: 0, ..Default::default() };
    for species in &mut config.species {
        species.initial_count = 0;
    }
    config
}

#[test]
fn test_mating_adds_one_rabbit() {
    let mut world = World::with_terrain(empty_config(), Terrain::flat(10, 10)).unwrap();
    let a = world.spawn(Species::Rabbit, Coord::new(3, 3)).unwrap();
    let b = world.spawn(Species::Rabbit, Coord::new(3, 4)).unwrap();

    for (id, action) in [(a, Action::Mating(b)), (b, Action::Idle)] {
        let creature = world.creature_mut(id).unwrap();
        creature.motion = None;
        creature.action = action;
        // Hold the current action for this tick
        creature.last_decision = 1.0e6;
    }
    world.creature_mut(a).unwrap().needs.desire = 0.6;
    let hunger_before = world.creature(a).unwrap().needs.hunger;

    let events = world.update(0.1);

    let births: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            SimulationEvent::Born { id, species, coord, parent, .. } => Some((*id, *species, *coord, *parent)),
            _ => None,
        })
        .collect();
    assert_eq!(births.len(), 1);
    let (child, species, coord, parent) = births[0];
    assert_eq!(species, Species::Rabbit);
    assert_eq!(coord, Coord::new(3, 3));
    assert_eq!(parent, Some(a));

    assert_eq!(world.population(Species::Rabbit), 3);
    assert_eq!(world.stats().births, 1);
    assert_eq!(world.creature(child).unwrap().parent, Some(a));

    let parent = world.creature(a).unwrap();
    assert_eq!(parent.needs.desire, 0.0);
    assert_eq!(parent.action, Action::Idle);
    assert!((parent.needs.hunger - (hunger_before + 0.1 / 200.0)).abs() < 1e-6);
}

#[test]
fn test_one_encounter_yields_one_offspring() {
    let mut world = World::with_terrain(empty_config(), Terrain::flat(10, 10)).unwrap();
    let a = world.spawn(Species::Rabbit, Coord::new(3, 3)).unwrap();
    let b = world.spawn(Species::Rabbit, Coord::new(3, 4)).unwrap();

    for (id, action) in [(a, Action::Mating(b)), (b, Action::Idle)] {
        let creature = world.creature_mut(id).unwrap();
        creature.motion = None;
        creature.action = action;
        creature.last_decision = 0.0;
    }
    world.creature_mut(a).unwrap().needs.desire = 0.6;

    // Desire keeps growing every tick, all inside one decision interval
    let mut births = 0;
    for _ in 0..9 {
        births += world
            .update(0.1)
            .iter()
            .filter(|e| matches!(e, SimulationEvent::Born { .. }))
            .count();
    }

    assert_eq!(births, 1);
    assert_eq!(world.stats().births, 1);
    assert_eq!(world.population(Species::Rabbit), 3);
    let parent = world.creature(a).unwrap();
    assert_eq!(parent.action, Action::Idle);
    assert!(parent.needs.desire > 0.0);
}

#[test]
fn test_drinks_from_lake_across_map() {
    let mut config = empty_config();
    config.species.retain(|s| s.species == Species::Rabbit);
    let mut terrain = Terrain::flat(12, 12);
    terrain.set(Coord::new(8, 2), Tile::Water);
    let mut world = World::with_terrain(config, terrain).unwrap();
    let id = world.spawn(Species::Rabbit, Coord::new(2, 2)).unwrap();
    {
        let rabbit = world.creature_mut(id).unwrap();
        rabbit.needs.thirst = 0.4;
        rabbit.last_decision = -10.0;
    }

    let mut drank = false;
    for _ in 0..200 {
        world.update(0.1);
        let rabbit = world.creature(id).unwrap();
        if let Action::Drinking(water) = rabbit.action {
            assert_eq!(water, Coord::new(8, 2));
            assert!(rabbit.coord.is_neighbour(&water));
            drank = true;
            break;
        }
    }
    assert!(drank);
}

#[test]
fn test_long_run_keeps_invariants() {
    let mut config = SimulationConfig::default();
    for species in &mut config.species {
        species.policy = PolicyKind::FullDrive;
    }
    let mut world = World::new(config).unwrap();

    let mut deaths = 0;
    for _ in 0..600 {
        for event in world.update(0.5) {
            if let SimulationEvent::Died { id, .. } = event {
                assert!(world.creature(id).is_none());
                deaths += 1;
            }
        }

        let terrain = world.environment().terrain();
        for creature in world.creatures() {
            assert!(creature.is_alive());
            assert!(terrain.is_walkable(creature.coord));
            assert!(!(creature.is_moving() && creature.action.is_interaction()));
        }
        for (species, count) in &world.stats().population {
            let live = world.creatures().iter().filter(|c| c.species() == *species).count();
            assert_eq!(*count, live);
        }
    }

    assert_eq!(world.stats().deaths() as usize, deaths);
}

#[test]
fn test_run_from_toml() {
    let toml = r#"
        [world]
        width = 16
        height = 16
        seed = 9
        plant_count = 20
        lake_count = 1

        [[species]]
        species = "rabbit"
        diet = ["plant"]
        initial_count = 5
    "#;
    let config = SimulationConfig::from_toml_str(toml).unwrap();
    let mut world = World::new(config).unwrap();
    assert_eq!(world.population(Species::Rabbit), 5);
    assert_eq!(world.population(Species::Fox), 0);

    for _ in 0..100 {
        world.update(0.1);
    }
    assert_eq!(world.current_tick, 100);
    assert!((world.elapsed - 10.0).abs() < 1e-3);
}
