//! Tick system - per-creature update order
//!
//! needs -> death check -> movement step or (interaction -> maybe reselect)
//!
//! A finished step re-enters action selection in the same tick, so a creature
//! never stands still between consecutive steps. The needs update touches only
//! the creature's own drives and runs in parallel over large populations.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::config::BehaviorConfig;
use crate::core::types::{Coord, EntityId, Species, Tick};
use crate::entity::creature::Creature;
use crate::entity::needs::CauseOfDeath;
use crate::simulation::action_select::{choose_next_action, BehaviorContext};
use crate::simulation::interaction::handle_interactions;
use crate::simulation::lifecycle;

/// Notifications returned from each world update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    Born {
        id: EntityId,
        species: Species,
        coord: Coord,
        parent: Option<EntityId>,
        tick: Tick,
    },
    Died {
        id: EntityId,
        species: Species,
        coord: Coord,
        cause: CauseOfDeath,
        tick: Tick,
    },
}

/// Accumulate drives for the whole population
pub fn tick_needs(creatures: &mut [Creature], dt: f32, config: &BehaviorConfig) {
    if creatures.len() >= config.parallel_threshold {
        creatures
            .par_iter_mut()
            .for_each(|creature| creature.needs.tick(dt, config));
    } else {
        for creature in creatures.iter_mut() {
            creature.needs.tick(dt, config);
        }
    }
}

/// Full single-creature tick
pub fn update_creature(
    creature: &mut Creature,
    dt: f32,
    ctx: &mut BehaviorContext,
) -> Option<CauseOfDeath> {
    creature.needs.tick(dt, ctx.config);
    resolve(creature, dt, ctx)
}

/// Everything after the needs update
///
/// Returns the cause if the creature died this tick, in which case nothing
/// else about it was touched.
pub fn resolve(creature: &mut Creature, dt: f32, ctx: &mut BehaviorContext) -> Option<CauseOfDeath> {
    if let Some(cause) = creature.needs.check_death() {
        lifecycle::kill(creature, cause, ctx.environment);
        return Some(cause);
    }
    behave(creature, dt, ctx);
    None
}

fn behave(creature: &mut Creature, dt: f32, ctx: &mut BehaviorContext) {
    if creature.is_moving() {
        animate_move(creature, dt, ctx);
        return;
    }

    handle_interactions(creature, dt, ctx);
    if ctx.now - creature.last_decision > ctx.config.time_between_action_choices {
        choose_next_action(creature, ctx);
    }
}

fn animate_move(creature: &mut Creature, dt: f32, ctx: &mut BehaviorContext) {
    let Some(mut step) = creature.motion else {
        return;
    };

    let finished = step.advance(dt, ctx.config.move_speed);
    creature.position = step.position();
    creature.height = step.height(ctx.config.move_arc_height);

    if !finished {
        creature.motion = Some(step);
        return;
    }

    ctx.environment.register_move(creature.id, step.from, step.to);
    creature.coord = step.to;
    creature.position = step.target_pos;
    creature.height = 0.0;
    creature.motion = None;
    choose_next_action(creature, ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::entity::needs::Needs;
    use crate::entity::species::SpeciesProfile;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;

    fn population(n: usize) -> Vec<Creature> {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let profile = Arc::new(SpeciesProfile::new(Species::Rabbit, vec![Species::Plant]));
        (0..n)
            .map(|_| Creature::new(Arc::clone(&profile), Coord::new(0, 0), Vec2::default(), 0, &mut rng))
            .collect()
    }

    #[test]
    fn test_parallel_and_serial_needs_agree() {
        let serial_config = BehaviorConfig { parallel_threshold: usize::MAX, ..Default::default() };
        let parallel_config = BehaviorConfig { parallel_threshold: 1, ..Default::default() };

        let mut serial = population(64);
        let mut parallel = serial.clone();
        tick_needs(&mut serial, 0.5, &serial_config);
        tick_needs(&mut parallel, 0.5, &parallel_config);

        for (a, b) in serial.iter().zip(&parallel) {
            assert_eq!(a.needs, b.needs);
        }
        assert!(serial[0].needs != Needs::default());
    }
}
