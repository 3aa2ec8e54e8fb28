//! Action selection - the heart of autonomous behavior
//!
//! Runs only while a creature is stationary: after a step completes, or when
//! the decision interval has elapsed. Picks a goal through the species policy,
//! acquires a target, plans a route and issues at most one movement step.

use std::sync::Arc;

use rand::Rng;
use rand::RngCore;

use crate::core::config::BehaviorConfig;
use crate::core::types::{Coord, Tick};
use crate::entity::action::Action;
use crate::entity::creature::Creature;
use crate::entity::movement::MoveStep;
use crate::entity::species::{Goal, LockIn};
use crate::simulation::lifecycle::LifecycleCommand;
use crate::spatial::pathfinding::Pathfinder;
use crate::world::environment::Environment;

/// Everything a creature may touch while it behaves
pub struct BehaviorContext<'a> {
    pub config: &'a BehaviorConfig,
    pub environment: &'a mut dyn Environment,
    pub pathfinder: &'a dyn Pathfinder,
    pub rng: &'a mut dyn RngCore,
    /// Simulation clock in seconds
    pub now: f32,
    pub tick: Tick,
    /// Deferred births and predation kills, committed at the end of the tick
    pub commands: &'a mut Vec<LifecycleCommand>,
}

/// Re-evaluate what the creature should do and start doing it
pub fn choose_next_action(creature: &mut Creature, ctx: &mut BehaviorContext) {
    creature.last_decision = ctx.now;
    let previous = creature.action.kind();

    let lock_in = evaluate_lock_in(creature, &*ctx.environment);
    let behavior = Arc::clone(&creature.profile.behavior);
    let goal = behavior.choose_goal(&creature.needs, &lock_in, ctx.config);

    creature.action = match goal {
        Goal::Food if lock_in.eating => creature.action,
        Goal::Food => find_food(creature, ctx),
        Goal::Water if lock_in.drinking => creature.action,
        Goal::Water => find_water(creature, ctx),
        Goal::Mate => find_potential_mates(creature, ctx),
        Goal::Rest => Action::Resting,
    };

    if creature.action.kind() != previous {
        tracing::debug!(
            id = ?creature.id,
            species = ?creature.species(),
            from = ?previous,
            to = ?creature.action.kind(),
            "action changed"
        );
    }

    act(creature, ctx);
}

fn evaluate_lock_in(creature: &Creature, environment: &dyn Environment) -> LockIn {
    let needs = &creature.needs;
    LockIn {
        eating: match creature.action {
            Action::Eating(food) => needs.hunger > 0.0 && environment.is_alive(food.id),
            _ => false,
        },
        drinking: matches!(creature.action, Action::Drinking(_)) && needs.thirst > 0.0,
        resting: matches!(creature.action, Action::Resting) && needs.stamina > 0.0,
    }
}

fn find_food(creature: &mut Creature, ctx: &mut BehaviorContext) -> Action {
    let profile = Arc::clone(&creature.profile);
    let penalty = |seeker: Coord, food: Coord| profile.behavior.food_penalty(seeker, food);

    let Some(food) = ctx.environment.sense_food(creature.coord, &profile.diet, &penalty) else {
        return Action::Exploring;
    };
    match ctx.environment.coord_of(food.id) {
        Some(target) if set_course(creature, target, ctx) => Action::GoingToFood(food),
        _ => Action::Exploring,
    }
}

fn find_water(creature: &mut Creature, ctx: &mut BehaviorContext) -> Action {
    match ctx.environment.sense_water(creature.coord) {
        Some(water) if set_course(creature, water, ctx) => Action::GoingToWater(water),
        _ => Action::Exploring,
    }
}

fn find_potential_mates(creature: &mut Creature, ctx: &mut BehaviorContext) -> Action {
    let mates = ctx
        .environment
        .sense_potential_mates(creature.coord, &creature.occupant());
    if mates.is_empty() {
        return Action::Exploring;
    }

    let mate = mates[ctx.rng.gen_range(0..mates.len())];
    match ctx.environment.coord_of(mate) {
        Some(target) if set_course(creature, target, ctx) => Action::SearchingForMate(mate),
        _ => Action::Exploring,
    }
}

/// Make sure a usable route to `target` exists; false if it cannot be reached
///
/// An adjacent target needs no route.
fn set_course(creature: &mut Creature, target: Coord, ctx: &BehaviorContext) -> bool {
    if creature.coord.is_neighbour(&target) {
        return true;
    }
    creature
        .path
        .ensure(target, creature.coord, creature.move_target, ctx.pathfinder);
    !creature.path.is_unreachable()
}

fn act(creature: &mut Creature, ctx: &mut BehaviorContext) {
    match creature.action {
        Action::Exploring => explore(creature, ctx),
        Action::GoingToFood(food) => match ctx.environment.coord_of(food.id) {
            Some(target) => approach(creature, target, Action::Eating(food), ctx),
            None => {
                creature.action = Action::Exploring;
                explore(creature, ctx);
            }
        },
        Action::GoingToWater(water) => approach(creature, water, Action::Drinking(water), ctx),
        Action::SearchingForMate(mate) => match ctx.environment.coord_of(mate) {
            Some(target) => approach(creature, target, Action::Mating(mate), ctx),
            None => {
                creature.action = Action::Exploring;
                explore(creature, ctx);
            }
        },
        _ => {}
    }
}

/// Switch to the interaction once adjacent, otherwise take the next route step
fn approach(creature: &mut Creature, target: Coord, arrived: Action, ctx: &mut BehaviorContext) {
    if creature.coord.is_neighbour(&target) {
        creature.look_at(target);
        creature.action = arrived;
        return;
    }

    match creature.path.next_step() {
        Some(step) => start_move(creature, step, ctx),
        None => {
            creature.action = Action::Exploring;
            explore(creature, ctx);
        }
    }
}

fn explore(creature: &mut Creature, ctx: &mut BehaviorContext) {
    let next = ctx
        .environment
        .next_weighted_explore_tile(creature.coord, creature.move_from, &mut *ctx.rng);
    start_move(creature, next, ctx);
}

pub fn start_move(creature: &mut Creature, to: Coord, ctx: &BehaviorContext) {
    if to == creature.coord {
        return;
    }

    let target_pos = ctx.environment.tile_centre(to);
    creature.move_from = creature.coord;
    creature.move_target = to;
    creature.motion = Some(MoveStep::new(creature.coord, to, creature.position, target_pos));
    creature.look_at(to);

    tracing::trace!(id = ?creature.id, from = ?creature.coord, ?to, "step started");
}
