//! Per-tick effects of the stationary interactions

use std::sync::Arc;

use crate::entity::action::{Action, FoodKind, FoodSource};
use crate::entity::creature::Creature;
use crate::entity::needs::CauseOfDeath;
use crate::simulation::action_select::BehaviorContext;
use crate::simulation::lifecycle::{kill_by_id, LifecycleCommand};

/// Apply one tick of the creature's current interaction, if any
pub fn handle_interactions(creature: &mut Creature, dt: f32, ctx: &mut BehaviorContext) {
    match creature.action {
        Action::Eating(food) => eat(creature, food, dt, ctx),
        Action::Drinking(_) => creature.needs.relieve_thirst(dt, ctx.config),
        Action::Resting => creature.needs.relieve_stamina(dt, ctx.config),
        Action::Mating(mate) => {
            if creature.needs.desire > 0.0 && ctx.environment.is_alive(mate) {
                creature.needs.desire = 0.0;
                ctx.commands.push(LifecycleCommand::Reproduce {
                    parent: creature.id,
                    profile: Arc::clone(&creature.profile),
                    coord: creature.coord,
                });
                // One offspring per encounter
                creature.action = Action::Idle;
                tracing::debug!(id = ?creature.id, ?mate, "mated");
            }
        }
        _ => {}
    }
}

fn eat(creature: &mut Creature, food: FoodSource, dt: f32, ctx: &mut BehaviorContext) {
    let wanted = creature.needs.meal_size(dt, ctx.config);
    if wanted <= 0.0 {
        return;
    }

    let eaten = match food.kind {
        FoodKind::Plant => ctx.environment.consume_plant(food.id, wanted),
        FoodKind::Creature => {
            if kill_by_id(food.id, CauseOfDeath::Eaten, ctx) {
                wanted
            } else {
                0.0
            }
        }
    };
    creature.needs.relieve_hunger(eaten);
}
