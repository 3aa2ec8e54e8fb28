//! Creature creation and destruction

use std::sync::Arc;

use crate::core::types::{Coord, EntityId};
use crate::entity::creature::Creature;
use crate::entity::needs::CauseOfDeath;
use crate::entity::species::SpeciesProfile;
use crate::simulation::action_select::{choose_next_action, BehaviorContext};
use crate::world::environment::Environment;

/// Population changes requested mid-tick and applied by the world afterwards
#[derive(Debug, Clone)]
pub enum LifecycleCommand {
    /// Already deregistered; the world only records the cause
    Kill { id: EntityId, cause: CauseOfDeath },
    Reproduce {
        parent: EntityId,
        profile: Arc<SpeciesProfile>,
        coord: Coord,
    },
}

/// Create a creature with fresh genes, register it and let it pick a first action
pub fn spawn(profile: Arc<SpeciesProfile>, coord: Coord, ctx: &mut BehaviorContext) -> Creature {
    let position = ctx.environment.tile_centre(coord);
    let mut creature = Creature::new(profile, coord, position, ctx.tick, &mut *ctx.rng);
    creature.last_decision = ctx.now;
    ctx.environment.add(creature.occupant(), coord);

    tracing::debug!(id = ?creature.id, species = ?creature.species(), ?coord, "spawned");

    choose_next_action(&mut creature, ctx);
    creature
}

/// Offspring shares the parent's template but draws its own genes
pub fn reproduce(
    parent: EntityId,
    profile: Arc<SpeciesProfile>,
    coord: Coord,
    ctx: &mut BehaviorContext,
) -> Creature {
    let mut child = spawn(profile, coord, ctx);
    child.parent = Some(parent);
    child
}

/// Terminal: deregisters the creature and records why it died
pub fn kill(creature: &mut Creature, cause: CauseOfDeath, environment: &mut dyn Environment) {
    if !creature.is_alive() {
        return;
    }
    creature.cause_of_death = Some(cause);
    environment.remove(creature.id);
    tracing::debug!(id = ?creature.id, species = ?creature.species(), ?cause, "died");
}

/// Kill a creature known only by id, such as a predator's prey
///
/// Returns false if it was already gone.
pub fn kill_by_id(id: EntityId, cause: CauseOfDeath, ctx: &mut BehaviorContext) -> bool {
    if !ctx.environment.remove(id) {
        return false;
    }
    ctx.commands.push(LifecycleCommand::Kill { id, cause });
    true
}
