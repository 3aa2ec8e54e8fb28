//! Creature - one autonomous agent and all of its per-agent state

use std::sync::Arc;

use rand::RngCore;

use crate::core::types::{Colour, Coord, EntityId, Species, Tick, Vec2};
use crate::entity::action::Action;
use crate::entity::movement::MoveStep;
use crate::entity::needs::{CauseOfDeath, Needs};
use crate::entity::path::PathCache;
use crate::entity::species::{SpeciesProfile, GENE_VALUE_COUNT};
use crate::genetics::Genes;
use crate::world::environment::Occupant;

#[derive(Debug, Clone)]
pub struct Creature {
    pub id: EntityId,
    pub profile: Arc<SpeciesProfile>,
    pub genes: Genes,
    pub colour: Colour,

    pub coord: Coord,
    /// Continuous position, tile centre when stationary
    pub position: Vec2,
    /// Cosmetic hop height
    pub height: f32,
    /// Facing angle in radians, 0 along +y
    pub heading: f32,

    pub needs: Needs,
    pub action: Action,
    pub path: PathCache,
    pub motion: Option<MoveStep>,
    /// Tile the last step started from
    pub move_from: Coord,
    /// Tile the last step was headed to
    pub move_target: Coord,
    pub last_decision: f32,

    pub cause_of_death: Option<CauseOfDeath>,
    pub born_tick: Tick,
    pub parent: Option<EntityId>,
}

impl Creature {
    pub fn new(
        profile: Arc<SpeciesProfile>,
        coord: Coord,
        position: Vec2,
        born_tick: Tick,
        rng: &mut dyn RngCore,
    ) -> Self {
        let genes = Genes::random(GENE_VALUE_COUNT, rng);
        let colour = genes.colour(profile.male_colour, profile.female_colour);
        Self {
            id: EntityId::new(),
            profile,
            genes,
            colour,
            coord,
            position,
            height: 0.0,
            heading: 0.0,
            needs: Needs::default(),
            action: Action::Idle,
            path: PathCache::new(),
            motion: None,
            move_from: coord,
            move_target: coord,
            last_decision: 0.0,
            cause_of_death: None,
            born_tick,
            parent: None,
        }
    }

    pub fn species(&self) -> Species {
        self.profile.species
    }

    pub fn is_alive(&self) -> bool {
        self.cause_of_death.is_none()
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Index entry for the environment
    pub fn occupant(&self) -> Occupant {
        Occupant {
            id: self.id,
            species: self.species(),
            sex: Some(self.genes.sex),
        }
    }

    pub fn look_at(&mut self, target: Coord) {
        let offset = target - self.coord;
        if offset != Coord::new(0, 0) {
            self.heading = (offset.x as f32).atan2(offset.y as f32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rabbit() -> Creature {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let profile = Arc::new(SpeciesProfile::new(Species::Rabbit, vec![Species::Plant]));
        Creature::new(profile, Coord::new(2, 2), Vec2::new(2.5, 2.5), 0, &mut rng)
    }

    #[test]
    fn test_new_creature_is_idle_and_stationary() {
        let creature = rabbit();
        assert!(creature.is_alive());
        assert!(!creature.is_moving());
        assert_eq!(creature.action, Action::Idle);
        assert_eq!(creature.move_target, creature.coord);
        assert_eq!(creature.needs, Needs::default());
    }

    #[test]
    fn test_occupant_carries_sex() {
        let creature = rabbit();
        let occupant = creature.occupant();
        assert_eq!(occupant.species, Species::Rabbit);
        assert_eq!(occupant.sex, Some(creature.genes.sex));
    }

    #[test]
    fn test_look_at() {
        let mut creature = rabbit();
        creature.look_at(Coord::new(3, 2));
        assert!((creature.heading - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        let before = creature.heading;
        creature.look_at(creature.coord);
        assert_eq!(creature.heading, before);
    }
}
