//! Environment interface consumed by the behavior engine
//!
//! Sensing, exploration choice, tile geometry and the population index all
//! live behind this trait so the engine never touches map internals.

use rand::RngCore;

use crate::core::types::{Coord, EntityId, Species, Vec2};
use crate::entity::action::FoodSource;
use crate::genetics::Sex;

/// What the population index knows about a registered entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub id: EntityId,
    pub species: Species,
    /// None for plants
    pub sex: Option<Sex>,
}

/// Lower penalty wins when choosing between food sources
pub type FoodPenalty<'a> = &'a dyn Fn(Coord, Coord) -> i32;

pub trait Environment {
    /// Best visible food of a species in `diet`, ranked by `penalty(seeker, food)`
    fn sense_food(&self, coord: Coord, diet: &[Species], penalty: FoodPenalty<'_>) -> Option<FoodSource>;

    /// Nearest visible water tile
    fn sense_water(&self, coord: Coord) -> Option<Coord>;

    /// Visible members of the seeker's species of the opposite sex
    fn sense_potential_mates(&self, coord: Coord, seeker: &Occupant) -> Vec<EntityId>;

    /// Neighbouring tile for an exploration step, biased away from `previous`
    fn next_weighted_explore_tile(&self, coord: Coord, previous: Coord, rng: &mut dyn RngCore) -> Coord;

    fn tile_centre(&self, coord: Coord) -> Vec2;

    /// Update the index after a completed step
    fn register_move(&mut self, entity: EntityId, from: Coord, to: Coord);

    fn add(&mut self, occupant: Occupant, coord: Coord);

    /// Returns false if the entity was not registered
    fn remove(&mut self, entity: EntityId) -> bool;

    /// Position of a registered entity; None once it is dead or gone
    fn coord_of(&self, entity: EntityId) -> Option<Coord>;

    fn is_alive(&self, entity: EntityId) -> bool {
        self.coord_of(entity).is_some()
    }

    /// Take up to `amount` from a plant, returns the amount yielded
    ///
    /// An exhausted plant is removed from the index.
    fn consume_plant(&mut self, plant: EntityId, amount: f32) -> f32;
}
