pub mod action;
pub mod creature;
pub mod movement;
pub mod needs;
pub mod path;
pub mod species;

pub use action::{Action, ActionKind, FoodKind, FoodSource};
pub use creature::Creature;
pub use movement::MoveStep;
pub use needs::{CauseOfDeath, Needs};
pub use path::PathCache;
pub use species::{SpeciesBehavior, SpeciesProfile};
