//! The map creatures live on: terrain, plants and the population index

pub mod environment;
pub mod grid_environment;
pub mod plant;
pub mod terrain;

pub use environment::{Environment, FoodPenalty, Occupant};
pub use grid_environment::GridEnvironment;
pub use plant::Plant;
pub use terrain::{Terrain, Tile};
