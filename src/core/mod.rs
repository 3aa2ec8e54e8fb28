pub mod config;
pub mod error;
pub mod types;

pub use config::{BehaviorConfig, PolicyKind, SimulationConfig, SpeciesConfig, WorldConfig};
pub use error::{Result, SimError};
pub use types::{Colour, Coord, EntityId, Species, Tick, Vec2};
