pub mod world;

pub use world::World;
