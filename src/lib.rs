//! Wildgrid - creature behavior simulation on a tile grid

pub mod core;
pub mod ecs;
pub mod entity;
pub mod genetics;
pub mod simulation;
pub mod spatial;
pub mod world;
