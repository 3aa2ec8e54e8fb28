pub mod grid;
pub mod pathfinding;
pub mod sparse_hash;

pub use grid::Grid;
pub use pathfinding::{GridPathfinder, Pathfinder};
pub use sparse_hash::SparseHashGrid;
