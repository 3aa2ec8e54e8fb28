pub mod genes;

pub use genes::{Genes, Sex};
