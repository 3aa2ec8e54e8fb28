//! Species templates shared by every member of a species

pub mod policy;

use std::sync::Arc;

use crate::core::config::SpeciesConfig;
use crate::core::types::{Colour, Species};

pub use policy::{FullDrivePolicy, Goal, LockIn, SpeciesBehavior, SurvivalPolicy};

/// Number of opaque gene values drawn per creature
pub const GENE_VALUE_COUNT: usize = 1;

/// Immutable template a creature is instantiated from
///
/// Offspring share their parent's template; nothing in it is per-creature.
#[derive(Debug, Clone)]
pub struct SpeciesProfile {
    pub species: Species,
    pub diet: Vec<Species>,
    pub male_colour: Colour,
    pub female_colour: Colour,
    pub behavior: Arc<dyn SpeciesBehavior>,
}

impl SpeciesProfile {
    pub fn new(species: Species, diet: Vec<Species>) -> Self {
        Self {
            species,
            diet,
            male_colour: Colour::default(),
            female_colour: Colour::default(),
            behavior: Arc::new(SurvivalPolicy),
        }
    }

    pub fn from_config(config: &SpeciesConfig) -> Self {
        Self {
            species: config.species,
            diet: config.diet.clone(),
            male_colour: config.male_colour,
            female_colour: config.female_colour,
            behavior: config.policy.behavior(),
        }
    }

    pub fn with_behavior(mut self, behavior: Arc<dyn SpeciesBehavior>) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn eats(&self, species: Species) -> bool {
        self.diet.contains(&species)
    }
}
