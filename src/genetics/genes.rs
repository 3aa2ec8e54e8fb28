//! Genes - the heritable trait bundle of a creature
//!
//! Only sex is interpreted by the behavior engine (mate filtering and
//! sex-linked colouring); the remaining values are opaque and carried along
//! for downstream systems.

use rand::Rng;
use rand::RngCore;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::core::types::Colour;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn opposite(&self) -> Self {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genes {
    pub sex: Sex,
    /// Standard-normal values, one per trait
    pub values: Vec<f32>,
}

impl Genes {
    /// Draw a fresh, independent trait bundle
    pub fn random(num_values: usize, rng: &mut dyn RngCore) -> Self {
        let sex = if rng.gen_bool(0.5) { Sex::Male } else { Sex::Female };
        let values = (0..num_values).map(|_| rng.sample::<f32, _>(StandardNormal)).collect();
        Self { sex, values }
    }

    pub fn is_male(&self) -> bool {
        self.sex == Sex::Male
    }

    pub fn colour(&self, male: Colour, female: Colour) -> Colour {
        match self.sex {
            Sex::Male => male,
            Sex::Female => female,
        }
    }
}
