//! Plants - passive food that depletes as it is eaten
//!
//! A plant is exhausted once nothing is left; the environment then removes
//! it from the population index. Partly eaten plants slowly regrow.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub amount: f32,
    pub max: f32,
    /// Per second
    pub regrowth_rate: f32,
}

impl Plant {
    pub fn new(amount: f32, regrowth_rate: f32) -> Self {
        Self {
            amount,
            max: amount,
            regrowth_rate,
        }
    }

    /// Yield up to `amount`, returns how much was actually eaten
    pub fn consume(&mut self, amount: f32) -> f32 {
        let eaten = amount.clamp(0.0, self.amount);
        self.amount -= eaten;
        eaten
    }

    pub fn is_exhausted(&self) -> bool {
        self.amount <= 0.0
    }

    pub fn regrow(&mut self, dt: f32) {
        self.amount = (self.amount + self.regrowth_rate * dt).min(self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plant_depletion() {
        let mut plant = Plant::new(1.0, 0.0);

        let eaten = plant.consume(0.3);
        assert!((eaten - 0.3).abs() < 0.001);
        assert!((plant.amount - 0.7).abs() < 0.001);

        // Can't eat more than is left
        let eaten = plant.consume(1.0);
        assert!((eaten - 0.7).abs() < 0.001);
        assert!(plant.is_exhausted());
    }

    #[test]
    fn test_plant_regrowth_capped() {
        let mut plant = Plant::new(1.0, 0.1);
        plant.consume(0.5);
        plant.regrow(2.0);
        assert!((plant.amount - 0.7).abs() < 0.001);
        plant.regrow(100.0);
        assert_eq!(plant.amount, plant.max);
    }
}
