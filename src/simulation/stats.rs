//! Running population statistics

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::Species;
use crate::entity::needs::CauseOfDeath;
use crate::simulation::tick::SimulationEvent;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub births: u64,
    pub deaths_by_hunger: u64,
    pub deaths_by_thirst: u64,
    pub deaths_by_age: u64,
    pub deaths_by_predation: u64,
    /// Live creatures per species as of the last completed tick
    pub population: BTreeMap<Species, usize>,
}

impl PopulationStats {
    pub fn record(&mut self, event: &SimulationEvent) {
        match event {
            SimulationEvent::Born { .. } => self.births += 1,
            SimulationEvent::Died { cause, .. } => match cause {
                CauseOfDeath::Hunger => self.deaths_by_hunger += 1,
                CauseOfDeath::Thirst => self.deaths_by_thirst += 1,
                CauseOfDeath::Age => self.deaths_by_age += 1,
                CauseOfDeath::Eaten => self.deaths_by_predation += 1,
            },
        }
    }

    pub fn deaths(&self) -> u64 {
        self.deaths_by_hunger + self.deaths_by_thirst + self.deaths_by_age + self.deaths_by_predation
    }

    pub fn total_population(&self) -> usize {
        self.population.values().sum()
    }
}
