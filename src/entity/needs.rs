//! Survival drives that push creatures toward food, water, rest and mates

use serde::{Deserialize, Serialize};

use crate::core::config::BehaviorConfig;

/// The four drives of a creature
///
/// Every drive grows without bound until relieved. Hunger, thirst and
/// stamina are lethal at 1.0; desire is not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    /// 0.0 = fed, 1.0 = starved
    pub hunger: f32,
    /// 0.0 = hydrated, 1.0 = dead of thirst
    pub thirst: f32,
    /// 0.0 = fresh, 1.0 = dead of age/exhaustion
    pub stamina: f32,
    /// 0.0 = content, grows toward seeking a mate
    pub desire: f32,
}

impl Needs {
    /// Accumulate every drive for `dt` seconds
    pub fn tick(&mut self, dt: f32, config: &BehaviorConfig) {
        self.hunger += dt / config.time_to_death_by_hunger;
        self.thirst += dt / config.time_to_death_by_thirst;
        self.stamina += dt / config.stamina_time_factor;
        self.desire += dt / config.desire_time_factor;
    }

    /// First lethal drive in priority order: hunger, thirst, then age
    pub fn check_death(&self) -> Option<CauseOfDeath> {
        if self.hunger >= 1.0 {
            Some(CauseOfDeath::Hunger)
        } else if self.thirst >= 1.0 {
            Some(CauseOfDeath::Thirst)
        } else if self.stamina >= 1.0 {
            Some(CauseOfDeath::Age)
        } else {
            None
        }
    }

    /// Amount of hunger a meal of `dt` seconds may relieve
    pub fn meal_size(&self, dt: f32, config: &BehaviorConfig) -> f32 {
        self.hunger.min(dt / config.eat_duration)
    }

    /// Reduce hunger by an amount already bounded by [`Needs::meal_size`]
    pub fn relieve_hunger(&mut self, amount: f32) {
        self.hunger = (self.hunger - amount).max(0.0);
    }

    pub fn relieve_thirst(&mut self, dt: f32, config: &BehaviorConfig) {
        self.thirst = (self.thirst - dt / config.drink_duration).clamp(0.0, 1.0);
    }

    pub fn relieve_stamina(&mut self, dt: f32, config: &BehaviorConfig) {
        self.stamina = (self.stamina - dt / config.rest_duration).clamp(0.0, 1.0);
    }
}

/// Why a creature died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CauseOfDeath {
    Hunger,
    Thirst,
    Age,
    Eaten,
}
