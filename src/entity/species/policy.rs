//! Species-specific decision policies
//!
//! A species plugs in its food preference and its top-level goal choice
//! through [`SpeciesBehavior`]; the rest of the engine is shared.

use crate::core::config::{BehaviorConfig, PolicyKind};
use crate::core::types::Coord;
use crate::entity::needs::Needs;

/// Which need the selector should act on next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Food,
    Water,
    Mate,
    Rest,
}

/// Interactions still worth continuing at decision time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockIn {
    /// Eating, the food is still alive and hunger > 0
    pub eating: bool,
    /// Drinking and thirst > 0
    pub drinking: bool,
    /// Resting and stamina > 0
    pub resting: bool,
}

/// Strategy handle selected per species
pub trait SpeciesBehavior: Send + Sync + std::fmt::Debug {
    /// When choosing between food sources, the lowest penalty is selected
    fn food_penalty(&self, seeker: Coord, food: Coord) -> i32 {
        seeker.sqr_distance(&food)
    }

    fn choose_goal(&self, needs: &Needs, lock_in: &LockIn, config: &BehaviorConfig) -> Goal {
        survival_goal(needs, lock_in, config)
    }
}

/// Food when at least as hungry as thirsty, or when mid-meal and thirst is
/// not yet critical; water otherwise
pub fn survival_goal(needs: &Needs, lock_in: &LockIn, config: &BehaviorConfig) -> Goal {
    if needs.hunger >= needs.thirst || (lock_in.eating && needs.thirst < config.critical_percent) {
        Goal::Food
    } else {
        Goal::Water
    }
}

/// Food and water only. Never rests or seeks mates on its own.
#[derive(Debug, Default)]
pub struct SurvivalPolicy;

impl SpeciesBehavior for SurvivalPolicy {}

/// Survival plus resting and mate-seeking when those drives dominate
#[derive(Debug, Default)]
pub struct FullDrivePolicy;

impl SpeciesBehavior for FullDrivePolicy {
    fn choose_goal(&self, needs: &Needs, lock_in: &LockIn, config: &BehaviorConfig) -> Goal {
        let survival = needs.hunger.max(needs.thirst);
        if lock_in.resting && survival < config.critical_percent {
            return Goal::Rest;
        }
        if !lock_in.eating && !lock_in.drinking {
            if needs.stamina >= config.critical_percent && needs.stamina > survival && needs.stamina >= needs.desire {
                return Goal::Rest;
            }
            if needs.desire >= config.critical_percent && needs.desire > survival {
                return Goal::Mate;
            }
        }
        survival_goal(needs, lock_in, config)
    }
}

impl PolicyKind {
    pub fn behavior(&self) -> std::sync::Arc<dyn SpeciesBehavior> {
        match self {
            PolicyKind::Survival => std::sync::Arc::new(SurvivalPolicy),
            PolicyKind::FullDrive => std::sync::Arc::new(FullDrivePolicy),
        }
    }
}
