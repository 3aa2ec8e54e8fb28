//! What a creature is currently doing, with only the targets that state needs

use serde::{Deserialize, Serialize};

use crate::core::types::{Coord, EntityId};

/// Reference to something edible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoodSource {
    pub id: EntityId,
    pub kind: FoodKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    /// Depletes gradually as it is eaten
    Plant,
    /// Dies on the first bite
    Creature,
}

/// Current high-level behavior
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Idle,
    Exploring,
    GoingToFood(FoodSource),
    GoingToWater(Coord),
    SearchingForMate(EntityId),
    Eating(FoodSource),
    Drinking(Coord),
    Resting,
    Mating(EntityId),
}

/// Payload-free tag for reporting and comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Idle,
    Exploring,
    GoingToFood,
    GoingToWater,
    SearchingForMate,
    Eating,
    Drinking,
    Resting,
    Mating,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Idle => ActionKind::Idle,
            Action::Exploring => ActionKind::Exploring,
            Action::GoingToFood(_) => ActionKind::GoingToFood,
            Action::GoingToWater(_) => ActionKind::GoingToWater,
            Action::SearchingForMate(_) => ActionKind::SearchingForMate,
            Action::Eating(_) => ActionKind::Eating,
            Action::Drinking(_) => ActionKind::Drinking,
            Action::Resting => ActionKind::Resting,
            Action::Mating(_) => ActionKind::Mating,
        }
    }

    /// Interaction states hold the creature in place
    pub fn is_interaction(&self) -> bool {
        matches!(
            self,
            Action::Eating(_) | Action::Drinking(_) | Action::Resting | Action::Mating(_)
        )
    }
}
