pub mod action_select;
pub mod interaction;
pub mod lifecycle;
pub mod stats;
pub mod tick;

pub use action_select::{choose_next_action, BehaviorContext};
pub use interaction::handle_interactions;
pub use lifecycle::LifecycleCommand;
pub use stats::PopulationStats;
pub use tick::{update_creature, SimulationEvent};
