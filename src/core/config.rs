//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Everything can be overridden from a
//! TOML file; missing keys fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{Colour, Species};

/// Tunables for the per-creature behavior engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    // === DECISIONS ===
    /// Seconds between re-evaluations while stationary
    ///
    /// Creatures also decide after every completed step, so this only
    /// matters while eating, drinking, resting or mating.
    pub time_between_action_choices: f32,

    /// Fraction below which thirst is not urgent enough to interrupt a meal
    pub critical_percent: f32,

    /// Radius (tiles) for sensing food, water and mates
    pub max_view_distance: i32,

    // === MOVEMENT ===
    /// Tiles per second along an orthogonal step
    pub move_speed: f32,

    /// Peak height of the hop between tiles. Cosmetic only.
    pub move_arc_height: f32,

    // === DRIVES ===
    /// Seconds from fully fed to starving
    pub time_to_death_by_hunger: f32,

    /// Seconds from fully hydrated to dying of thirst
    pub time_to_death_by_thirst: f32,

    /// Seconds for stamina to climb from 0 to 1 (death by age)
    pub stamina_time_factor: f32,

    /// Seconds for desire to climb from 0 to 1. Desire has no death threshold.
    pub desire_time_factor: f32,

    // === INTERACTIONS ===
    /// Seconds of drinking to go from 1 to 0 thirst
    pub drink_duration: f32,

    /// Seconds of eating to go from 1 to 0 hunger
    pub eat_duration: f32,

    /// Seconds of resting to go from 1 to 0 stamina
    pub rest_duration: f32,

    // === PARALLELIZATION ===
    /// Minimum creature count before the needs phase runs on rayon
    ///
    /// Below this threshold, thread overhead exceeds benefits.
    pub parallel_threshold: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            time_between_action_choices: 1.0,
            critical_percent: 0.5,
            max_view_distance: 10,

            move_speed: 1.5,
            move_arc_height: 0.2,

            time_to_death_by_hunger: 200.0,
            time_to_death_by_thirst: 200.0,
            stamina_time_factor: 150.0,
            desire_time_factor: 400.0,

            drink_duration: 6.0,
            eat_duration: 10.0,
            rest_duration: 14.0,

            parallel_threshold: 1000,
        }
    }
}

impl BehaviorConfig {
    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("time_between_action_choices", self.time_between_action_choices),
            ("move_speed", self.move_speed),
            ("time_to_death_by_hunger", self.time_to_death_by_hunger),
            ("time_to_death_by_thirst", self.time_to_death_by_thirst),
            ("stamina_time_factor", self.stamina_time_factor),
            ("desire_time_factor", self.desire_time_factor),
            ("drink_duration", self.drink_duration),
            ("eat_duration", self.eat_duration),
            ("rest_duration", self.rest_duration),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.critical_percent) {
            return Err(SimError::InvalidConfig(format!(
                "critical_percent ({}) must be within [0, 1]",
                self.critical_percent
            )));
        }

        if self.max_view_distance < 1 {
            return Err(SimError::InvalidConfig(
                "max_view_distance must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Map generation and run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,

    /// Seed for terrain, placement and every behavioral dice roll
    pub seed: u64,

    /// Number of lakes carved into the map
    pub lake_count: usize,

    /// Maximum lake radius in tiles
    pub lake_radius: i32,

    pub plant_count: usize,

    /// Amount of food a fresh plant holds (1.0 fully feeds one creature)
    pub plant_amount: f32,

    /// Amount regrown per second by a partly eaten plant
    pub plant_regrowth_rate: f32,

    /// Default simulation step in seconds
    pub dt: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 48,
            height: 48,
            seed: 0,
            lake_count: 5,
            lake_radius: 3,
            plant_count: 120,
            plant_amount: 1.0,
            plant_regrowth_rate: 0.002,
            dt: 0.1,
        }
    }
}

/// Which action policy a species runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Food and water only
    #[default]
    Survival,
    /// Also rests and seeks mates when those drives dominate
    FullDrive,
}

/// Per-species template settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesConfig {
    pub species: Species,
    pub diet: Vec<Species>,
    #[serde(default)]
    pub male_colour: Colour,
    #[serde(default)]
    pub female_colour: Colour,
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default)]
    pub initial_count: usize,
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub behavior: BehaviorConfig,
    pub world: WorldConfig,
    pub species: Vec<SpeciesConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            behavior: BehaviorConfig::default(),
            world: WorldConfig::default(),
            species: vec![
                SpeciesConfig {
                    species: Species::Rabbit,
                    diet: vec![Species::Plant],
                    male_colour: Colour(150, 120, 90),
                    female_colour: Colour(210, 190, 160),
                    policy: PolicyKind::Survival,
                    initial_count: 30,
                },
                SpeciesConfig {
                    species: Species::Fox,
                    diet: vec![Species::Rabbit],
                    male_colour: Colour(200, 90, 20),
                    female_colour: Colour(230, 140, 60),
                    policy: PolicyKind::Survival,
                    initial_count: 4,
                },
            ],
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn species_config(&self, species: Species) -> Option<&SpeciesConfig> {
        self.species.iter().find(|s| s.species == species)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        self.behavior.validate()?;

        if self.world.width < 2 || self.world.height < 2 {
            return Err(SimError::InvalidConfig(format!(
                "map must be at least 2x2, got {}x{}",
                self.world.width, self.world.height
            )));
        }

        if !(self.world.dt > 0.0) {
            return Err(SimError::InvalidConfig("dt must be positive".into()));
        }

        for (i, s) in self.species.iter().enumerate() {
            if !s.species.is_creature() {
                return Err(SimError::InvalidConfig(format!(
                    "{:?} cannot be configured as a creature",
                    s.species
                )));
            }
            if self.species[..i].iter().any(|o| o.species == s.species) {
                return Err(SimError::InvalidConfig(format!(
                    "{:?} is configured twice",
                    s.species
                )));
            }
            if s.diet.contains(&s.species) {
                return Err(SimError::InvalidConfig(format!(
                    "{:?} cannot eat its own species",
                    s.species
                )));
            }
        }

        Ok(())
    }
}
