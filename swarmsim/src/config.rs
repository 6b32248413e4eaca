use anyhow::{Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use shared::{AntParameters, AntState, FoodParameters, NestParameters, SensorParameters};
use std::fs;
use std::path::Path;

use crate::error::{SensorSide, SimError};

// Built-in scenario defaults
pub const DEFAULT_FIELD_SIZE: u32 = 500;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TICKS: u64 = 5000;
pub const DEFAULT_REPORT_EVERY: u64 = 500;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RateConfig {
    /// Deposit every N ticks.
    pub place_pheromone_rate: u32,
    /// Evaporate every N ticks.
    pub pheromone_evaporation_rate: u32,
}

/// Settings for the headless runner only; the engine never reads them.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DriverConfig {
    pub ticks: u64,
    pub report_every: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            ticks: DEFAULT_TICKS,
            report_every: DEFAULT_REPORT_EVERY,
        }
    }
}

/// Everything needed to build an environment: the parameter source.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    pub field: FieldConfig,
    pub rates: RateConfig,
    pub ant_templates: Vec<AntParameters>,
    #[serde(default)]
    pub nests: Vec<NestParameters>,
    #[serde(default)]
    pub foods: Vec<FoodParameters>,
    #[serde(default)]
    pub driver: DriverConfig,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for ScenarioConfig {
    /// One nest in the middle, a food source in each quadrant.
    fn default() -> Self {
        let sensor = |angle: f32| SensorParameters {
            x_center_distance: 0.03,
            y_center_distance: 0.03,
            position_angle: angle,
            pixel_radius: 2,
        };
        let food = |id: u32, x: f32, y: f32| FoodParameters {
            id,
            pos: Vec2::new(x, y),
            size: 0.05,
            food_amount: 1000,
        };

        Self {
            seed: DEFAULT_SEED,
            field: FieldConfig {
                width: DEFAULT_FIELD_SIZE,
                height: DEFAULT_FIELD_SIZE,
            },
            rates: RateConfig {
                place_pheromone_rate: 1,
                pheromone_evaporation_rate: 8,
            },
            ant_templates: vec![AntParameters {
                size: 0.01,
                velocity: 0.002,
                initial_state: AntState::Explorer,
                view_frequency: 2,
                place_pheromone_intensity: 60,
                left_sensor: Some(sensor(45.0)),
                right_sensor: Some(sensor(-45.0)),
            }],
            nests: vec![NestParameters {
                id: 0,
                pos: Vec2::ZERO,
                size: 0.05,
                ant_amount: 200,
                ant_template: 0,
            }],
            foods: vec![
                food(0, 0.6, 0.6),
                food(1, -0.6, 0.6),
                food(2, -0.6, -0.6),
                food(3, 0.6, -0.6),
            ],
            driver: DriverConfig::default(),
        }
    }
}

impl ScenarioConfig {
    /// Rejects parameters the engine cannot run with.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.field.width == 0 || self.field.height == 0 {
            return Err(SimError::InvalidFieldSize {
                width: self.field.width,
                height: self.field.height,
            });
        }
        if self.rates.place_pheromone_rate == 0 {
            return Err(SimError::ZeroRate {
                name: "place_pheromone_rate",
            });
        }
        if self.rates.pheromone_evaporation_rate == 0 {
            return Err(SimError::ZeroRate {
                name: "pheromone_evaporation_rate",
            });
        }
        for (template, ant) in self.ant_templates.iter().enumerate() {
            if ant.view_frequency == 0 {
                return Err(SimError::ZeroViewFrequency { template });
            }
            if ant.left_sensor.is_none() {
                return Err(SimError::MissingSensor {
                    template,
                    side: SensorSide::Left,
                });
            }
            if ant.right_sensor.is_none() {
                return Err(SimError::MissingSensor {
                    template,
                    side: SensorSide::Right,
                });
            }
        }
        for (nest, parameters) in self.nests.iter().enumerate() {
            if parameters.ant_template >= self.ant_templates.len() {
                return Err(SimError::UnknownAntTemplate {
                    nest,
                    template: parameters.ant_template,
                });
            }
        }
        Ok(())
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ScenarioConfig =
            toml::from_str(content).context("Failed to parse scenario file")?;
        config.validate()?;
        Ok(config)
    }
}

/// Loads a scenario from a TOML file, or the built-in one when no path is given.
pub fn load_scenario(path: Option<&Path>) -> Result<ScenarioConfig> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
            let config = ScenarioConfig::from_toml(&content)
                .with_context(|| format!("Invalid config file '{}'", path.display()))?;
            log::info!("Loaded config from '{}'", path.display());
            log::debug!("Config: {:?}", config);
            Ok(config)
        }
        None => {
            log::info!("No config file provided, using the built-in scenario.");
            Ok(ScenarioConfig::default())
        }
    }
}
