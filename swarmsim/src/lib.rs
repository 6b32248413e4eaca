pub mod config;
pub mod error;
pub mod simulation;
pub mod simulator;

pub use config::{ScenarioConfig, load_scenario};
pub use error::SimError;
pub use simulator::{DriverAction, Simulator};
