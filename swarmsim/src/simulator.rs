use std::str::FromStr;

use crate::config::ScenarioConfig;
use crate::error::SimError;
use crate::simulation::Environment;
use crate::simulation::environment::TickReport;

/// The tick counter handed to the environment wraps at this value.
pub const FRAME_COUNTER_PERIOD: u32 = 1000;

/// Requests a driver can issue between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverAction {
    Init,
    Reset,
    AddNest(usize),
    AddFood(usize),
    AddAnts(usize),
    Pause,
    Resume,
}

impl FromStr for DriverAction {
    type Err = SimError;

    /// Parses `init`, `reset`, `pause`, `resume`, `add-nest:<i>`, `add-food:<i>`, `add-ants:<i>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || SimError::UnsupportedAction(s.to_string());
        let (name, argument) = match s.trim().split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (s.trim(), None),
        };
        let index = || -> Result<usize, SimError> {
            argument
                .and_then(|argument| argument.trim().parse().ok())
                .ok_or_else(unsupported)
        };

        match (name.to_lowercase().as_str(), argument) {
            ("init", None) => Ok(DriverAction::Init),
            ("reset", None) => Ok(DriverAction::Reset),
            ("pause", None) => Ok(DriverAction::Pause),
            ("resume", None) => Ok(DriverAction::Resume),
            ("add-nest", Some(_)) => Ok(DriverAction::AddNest(index()?)),
            ("add-food", Some(_)) => Ok(DriverAction::AddFood(index()?)),
            ("add-ants", Some(_)) => Ok(DriverAction::AddAnts(index()?)),
            _ => Err(unsupported()),
        }
    }
}

/// Headless driver around an environment: owns the frame counter and pause state.
pub struct Simulator {
    pub environment: Environment,
    pub frame_counter: u32,
    pub is_paused: bool,
    /// Ticks actually run since creation.
    pub steps: u64,
}

impl Simulator {
    pub fn new(scenario: ScenarioConfig) -> Result<Self, SimError> {
        Ok(Self {
            environment: Environment::new(scenario)?,
            frame_counter: 0,
            is_paused: true,
            steps: 0,
        })
    }

    /// Spawns every configured nest and food source, then the ants of each nest.
    pub fn populate(&mut self) -> Result<(), SimError> {
        let nest_count = self.environment.scenario().nests.len();
        let food_count = self.environment.scenario().foods.len();
        for nest in 0..nest_count {
            self.environment.create_nest(nest)?;
        }
        for food in 0..food_count {
            self.environment.create_food_source(food)?;
        }
        for nest in 0..nest_count {
            self.environment.create_ant(nest)?;
        }
        Ok(())
    }

    pub fn apply(&mut self, action: DriverAction) -> Result<(), SimError> {
        log::debug!("Applying {:?}", action);
        match action {
            DriverAction::Init => self.environment.initialize_environment(),
            DriverAction::Reset => {
                self.pause();
                self.environment.reset_environment();
            }
            DriverAction::AddNest(index) => self.environment.create_nest(index)?,
            DriverAction::AddFood(index) => self.environment.create_food_source(index)?,
            DriverAction::AddAnts(index) => {
                self.environment.create_ant(index)?;
            }
            DriverAction::Pause => self.pause(),
            DriverAction::Resume => self.unpause(),
        }
        Ok(())
    }

    /// Advances one tick unless paused.
    pub fn update(&mut self) -> Result<Option<TickReport>, SimError> {
        if self.is_paused {
            return Ok(None);
        }
        self.frame_counter = (self.frame_counter + 1) % FRAME_COUNTER_PERIOD;
        let report = self.environment.run(self.frame_counter)?;
        self.steps += 1;
        Ok(Some(report))
    }

    pub fn pause(&mut self) {
        self.is_paused = true;
    }

    pub fn unpause(&mut self) {
        self.is_paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator() -> Simulator {
        let mut scenario = ScenarioConfig::default();
        scenario.field.width = 80;
        scenario.field.height = 80;
        scenario.nests[0].ant_amount = 4;
        Simulator::new(scenario).unwrap()
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!("init".parse(), Ok(DriverAction::Init));
        assert_eq!(" Reset ".parse(), Ok(DriverAction::Reset));
        assert_eq!("add-nest:0".parse(), Ok(DriverAction::AddNest(0)));
        assert_eq!("add-food: 3".parse(), Ok(DriverAction::AddFood(3)));
        assert_eq!("add-ants:2".parse(), Ok(DriverAction::AddAnts(2)));
        assert_eq!("resume".parse(), Ok(DriverAction::Resume));
    }

    #[test]
    fn test_unsupported_actions() {
        for text in ["do-nothing", "add-nest", "add-nest:x", "pause:1", ""] {
            assert_eq!(
                text.parse::<DriverAction>(),
                Err(SimError::UnsupportedAction(text.to_string())),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_populate_spawns_scenario() {
        let mut sim = simulator();
        sim.populate().unwrap();
        assert_eq!(sim.environment.number_of_nests(), 1);
        assert_eq!(sim.environment.number_of_foods(), 4);
        assert_eq!(sim.environment.number_of_ants(), 4);
    }

    #[test]
    fn test_paused_simulator_does_not_tick() {
        let mut sim = simulator();
        sim.populate().unwrap();
        assert_eq!(sim.update(), Ok(None));
        assert_eq!(sim.frame_counter, 0);

        sim.apply(DriverAction::Resume).unwrap();
        assert!(sim.update().unwrap().is_some());
        assert_eq!(sim.frame_counter, 1);
        assert_eq!(sim.steps, 1);

        sim.toggle_pause();
        assert_eq!(sim.update(), Ok(None));
        assert_eq!(sim.steps, 1);
    }

    #[test]
    fn test_frame_counter_wraps() {
        let mut sim = simulator();
        sim.unpause();
        sim.frame_counter = FRAME_COUNTER_PERIOD - 1;
        let report = sim.update().unwrap().unwrap();
        assert_eq!(sim.frame_counter, 0);
        // Tick 0 is a multiple of every rate.
        assert!(report.deposited);
        assert!(report.evaporated);
    }

    #[test]
    fn test_reset_action_pauses_and_clears() {
        let mut sim = simulator();
        sim.populate().unwrap();
        sim.unpause();
        for _ in 0..5 {
            sim.update().unwrap();
        }
        sim.apply(DriverAction::Reset).unwrap();
        assert!(sim.is_paused);
        // The frame counter keeps running across a reset.
        assert_eq!(sim.frame_counter, 5);
        assert_eq!(sim.environment.number_of_ants(), 0);
        assert_eq!(sim.environment.place_pheromone_rate(), 1);

        sim.apply(DriverAction::Init).unwrap();
        sim.apply(DriverAction::AddNest(0)).unwrap();
        sim.apply(DriverAction::AddAnts(0)).unwrap();
        assert_eq!(sim.environment.number_of_ants(), 4);
        assert_eq!(
            sim.apply(DriverAction::AddFood(10)),
            Err(SimError::UnknownFood(10))
        );
    }
}
