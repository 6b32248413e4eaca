use rand::SeedableRng;
use rand_pcg::Pcg32;
use shared::util::TrigTable;
use shared::{AntState, PheromoneChannel};

use super::{Ant, FoodSource, Nest, PheromoneField};
use crate::config::ScenarioConfig;
use crate::error::SimError;

/// What happened during one `run` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Number of ants that sensed and decided.
    pub decisions: usize,
    pub deposited: bool,
    pub evaporated: bool,
}

/// Head count per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub explorer: usize,
    pub back_home: usize,
    pub carrier: usize,
    pub nest_carrier: usize,
    pub follow_green: usize,
    pub carrying_food: usize,
}

impl Census {
    pub fn count(&self, state: AntState) -> usize {
        match state {
            AntState::Explorer => self.explorer,
            AntState::BackHome => self.back_home,
            AntState::Carrier => self.carrier,
            AntState::NestCarrier => self.nest_carrier,
            AntState::FollowGreen => self.follow_green,
        }
    }

    pub fn total(&self) -> usize {
        AntState::ALL.iter().map(|&state| self.count(state)).sum()
    }
}

/// Owns the pheromone field and everything living on it.
pub struct Environment {
    scenario: ScenarioConfig,
    field: PheromoneField,
    trig: TrigTable,
    rng: Pcg32,

    place_pheromone_rate: u32,
    pheromone_evaporation_rate: u32,

    nests: Vec<Nest>,
    foods: Vec<FoodSource>,
    ants: Vec<Ant>,
}

impl Environment {
    pub fn new(scenario: ScenarioConfig) -> Result<Self, SimError> {
        scenario.validate()?;
        let field = PheromoneField::new(scenario.field.width, scenario.field.height)?;

        Ok(Self {
            field,
            trig: TrigTable::new(),
            rng: Pcg32::seed_from_u64(scenario.seed),
            place_pheromone_rate: scenario.rates.place_pheromone_rate,
            pheromone_evaporation_rate: scenario.rates.pheromone_evaporation_rate,
            nests: Vec::with_capacity(scenario.nests.len()),
            foods: Vec::with_capacity(scenario.foods.len()),
            ants: Vec::new(),
            scenario,
        })
    }

    /// Clean field, no entities, rates from the scenario.
    pub fn initialize_environment(&mut self) {
        self.field.initialize();
        self.nests.clear();
        self.foods.clear();
        self.ants.clear();
        self.place_pheromone_rate = self.scenario.rates.place_pheromone_rate;
        self.pheromone_evaporation_rate = self.scenario.rates.pheromone_evaporation_rate;
        log::debug!(
            "Environment initialized: {}x{} field, deposit every {} ticks, evaporation every {} ticks",
            self.field.width(),
            self.field.height(),
            self.place_pheromone_rate,
            self.pheromone_evaporation_rate
        );
    }

    /// Clean field, no entities. Both rates drop to 1 rather than back to the scenario's.
    pub fn reset_environment(&mut self) {
        self.nests.clear();
        self.foods.clear();
        self.ants.clear();
        self.field.initialize();
        self.place_pheromone_rate = 1;
        self.pheromone_evaporation_rate = 1;
        log::debug!("Environment reset");
    }

    pub fn create_nest(&mut self, index: usize) -> Result<(), SimError> {
        let parameters = self
            .scenario
            .nests
            .get(index)
            .ok_or(SimError::UnknownNest(index))?;
        let nest = Nest::new(parameters);
        log::debug!("Nest {} created at {:?}", nest.id, nest.pos);
        self.nests.push(nest);
        Ok(())
    }

    pub fn create_food_source(&mut self, index: usize) -> Result<(), SimError> {
        let parameters = self
            .scenario
            .foods
            .get(index)
            .ok_or(SimError::UnknownFood(index))?;
        let food = FoodSource::new(parameters);
        log::debug!("Food source {} created at {:?}", food.id, food.pos);
        self.foods.push(food);
        Ok(())
    }

    /// Spawns the configured amount of ants on nest `index`. Returns how many were added.
    pub fn create_ant(&mut self, index: usize) -> Result<usize, SimError> {
        let nest = self
            .scenario
            .nests
            .get(index)
            .ok_or(SimError::UnknownNest(index))?;
        let template = self.scenario.ant_templates.get(nest.ant_template).ok_or(
            SimError::UnknownAntTemplate {
                nest: index,
                template: nest.ant_template,
            },
        )?;

        self.ants.reserve(nest.ant_amount as usize);
        for _ in 0..nest.ant_amount {
            let ant = Ant::new(
                self.ants.len() as u32,
                nest.id,
                nest.pos,
                nest.ant_template,
                template,
                &mut self.rng,
            )?;
            self.ants.push(ant);
        }
        log::debug!(
            "{} ants spawned on nest {} ({} total)",
            nest.ant_amount,
            nest.id,
            self.ants.len()
        );
        Ok(nest.ant_amount as usize)
    }

    /// Advances the whole simulation by one tick.
    ///
    /// Every ant moves and senses before anything is deposited, and evaporation comes
    /// last, so pheromone laid this tick is only smelled on a later one.
    pub fn run(&mut self, tick: u32) -> Result<TickReport, SimError> {
        let decisions = self.move_ants(tick);
        let deposited = self.place_pheromone(tick)?;
        let evaporated = self.pheromone_evaporation(tick);
        Ok(TickReport {
            decisions,
            deposited,
            evaporated,
        })
    }

    /// Moves every ant in creation order and lets it sense on its own cadence.
    /// Returns the number of ants that decided.
    pub fn move_ants(&mut self, tick: u32) -> usize {
        let Self {
            field,
            trig,
            rng,
            nests,
            foods,
            ants,
            ..
        } = self;

        let mut decisions = 0;
        for ant in ants.iter_mut() {
            ant.move_forward(trig);
            if ant.environment_analysis(tick, field, trig, nests, foods, rng) {
                decisions += 1;
            }
        }
        decisions
    }

    /// Every ant lays its current intensity on the cell under it, on deposit ticks.
    pub fn place_pheromone(&mut self, tick: u32) -> Result<bool, SimError> {
        if tick % self.place_pheromone_rate != 0 {
            return Ok(false);
        }
        for ant in &self.ants {
            // Ants with no emission channel lay nothing.
            let Some(channel) = ant.pheromone() else {
                continue;
            };
            let index = self.field.index_at(ant.pos())?;
            self.field
                .deposit(index, channel, ant.place_pheromone_intensity())?;
        }
        Ok(true)
    }

    pub fn pheromone_evaporation(&mut self, tick: u32) -> bool {
        if tick % self.pheromone_evaporation_rate != 0 {
            return false;
        }
        self.field.evaporate();
        true
    }

    pub fn field(&self) -> &PheromoneField {
        &self.field
    }

    pub fn scenario(&self) -> &ScenarioConfig {
        &self.scenario
    }

    pub fn nests(&self) -> &[Nest] {
        &self.nests
    }

    pub fn foods(&self) -> &[FoodSource] {
        &self.foods
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn ants_mut(&mut self) -> &mut [Ant] {
        &mut self.ants
    }

    pub fn number_of_nests(&self) -> usize {
        self.nests.len()
    }

    pub fn number_of_foods(&self) -> usize {
        self.foods.len()
    }

    pub fn number_of_ants(&self) -> usize {
        self.ants.len()
    }

    pub fn place_pheromone_rate(&self) -> u32 {
        self.place_pheromone_rate
    }

    pub fn pheromone_evaporation_rate(&self) -> u32 {
        self.pheromone_evaporation_rate
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for ant in &self.ants {
            match ant.state() {
                AntState::Explorer => census.explorer += 1,
                AntState::BackHome => census.back_home += 1,
                AntState::Carrier => census.carrier += 1,
                AntState::NestCarrier => census.nest_carrier += 1,
                AntState::FollowGreen => census.follow_green += 1,
            }
            if ant.carrying_food {
                census.carrying_food += 1;
            }
        }
        census
    }

    /// Total intensity of one channel over the whole field.
    pub fn pheromone_total(&self, channel: PheromoneChannel) -> u64 {
        let cells = self.field.cell_count();
        (0..cells)
            .map(|index| self.field.get(index, channel) as u64)
            .sum()
    }
}
