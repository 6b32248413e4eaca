use super::{
    FoodSource, INTENSITY_DECAY_PERIOD, INTENSITY_DECAY_STEP, JITTER_DIVISOR, JITTER_STEPS,
    LIFETIME_LIMIT, LOWER_BOUND, Nest, PheromoneField, STRONG_TURN_GAIN, UPPER_BOUND,
    WEAK_TURN_GAIN, Zone,
};
use super::sensor::{AntSensor, SensorReading};
use crate::error::{SensorSide, SimError};

use glam::Vec2;
use rand::Rng;
use shared::util::{TrigTable, wrap_angle};
use shared::{AntParameters, AntState, PheromoneChannel, REARMED_INTENSITY};
use std::cmp::Ordering;
use std::f32::consts::PI;

/// State of an ant.
#[derive(Debug, Clone)]
pub struct Ant {
    pub id: u32,
    pub nest_id: u32,

    pos: Vec2,
    theta: f32,
    size: f32,
    velocity: f32,

    state: AntState,
    pheromone: Option<PheromoneChannel>,
    place_pheromone_intensity: u8,

    pub life_time: u32,
    view_frequency: u32,

    pub left_sensor: AntSensor,
    pub right_sensor: AntSensor,

    pub found_nest: bool,
    pub found_food: bool,
    pub carrying_food: bool,
}

impl Ant {
    /// Create a new ant from a template. Its heading is a random whole degree.
    pub fn new(
        id: u32,
        nest_id: u32,
        pos: Vec2,
        template: usize,
        parameters: &AntParameters,
        rng: &mut impl Rng,
    ) -> Result<Self, SimError> {
        if parameters.view_frequency == 0 {
            return Err(SimError::ZeroViewFrequency { template });
        }
        let left = parameters.left_sensor.as_ref().ok_or(SimError::MissingSensor {
            template,
            side: SensorSide::Left,
        })?;
        let right = parameters.right_sensor.as_ref().ok_or(SimError::MissingSensor {
            template,
            side: SensorSide::Right,
        })?;

        let mut ant = Self {
            id,
            nest_id,
            pos,
            theta: (rng.random_range(0..360u32) as f32).to_radians(),
            size: parameters.size,
            velocity: parameters.velocity,
            state: parameters.initial_state,
            // Every ant starts on the red channel, whatever its initial state.
            pheromone: Some(PheromoneChannel::Red),
            place_pheromone_intensity: parameters.place_pheromone_intensity,
            life_time: 0,
            view_frequency: parameters.view_frequency,
            left_sensor: AntSensor::new(left),
            right_sensor: AntSensor::new(right),
            found_nest: false,
            found_food: false,
            carrying_food: false,
        };
        ant.put_in_bounds();
        Ok(ant)
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn state(&self) -> AntState {
        self.state
    }

    /// Channel that receives this ant's deposits, if it lays anything at all.
    pub fn pheromone(&self) -> Option<PheromoneChannel> {
        self.pheromone
    }

    /// Numeric pheromone type: 1, 2, 3, or -1 when nothing is laid.
    pub fn pheromone_type(&self) -> i32 {
        self.pheromone.map_or(-1, PheromoneChannel::pheromone_type)
    }

    /// Ticks between two looks at the field. Never 0.
    pub fn view_frequency(&self) -> u32 {
        self.view_frequency
    }

    pub fn place_pheromone_intensity(&self) -> u8 {
        self.place_pheromone_intensity
    }

    pub fn set_theta(&mut self, theta: f32) {
        self.theta = theta;
    }

    /// Teleports the ant. The position is clamped into the plane.
    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
        self.put_in_bounds();
    }

    /// Advances one step along the current heading. Runs every tick.
    pub fn move_forward(&mut self, trig: &TrigTable) {
        self.life_time = self.life_time.saturating_add(1);
        let (sin, cos) = trig.sin_cos(self.theta);
        self.pos.x += self.velocity * cos;
        self.pos.y += self.velocity * sin;
        self.put_in_bounds();
    }

    fn put_in_bounds(&mut self) {
        self.pos = self.pos.clamp(Vec2::splat(LOWER_BOUND), Vec2::splat(UPPER_BOUND));
    }

    /// Senses and decides, on the ticks this ant looks around.
    /// Returns whether a decision was made.
    pub fn environment_analysis(
        &mut self,
        tick: u32,
        field: &PheromoneField,
        trig: &TrigTable,
        nests: &[Nest],
        foods: &[FoodSource],
        rng: &mut impl Rng,
    ) -> bool {
        if tick % self.view_frequency != 0 {
            return false;
        }

        self.left_sensor.move_to(self.pos, self.theta, trig, field);
        self.right_sensor.move_to(self.pos, self.theta, trig, field);
        let left = SensorReading::sample(&self.left_sensor, field);
        let right = SensorReading::sample(&self.right_sensor, field);

        self.make_decision(left, right, nests, foods, rng);
        self.theta = wrap_angle(self.theta);
        true
    }

    pub fn make_decision(
        &mut self,
        left: SensorReading,
        right: SensorReading,
        nests: &[Nest],
        foods: &[FoodSource],
        rng: &mut impl Rng,
    ) {
        match self.state {
            AntState::Explorer => {
                self.steer(left.red, right.red, WEAK_TURN_GAIN, rng);

                if right.green > 0 || left.green > 0 {
                    self.change_state(AntState::FollowGreen);
                }

                if self.food_collision(foods) {
                    self.theta += PI;
                    self.life_time = 0;
                    self.change_state(AntState::Carrier);
                }
            }
            AntState::BackHome => {
                self.steer(left.red, right.red, -STRONG_TURN_GAIN, rng);

                if self.nest_collision(nests) {
                    self.theta += jitter(rng) * STRONG_TURN_GAIN;
                    self.theta -= jitter(rng) * STRONG_TURN_GAIN;
                    self.life_time = 0;
                    self.change_state(AntState::Explorer);
                }
            }
            AntState::Carrier => {
                self.steer(left.green, right.green, STRONG_TURN_GAIN, rng);
                self.steer(left.red, right.red, -WEAK_TURN_GAIN, rng);

                if self.nest_collision(nests) {
                    self.theta += PI;
                    self.life_time = 0;
                    self.change_state(AntState::NestCarrier);
                }
            }
            AntState::NestCarrier => {
                self.steer(left.green, right.green, -STRONG_TURN_GAIN, rng);

                if self.carrying_food && self.nest_collision(nests) {
                    self.life_time = 0;
                    self.theta += PI;
                    self.place_pheromone_intensity = REARMED_INTENSITY;
                } else if !self.carrying_food && self.food_collision(foods) {
                    self.theta += PI;
                    self.place_pheromone_intensity = REARMED_INTENSITY;
                }
            }
            AntState::FollowGreen => {
                self.steer(left.green, right.green, -STRONG_TURN_GAIN, rng);

                if self.nest_collision(nests) {
                    self.change_state(AntState::Explorer);
                } else if self.food_collision(foods) {
                    self.change_state(AntState::Carrier);
                }
            }
        }

        if self.life_time % INTENSITY_DECAY_PERIOD == 0 {
            self.place_pheromone_intensity = self
                .place_pheromone_intensity
                .saturating_sub(INTENSITY_DECAY_STEP);
        }

        if self.life_time >= LIFETIME_LIMIT {
            // Recall goes to the origin, not to the ant's own nest.
            log::trace!("ant {} timed out in {:?}, recalled", self.id, self.state);
            self.life_time = 0;
            self.pos = Vec2::ZERO;
            self.change_state(AntState::NestCarrier);
        }
    }

    /// Turns by a random amount scaled by `gain` when the two sides disagree:
    /// positive when the right side smells more, negative when the left does.
    fn steer(&mut self, left: u64, right: u64, gain: f32, rng: &mut impl Rng) {
        match right.cmp(&left) {
            Ordering::Greater => self.theta += jitter(rng) * gain,
            Ordering::Less => self.theta -= jitter(rng) * gain,
            Ordering::Equal => {}
        }
    }

    pub fn change_state(&mut self, new_state: AntState) {
        if new_state == AntState::BackHome {
            self.theta += PI;
        }
        log::trace!("ant {}: {:?} -> {:?}", self.id, self.state, new_state);

        let emission = new_state.emission();
        self.state = new_state;
        self.pheromone = emission.channel;
        if emission.rearm {
            self.place_pheromone_intensity = REARMED_INTENSITY;
        }
    }

    pub fn nest_collision(&mut self, nests: &[Nest]) -> bool {
        if self.snap_to_first(nests) {
            self.carrying_food = false;
            self.found_nest = true;
            return true;
        }
        false
    }

    pub fn food_collision(&mut self, foods: &[FoodSource]) -> bool {
        if self.snap_to_first(foods) {
            self.carrying_food = true;
            self.found_food = true;
            return true;
        }
        false
    }

    /// Zones are checked in declaration order; the first hit wins.
    fn snap_to_first<Z: Zone>(&mut self, zones: &[Z]) -> bool {
        match zones.iter().find(|zone| zone.ant_collision(self.pos)) {
            Some(zone) => {
                self.pos = zone.pos();
                true
            }
            None => false,
        }
    }
}

/// Random turn in `[0, 60)` degrees, returned in radians.
fn jitter(rng: &mut impl Rng) -> f32 {
    (rng.random_range(0..JITTER_STEPS) as f32 / JITTER_DIVISOR).to_radians()
}
