use glam::Vec2;
use shared::util::TrigTable;
use shared::{PheromoneChannel, SensorParameters};

use super::pheromone::PheromoneField;

/// One antenna. Sits at a fixed offset from the ant and smells a square patch of the field.
#[derive(Debug, Clone)]
pub struct AntSensor {
    x_center_distance: f32,
    y_center_distance: f32,
    /// Mounting angle in radians.
    position_angle: f32,
    pixel_radius: u32,

    pos: Vec2,
    index_x: i32,
    index_y: i32,
}

impl AntSensor {
    pub fn new(parameters: &SensorParameters) -> Self {
        Self {
            x_center_distance: parameters.x_center_distance,
            y_center_distance: parameters.y_center_distance,
            position_angle: parameters.position_angle.to_radians(),
            pixel_radius: parameters.pixel_radius,
            pos: Vec2::ZERO,
            index_x: 0,
            index_y: 0,
        }
    }

    /// Places the sensor relative to the ant's pose and caches the cell it points at.
    pub fn move_to(
        &mut self,
        ant_pos: Vec2,
        ant_theta: f32,
        trig: &TrigTable,
        field: &PheromoneField,
    ) {
        let (sin, cos) = trig.sin_cos(ant_theta + self.position_angle);
        self.pos = Vec2::new(
            ant_pos.x + self.x_center_distance * cos,
            ant_pos.y + self.y_center_distance * sin,
        );
        (self.index_x, self.index_y) = field.cell_coords(self.pos);
    }

    /// Total intensity of a channel inside the sensor window, as of the last `move_to`.
    pub fn detect_pheromone(&self, field: &PheromoneField, channel: PheromoneChannel) -> u64 {
        field.sample_window(self.index_x, self.index_y, self.pixel_radius, channel)
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn cell(&self) -> (i32, i32) {
        (self.index_x, self.index_y)
    }
}

/// Intensities seen by one sensor on each channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorReading {
    pub red: u64,
    pub green: u64,
    pub blue: u64,
}

impl SensorReading {
    pub fn sample(sensor: &AntSensor, field: &PheromoneField) -> Self {
        Self {
            red: sensor.detect_pheromone(field, PheromoneChannel::Red),
            green: sensor.detect_pheromone(field, PheromoneChannel::Green),
            blue: sensor.detect_pheromone(field, PheromoneChannel::Blue),
        }
    }
}
