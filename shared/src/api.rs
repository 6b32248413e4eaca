use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Number of pheromone channels stored per field cell (the fourth byte is opacity).
pub const PHEROMONE_CHANNEL_COUNT: usize = 3;
/// Bytes per field cell: R, G, B, A.
pub const CELL_STRIDE: usize = 4;
/// Deposit intensity restored whenever an ant re-arms its emission.
pub const REARMED_INTENSITY: u8 = 60;

/// Pheromone channel of the field. Type 1 is red, 2 green, 3 blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PheromoneChannel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl PheromoneChannel {
    pub const ALL: [PheromoneChannel; PHEROMONE_CHANNEL_COUNT] = [
        PheromoneChannel::Red,
        PheromoneChannel::Green,
        PheromoneChannel::Blue,
    ];

    /// Byte offset inside a cell.
    #[inline(always)]
    pub fn offset(self) -> usize {
        self as usize
    }

    /// Numeric pheromone type (1, 2 or 3).
    pub fn pheromone_type(self) -> i32 {
        self as i32 + 1
    }
}

/// Behavioral state of an ant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntState {
    Explorer,
    BackHome,
    Carrier,
    NestCarrier,
    FollowGreen,
}

/// What an ant lays while in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emission {
    pub channel: Option<PheromoneChannel>,
    /// Whether entering the state restores the deposit intensity.
    pub rearm: bool,
}

impl AntState {
    pub const ALL: [AntState; 5] = [
        AntState::Explorer,
        AntState::BackHome,
        AntState::Carrier,
        AntState::NestCarrier,
        AntState::FollowGreen,
    ];

    pub fn emission(self) -> Emission {
        match self {
            AntState::Explorer => Emission {
                channel: Some(PheromoneChannel::Red),
                rearm: true,
            },
            AntState::Carrier | AntState::NestCarrier => Emission {
                channel: Some(PheromoneChannel::Green),
                rearm: true,
            },
            AntState::BackHome | AntState::FollowGreen => Emission {
                channel: None,
                rearm: false,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AntState::Explorer => "explorer",
            AntState::BackHome => "back_home",
            AntState::Carrier => "carrier",
            AntState::NestCarrier => "nest_carrier",
            AntState::FollowGreen => "follow_green",
        }
    }
}

/// Geometry of one antenna relative to the ant's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorParameters {
    pub x_center_distance: f32,
    pub y_center_distance: f32,
    /// Mounting angle in degrees.
    pub position_angle: f32,
    /// Half-width of the sampled window, in field cells.
    pub pixel_radius: u32,
}

/// Template shared by every ant spawned from a nest that references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntParameters {
    pub size: f32,
    pub velocity: f32,
    pub initial_state: AntState,
    pub view_frequency: u32,
    pub place_pheromone_intensity: u8,
    pub left_sensor: Option<SensorParameters>,
    pub right_sensor: Option<SensorParameters>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestParameters {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub ant_amount: u32,
    /// Index into the ant template list.
    pub ant_template: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodParameters {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub food_amount: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emission_table() {
        assert_eq!(
            AntState::Explorer.emission().channel,
            Some(PheromoneChannel::Red)
        );
        assert_eq!(
            AntState::Carrier.emission().channel,
            Some(PheromoneChannel::Green)
        );
        assert_eq!(
            AntState::NestCarrier.emission().channel,
            Some(PheromoneChannel::Green)
        );
        assert_eq!(AntState::BackHome.emission().channel, None);
        assert_eq!(AntState::FollowGreen.emission().channel, None);

        for state in AntState::ALL {
            assert_eq!(
                state.emission().rearm,
                state.emission().channel.is_some(),
                "Only emitting states re-arm: {:?}",
                state
            );
        }
    }

    #[test]
    fn test_channel_codes() {
        assert_eq!(PheromoneChannel::Red.pheromone_type(), 1);
        assert_eq!(PheromoneChannel::Green.pheromone_type(), 2);
        assert_eq!(PheromoneChannel::Blue.pheromone_type(), 3);
        assert_eq!(PheromoneChannel::Blue.offset(), 2);
    }
}
