use thiserror::Error;

/// Which antenna of an ant a sensor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorSide {
    Left,
    Right,
}

impl std::fmt::Display for SensorSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorSide::Left => write!(f, "left"),
            SensorSide::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("pheromone field must be at least 1x1, got {width}x{height}")]
    InvalidFieldSize { width: u32, height: u32 },
    #[error("{name} must be at least 1")]
    ZeroRate { name: &'static str },
    #[error("ant template {template} has a view frequency of 0")]
    ZeroViewFrequency { template: usize },
    #[error("ant template {template} is missing its {side} sensor parameters")]
    MissingSensor { template: usize, side: SensorSide },
    #[error("no nest configured at index {0}")]
    UnknownNest(usize),
    #[error("no food source configured at index {0}")]
    UnknownFood(usize),
    #[error("nest {nest} references ant template {template}, which does not exist")]
    UnknownAntTemplate { nest: usize, template: usize },
    #[error("cell index {index} is outside the pheromone field ({cells} cells)")]
    CellOutOfBounds { index: usize, cells: usize },
    #[error("position maps to cell ({x}, {y}) outside the pheromone field")]
    PositionOutsideField { x: i32, y: i32 },
    #[error("unsupported action: {0}")]
    UnsupportedAction(String),
}
