pub mod ant;
pub mod environment;
pub mod pheromone;
pub mod sensor;
pub mod zone;

// Re-export key types for easier imports
pub use ant::Ant;
pub use environment::Environment;
pub use pheromone::PheromoneField;
pub use sensor::{AntSensor, SensorReading};
pub use zone::{FoodSource, Nest, Zone};

// Plane bounds an ant can never leave
pub const LOWER_BOUND: f32 = -0.990;
pub const UPPER_BOUND: f32 = 0.990;

// Field constants
pub const MAX_PHEROMONE_AMOUNT: u8 = 255;
pub const OPAQUE: u8 = 255;

// Ant behavior constants
pub const LIFETIME_LIMIT: u32 = 200; // Ticks without a productive transition before recall
pub const INTENSITY_DECAY_PERIOD: u32 = 10;
pub const INTENSITY_DECAY_STEP: u8 = 3;
pub const JITTER_STEPS: u32 = 360; // Random turn is k/6 degrees, k in [0, 360)
pub const JITTER_DIVISOR: f32 = 6.0;
pub const WEAK_TURN_GAIN: f32 = 0.1;
pub const STRONG_TURN_GAIN: f32 = 0.4;
