use glam::Vec2;
use shared::{FoodParameters, NestParameters};

/// A static square area ants can bump into. `size` is the half-extent.
pub trait Zone {
    fn pos(&self) -> Vec2;
    fn size(&self) -> f32;

    /// Inclusive point-in-square test.
    fn ant_collision(&self, ant_pos: Vec2) -> bool {
        let (center, size) = (self.pos(), self.size());
        ant_pos.x >= center.x - size
            && ant_pos.x <= center.x + size
            && ant_pos.y >= center.y - size
            && ant_pos.y <= center.y + size
    }
}

/// Anthill.
#[derive(Debug, Clone, PartialEq)]
pub struct Nest {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub ant_amount: u32,
}

impl Nest {
    pub fn new(parameters: &NestParameters) -> Self {
        Self {
            id: parameters.id,
            pos: parameters.pos,
            size: parameters.size,
            ant_amount: parameters.ant_amount,
        }
    }
}

impl Zone for Nest {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> f32 {
        self.size
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodSource {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub food_amount: u32,
}

impl FoodSource {
    pub fn new(parameters: &FoodParameters) -> Self {
        Self {
            id: parameters.id,
            pos: parameters.pos,
            size: parameters.size,
            food_amount: parameters.food_amount,
        }
    }
}

impl Zone for FoodSource {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> f32 {
        self.size
    }
}
