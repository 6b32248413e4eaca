use glam::Vec2;
use shared::{CELL_STRIDE, PHEROMONE_CHANNEL_COUNT, PheromoneChannel};

use super::{MAX_PHEROMONE_AMOUNT, OPAQUE};
use crate::error::SimError;

/// Shared trail field: one RGBA byte pixel per cell, row-major.
///
/// Access follows two phases per tick. Ants read it while sensing, and only once every
/// ant has sensed is it written by deposits and then evaporation.
#[derive(Debug, Clone)]
pub struct PheromoneField {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

impl PheromoneField {
    pub fn new(width: u32, height: u32) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidFieldSize { width, height });
        }
        let mut field = Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize * CELL_STRIDE],
        };
        field.initialize();
        Ok(field)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA buffer, for whoever draws the field.
    pub fn pixels(&self) -> &[u8] {
        &self.cells
    }

    /// Clears every pheromone channel and makes every cell opaque.
    pub fn initialize(&mut self) {
        for cell in self.cells.chunks_exact_mut(CELL_STRIDE) {
            cell[..PHEROMONE_CHANNEL_COUNT].fill(0);
            cell[PHEROMONE_CHANNEL_COUNT] = OPAQUE;
        }
    }

    /// Maps a plane position in `[-1, 1]` to cell coordinates.
    ///
    /// Uses the half-size rounded down and truncates toward zero, so positions slightly
    /// outside the plane can still land on edge cells and anything further maps outside.
    pub fn cell_coords(&self, pos: Vec2) -> (i32, i32) {
        let half_w = (self.width / 2) as f32;
        let half_h = (self.height / 2) as f32;
        ((half_w + pos.x * half_w) as i32, (half_h + pos.y * half_h) as i32)
    }

    /// Linear cell index, if the coordinates lie inside the field.
    pub fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Linear cell index of a plane position.
    pub fn index_at(&self, pos: Vec2) -> Result<usize, SimError> {
        let (x, y) = self.cell_coords(pos);
        self.cell_index(x, y)
            .ok_or(SimError::PositionOutsideField { x, y })
    }

    pub fn get(&self, cell_index: usize, channel: PheromoneChannel) -> u8 {
        self.cells
            .get(cell_index * CELL_STRIDE + channel.offset())
            .copied()
            .unwrap_or(0)
    }

    pub fn alpha(&self, cell_index: usize) -> u8 {
        self.cells
            .get(cell_index * CELL_STRIDE + PHEROMONE_CHANNEL_COUNT)
            .copied()
            .unwrap_or(0)
    }

    /// Adds `amount` to one channel of a cell, saturating at 255.
    #[inline(always)]
    pub fn deposit(
        &mut self,
        cell_index: usize,
        channel: PheromoneChannel,
        amount: u8,
    ) -> Result<(), SimError> {
        if cell_index >= self.cell_count() {
            return Err(SimError::CellOutOfBounds {
                index: cell_index,
                cells: self.cell_count(),
            });
        }
        let value = &mut self.cells[cell_index * CELL_STRIDE + channel.offset()];
        *value = value.saturating_add(amount).min(MAX_PHEROMONE_AMOUNT);
        Ok(())
    }

    /// Removes exactly one unit from every pheromone channel of every cell.
    pub fn evaporate(&mut self) {
        for cell in self.cells.chunks_exact_mut(CELL_STRIDE) {
            for value in &mut cell[..PHEROMONE_CHANNEL_COUNT] {
                *value = value.saturating_sub(1);
            }
        }
    }

    /// Sums a channel over the square window of half-width `radius` centered on a cell.
    /// Cells of the window that fall outside the field contribute nothing.
    pub fn sample_window(
        &self,
        cell_x: i32,
        cell_y: i32,
        radius: u32,
        channel: PheromoneChannel,
    ) -> u64 {
        let r = radius as i64;
        let x_min = (cell_x as i64 - r).max(0);
        let x_max = (cell_x as i64 + r).min(self.width as i64 - 1);
        let y_min = (cell_y as i64 - r).max(0);
        let y_max = (cell_y as i64 + r).min(self.height as i64 - 1);

        let mut total = 0u64;
        for y in y_min..=y_max {
            let row = y as usize * self.width as usize;
            for x in x_min..=x_max {
                let index = (row + x as usize) * CELL_STRIDE + channel.offset();
                total += self.cells[index] as u64;
            }
        }
        total
    }
}
