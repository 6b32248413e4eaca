use std::f32::consts::{PI, TAU};

/// Number of entries over a full turn (0.1 degree resolution).
pub const LOOKUP_TABLE_SIZE: usize = 3600;

/// Precomputed sine and cosine values for equally spaced angles around the circle.
///
/// The table is an owned value: build it once and hand references to whoever needs
/// fast trigonometry (ant movement, sensor placement).
#[derive(Debug, Clone)]
pub struct TrigTable {
    entries: Vec<(f32, f32)>,
}

impl TrigTable {
    pub fn new() -> Self {
        let step = TAU / LOOKUP_TABLE_SIZE as f32;
        let entries = (0..LOOKUP_TABLE_SIZE)
            .map(|i| {
                let angle = i as f32 * step;
                (angle.sin(), angle.cos())
            })
            .collect();
        Self { entries }
    }

    /// Table slot for an angle in radians. Truncates toward zero, then wraps into range.
    #[inline(always)]
    pub fn index_of(angle: f32) -> usize {
        let slot = ((angle / PI) * (LOOKUP_TABLE_SIZE / 2) as f32) as i64;
        slot.rem_euclid(LOOKUP_TABLE_SIZE as i64) as usize
    }

    /// Fast sine and cosine using the lookup table.
    #[inline(always)]
    pub fn sin_cos(&self, angle: f32) -> (f32, f32) {
        self.entries[Self::index_of(angle)]
    }
}

impl Default for TrigTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}
