use noise::{NoiseFn, Perlin};

use crate::constants::{
    BASE_SAMPLE_WEIGHT, NOISE_SAMPLE_OFFSET, SECONDARY_SAMPLE_WEIGHT, ZOOM_CONTINENTS,
};
use crate::map::error::MapError;
use crate::map::hex::HexPoint;

/// `cols x rows` raster of scalar values, row-major.
///
/// Produced raw in `[-1, 1]` and normalized to `[0, 1]` after generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarField {
    cols: u32,
    rows: u32,
    values: Vec<f64>,
}

/// Elevation raster
pub type HeightMap = ScalarField;

/// Moisture raster, built by the same generator with a different seed
pub type MoistureMap = ScalarField;

/// Folds a 64-bit seed down to the 32 bits `Perlin` takes
pub fn noise_seed(seed: u64) -> u32 {
    (seed as u32) ^ ((seed >> 32) as u32)
}

impl ScalarField {
    /// Generate a normalized field at the default zoom
    pub fn generate(cols: u32, rows: u32, seed: u32) -> Self {
        Self::generate_with_zoom(cols, rows, seed, ZOOM_CONTINENTS)
    }

    pub fn generate_with_zoom(cols: u32, rows: u32, seed: u32, zoom: f64) -> Self {
        let noise = Perlin::new(seed);
        let mut values = Vec::with_capacity(cols as usize * rows as usize);

        for y in 0..rows {
            for x in 0..cols {
                values.push(sample(&noise, x as f64, y as f64, zoom));
            }
        }

        let mut field = Self { cols, rows, values };
        field.normalize();
        field
    }

    /// Wraps precomputed row-major values
    pub fn from_values(cols: u32, rows: u32, values: Vec<f64>) -> Result<Self, MapError> {
        let expected = cols as usize * rows as usize;
        if values.len() != expected {
            return Err(MapError::FieldShape {
                cols,
                rows,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { cols, rows, values })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at `point`, or `None` outside the raster
    pub fn get(&self, point: HexPoint) -> Option<f64> {
        if point.x < 0 || point.y < 0 || point.x as u32 >= self.cols || point.y as u32 >= self.rows
        {
            return None;
        }
        self.values
            .get(point.y as usize * self.cols as usize + point.x as usize)
            .copied()
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Rescale so the minimum maps to 0.0 and the maximum to 1.0.
    ///
    /// A constant field has no range to stretch and becomes all zeros.
    pub fn normalize(&mut self) {
        if self.values.is_empty() {
            return;
        }
        let min = self.min();
        let range = self.max() - min;
        if range <= f64::EPSILON {
            self.values.fill(0.0);
            return;
        }
        for value in &mut self.values {
            *value = (*value - min) / range;
        }
    }

    /// Value `v` such that roughly `fraction` of all cells are `>= v`.
    ///
    /// Sorted descending, this is the entry at `floor(count * fraction) - 1`.
    /// When that index is below zero no cell qualifies and `+inf` is returned;
    /// fractions of one or more return the minimum.
    pub fn find_threshold_above(&self, fraction: f64) -> f64 {
        let count = self.values.len();
        let wanted = (count as f64 * fraction.max(0.0)).floor() as usize;
        if wanted == 0 {
            return f64::INFINITY;
        }

        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        sorted[wanted.min(count) - 1]
    }

    /// Number of cells at or above `threshold`
    pub fn count_at_or_above(&self, threshold: f64) -> usize {
        self.values.iter().filter(|value| **value >= threshold).count()
    }
}

/// Base sample blended with the mean of four neighbour samples at twice the frequency
fn sample(noise: &Perlin, x: f64, y: f64, zoom: f64) -> f64 {
    let [ox, oy] = NOISE_SAMPLE_OFFSET;
    let bx = x * zoom + ox;
    let by = y * zoom + oy;
    let base = noise.get([bx, by]);

    let detail = zoom * 2.0;
    let secondary = [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0)]
        .iter()
        .map(|(dx, dy)| noise.get([(x + dx) * detail + ox, (y + dy) * detail + oy]))
        .sum::<f64>()
        / 4.0;

    let combined = (BASE_SAMPLE_WEIGHT * base + SECONDARY_SAMPLE_WEIGHT * secondary)
        / (BASE_SAMPLE_WEIGHT + SECONDARY_SAMPLE_WEIGHT);
    combined.clamp(-1.0, 1.0)
}
