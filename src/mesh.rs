use std::f64::consts::FRAC_PI_2;

use crate::{driver::SimError, problem::Parameters, Float};

// upper bound on I * K, the number of stored temperatures
pub const MAX_FIELD_SIZE: usize = 1 << 28;

// grid[0] <-> lower
// grid[i] <-> lower + i * delta forall i < samples
// upper itself is never sampled: grid[samples - 1] == upper - delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub(crate) lower: Float,
    pub(crate) upper: Float,
    pub(crate) delta: Float,
    pub(crate) samples: usize,
}

impl Grid {
    pub fn from_samples(lower: Float, upper: Float, samples: usize) -> Self {
        let delta = (upper - lower) / samples as Float;
        Self {
            lower,
            upper,
            delta,
            samples,
        }
    }

    pub fn from_delta(lower: Float, upper: Float, delta: Float) -> Self {
        let samples = ((upper - lower) / delta).ceil() as usize;
        Self::from_samples(lower, upper, samples)
    }

    pub fn with_delta(self, delta: Float) -> Self {
        Self::from_delta(self.lower, self.upper, delta)
    }

    pub fn with_samples(self, samples: usize) -> Self {
        Self::from_samples(self.lower, self.upper, samples)
    }

    pub fn lower(&self) -> Float {
        self.lower
    }

    pub fn upper(&self) -> Float {
        self.upper
    }

    pub fn delta(&self) -> Float {
        self.delta
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn get(&self, i: usize) -> Float {
        self.lower + self.delta * i as Float
    }

    pub fn iter(self) -> impl Iterator<Item = Float> {
        (0..self.samples).map(move |i| self.get(i))
    }

    pub fn to_vec(self) -> Vec<Float> {
        self.iter().collect()
    }

    /// Index of the sample closest to `x`, i.e. `round((x - lower) / delta)`.
    ///
    /// Returns `None` when `x` rounds to a point outside the grid.
    pub fn nearest_index(&self, x: Float) -> Option<usize> {
        let i = ((x - self.lower) / self.delta).round();
        if i.is_finite() && i >= 0.0 && i < self.samples as Float {
            Some(i as usize)
        } else {
            None
        }
    }
}

/// The angular grid over `[0, π/2)` and the time grid over `[0, T)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    pub(crate) angle: Grid,
    pub(crate) time: Grid,
}

impl Mesh {
    pub fn new(
        params: &Parameters,
        angular_samples: usize,
        time_samples: usize,
    ) -> Result<Self, SimError> {
        params.validate()?;
        let mesh = Self {
            angle: Grid::from_samples(0.0, FRAC_PI_2, angular_samples),
            time: Grid::from_samples(0.0, params.duration, time_samples),
        };
        mesh.validate()?;
        Ok(mesh)
    }

    pub(crate) fn validate(&self) -> Result<(), SimError> {
        if self.angle.samples < 2 {
            return Err(SimError::invalid(
                "angular samples I",
                self.angle.samples as Float,
            ));
        }
        if self.time.samples < 1 {
            return Err(SimError::invalid("time samples K", self.time.samples as Float));
        }
        match self.angle.samples.checked_mul(self.time.samples) {
            Some(size) if size <= MAX_FIELD_SIZE => Ok(()),
            _ => Err(SimError::invalid(
                "field size I×K",
                self.angle.samples as Float * self.time.samples as Float,
            )),
        }
    }

    pub fn angle(&self) -> Grid {
        self.angle
    }

    pub fn time(&self) -> Grid {
        self.time
    }
}
