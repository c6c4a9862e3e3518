use faer_core::{Mat, MatRef};

use crate::{driver::SimError, mesh::Mesh, Float};

/// A one-dimensional slice of a [`Solution`]: either an angular profile at a fixed time layer or
/// a time series at a fixed angular index.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub label: String,
    pub index: usize,
    pub coordinate: Float,
    pub abscissa: Vec<Float>,
    pub values: Vec<Float>,
}

/// The complete space-time temperature field of one march.
///
/// Row `k` of the field is the time layer at `times()[k]`, column `i` the angle `angles()[i]`.
#[derive(Debug, Clone)]
pub struct Solution {
    mesh: Mesh,
    angles: Vec<Float>,
    times: Vec<Float>,
    field: Mat<Float>,
}

impl Solution {
    pub(crate) fn new(mesh: Mesh, angles: Vec<Float>, times: Vec<Float>, field: Mat<Float>) -> Self {
        debug_assert_eq!(field.nrows(), times.len());
        debug_assert_eq!(field.ncols(), angles.len());
        Self {
            mesh,
            angles,
            times,
            field,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn angles(&self) -> &[Float] {
        &self.angles
    }

    pub fn times(&self) -> &[Float] {
        &self.times
    }

    pub fn field(&self) -> MatRef<'_, Float> {
        self.field.as_ref()
    }

    /// `(K, I)`
    pub fn shape(&self) -> (usize, usize) {
        (self.field.nrows(), self.field.ncols())
    }

    pub fn at(&self, k: usize, i: usize) -> Float {
        self.field.read(k, i)
    }

    pub fn profile_at(&self, k: usize) -> Vec<Float> {
        (0..self.field.ncols()).map(|i| self.field.read(k, i)).collect()
    }

    pub fn trace_at(&self, i: usize) -> Vec<Float> {
        (0..self.field.nrows()).map(|k| self.field.read(k, i)).collect()
    }

    /// Layer index closest to `time`, `round(time / h_t)`.
    pub fn nearest_layer(&self, time: Float) -> Result<usize, SimError> {
        self.mesh
            .time
            .nearest_index(time)
            .ok_or(SimError::invalid("target time", time))
    }

    pub fn nearest_angle(&self, theta: Float) -> Result<usize, SimError> {
        self.mesh
            .angle
            .nearest_index(theta)
            .ok_or(SimError::invalid("target angle", theta))
    }

    pub fn profile_near_time(&self, time: Float) -> Result<Trace, SimError> {
        let k = self.nearest_layer(time)?;
        Ok(self.profile_trace(k, format!("t = {:.1}", self.times[k])))
    }

    pub fn trace_near_angle(&self, theta: Float) -> Result<Trace, SimError> {
        let i = self.nearest_angle(theta)?;
        Ok(self.time_trace(i, format!("θ = {:.2}", self.angles[i])))
    }

    /// `n` angular profiles at evenly spread time layers, first and last layer included.
    pub fn time_snapshots(&self, n: usize) -> Vec<Trace> {
        spread(self.times.len(), n)
            .map(|k| self.profile_trace(k, format!("t = {:.1}", self.times[k])))
            .collect()
    }

    /// `n` time series at evenly spread angular samples, first and last sample included.
    pub fn angle_snapshots(&self, n: usize) -> Vec<Trace> {
        spread(self.angles.len(), n)
            .map(|i| self.time_trace(i, format!("θ = {:.2}", self.angles[i])))
            .collect()
    }

    pub(crate) fn profile_trace(&self, k: usize, label: String) -> Trace {
        Trace {
            label,
            index: k,
            coordinate: self.times[k],
            abscissa: self.angles.clone(),
            values: self.profile_at(k),
        }
    }

    pub(crate) fn time_trace(&self, i: usize, label: String) -> Trace {
        Trace {
            label,
            index: i,
            coordinate: self.angles[i],
            abscissa: self.times.clone(),
            values: self.trace_at(i),
        }
    }
}

// floor(j (len - 1) / (n - 1)) for j in 0..n
fn spread(len: usize, n: usize) -> impl Iterator<Item = usize> {
    let last = len.saturating_sub(1);
    (0..n).map(move |j| if n > 1 { j * last / (n - 1) } else { 0 })
}
