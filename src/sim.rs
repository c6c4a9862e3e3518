use std::fmt;

use crate::{
    driver::SimError,
    mesh::{Grid, Mesh, MAX_FIELD_SIZE},
    method::{Method, StepCoefficients},
    methods,
    problem::Parameters,
    Float, DEFAULT_ANGULAR_SAMPLES, DEFAULT_TIME_SAMPLES,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Delta(Float),
    Steps(usize),
}

impl Resolution {
    fn apply(self, grid: Grid, what: &'static str) -> Result<Grid, SimError> {
        match self {
            Resolution::Delta(delta) if delta > 0.0 && delta.is_finite() => {
                // checked before the cast, which would saturate
                let samples = ((grid.upper - grid.lower) / delta).ceil();
                if samples > MAX_FIELD_SIZE as Float {
                    return Err(SimError::invalid(what, delta));
                }
                Ok(grid.with_delta(delta))
            }
            Resolution::Delta(delta) => Err(SimError::invalid(what, delta)),
            Resolution::Steps(steps) => Ok(grid.with_samples(steps)),
        }
    }
}

/// A fully configured march: parameters, grids and the stepping method.
#[derive(Debug, Clone)]
pub struct Simulation<M> {
    pub(crate) params: Parameters,
    pub(crate) mesh: Mesh,
    pub(crate) method: M,
}

impl Simulation<methods::ImplicitSweep> {
    pub fn new(params: Parameters) -> Result<Self, SimError> {
        Ok(Self {
            mesh: Mesh::new(&params, DEFAULT_ANGULAR_SAMPLES, DEFAULT_TIME_SAMPLES)?,
            params,
            method: methods::ImplicitSweep::default(),
        })
    }
}

impl<M: Method> Simulation<M> {
    pub fn with_angular_resolution(mut self, r: Resolution) -> Result<Self, SimError> {
        self.mesh.angle = r.apply(self.mesh.angle, "angular step")?;
        self.mesh.validate()?;
        Ok(self)
    }

    pub fn with_time_resolution(mut self, r: Resolution) -> Result<Self, SimError> {
        self.mesh.time = r.apply(self.mesh.time, "time step")?;
        self.mesh.validate()?;
        Ok(self)
    }

    pub fn with_method<N: Method + Default>(self) -> Simulation<N> {
        Simulation {
            params: self.params,
            mesh: self.mesh,
            method: N::default(),
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn coefficients(&self) -> StepCoefficients {
        StepCoefficients::new(&self.params, &self.mesh)
    }
}

impl<M: Method> fmt::Display for Simulation<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.coefficients();
        write!(
            f,
            "simulation of heat conduction on a sphere ({}):\n\t- `{}` method\n\t- Δθ = {:e} ({} samples)\n\t- Δt = {:e} ({} samples)\n\t- P = {:e}, Q = {:e}",
            self.params,
            self.method.name(),
            self.mesh.angle.delta,
            self.mesh.angle.samples,
            self.mesh.time.delta,
            self.mesh.time.samples,
            c.p,
            c.q
        )
    }
}
