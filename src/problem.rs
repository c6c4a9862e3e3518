use core::fmt;

use crate::{driver::SimError, Float};

/// Physical description of the sphere.
///
/// Once built through [`Parameters::new`] the record is validated and never mutated; every
/// operation of the crate receives it by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub(crate) radius: Float,
    pub(crate) conductivity: Float,
    pub(crate) heat_capacity: Float,
    pub(crate) duration: Float,
}

impl Parameters {
    pub fn new(
        radius: Float,
        conductivity: Float,
        heat_capacity: Float,
        duration: Float,
    ) -> Result<Self, SimError> {
        let params = Self {
            radius,
            conductivity,
            heat_capacity,
            duration,
        };
        params.validate()?;
        Ok(params)
    }

    pub(crate) fn validate(&self) -> Result<(), SimError> {
        // κ = 0 is a valid (diffusion-free) problem
        if !(self.conductivity >= 0.0 && self.conductivity.is_finite()) {
            return Err(SimError::invalid("conductivity κ", self.conductivity));
        }
        for (what, value) in [
            ("radius R", self.radius),
            ("heat capacity c", self.heat_capacity),
            ("duration T", self.duration),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SimError::invalid(what, value));
            }
        }
        Ok(())
    }

    pub fn radius(&self) -> Float {
        self.radius
    }

    pub fn conductivity(&self) -> Float {
        self.conductivity
    }

    pub fn heat_capacity(&self) -> Float {
        self.heat_capacity
    }

    pub fn duration(&self) -> Float {
        self.duration
    }

    /// `κ / (R² c)`, the angular diffusivity of the problem.
    pub fn diffusivity(&self) -> Float {
        self.conductivity / (self.radius * self.radius * self.heat_capacity)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            radius: 6.0,
            conductivity: 0.59,
            heat_capacity: 1.65,
            duration: 100.0,
        }
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R={}, κ={}, c={}, T={}",
            self.radius, self.conductivity, self.heat_capacity, self.duration
        )
    }
}

/// Temperature at `t = 0`.
pub fn initial_condition(theta: Float) -> Float {
    theta.cos().powi(6)
}
