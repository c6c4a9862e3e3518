//! Implicit finite-difference solver for heat conduction along the polar angle of a sphere.
//!
//! The temperature `u(θ, t)` obeys
//!
//! ```text
//! c u_t = κ / R² (u_θθ + cot(θ) u_θ),   θ ∈ [0, π/2),  u(θ, 0) = cos(θ)^6
//! ```
//!
//! with a symmetry condition at the pole and a no-flux closure at the equator. Each time layer is
//! produced by an elimination sweep (see [`methods::sweep`]), and [`convergence`] repeats the
//! whole march on refined grids.

pub mod convergence;
pub mod driver;
pub mod mesh;
pub mod method;
pub mod methods;
pub mod problem;
pub mod sim;
pub mod solution;

pub use convergence::{
    convergence_by_angle, convergence_by_time, successive_differences, Refinement,
    DEFAULT_TARGET_ANGLE, DEFAULT_TARGET_TIME,
};
pub use driver::{Driver, Logger, ObsCtx, Observer, SimError};
pub use mesh::{Grid, Mesh, MAX_FIELD_SIZE};
pub use method::{Ctx, Method, StepCoefficients};
pub use problem::Parameters;
pub use sim::{Resolution, Simulation};
pub use solution::{Solution, Trace};

pub type Float = f64;

pub const DEFAULT_ANGULAR_SAMPLES: usize = 100;
pub const DEFAULT_TIME_SAMPLES: usize = 400;

/// Marches `cos(θ)^6` forward on an `angular_samples × time_samples` grid and returns the whole
/// space-time field.
pub fn solve(
    params: Parameters,
    angular_samples: usize,
    time_samples: usize,
) -> Result<Solution, SimError> {
    let sim = Simulation::new(params)?
        .with_angular_resolution(Resolution::Steps(angular_samples))?
        .with_time_resolution(Resolution::Steps(time_samples))?;

    Driver::new(sim).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn reference_case_is_finite() {
        let u = solve(Parameters::default(), 6, 6).unwrap();

        assert_eq!(u.shape(), (6, 6));
        assert_eq!(u.angles()[0], 0.0);
        for k in 0..6 {
            for i in 0..6 {
                assert!(u.at(k, i).is_finite());
            }
        }
    }

    #[test]
    fn first_layer_is_initial_condition() {
        let u = solve(Parameters::default(), 17, 9).unwrap();

        for (i, theta) in u.angles().iter().enumerate() {
            assert_abs_diff_eq!(u.at(0, i), theta.cos().powi(6), epsilon = 1e-15);
        }
    }

    #[test]
    fn rejects_degenerate_resolution() {
        assert!(matches!(
            solve(Parameters::default(), 1, 6),
            Err(SimError::InvalidInput { .. })
        ));
        assert!(matches!(
            solve(Parameters::default(), 6, 0),
            Err(SimError::InvalidInput { .. })
        ));
    }

    #[test]
    fn overflowing_coefficients_stop_at_first_layer() {
        // P overflows to infinity, so the pole row cannot be seeded
        let params = Parameters::new(6.0, 1e308, 1.65, 100.0).unwrap();
        assert_eq!(
            solve(params, 6, 6).unwrap_err(),
            SimError::Degenerate {
                layer: 1,
                index: 0,
                denominator: Float::INFINITY
            }
        );
    }

    #[test]
    fn oversized_grids_are_rejected() {
        assert!(matches!(
            solve(Parameters::default(), 1 << 20, 1 << 20),
            Err(SimError::InvalidInput { .. })
        ));
    }

    #[test]
    fn zero_diffusion_keeps_initial_field() {
        let params = Parameters::new(6.0, 0.0, 1.65, 100.0).unwrap();
        let u = solve(params, 12, 8).unwrap();

        for k in 1..8 {
            assert_eq!(u.profile_at(k), u.profile_at(0));
        }
    }
}
