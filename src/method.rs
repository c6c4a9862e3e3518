use crate::{driver::SimError, mesh::Mesh, problem::Parameters, Float};

/// Per-resolution coupling strengths of the implicit scheme.
///
/// `p` multiplies the second difference and `q` the centred first difference of the
/// `cot(θ) u_θ` term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepCoefficients {
    pub p: Float,
    pub q: Float,
}

impl StepCoefficients {
    pub fn new(params: &Parameters, mesh: &Mesh) -> Self {
        Self::from_steps(params, mesh.angle.delta, mesh.time.delta)
    }

    // P = κ h_t / (R² c h_θ²),  Q = κ h_t / (R² c 2 h_θ)
    pub fn from_steps(params: &Parameters, angle_step: Float, time_step: Float) -> Self {
        let scale = params.radius * params.radius * params.heat_capacity;
        Self {
            p: params.conductivity * time_step / (scale * angle_step * angle_step),
            q: params.conductivity * time_step / (scale * 2.0 * angle_step),
        }
    }
}

/// What a method sees while producing one time layer.
#[derive(Debug, Clone, Copy)]
pub struct Ctx<'a> {
    pub coefficients: StepCoefficients,
    pub angles: &'a [Float],
    /// index of the layer being produced
    pub layer: usize,
}

pub trait Method {
    fn init(&mut self, ctx: Ctx);
    fn apply(&mut self, ctx: Ctx, u: &[Float], v: &mut [Float]) -> Result<(), SimError>;
    fn name(&self) -> &'static str;
}
