use crate::{
    driver::SimError,
    method::{Ctx, Method, StepCoefficients},
    Float,
};

fn checked(denominator: Float, index: usize) -> Result<Float, SimError> {
    if denominator == 0.0 || !denominator.is_finite() {
        Err(SimError::Degenerate {
            layer: 0,
            index,
            denominator,
        })
    } else {
        Ok(denominator)
    }
}

/// Advances `u` by one implicit step into `v`, using `p` and `q` as scratch space for the
/// transfer coefficients (`u_i = p_i u_{i+1} + q_i`).
///
/// The pole row comes from the symmetric ghost point `u_{-1} = u_1`, where
/// `cot(θ) u_θ -> u_θθ` doubles the Laplacian (hence the factor 4). The last row is the no-flux
/// closure `u_I = u_{I-2}` at the equator, where `cot(θ)` vanishes.
///
/// Errors carry layer 0; the caller knows which layer it is producing.
pub(crate) fn eliminate(
    u: &[Float],
    angles: &[Float],
    c: StepCoefficients,
    p: &mut [Float],
    q: &mut [Float],
    v: &mut [Float],
) -> Result<(), SimError> {
    let n = u.len();
    if n < 2 {
        return Err(SimError::invalid("layer length", n as Float));
    }
    if angles.len() != n || v.len() != n || p.len() < n - 1 || q.len() < n - 1 {
        return Err(SimError::invalid("angular grid length", angles.len() as Float));
    }
    let StepCoefficients { p: pp, q: qq } = c;

    // pole
    let d = checked(1.0 + 4.0 * pp, 0)?;
    p[0] = 4.0 * pp / d;
    q[0] = u[0] / d;

    // forward sweep
    for i in 1..n - 1 {
        let qc = qq / angles[i].tan();
        let d = checked(1.0 + 2.0 * pp + qc * p[i - 1] - pp * p[i - 1], i)?;
        p[i] = (qc + pp) / d;
        q[i] = (u[i] - qc * q[i - 1] + pp * q[i - 1]) / d;
    }

    // equator
    let d = checked(1.0 + 2.0 * pp - 2.0 * pp * p[n - 2], n - 1)?;
    v[n - 1] = (u[n - 1] + 2.0 * pp * q[n - 2]) / d;

    // back substitution
    for i in (0..n - 1).rev() {
        v[i] = p[i] * v[i + 1] + q[i];
    }

    match v.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(SimError::NonFinite { layer: 0, index }),
        None => Ok(()),
    }
}

/// One implicit time step of the spherical heat equation on `angles`, as a pure function.
pub fn sweep(u: &[Float], angles: &[Float], c: StepCoefficients) -> Result<Vec<Float>, SimError> {
    let size = u.len().saturating_sub(1);
    let (mut p, mut q) = (vec![0.0; size], vec![0.0; size]);
    let mut v = vec![0.0; u.len()];
    eliminate(u, angles, c, &mut p, &mut q, &mut v)?;
    Ok(v)
}

/// Backward-Euler stepping solved by the elimination sweep; keeps its p/q buffers between layers
/// to avoid reallocating them.
#[derive(Debug, Clone, Default)]
pub struct ImplicitSweep {
    p: Vec<Float>,
    q: Vec<Float>,
}

impl Method for ImplicitSweep {
    fn init(&mut self, ctx: Ctx) {
        let size = ctx.angles.len().saturating_sub(1);
        self.p.resize(size, 0.0);
        self.q.resize(size, 0.0);
    }

    fn apply(&mut self, ctx: Ctx, u: &[Float], v: &mut [Float]) -> Result<(), SimError> {
        eliminate(u, ctx.angles, ctx.coefficients, &mut self.p, &mut self.q, v)
            .map_err(|e| e.at_layer(ctx.layer))
    }

    fn name(&self) -> &'static str {
        "Implicit elimination sweep"
    }
}
