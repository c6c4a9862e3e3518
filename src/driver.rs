use faer_core::Mat;
use thiserror::Error;

use crate::{
    mesh::Mesh,
    method::{Ctx, Method, StepCoefficients},
    problem::{initial_condition, Parameters},
    sim::{Resolution, Simulation},
    solution::Solution,
    Float,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid input: {what} = {value}")]
    InvalidInput { what: &'static str, value: Float },
    #[error("degenerate elimination denominator ({denominator:e}) at layer {layer}, angular index {index}")]
    Degenerate {
        layer: usize,
        index: usize,
        denominator: Float,
    },
    #[error("non-finite temperature at layer {layer}, angular index {index}")]
    NonFinite { layer: usize, index: usize },
    #[error("observer failed: {0}")]
    Observer(String),
}

impl SimError {
    pub(crate) fn invalid(what: &'static str, value: Float) -> Self {
        Self::InvalidInput { what, value }
    }

    pub(crate) fn at_layer(self, n: usize) -> Self {
        match self {
            Self::Degenerate {
                index, denominator, ..
            } => Self::Degenerate {
                layer: n,
                index,
                denominator,
            },
            Self::NonFinite { index, .. } => Self::NonFinite { layer: n, index },
            other => other,
        }
    }
}

pub struct ObsCtx<'ctx> {
    // Meta
    params: &'ctx Parameters,
    mesh: &'ctx Mesh,
    method: &'ctx dyn Method,
    coefficients: StepCoefficients,
    time_sampling: usize,

    // Iteration info
    layer: usize,
    time: Float,
    solution: &'ctx [Float], // current time layer
}

impl<'ctx> ObsCtx<'ctx> {
    pub fn params(&self) -> &Parameters {
        self.params
    }

    pub fn mesh(&self) -> &Mesh {
        self.mesh
    }

    pub fn method(&self) -> &dyn Method {
        self.method
    }

    pub fn coefficients(&self) -> StepCoefficients {
        self.coefficients
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn time(&self) -> Float {
        self.time
    }

    pub fn solution(&self) -> &[Float] {
        self.solution
    }

    pub fn sampling_period(&self) -> usize {
        self.time_sampling
    }
}

#[allow(unused_variables)]
pub trait Observer {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        Ok(())
    }
}

/// Time marcher: advances a [`Simulation`] one layer at a time and keeps every layer.
pub struct Driver<'d, M> {
    pub(crate) sim: Simulation<M>,
    pub(crate) observers: Vec<Box<dyn Observer + 'd>>,
    pub(crate) time_sampling: usize,
}

impl<'d, M: Method> Driver<'d, M> {
    pub fn new(sim: Simulation<M>) -> Self {
        let time_sampling = 1 + sim.mesh.time.samples / 10;
        Self {
            sim,
            observers: Vec::new(),
            time_sampling,
        }
    }

    /// How often `at_each_iteration` fires, either every `n` layers or every `Δt` of physical
    /// time (rounded up to whole layers).
    pub fn with_time_sampling(mut self, sampling_period: Resolution) -> Result<Self, SimError> {
        self.time_sampling = match sampling_period {
            Resolution::Delta(period) if period > 0.0 && period.is_finite() => {
                ((period / self.sim.mesh.time.delta).ceil() as usize).max(1)
            }
            Resolution::Delta(period) => return Err(SimError::invalid("sampling period", period)),
            Resolution::Steps(0) => return Err(SimError::invalid("sampling period", 0.0)),
            Resolution::Steps(period) => period,
        };
        Ok(self)
    }

    pub fn with_observer(mut self, observer: impl Observer + 'd) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn run(&mut self) -> Result<Solution, SimError> {
        let params = self.sim.params;
        let mesh = self.sim.mesh;
        let method = &mut self.sim.method;

        let angles = mesh.angle.to_vec();
        let times = mesh.time.to_vec();
        let coefficients = StepCoefficients::new(&params, &mesh);

        let mut field = Mat::<Float>::zeros(mesh.time.samples, mesh.angle.samples);

        // two layers: u is the last finished one, v receives the next
        let mut u: Vec<Float> = angles.iter().map(|&theta| initial_condition(theta)).collect();
        let mut v = u.clone();

        store_layer(&mut field, 0, &u);

        {
            let ctx = Ctx {
                coefficients,
                angles: &angles,
                layer: 0,
            };

            method.init(ctx);

            for o in self.observers.iter_mut() {
                o.at_startup(ObsCtx {
                    params: &params,
                    mesh: &mesh,
                    method: &*method,
                    coefficients,
                    time_sampling: self.time_sampling,
                    layer: 0,
                    time: times[0],
                    solution: &u,
                })?;
            }
        }

        // propagate solution
        for (n, &t) in times.iter().enumerate().skip(1) {
            let ctx = Ctx {
                coefficients,
                angles: &angles,
                layer: n,
            };

            method.apply(ctx, &u, &mut v)?;

            // never build on top of a broken layer
            if let Some(index) = v.iter().position(|x| !x.is_finite()) {
                return Err(SimError::NonFinite { layer: n, index });
            }

            store_layer(&mut field, n, &v);

            if n % self.time_sampling == 0 {
                for o in self.observers.iter_mut() {
                    o.at_each_iteration(ObsCtx {
                        params: &params,
                        mesh: &mesh,
                        method: &*method,
                        coefficients,
                        time_sampling: self.time_sampling,
                        layer: n,
                        time: t,
                        solution: &v,
                    })?;
                }
            }

            // exchange u and v
            std::mem::swap(&mut u, &mut v);
        }

        let last = mesh.time.samples - 1;
        for o in self.observers.iter_mut() {
            o.at_cleanup(ObsCtx {
                params: &params,
                mesh: &mesh,
                method: &*method,
                coefficients,
                time_sampling: self.time_sampling,
                layer: last,
                time: times[last],
                solution: &u,
            })?;
        }

        Ok(Solution::new(mesh, angles, times, field))
    }
}

fn store_layer(field: &mut Mat<Float>, n: usize, layer: &[Float]) {
    for (i, &x) in layer.iter().enumerate() {
        field.write(n, i, x);
    }
}

pub struct Logger;

impl Observer for Logger {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        tracing::event!(
            tracing::Level::INFO,
            "start of march ({}) with `{}` method, Δθ={:e} ({} samples), Δt={:e} ({} samples), P={:e}, Q={:e}",
            ctx.params(),
            ctx.method().name(),
            ctx.mesh().angle.delta,
            ctx.mesh().angle.samples,
            ctx.mesh().time.delta,
            ctx.mesh().time.samples,
            ctx.coefficients().p,
            ctx.coefficients().q,
        );
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        tracing::event!(
            tracing::Level::TRACE,
            "layer {} (t={}): u(0)={:e}",
            ctx.layer(),
            ctx.time(),
            ctx.solution()[0]
        );
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        tracing::event!(
            tracing::Level::INFO,
            "finished march at layer {} (t={})",
            ctx.layer(),
            ctx.time()
        );
        Ok(())
    }
}
