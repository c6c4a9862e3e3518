use std::sync::OnceLock;

use spherotherm::{methods::sweep, solve, Mesh, Parameters, StepCoefficients};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

static SETUP: OnceLock<(Vec<f64>, Vec<f64>, StepCoefficients)> = OnceLock::new();

fn setup() -> &'static (Vec<f64>, Vec<f64>, StepCoefficients) {
    SETUP.get_or_init(|| {
        let params = Parameters::default();
        let mesh = Mesh::new(&params, 100, 400).expect("valid mesh");
        let angles = mesh.angle().to_vec();
        let u = angles.iter().map(|t| t.cos().powi(6)).collect();
        (u, angles, StepCoefficients::new(&params, &mesh))
    })
}

fn benchmark_sweep(c: &mut Criterion) {
    let (u, angles, coefficients) = setup();
    c.bench_function("sweep_100", |b| {
        b.iter(|| sweep(black_box(u), black_box(angles), *coefficients))
    });
}

fn benchmark_solve(c: &mut Criterion) {
    c.bench_function("solve_100x400", |b| {
        b.iter(|| solve(black_box(Parameters::default()), 100, 400))
    });
}

criterion_group!(benches, benchmark_sweep, benchmark_solve);
criterion_main!(benches);
