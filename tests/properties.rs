use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use spherotherm::{
    convergence::{convergence_by_angle_with, convergence_by_time_with, DEFAULT_TARGET_TIME},
    convergence_by_angle, convergence_by_time,
    methods::sweep,
    solve, successive_differences, Parameters, Refinement, SimError, StepCoefficients,
};

fn strictly_decreasing(xs: &[f64]) -> bool {
    xs.windows(2).all(|w| w[1] < w[0])
}

#[test]
fn shapes_match_requested_resolution() {
    for (i, k) in [(2, 1), (6, 6), (17, 3), (40, 25)] {
        let u = solve(Parameters::default(), i, k).unwrap();
        assert_eq!(u.shape(), (k, i));
        assert_eq!(u.angles().len(), i);
        assert_eq!(u.times().len(), k);
    }
}

#[test]
fn invalid_input_produces_no_array() {
    let p = Parameters::default();
    for (i, k) in [(1, 6), (0, 6), (6, 0)] {
        let err = solve(p, i, k).unwrap_err();
        assert!(matches!(err, SimError::InvalidInput { .. }), "{err}");
    }
    assert!(Parameters::new(-6.0, 0.59, 1.65, 100.0).is_err());
    assert!(Parameters::new(6.0, 0.59, 1.65, 0.0).is_err());
}

#[test]
fn heat_spreads_from_the_pole() {
    let u = solve(Parameters::default(), 48, 384).unwrap();
    let last = u.profile_at(383);

    // the pole cools, the equator warms, and the profile stays monotone in θ
    assert!(last[0] < 1.0);
    assert!(last[47] > u.at(0, 47));
    assert!(last.windows(2).all(|w| w[1] <= w[0]));
    // the scheme never overshoots the initial range
    assert!(last.iter().all(|&x| (0.0..=1.0).contains(&x)));
}

#[test]
fn each_layer_is_one_sweep_of_the_previous() {
    let params = Parameters::default();
    let u = solve(params, 24, 20).unwrap();
    let h_theta = u.mesh().angle().delta();
    let h_t = u.mesh().time().delta();
    let c = StepCoefficients::from_steps(&params, h_theta, h_t);

    for k in 1..20 {
        let next = sweep(&u.profile_at(k - 1), u.angles(), c).unwrap();
        assert_eq!(next, u.profile_at(k));
    }
}

#[test]
fn fixed_time_profiles_converge() {
    // 48 is a multiple of every time step on the ladder, so all rungs sample the same instant
    let params = Parameters::new(6.0, 0.59, 1.65, 96.0).unwrap();
    let traces = convergence_by_time_with(params, Refinement::new(6, 6, 64), 48.0).unwrap();

    assert_eq!(traces.len(), 5);
    for t in &traces {
        assert_abs_diff_eq!(t.coordinate, 48.0, epsilon = 1e-9);
    }
    let diffs = successive_differences(&traces).unwrap();
    assert_eq!(diffs.len(), 4);
    assert!(strictly_decreasing(&diffs), "{diffs:?}");
}

#[test]
fn reference_convergence_study() {
    let traces = convergence_by_time(Parameters::default(), DEFAULT_TARGET_TIME).unwrap();

    let sizes: Vec<_> = traces.iter().map(|t| t.values.len()).collect();
    assert_eq!(sizes, [6, 12, 24, 48]);
    for t in &traces {
        assert_eq!(t.abscissa.len(), t.values.len());
        assert!(t.values.iter().all(|x| x.is_finite()));
    }

    let diffs = successive_differences(&traces).unwrap();
    assert!(strictly_decreasing(&diffs), "{diffs:?}");
}

#[test]
fn fixed_angle_traces_converge() {
    // π/8 lies on every angular grid from I = 12 on
    let params = Parameters::new(6.0, 0.59, 1.65, 96.0).unwrap();
    let traces = convergence_by_angle_with(params, Refinement::new(12, 24, 64), PI / 8.0).unwrap();

    assert_eq!(traces.len(), 4);
    for t in &traces {
        assert_abs_diff_eq!(t.coordinate, PI / 8.0, epsilon = 1e-12);
        assert_eq!(t.abscissa.len(), t.values.len());
    }
    let diffs = successive_differences(&traces).unwrap();
    assert!(strictly_decreasing(&diffs), "{diffs:?}");
}

#[test]
fn fixed_angle_study_rounds_per_rung() {
    let traces = convergence_by_angle(Parameters::default(), 0.38).unwrap();

    let indices: Vec<_> = traces.iter().map(|t| t.index).collect();
    assert_eq!(indices, [1, 3, 6, 12]);
    let lengths: Vec<_> = traces.iter().map(|t| t.values.len()).collect();
    assert_eq!(lengths, [6, 24, 96, 384]);
}

#[test]
fn targets_outside_the_grid_fail() {
    assert!(matches!(
        convergence_by_time(Parameters::default(), 250.0),
        Err(SimError::InvalidInput { .. })
    ));
    assert!(matches!(
        convergence_by_angle(Parameters::default(), 2.0),
        Err(SimError::InvalidInput { .. })
    ));
}
