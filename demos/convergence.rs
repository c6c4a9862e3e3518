use spherotherm::{
    convergence_by_angle, convergence_by_time, successive_differences, Parameters, SimError,
    Trace, DEFAULT_TARGET_ANGLE, DEFAULT_TARGET_TIME,
};
use tracing::info;

fn report(title: &str, traces: &[Trace]) -> Result<(), SimError> {
    println!("{title}");
    for t in traces {
        println!(
            "  {:<14} index {:>4} at {:.4}, {} samples",
            t.label,
            t.index,
            t.coordinate,
            t.values.len()
        );
    }
    for (pair, d) in traces
        .windows(2)
        .zip(successive_differences(traces)?)
    {
        println!("  max |{} - {}| = {d:.3e}", pair[0].label, pair[1].label);
    }
    Ok(())
}

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt::init();

    let params = Parameters::default();

    info!("fixed time t = {DEFAULT_TARGET_TIME}");
    let profiles = convergence_by_time(params, DEFAULT_TARGET_TIME)?;
    report(&format!("u(θ, t = {DEFAULT_TARGET_TIME})"), &profiles)?;

    info!("fixed angle θ = {DEFAULT_TARGET_ANGLE}");
    let series = convergence_by_angle(params, DEFAULT_TARGET_ANGLE)?;
    report(&format!("u(θ = {DEFAULT_TARGET_ANGLE}, t)"), &series)?;

    Ok(())
}
