use spherotherm::{solve, Parameters, SimError};
use tracing::info;

// Temperature against time at five evenly spread angles.
fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt::init();

    let params = Parameters::default();
    info!(%params, "solving");
    let solution = solve(params, 100, 400)?;
    let series = solution.angle_snapshots(5);

    print!("t");
    for s in &series {
        print!(",{}", s.label);
    }
    println!();

    for (k, t) in solution.times().iter().enumerate() {
        print!("{t:.2}");
        for s in &series {
            print!(",{:.6}", s.values[k]);
        }
        println!();
    }

    Ok(())
}
