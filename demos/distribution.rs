use spherotherm::{Driver, Logger, Parameters, Resolution, SimError, Simulation};
use tracing::info;

// Temperature against θ at five evenly spread instants.
fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt::init();

    let sim = Simulation::new(Parameters::default())?
        .with_angular_resolution(Resolution::Steps(100))?
        .with_time_resolution(Resolution::Steps(400))?;

    info!("{sim}");

    let solution = Driver::new(sim).with_observer(Logger).run()?;
    let snapshots = solution.time_snapshots(5);

    print!("theta");
    for s in &snapshots {
        print!(",{}", s.label);
    }
    println!();

    for (i, theta) in solution.angles().iter().enumerate() {
        print!("{theta:.4}");
        for s in &snapshots {
            print!(",{:.6}", s.values[i]);
        }
        println!();
    }

    Ok(())
}
