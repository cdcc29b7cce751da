use emsim::run_3d;
use emsim::{bench_dipole, bench_forces};
use emsim::{Scenario, ScenarioConfig};

use anyhow::Result;
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "motor.yaml")]
    file_name: String,

    /// Run without the viewer until t_end and print a state summary
    #[arg(long)]
    headless: bool,

    /// Run the wall-clock benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn print_summary(scenario: &Scenario) {
    let world = &scenario.world;
    println!("t = {:.3}", world.t);

    for (i, magnet) in world.magnets.iter().enumerate() {
        let euler = magnet.rotation_euler_deg();
        let apparent = magnet.apparent_field();
        println!(
            "magnet {}: rotation = ({:8.2}, {:8.2}, {:8.2}) deg, stable displacement = {:7.2} deg, apparent field = ({:.3}, {:.3}, {:.3})",
            i, euler.x, euler.y, euler.z,
            magnet.stable_displacement(),
            apparent.x, apparent.y, apparent.z,
        );
    }

    for (si, binding) in world.stators.iter().enumerate() {
        if let Some(magnet) = world.magnets.get(binding.magnet) {
            println!(
                "stator {}: poles = {}, phase = {:7.2} deg, active pole = {}",
                si,
                binding.controller.poles(),
                binding.controller.phase_deg(magnet),
                binding.controller.active_pole(magnet),
            );
        }
    }

    for (handle, charged) in world.registry.iter_active() {
        println!(
            "body {}: x = ({:9.4}, {:9.4}, {:9.4}), v = ({:9.4}, {:9.4}, {:9.4})",
            handle.index(),
            charged.body.x.x, charged.body.x.y, charged.body.x.z,
            charged.body.v.x, charged.body.v.y, charged.body.v.z,
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_forces();
        bench_dipole();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.headless {
        scenario.world.run_to_end();
        print_summary(&scenario);
        return Ok(());
    }

    run_3d(scenario);

    Ok(())
}
