use tinyphys::{ScenarioConfig, Scenario, coordinates_to_string};
use tinyphys::{bench_gravity, bench_threaded_curve};

use clap::Parser;
use anyhow::Result;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "three_body.yaml")]
    file_name: String,

    /// Override the scenario's step count
    #[arg(short, long)]
    steps: Option<usize>,

    /// Print coordinates every N steps (0 = only at the end)
    #[arg(short, long, default_value_t = 0)]
    every: usize,

    /// Run the scaling benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    ScenarioConfig::from_path(&config_path)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_threaded_curve(4);
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;
    let steps = args.steps.unwrap_or(scenario.parameters.steps);

    info!("running {} for {} steps", args.file_name, steps);
    for i in 1..=steps {
        scenario.step();
        if args.every > 0 && i % args.every == 0 {
            print!("{}", coordinates_to_string(&scenario.system.coordinates()));
            println!();
        }
    }

    print!("{}", coordinates_to_string(&scenario.system.coordinates()));
    let com = scenario.system.center_of_mass();
    info!("t = {:.4}, center of mass = ({:.4}, {:.4})", scenario.system.t, com.position.x, com.position.y);

    Ok(())
}
