use magfield::{ScenarioConfig, Scenario};
use magfield::{bench_kernel, bench_kernel_curve};

use clap::Parser;
use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Apply a pseudo-magnetic displacement field to an object point cloud")]
struct Args {
    /// Scenario file under the crate's scenarios/ directory
    #[arg(short, default_value = "attract.yaml")]
    file_name: String,

    /// Override the number of frames in the scenario
    #[arg(long)]
    frames: Option<usize>,

    /// Run the kernel benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,

    /// Print the benchmark as a CSV curve
    #[arg(long, requires = "bench")]
    curve: bool,

    /// Enable debug logging (kernel timings)
    #[arg(short, long)]
    verbose: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    if args.bench {
        if args.curve {
            bench_kernel_curve();
        } else {
            bench_kernel();
        }
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(frames) = args.frames {
        scenario_cfg.frames = frames;
    }

    let mut scenario = Scenario::build_scenario(scenario_cfg)?;
    let reports = scenario.run()?;

    if let Some(last) = reports.last() {
        info!(
            frames = reports.len(),
            center = ?last.center.as_slice(),
            offset = ?last.offset.as_slice(),
            "scenario finished"
        );
    }

    Ok(())
}
