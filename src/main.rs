use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use toroid_lib::app::{HeadlessRunner, InfectEvent, InputScript, PauseWindow, PokeEvent};
use toroid_lib::model::config::SimConfig;
use toroid_lib::model::metrics::init_logging;
use toroid_lib::model::state::Dimensionality;
use toroid_lib::model::Simulation;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Lattice side length (overrides config)
    #[arg(long)]
    side: Option<u32>,

    /// Lattice dimensionality: 2, 3 or 4 (overrides config)
    #[arg(long, value_parser = parse_dims)]
    dims: Option<Dimensionality>,

    /// RNG seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 300)]
    ticks: u64,

    /// Pace frames with the configured timestep instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Height perturbation, `x,y[,z[,w]]@frame[:delta]`
    #[arg(long, value_name = "POKE")]
    poke: Vec<PokeEvent>,

    /// Seed an infection, `x,y[,z[,w]]@frame`
    #[arg(long, value_name = "INFECTION")]
    infect: Vec<InfectEvent>,

    /// Freeze frames `from..to`
    #[arg(long, value_name = "WINDOW")]
    pause: Vec<PauseWindow>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn parse_dims(s: &str) -> Result<Dimensionality, String> {
    let n: u8 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    Dimensionality::try_from(n)
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = SimConfig::load(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    if let Some(side) = args.side {
        config.grid.side = side;
    }
    if let Some(dims) = args.dims {
        config.grid.dimensionality = dims;
    }
    if args.seed.is_some() {
        config.run.seed = args.seed;
    }
    config.validate()?;

    if args.print_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let sim = Simulation::new(config).context("Failed to build simulation")?;
    let script = InputScript {
        pokes: args.poke,
        infections: args.infect,
        pauses: args.pause,
    };
    let mut runner = HeadlessRunner::new(sim, script)?;

    if args.realtime {
        runner.run_realtime(args.ticks)?;
    } else {
        runner.run(args.ticks)?;
    }

    let report = runner.report();
    tracing::info!(
        frames = report.frames,
        ticks = report.ticks,
        infected = report.summary.infected_cells,
        "Run finished"
    );
    println!("{}", report.to_json()?);
    Ok(())
}
