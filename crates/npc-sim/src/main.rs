//! npc-sim - run one villager through simulated days under a chosen decision engine.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use npc_sim::{Engine, SimConfig, Simulation};

#[derive(Parser)]
#[command(name = "npc-sim")]
#[command(about = "Headless villager simulation for the npc decision engines", version)]
struct Cli {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Decision engine (overrides the config)
    #[arg(short, long, value_enum)]
    engine: Option<Engine>,

    /// Number of ticks to run
    #[arg(long)]
    ticks: Option<u64>,

    /// Seconds per tick
    #[arg(long)]
    dt: Option<f32>,

    /// Seconds per in-game day
    #[arg(long)]
    day_length: Option<f32>,

    /// Seed for the villager's random draws
    #[arg(long)]
    seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the collected trace events as JSON lines
    #[arg(long)]
    trace: bool,

    /// Print the final behavior tree outline, where there is one
    #[arg(long)]
    outline: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        if let Some(engine) = self.engine {
            config.engine = engine;
        }
        if let Some(ticks) = self.ticks {
            config.ticks = ticks;
        }
        if let Some(dt) = self.dt {
            config.dt = dt;
        }
        if let Some(day_length) = self.day_length {
            config.day_length = day_length;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config()?;
    let mut sim = Simulation::new(config).context("Failed to build simulation")?;
    if cli.trace {
        sim.enable_trace();
    }

    let summary = sim.run()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }

    if cli.outline {
        match sim.brain().outline() {
            Some(outline) => print!("{outline}"),
            None => println!("(no behavior tree)"),
        }
    }

    if cli.trace {
        for event in sim.trace() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    Ok(())
}
