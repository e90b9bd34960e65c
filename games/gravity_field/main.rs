use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gravfield::engine::{config::SimulationConfig, App, TickMode};

use crate::gravity_field_game::{GravityFieldGame, SceneSource};

pub mod gravity_field_game;

#[derive(Parser, Debug)]
#[command(about = "Headless run of the gravity vector field demo")]
struct Args {
    /// Scenario YAML file, the built-in two body demo when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Replace the scenario bodies with a random cluster of this size
    #[arg(long)]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Use measured wall clock frame times instead of the fixed dt
    #[arg(long)]
    realtime: bool,

    /// Integrate on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Log stats every N frames
    #[arg(long, default_value_t = 60)]
    stats_every: u64,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    match &args.scenario {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display())),
        None => Ok(SimulationConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    log::debug!("{:?}", config);

    let source = match args.random {
        Some(count) => SceneSource::RandomCluster {
            count,
            seed: args.seed,
        },
        None => SceneSource::Scenario,
    };

    let game = GravityFieldGame::new(source)
        .with_parallel(args.parallel)
        .with_stats_every(args.stats_every);

    let mode = if args.realtime {
        TickMode::Realtime
    } else {
        TickMode::Fixed(config.integration.dt)
    };

    let game = App::new(game)?
        .with_config(config)?
        .with_mode(mode)
        .run(args.frames)?;

    log::info!("{} bodies simulated", game.scene().bodies.len());
    Ok(())
}
