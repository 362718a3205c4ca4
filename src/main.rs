//! Tactical Script - headless scenario runner
//!
//! Loads a scenario TOML file, runs its triggers and missions for a number of
//! ticks and prints a summary.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use tactical_script::core::error::Result;
use tactical_script::world::loader::ScenarioLoader;
use tactical_script::world::PoolSnapshot;

/// Headless scenario runner
#[derive(Parser, Debug)]
#[command(name = "tactical-script")]
#[command(about = "Run a scenario's triggers, missions and reinforcements headless")]
struct Args {
    /// Scenario file (TOML)
    scenario: PathBuf,

    /// Ticks to simulate (15 per second)
    #[arg(long, default_value_t = 900)]
    ticks: u64,

    /// Random seed, overriding the scenario's
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Write an object pool snapshot here when done
    #[arg(long)]
    save: Option<PathBuf>,
}

#[derive(Serialize)]
struct Summary {
    ticks: u64,
    objects: usize,
    fired: Vec<(u64, String)>,
    dispatched: usize,
    notifications: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tactical_script=info")),
        )
        .init();

    let args = Args::parse();

    let mut loader = ScenarioLoader::new();
    if let Some(seed) = args.seed {
        loader = loader.with_seed(seed);
    }
    let mut runner = loader.load_from_file(&args.scenario)?;

    let mut summary = Summary {
        ticks: args.ticks,
        objects: 0,
        fired: Vec::new(),
        dispatched: 0,
        notifications: 0,
    };
    for report in runner.run(args.ticks) {
        summary.dispatched += report.dispatched;
        summary
            .fired
            .extend(report.fired.into_iter().map(|name| (report.tick, name)));
    }
    summary.objects = runner.world.objects.len();
    summary.notifications = runner
        .world
        .houses
        .iter()
        .map(|h| h.notifications.len())
        .sum();

    if let Some(path) = &args.save {
        let json = PoolSnapshot::capture(&runner.world.objects).to_json()?;
        std::fs::write(path, json)?;
        tracing::info!("Snapshot written to {}", path.display());
    }

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("=== {} ===", args.scenario.display());
        println!("Ticks:          {}", summary.ticks);
        println!("Objects:        {}", summary.objects);
        println!("Mission runs:   {}", summary.dispatched);
        println!("Notifications:  {}", summary.notifications);
        for (tick, name) in &summary.fired {
            println!("  tick {:>6}: {}", tick, name);
        }
    }

    Ok(())
}
