//! Wildgrid - headless simulation runner
//!
//! Loads a configuration, runs a fixed number of ticks and prints a
//! population summary (text or JSON).

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use wildgrid::core::config::SimulationConfig;
use wildgrid::core::error::Result;
use wildgrid::ecs::world::World;
use wildgrid::simulation::stats::PopulationStats;

#[derive(Parser, Debug)]
#[command(name = "wildgrid")]
#[command(about = "Run the creature behavior simulation headless")]
struct Args {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the world seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Seconds per tick, overriding the configured default
    #[arg(long)]
    dt: Option<f32>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    elapsed: f32,
    stats: PopulationStats,
}

/// Load the configuration and apply command-line overrides, then validate
fn resolve_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(dt) = args.dt {
        config.world.dt = dt;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wildgrid=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = resolve_config(&args)?;
    let dt = config.world.dt;
    let seed = config.world.seed;

    let mut world = World::new(config)?;
    tracing::info!(seed, ticks = args.ticks, dt, "starting run");

    for _ in 0..args.ticks {
        world.update(dt);
        if world.stats().total_population() == 0 {
            tracing::info!(tick = world.current_tick, "population extinct");
            break;
        }
    }

    let summary = RunSummary {
        seed,
        ticks: world.current_tick,
        elapsed: world.elapsed,
        stats: world.stats().clone(),
    };
    tracing::info!(
        births = summary.stats.births,
        deaths = summary.stats.deaths(),
        "run finished"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let stats = &summary.stats;
    println!("=== WILDGRID ===");
    println!("seed {}  ticks {}  elapsed {:.1}s", summary.seed, summary.ticks, summary.elapsed);
    println!();
    println!("Population:");
    for (species, count) in &stats.population {
        println!("  {:<8} {}", format!("{:?}", species), count);
    }
    println!();
    println!("Births: {}", stats.births);
    println!("Deaths: {}", stats.deaths());
    println!("  hunger    {}", stats.deaths_by_hunger);
    println!("  thirst    {}", stats.deaths_by_thirst);
    println!("  age       {}", stats.deaths_by_age);
    println!("  predation {}", stats.deaths_by_predation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildgrid::core::error::SimError;

    #[test]
    fn test_overrides_applied() {
        let args = Args::parse_from(["wildgrid", "--seed", "5", "--dt", "0.25"]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.world.seed, 5);
        assert_eq!(config.world.dt, 0.25);
    }

    #[test]
    fn test_non_positive_dt_rejected() {
        for dt in ["--dt=-1", "--dt=0"] {
            let args = Args::parse_from(["wildgrid", dt]);
            assert!(matches!(resolve_config(&args), Err(SimError::InvalidConfig(_))));
        }
    }
}
