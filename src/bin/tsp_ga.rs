//! Command-line runner: evolve tours on a random map and print the result.
//!
//! Parameters come from an optional TOML file and are overridden by flags.
//! Per-generation progress is logged through `tracing` (set `RUST_LOG` to
//! adjust verbosity).

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tsp_ga::{Engine, FitnessLookup, Survivors, TracingObserver, TspConfig};

#[derive(Debug, Parser)]
#[command(name = "tsp-ga", version, about = "Genetic algorithm for the Euclidean TSP")]
struct Args {
    /// TOML file with run parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of cities
    #[arg(long)]
    cities: Option<usize>,

    /// Population size
    #[arg(long)]
    population: Option<usize>,

    /// Number of generations
    #[arg(long)]
    generations: Option<usize>,

    /// Individuals per tournament round
    #[arg(long)]
    tournament_size: Option<usize>,

    /// Fraction of each tournament that survives
    #[arg(long, conflicts_with = "select_count")]
    select_ratio: Option<f64>,

    /// Number of survivors per tournament
    #[arg(long)]
    select_count: Option<usize>,

    /// Number of elites carried over unchanged
    #[arg(long)]
    elites: Option<usize>,

    /// Crossover probability in percent
    #[arg(long)]
    crossover_prob: Option<u32>,

    /// Mutation probability in percent
    #[arg(long)]
    mutation_prob: Option<u32>,

    /// Upper bound of generated coordinates
    #[arg(long)]
    range: Option<u32>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Map selected costs back to tours by value, like the classic script
    #[arg(long)]
    value_lookup: bool,

    /// Evaluate and breed in parallel (requires the `parallel` feature)
    #[arg(long)]
    parallel: bool,

    /// Log every N-th generation
    #[arg(long, default_value_t = 10)]
    log_every: usize,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> Result<TspConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                TspConfig::from_toml_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => TspConfig::default(),
        };

        if let Some(n) = self.cities {
            config.city_count = n;
        }
        if let Some(n) = self.population {
            config.population_size = n;
        }
        if let Some(n) = self.generations {
            config.generations = n;
        }
        if let Some(k) = self.tournament_size {
            config.tournament_size = k;
        }
        if let Some(r) = self.select_ratio {
            config.survivors = Survivors::Ratio(r);
        }
        if let Some(k) = self.select_count {
            config.survivors = Survivors::Count(k);
        }
        if let Some(n) = self.elites {
            config.elite_count = n;
        }
        if let Some(p) = self.crossover_prob {
            config.crossover_prob = p;
        }
        if let Some(p) = self.mutation_prob {
            config.mutation_prob = p;
        }
        if let Some(r) = self.range {
            config.coordinate_range = r;
        }
        if let Some(s) = self.seed {
            config.seed = Some(s);
        }
        if self.value_lookup {
            config.lookup = FitnessLookup::ByValue;
        }
        if self.parallel {
            config.parallel = true;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let (json, log_every) = (args.json, args.log_every);
    let config = args.into_config()?;

    let mut engine = Engine::with_random_instance(config)?;
    let result = engine.run(&mut TracingObserver::new(log_every))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("seed:        {}", result.seed);
        println!("generations: {}", result.generations);
        println!("best cost:   {:.3}", result.best_cost);
        println!("best tour:   {:?}", result.best_tour);
    }
    Ok(())
}
