//! Hawkdove CLI - spatial Hawk-Dove sweeps.
//!
//! Single binary that provides:
//! - `hawkdove init` - write a default experiment config
//! - `hawkdove sweep` - run a β sweep and summarize it
//! - `hawkdove grid` - print the lattice of one run at a generation

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use hawkdove_core::{
    grid::strategy_name, run_single, run_sweep, BetaSummary, ExperimentConfig, Neighborhood,
    SweepReport,
};

#[derive(Parser)]
#[command(name = "hawkdove")]
#[command(about = "Spatial Hawk-Dove imitation dynamics", version)]
struct Cli {
    /// Experiment config (YAML); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default experiment config
    Init {
        /// Destination file
        #[arg(long, default_value = "hawkdove.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Run a β sweep and print the occupation summary
    Sweep {
        #[command(flatten)]
        overrides: Overrides,

        /// Write the JSON report here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include per-generation fraction tables in the report
        #[arg(long)]
        tables: bool,
    },

    /// Print the lattice of a single β run
    Grid {
        #[command(flatten)]
        overrides: Overrides,

        /// Generation to print (defaults to the last one)
        #[arg(long)]
        generation: Option<usize>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NeighborhoodArg {
    Moore,
    VonNeumann,
}

impl From<NeighborhoodArg> for Neighborhood {
    fn from(arg: NeighborhoodArg) -> Self {
        match arg {
            NeighborhoodArg::Moore => Neighborhood::Moore,
            NeighborhoodArg::VonNeumann => Neighborhood::VonNeumann,
        }
    }
}

/// Command line settings layered over the config file.
#[derive(clap::Args)]
struct Overrides {
    /// β values (repeatable)
    #[arg(short, long = "beta")]
    betas: Vec<f64>,

    /// Square lattice side
    #[arg(long)]
    size: Option<u32>,

    #[arg(long)]
    generations: Option<u32>,

    /// Trailing generations averaged into the summary
    #[arg(long)]
    window: Option<usize>,

    #[arg(long)]
    strategies: Option<usize>,

    #[arg(long)]
    neighborhood: Option<NeighborhoodArg>,

    /// Reshuffle after every generation
    #[arg(long)]
    shuffle: bool,

    #[arg(long)]
    seed: Option<u64>,
}

impl Overrides {
    fn apply(&self, config: &mut ExperimentConfig) {
        if !self.betas.is_empty() {
            config.betas = self.betas.clone();
        }
        if let Some(size) = self.size {
            config.width = size;
            config.height = size;
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(window) = self.window {
            config.window = window;
        }
        if let Some(strategies) = self.strategies {
            config.strategies = strategies;
        }
        if let Some(neighborhood) = self.neighborhood {
            config.neighborhood = neighborhood.into();
        }
        if self.shuffle {
            config.shuffle = true;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Init { path, force } => init_config(&path, force),
        Commands::Sweep {
            overrides,
            output,
            tables,
        } => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            sweep(&config, output.as_deref(), tables)
        }
        Commands::Grid {
            overrides,
            generation,
        } => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            show_grid(&config, generation)
        }
    }
}

fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<ExperimentConfig> {
    let mut config = ExperimentConfig::load_or_default(path)?;
    overrides.apply(&mut config);
    Ok(config)
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    ExperimentConfig::default().save(path)?;
    tracing::info!(path = %path.display(), "Wrote default config");
    Ok(())
}

fn sweep(config: &ExperimentConfig, output: Option<&Path>, tables: bool) -> Result<()> {
    let sweep_config = config.to_sweep_config()?;
    let result = run_sweep(&sweep_config)?;
    let mut report = SweepReport::new(&sweep_config, &result, config.window)?;

    print_summary(&report.summaries, config.strategies);

    if let Some(path) = output {
        if tables {
            report = report.with_tables(&result)?;
        }
        report.write(path)?;
        tracing::info!(path = %path.display(), "Wrote report");
    }
    Ok(())
}

fn print_summary(summaries: &[BetaSummary], strategies: usize) {
    let mut header = format!("{:>8}", "beta");
    for s in 0..strategies {
        header.push_str(&format!(" {:>11}", strategy_name(s as u8)));
    }
    header.push_str(&format!(" {:>11} {:>11}", "mean-field", "deviation"));
    println!("{header}");

    for summary in summaries {
        let mut line = format!("{:>8.3}", summary.beta);
        for fraction in &summary.mean_fractions {
            line.push_str(&format!(" {:>11.4}", fraction));
        }
        line.push_str(&format!(
            " {:>11.4} {:>+11.4}",
            summary.mean_field_hawk,
            summary.spatial_deviation()
        ));
        println!("{line}");
    }
}

fn show_grid(config: &ExperimentConfig, generation: Option<usize>) -> Result<()> {
    let sweep_config = config.to_sweep_config()?;
    if sweep_config.betas.len() != 1 {
        bail!(
            "grid needs exactly one beta, got {} (pass --beta)",
            sweep_config.betas.len()
        );
    }

    let beta = sweep_config.betas[0];
    let run = run_single(&sweep_config, 0, beta)?;
    let generation = generation.unwrap_or(run.generations());
    let Some(grid) = run.generation(generation) else {
        bail!(
            "generation {generation} out of range, run has 0..={}",
            run.generations()
        );
    };

    println!("beta {beta}, generation {generation}, counts {:?}", grid.counts());
    print!("{}", grid.render());
    Ok(())
}
