//! β sweeps: one independent simulation run per cost/value ratio.
//!
//! Runs share no mutable state, so they are fanned out over rayon when
//! `parallel` is set; results always come back in β input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::fitness::FitnessField;
use crate::grid::{Grid, GridDims, Strategy};
use crate::init::initial_grid;
use crate::neighborhood::{NeighborTable, Neighborhood};
use crate::payoff::{Game, PayoffMatrix};
use crate::rng::{derive_seed, SplitMix64, Stream};
use crate::shuffle::{ShuffleSeeding, Shuffler};
use crate::stats::{occupation_fractions, summarize, BetaSummary, OccupationTable};
use crate::update::{UpdateRule, DEFAULT_TIE_TOLERANCE};

/// How the generation-0 lattice is seeded across the runs of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitSeeding {
    /// Every β starts from the same lattice.
    #[default]
    Shared,
    /// Each run index gets its own lattice.
    PerRun,
}

impl InitSeeding {
    pub fn seed_for_run(self, seed: u64, run_index: usize) -> u64 {
        let id = match self {
            Self::Shared => 0,
            Self::PerRun => run_index as u64,
        };
        derive_seed(seed, id, Stream::InitialGrid)
    }
}

/// Everything needed to reproduce a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub dims: GridDims,
    pub game: Game,
    pub neighborhood: Neighborhood,
    pub betas: Vec<f64>,
    pub generations: u32,
    pub shuffle: bool,
    pub seed: u64,
    pub shuffle_seed: u64,
    pub init_seeding: InitSeeding,
    pub shuffle_seeding: ShuffleSeeding,
    pub tie_tolerance: f64,
    pub self_interaction: bool,
    pub parallel: bool,
}

impl SweepConfig {
    pub fn new(dims: GridDims, game: Game, betas: Vec<f64>, generations: u32) -> Self {
        Self {
            dims,
            game,
            neighborhood: Neighborhood::Moore,
            betas,
            generations,
            shuffle: false,
            seed: 0,
            shuffle_seed: 0,
            init_seeding: InitSeeding::Shared,
            shuffle_seeding: ShuffleSeeding::PerGeneration,
            tie_tolerance: DEFAULT_TIE_TOLERANCE,
            self_interaction: false,
            parallel: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        GridDims::new(self.dims.width, self.dims.height)?;
        if self.betas.is_empty() {
            return Err(EngineError::EmptyBetaList);
        }
        Ok(())
    }
}

/// One generation stepper over a double buffer.
///
/// The current grid is the frozen snapshot; fitness is computed from it in
/// full, then the update writes into the spare buffer. The two buffers swap
/// roles every step.
#[derive(Debug, Clone)]
pub struct Simulation {
    table: NeighborTable,
    payoff: PayoffMatrix,
    rule: UpdateRule,
    self_interaction: bool,
    rng: SplitMix64,
    shuffler: Option<Shuffler>,
    current: Grid,
    generation: u32,
    fitness: FitnessField,
    spare: Vec<Strategy>,
}

impl Simulation {
    pub fn new(
        initial: Grid,
        payoff: PayoffMatrix,
        neighborhood: Neighborhood,
        tie_break_seed: u64,
    ) -> Result<Self> {
        let table = NeighborTable::new(neighborhood, initial.dims());
        let fitness = FitnessField::compute(&initial, &payoff, &table)?;
        Ok(Self {
            table,
            payoff,
            rule: UpdateRule::default(),
            self_interaction: false,
            rng: SplitMix64::new(tie_break_seed),
            shuffler: None,
            spare: Vec::with_capacity(initial.len()),
            current: initial,
            generation: 0,
            fitness,
        })
    }

    pub fn with_rule(mut self, rule: UpdateRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_self_interaction(mut self, enabled: bool) -> Self {
        self.self_interaction = enabled;
        self
    }

    pub fn with_shuffler(mut self, shuffler: Shuffler) -> Self {
        self.shuffler = Some(shuffler);
        self
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Advances one generation and returns the new snapshot.
    pub fn step(&mut self) -> Result<&Grid> {
        self.fitness.recompute(
            &self.current,
            &self.payoff,
            &self.table,
            self.self_interaction,
        )?;
        self.rule.apply_into(
            &self.current,
            &self.fitness,
            &self.table,
            &mut self.rng,
            &mut self.spare,
        )?;

        self.generation += 1;
        let cells = std::mem::take(&mut self.spare);
        let mut next =
            Grid::from_parts_unchecked(self.current.dims(), self.current.strategies(), cells);
        if let Some(shuffler) = self.shuffler.as_mut() {
            next = shuffler.apply(&next, self.generation);
        }

        let previous = std::mem::replace(&mut self.current, next);
        self.spare = previous.into_cells();
        Ok(&self.current)
    }
}

/// Grid history of one β, generation 0 first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub beta: f64,
    pub run_index: usize,
    pub neighborhood: Neighborhood,
    pub shuffled: bool,
    history: Vec<Grid>,
}

impl SimulationRun {
    pub fn history(&self) -> &[Grid] {
        &self.history
    }

    pub fn initial(&self) -> &Grid {
        &self.history[0]
    }

    pub fn last(&self) -> &Grid {
        &self.history[self.history.len() - 1]
    }

    /// Generation `g`, where 0 is the initial lattice.
    pub fn generation(&self, g: usize) -> Option<&Grid> {
        self.history.get(g)
    }

    /// Number of update steps performed.
    pub fn generations(&self) -> usize {
        self.history.len() - 1
    }
}

/// All runs of a sweep, in β input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    runs: Vec<SimulationRun>,
}

impl SweepResult {
    pub fn runs(&self) -> &[SimulationRun] {
        &self.runs
    }

    /// First run whose β equals `beta`.
    pub fn get(&self, beta: f64) -> Option<&SimulationRun> {
        self.runs.iter().find(|run| run.beta == beta)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Fraction tables over the last `window` generations of every run.
    pub fn occupation(&self, window: usize) -> Result<Vec<OccupationTable>> {
        self.runs
            .iter()
            .map(|run| occupation_fractions(run, window))
            .collect()
    }

    pub fn summary(&self, window: usize) -> Result<Vec<BetaSummary>> {
        summarize(self, window)
    }
}

/// Runs one β of a sweep.
pub fn run_single(config: &SweepConfig, run_index: usize, beta: f64) -> Result<SimulationRun> {
    GridDims::new(config.dims.width, config.dims.height)?;
    let start = std::time::Instant::now();
    let strategies = config.game.strategies();

    let initial = initial_grid(
        config.dims,
        strategies,
        config.init_seeding.seed_for_run(config.seed, run_index),
    )?;
    let tie_break_seed = derive_seed(config.seed, run_index as u64, Stream::TieBreak);

    let mut sim = Simulation::new(
        initial,
        config.game.payoff(beta),
        config.neighborhood,
        tie_break_seed,
    )?
    .with_rule(UpdateRule::new(config.tie_tolerance))
    .with_self_interaction(config.self_interaction);
    if config.shuffle {
        sim = sim.with_shuffler(Shuffler::new(
            config.shuffle_seeding,
            config.shuffle_seed,
            run_index,
        ));
    }

    let mut history = Vec::with_capacity(config.generations as usize + 1);
    history.push(sim.current().clone());
    for generation in 1..=config.generations {
        let grid = sim.step()?;
        tracing::debug!(
            beta,
            generation,
            counts = ?grid.counts(),
            "Generation complete"
        );
        history.push(grid.clone());
    }

    tracing::info!(
        beta,
        run_index,
        generations = config.generations,
        final_counts = ?history[history.len() - 1].counts(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Run complete"
    );

    Ok(SimulationRun {
        beta,
        run_index,
        neighborhood: config.neighborhood,
        shuffled: config.shuffle,
        history,
    })
}

/// Runs every β in `config.betas`.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepResult> {
    config.validate()?;
    tracing::info!(
        betas = config.betas.len(),
        width = config.dims.width,
        height = config.dims.height,
        strategies = config.game.strategies(),
        generations = config.generations,
        neighborhood = ?config.neighborhood,
        shuffle = config.shuffle,
        parallel = config.parallel,
        "Starting sweep"
    );

    let runs = if config.parallel {
        config
            .betas
            .par_iter()
            .enumerate()
            .map(|(i, &beta)| run_single(config, i, beta))
            .collect::<Result<Vec<_>>>()?
    } else {
        config
            .betas
            .iter()
            .enumerate()
            .map(|(i, &beta)| run_single(config, i, beta))
            .collect::<Result<Vec<_>>>()?
    };

    tracing::info!(runs = runs.len(), "Sweep complete");
    Ok(SweepResult { runs })
}
