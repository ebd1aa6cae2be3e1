//! Experiment configuration loading and management.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::grid::GridDims;
use crate::neighborhood::Neighborhood;
use crate::payoff::Game;
use crate::shuffle::ShuffleSeeding;
use crate::sweep::{InitSeeding, SweepConfig};
use crate::update::DEFAULT_TIE_TOLERANCE;

/// Experiment configuration, loaded from a YAML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Lattice width
    #[serde(default = "default_side")]
    pub width: u32,

    /// Lattice height
    #[serde(default = "default_side")]
    pub height: u32,

    /// 2 (Hawk, Dove) or 3 (adds Retaliator)
    #[serde(default = "default_strategies")]
    pub strategies: usize,

    /// Retaliator asymmetry, ignored for two strategies
    pub epsilon: f64,

    pub neighborhood: Neighborhood,

    /// Cost/value ratios to sweep
    #[serde(default = "default_betas")]
    pub betas: Vec<f64>,

    #[serde(default = "default_generations")]
    pub generations: u32,

    /// Trailing generations averaged into the summary
    #[serde(default = "default_window")]
    pub window: usize,

    /// Reshuffle the lattice after every update (well-mixed control)
    pub shuffle: bool,

    pub seed: u64,

    pub shuffle_seed: u64,

    pub init_seeding: InitSeeding,

    pub shuffle_seeding: ShuffleSeeding,

    #[serde(default = "default_tie_tolerance")]
    pub tie_tolerance: f64,

    /// Count the cell's game against itself in its fitness
    pub self_interaction: bool,

    /// Run betas concurrently
    #[serde(default = "default_true")]
    pub parallel: bool,
}

fn default_side() -> u32 {
    70
}
fn default_strategies() -> usize {
    2
}
fn default_betas() -> Vec<f64> {
    vec![0.5, 0.9, 1.0, 1.25, 1.5, 2.0, 3.0, 5.0]
}
fn default_generations() -> u32 {
    175
}
fn default_window() -> usize {
    25
}
fn default_tie_tolerance() -> f64 {
    DEFAULT_TIE_TOLERANCE
}
fn default_true() -> bool {
    true
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            width: default_side(),
            height: default_side(),
            strategies: default_strategies(),
            epsilon: 0.0,
            neighborhood: Neighborhood::default(),
            betas: default_betas(),
            generations: default_generations(),
            window: default_window(),
            shuffle: false,
            seed: 0,
            shuffle_seed: 0,
            init_seeding: InitSeeding::default(),
            shuffle_seeding: ShuffleSeeding::default(),
            tie_tolerance: default_tie_tolerance(),
            self_interaction: false,
            parallel: default_true(),
        }
    }
}

impl ExperimentConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Write as YAML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Validated engine configuration
    pub fn to_sweep_config(&self) -> Result<SweepConfig> {
        let dims = GridDims::new(self.width, self.height)?;
        let game = Game::for_strategies(self.strategies, self.epsilon)?;

        let config = SweepConfig {
            dims,
            game,
            neighborhood: self.neighborhood,
            betas: self.betas.clone(),
            generations: self.generations,
            shuffle: self.shuffle,
            seed: self.seed,
            shuffle_seed: self.shuffle_seed,
            init_seeding: self.init_seeding,
            shuffle_seeding: self.shuffle_seeding,
            tie_tolerance: self.tie_tolerance,
            self_interaction: self.self_interaction,
            parallel: self.parallel,
        };
        config.validate()?;

        let available = self.generations as usize + 1;
        if self.window == 0 || self.window > available {
            return Err(EngineError::InvalidWindow {
                window: self.window,
                available,
            }
            .into());
        }
        Ok(config)
    }
}
