//! Hawkdove Core - spatial evolutionary games on a torus
//!
//! This crate runs Hawk-Dove (and Hawk-Dove-Retaliator) imitation dynamics on
//! a periodic lattice: seeded initial layouts, synchronous fitness evaluation,
//! best-neighbor imitation with random tie-breaks, optional reshuffling, and
//! β sweeps reduced to occupation fractions.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod fitness;
pub mod grid;
pub mod init;
pub mod neighborhood;
pub mod payoff;
pub mod report;
pub mod rng;
pub mod shuffle;
pub mod stats;
pub mod sweep;
pub mod update;

pub use config::ExperimentConfig;
pub use error::{EngineError, Result};
pub use fitness::FitnessField;
pub use grid::{Coord, Grid, GridDims, Strategy, DOVE, HAWK, RETALIATOR};
pub use init::initial_grid;
pub use neighborhood::{NeighborTable, Neighborhood};
pub use payoff::{Game, PayoffMatrix};
pub use report::SweepReport;
pub use rng::{derive_seed, DeterministicRng, SplitMix64, Stream};
pub use shuffle::{shuffle_grid, ShuffleSeeding, Shuffler};
pub use stats::{mean_field_hawk_fraction, occupation_fractions, BetaSummary, OccupationTable};
pub use sweep::{
    run_single, run_sweep, InitSeeding, Simulation, SimulationRun, SweepConfig, SweepResult,
};
pub use update::{UpdateRule, DEFAULT_TIE_TOLERANCE};
