//! Spatial reshuffling, the well-mixed control for a structured run.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::rng::{derive_seed, DeterministicRng, SplitMix64, Stream};

/// How the shuffle generator is seeded over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShuffleSeeding {
    /// Fresh generator per generation, seeded from `(seed, generation)`.
    /// Every β run sees the same permutation at the same generation.
    #[default]
    PerGeneration,
    /// One generator per run, advanced across generations.
    Stream,
}

/// Same multiset of labels, new positions: `out[perm[k]] = in[k]`.
pub fn shuffle_grid<R: DeterministicRng>(grid: &Grid, rng: &mut R) -> Grid {
    let perm = rng.permutation(grid.len());
    let mut cells = vec![0; grid.len()];
    for (&strategy, &target) in grid.cells().iter().zip(&perm) {
        cells[target] = strategy;
    }
    Grid::from_parts_unchecked(grid.dims(), grid.strategies(), cells)
}

/// Per-run shuffler applying one of the [`ShuffleSeeding`] policies.
#[derive(Debug, Clone)]
pub struct Shuffler {
    seeding: ShuffleSeeding,
    seed: u64,
    stream: SplitMix64,
}

impl Shuffler {
    pub fn new(seeding: ShuffleSeeding, seed: u64, run_index: usize) -> Self {
        Self {
            seeding,
            seed,
            stream: SplitMix64::new(derive_seed(seed, run_index as u64, Stream::Shuffle)),
        }
    }

    /// Shuffles the grid produced for `generation` (1-based).
    pub fn apply(&mut self, grid: &Grid, generation: u32) -> Grid {
        match self.seeding {
            ShuffleSeeding::PerGeneration => {
                let mut rng =
                    SplitMix64::new(derive_seed(self.seed, u64::from(generation), Stream::Shuffle));
                shuffle_grid(grid, &mut rng)
            }
            ShuffleSeeding::Stream => shuffle_grid(grid, &mut self.stream),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridDims;
    use crate::init::initial_grid;

    #[test]
    fn per_generation_policy_ignores_run_index() {
        let grid = initial_grid(GridDims::square(8).unwrap(), 2, 4).unwrap();
        let mut a = Shuffler::new(ShuffleSeeding::PerGeneration, 9, 0);
        let mut b = Shuffler::new(ShuffleSeeding::PerGeneration, 9, 5);
        assert_eq!(a.apply(&grid, 3), b.apply(&grid, 3));
        assert_ne!(a.apply(&grid, 3), a.apply(&grid, 4));
    }

    #[test]
    fn stream_policy_advances_between_calls() {
        let grid = initial_grid(GridDims::square(8).unwrap(), 3, 4).unwrap();
        let mut s = Shuffler::new(ShuffleSeeding::Stream, 9, 0);
        let first = s.apply(&grid, 1);
        let second = s.apply(&grid, 1);
        assert_ne!(first, second);
        assert_eq!(first.counts(), grid.counts());
    }
}
