use crate::error::{EngineError, Result};
use crate::fitness::FitnessField;
use crate::grid::{Grid, Strategy};
use crate::neighborhood::NeighborTable;
use crate::rng::DeterministicRng;

/// Absolute tolerance under which two fitness sums count as tied.
pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-8;

/// Best-neighbor imitation: every cell copies the current strategy of the
/// fittest cell among itself and its neighbors.
///
/// Ties (values within `tolerance` of the best) are broken uniformly at
/// random. A lone maximum wins without drawing from the generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateRule {
    tolerance: f64,
}

impl Default for UpdateRule {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TIE_TOLERANCE,
        }
    }
}

impl UpdateRule {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Produces the next generation as a new grid.
    pub fn next_generation<R: DeterministicRng>(
        &self,
        grid: &Grid,
        fitness: &FitnessField,
        table: &NeighborTable,
        rng: &mut R,
    ) -> Result<Grid> {
        let mut next = Vec::with_capacity(grid.len());
        self.apply_into(grid, fitness, table, rng, &mut next)?;
        Ok(Grid::from_parts_unchecked(
            grid.dims(),
            grid.strategies(),
            next,
        ))
    }

    /// Writes the next generation's cells into `next`, which is cleared first.
    ///
    /// `grid` and `fitness` are only read; `next` is a separate buffer, so the
    /// whole step behaves as one atomic transition.
    pub fn apply_into<R: DeterministicRng>(
        &self,
        grid: &Grid,
        fitness: &FitnessField,
        table: &NeighborTable,
        rng: &mut R,
        next: &mut Vec<Strategy>,
    ) -> Result<()> {
        table.check_grid(grid)?;
        if fitness.len() != grid.len() {
            return Err(EngineError::FitnessLengthMismatch {
                expected: grid.len(),
                actual: fitness.len(),
            });
        }

        let cells = grid.cells();
        let values = fitness.values();
        let mut candidates = Vec::with_capacity(table.kind().degree() + 1);

        next.clear();
        for index in 0..cells.len() {
            let row = table.with_self(index);
            let winner = self.select(row, values, &mut candidates, rng);
            next.push(cells[winner]);
        }
        Ok(())
    }

    /// Returns the cell index whose strategy `row[0]` adopts.
    fn select<R: DeterministicRng>(
        &self,
        row: &[usize],
        values: &[f64],
        candidates: &mut Vec<usize>,
        rng: &mut R,
    ) -> usize {
        let best = row
            .iter()
            .map(|&i| values[i])
            .filter(|v| !v.is_nan())
            .reduce(f64::max);

        candidates.clear();
        match best {
            Some(best) => candidates.extend(row.iter().copied().filter(|&i| {
                let v = values[i];
                v == best || best - v <= self.tolerance
            })),
            // Nothing comparable: every position is tied.
            None => candidates.extend_from_slice(row),
        }

        match candidates.len() {
            1 => candidates[0],
            n => candidates[rng.gen_index(n)],
        }
    }
}
