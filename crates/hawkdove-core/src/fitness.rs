use crate::error::Result;
use crate::grid::Grid;
use crate::neighborhood::NeighborTable;
use crate::payoff::PayoffMatrix;

/// Per-cell fitness for one frozen grid snapshot.
///
/// Values are accumulated only from the snapshot's strategies; no cell reads
/// another cell's fitness, so the field is identical whatever order cells are
/// visited in.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessField {
    values: Vec<f64>,
}

impl FitnessField {
    /// Sum of `payoff[own][neighbor]` over each cell's neighbors.
    pub fn compute(grid: &Grid, payoff: &PayoffMatrix, table: &NeighborTable) -> Result<Self> {
        Self::compute_with(grid, payoff, table, false)
    }

    /// Like [`FitnessField::compute`], optionally adding `payoff[own][own]`
    /// for the cell playing against itself.
    pub fn compute_with(
        grid: &Grid,
        payoff: &PayoffMatrix,
        table: &NeighborTable,
        self_interaction: bool,
    ) -> Result<Self> {
        let mut field = Self { values: Vec::new() };
        field.recompute(grid, payoff, table, self_interaction)?;
        Ok(field)
    }

    /// Overwrites this field in place from a new snapshot, reusing its buffer.
    pub fn recompute(
        &mut self,
        grid: &Grid,
        payoff: &PayoffMatrix,
        table: &NeighborTable,
        self_interaction: bool,
    ) -> Result<()> {
        table.check_grid(grid)?;
        payoff.check_strategies(grid.strategies())?;

        let cells = grid.cells();
        self.values.clear();
        self.values.extend((0..cells.len()).map(|index| {
            let own = cells[index];
            let mut total: f64 = table
                .neighbors(index)
                .iter()
                .map(|&n| payoff.get(own, cells[n]))
                .sum();
            if self_interaction {
                total += payoff.get(own, own);
            }
            total
        }));
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::grid::{Coord, GridDims};
    use crate::neighborhood::Neighborhood;
    use crate::payoff::Game;

    fn single_hawk(dims: GridDims) -> Grid {
        let mut cells = vec![1; dims.cell_count()];
        cells[dims.index(Coord::new(1, 1))] = 0;
        Grid::from_cells(dims, 2, cells).unwrap()
    }

    #[test]
    fn lone_hawk_among_doves() {
        let dims = GridDims::square(4).unwrap();
        let table = NeighborTable::new(Neighborhood::Moore, dims);
        let payoff = Game::HawkDove.payoff(1.5);
        let field = FitnessField::compute(&single_hawk(dims), &payoff, &table).unwrap();

        // Hawk meets 8 doves: 8 * 2.
        assert_eq!(field.get(dims.index(Coord::new(1, 1))), 16.0);
        // Dove touching the hawk: 7 doves * 1 + hawk * 0.
        assert_eq!(field.get(dims.index(Coord::new(2, 2))), 7.0);
        // Dove out of reach of the hawk.
        assert_eq!(field.get(dims.index(Coord::new(3, 3))), 8.0);
    }

    #[test]
    fn self_interaction_adds_diagonal_payoff() {
        let dims = GridDims::square(4).unwrap();
        let table = NeighborTable::new(Neighborhood::VonNeumann, dims);
        let payoff = Game::HawkDove.payoff(3.0);
        let grid = single_hawk(dims);
        let field = FitnessField::compute_with(&grid, &payoff, &table, true).unwrap();
        // 4 doves * 2 + own (1 - 3).
        assert_eq!(field.get(dims.index(Coord::new(1, 1))), 6.0);
    }

    #[test]
    fn mismatched_payoff_is_rejected() {
        let dims = GridDims::square(3).unwrap();
        let table = NeighborTable::new(Neighborhood::Moore, dims);
        let payoff = Game::HawkDoveRetaliator { epsilon: 0.0 }.payoff(1.0);
        let grid = Grid::from_cells(dims, 2, vec![0; 9]).unwrap();
        assert_eq!(
            FitnessField::compute(&grid, &payoff, &table).unwrap_err(),
            EngineError::PayoffDimensionMismatch {
                matrix: 3,
                strategies: 2
            }
        );
    }
}
