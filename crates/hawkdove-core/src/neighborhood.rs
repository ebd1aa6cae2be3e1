use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::grid::{Coord, Grid, GridDims};

/// Which cells count as a cell's neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Neighborhood {
    /// 8 neighbors, diagonals included.
    #[default]
    Moore,
    /// 4 orthogonal neighbors.
    VonNeumann,
}

// Fixed order for determinism: row by row, top to bottom.
const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// N, E, S, W.
const VON_NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

impl Neighborhood {
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::Moore => &MOORE_OFFSETS,
            Self::VonNeumann => &VON_NEUMANN_OFFSETS,
        }
    }

    pub fn degree(self) -> usize {
        self.offsets().len()
    }

    /// The cell itself followed by its neighbors, wrapped onto the torus.
    pub fn resolve(self, coord: Coord, dims: GridDims) -> impl Iterator<Item = Coord> {
        std::iter::once(coord).chain(
            self.offsets()
                .iter()
                .map(move |&(dx, dy)| dims.wrap(coord, dx, dy)),
        )
    }
}

/// Linear indices of `[self, neighbors...]` for every cell of one lattice.
///
/// Fitness evaluation and imitation both read this table, so the cells a
/// fitness value was accumulated from are exactly the cells compared against
/// during the update.
#[derive(Debug, Clone)]
pub struct NeighborTable {
    kind: Neighborhood,
    dims: GridDims,
    stride: usize,
    indices: Vec<usize>,
}

impl NeighborTable {
    pub fn new(kind: Neighborhood, dims: GridDims) -> Self {
        let stride = kind.degree() + 1;
        let mut indices = Vec::with_capacity(dims.cell_count() * stride);
        for index in 0..dims.cell_count() {
            let coord = dims.coord(index);
            indices.extend(kind.resolve(coord, dims).map(|c| dims.index(c)));
        }
        Self {
            kind,
            dims,
            stride,
            indices,
        }
    }

    pub fn kind(&self) -> Neighborhood {
        self.kind
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// `[self, neighbors...]` for the cell at `index`.
    pub fn with_self(&self, index: usize) -> &[usize] {
        let start = index * self.stride;
        &self.indices[start..start + self.stride]
    }

    /// Neighbors only, without the cell itself.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.with_self(index)[1..]
    }

    pub(crate) fn check_grid(&self, grid: &Grid) -> Result<()> {
        if grid.dims() != self.dims {
            return Err(EngineError::ShapeMismatch {
                expected: (self.dims.width, self.dims.height),
                actual: (grid.width(), grid.height()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_puts_self_first() {
        let dims = GridDims::new(5, 5).unwrap();
        let cells: Vec<_> = Neighborhood::VonNeumann
            .resolve(Coord::new(2, 2), dims)
            .collect();
        assert_eq!(
            cells,
            vec![
                Coord::new(2, 2),
                Coord::new(2, 1),
                Coord::new(3, 2),
                Coord::new(2, 3),
                Coord::new(1, 2),
            ]
        );
    }

    #[test]
    fn table_rows_match_resolver() {
        let dims = GridDims::new(4, 3).unwrap();
        let table = NeighborTable::new(Neighborhood::Moore, dims);
        for index in 0..dims.cell_count() {
            let expected: Vec<usize> = Neighborhood::Moore
                .resolve(dims.coord(index), dims)
                .map(|c| dims.index(c))
                .collect();
            assert_eq!(table.with_self(index), expected.as_slice());
            assert_eq!(table.neighbors(index).len(), 8);
        }
    }
}
