use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Strategy label stored in each cell.
pub type Strategy = u8;

pub const HAWK: Strategy = 0;
pub const DOVE: Strategy = 1;
pub const RETALIATOR: Strategy = 2;

/// Lattice coordinate, `x` along the width and `y` along the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a toroidal lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub width: u32,
    pub height: u32,
}

impl GridDims {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn square(side: u32) -> Result<Self> {
        Self::new(side, side)
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn index(&self, coord: Coord) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }

    pub fn coord(&self, index: usize) -> Coord {
        let width = self.width as usize;
        Coord {
            x: (index % width) as u32,
            y: (index / width) as u32,
        }
    }

    /// Applies a signed offset with periodic wraparound on both axes.
    pub fn wrap(&self, coord: Coord, dx: i32, dy: i32) -> Coord {
        let x = (i64::from(coord.x) + i64::from(dx)).rem_euclid(i64::from(self.width));
        let y = (i64::from(coord.y) + i64::from(dy)).rem_euclid(i64::from(self.height));
        Coord {
            x: x as u32,
            y: y as u32,
        }
    }
}

/// Immutable strategy snapshot of the whole lattice for one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRecord")]
pub struct Grid {
    dims: GridDims,
    strategies: usize,
    cells: Vec<Strategy>,
}

/// Serialized form of [`Grid`]; decoding goes through [`Grid::from_cells`].
#[derive(Deserialize)]
struct GridRecord {
    dims: GridDims,
    strategies: usize,
    cells: Vec<Strategy>,
}

impl TryFrom<GridRecord> for Grid {
    type Error = EngineError;

    fn try_from(record: GridRecord) -> Result<Self> {
        let dims = GridDims::new(record.dims.width, record.dims.height)?;
        Self::from_cells(dims, record.strategies, record.cells)
    }
}

impl Grid {
    /// Builds a grid from row-major cells, checking size and label range.
    pub fn from_cells(dims: GridDims, strategies: usize, cells: Vec<Strategy>) -> Result<Self> {
        check_strategy_count(strategies)?;
        if cells.len() != dims.cell_count() {
            return Err(EngineError::CellCountMismatch {
                width: dims.width,
                height: dims.height,
                actual: cells.len(),
            });
        }
        if let Some((index, &strategy)) = cells
            .iter()
            .enumerate()
            .find(|(_, &s)| s as usize >= strategies)
        {
            return Err(EngineError::StrategyOutOfRange {
                index,
                strategy,
                strategies,
            });
        }
        Ok(Self {
            dims,
            strategies,
            cells,
        })
    }

    /// Used by engine stages whose output labels are copied from a valid grid.
    pub(crate) fn from_parts_unchecked(
        dims: GridDims,
        strategies: usize,
        cells: Vec<Strategy>,
    ) -> Self {
        debug_assert_eq!(cells.len(), dims.cell_count());
        Self {
            dims,
            strategies,
            cells,
        }
    }

    pub(crate) fn into_cells(self) -> Vec<Strategy> {
        self.cells
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn width(&self) -> u32 {
        self.dims.width
    }

    pub fn height(&self) -> u32 {
        self.dims.height
    }

    pub fn strategies(&self) -> usize {
        self.strategies
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Strategy] {
        &self.cells
    }

    pub fn get(&self, coord: Coord) -> Option<Strategy> {
        if coord.x >= self.dims.width || coord.y >= self.dims.height {
            return None;
        }
        Some(self.cells[self.dims.index(coord)])
    }

    /// Number of cells holding each strategy, indexed by label.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.strategies];
        for &s in &self.cells {
            counts[s as usize] += 1;
        }
        counts
    }

    /// One row per line, `H`/`D`/`R` per cell.
    pub fn render(&self) -> String {
        let width = self.dims.width as usize;
        let mut out = String::with_capacity(self.cells.len() + self.dims.height as usize);
        for row in self.cells.chunks(width) {
            out.extend(row.iter().map(|&s| strategy_glyph(s)));
            out.push('\n');
        }
        out
    }
}

pub fn strategy_glyph(strategy: Strategy) -> char {
    match strategy {
        HAWK => 'H',
        DOVE => 'D',
        RETALIATOR => 'R',
        _ => '?',
    }
}

pub fn strategy_name(strategy: Strategy) -> &'static str {
    match strategy {
        HAWK => "hawk",
        DOVE => "dove",
        RETALIATOR => "retaliator",
        _ => "unknown",
    }
}

pub(crate) fn check_strategy_count(strategies: usize) -> Result<()> {
    if strategies == 2 || strategies == 3 {
        Ok(())
    } else {
        Err(EngineError::UnsupportedStrategyCount(strategies))
    }
}
