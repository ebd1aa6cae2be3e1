use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Configuration faults detected before or during a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("strategy count must be 2 or 3, got {0}")]
    UnsupportedStrategyCount(usize),
    #[error("payoff matrix is not square: row {row} has {len} entries, expected {expected}")]
    NonSquarePayoff {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("payoff matrix is {matrix}x{matrix} but the grid has {strategies} strategies")]
    PayoffDimensionMismatch { matrix: usize, strategies: usize },
    #[error("beta list must not be empty")]
    EmptyBetaList,
    #[error("cell count {actual} does not match {width}x{height}")]
    CellCountMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
    #[error("cell {index} holds strategy {strategy}, outside 0..{strategies}")]
    StrategyOutOfRange {
        index: usize,
        strategy: u8,
        strategies: usize,
    },
    #[error("statistics window must be within 1..={available}, got {window}")]
    InvalidWindow { window: usize, available: usize },
    #[error("fitness field has {actual} values but the grid has {expected} cells")]
    FitnessLengthMismatch { expected: usize, actual: usize },
    #[error("grid is {actual:?} but the neighbor table was built for {expected:?}")]
    ShapeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}
