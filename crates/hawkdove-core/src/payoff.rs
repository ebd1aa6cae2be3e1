//! Payoff matrices for the Hawk-Dove family of games.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::grid::{check_strategy_count, Strategy};

/// Which strategy set is played.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Game {
    /// Hawk and Dove.
    #[default]
    HawkDove,
    /// Hawk, Dove and Retaliator with asymmetry `epsilon`.
    HawkDoveRetaliator {
        #[serde(default)]
        epsilon: f64,
    },
}

impl Game {
    /// Picks the game for a strategy count, `epsilon` only used for three.
    pub fn for_strategies(strategies: usize, epsilon: f64) -> Result<Self> {
        match strategies {
            2 => Ok(Self::HawkDove),
            3 => Ok(Self::HawkDoveRetaliator { epsilon }),
            n => Err(EngineError::UnsupportedStrategyCount(n)),
        }
    }

    pub fn strategies(&self) -> usize {
        match self {
            Self::HawkDove => 2,
            Self::HawkDoveRetaliator { .. } => 3,
        }
    }

    /// Payoff matrix at cost/value ratio `beta`.
    pub fn payoff(&self, beta: f64) -> PayoffMatrix {
        let rows = match *self {
            Self::HawkDove => vec![vec![1.0 - beta, 2.0], vec![0.0, 1.0]],
            Self::HawkDoveRetaliator { epsilon } => vec![
                vec![1.0 - beta, 2.0, 1.0 - beta + epsilon],
                vec![0.0, 1.0, 1.0 - epsilon],
                vec![1.0 - beta - epsilon, 1.0 + epsilon, 1.0],
            ],
        };
        PayoffMatrix::from_square(rows)
    }
}

/// `get(a, b)` is what strategy `a` earns against opponent `b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    size: usize,
    values: Vec<f64>,
}

impl PayoffMatrix {
    /// Explicit constants; must be square with 2 or 3 strategies.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        check_strategy_count(size)?;
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(EngineError::NonSquarePayoff {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
        }
        Ok(Self::from_square(rows))
    }

    fn from_square(rows: Vec<Vec<f64>>) -> Self {
        let size = rows.len();
        Self {
            size,
            values: rows.into_iter().flatten().collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, own: Strategy, opponent: Strategy) -> f64 {
        self.values[own as usize * self.size + opponent as usize]
    }

    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.values.chunks(self.size).map(<[f64]>::to_vec).collect()
    }

    pub(crate) fn check_strategies(&self, strategies: usize) -> Result<()> {
        if self.size != strategies {
            return Err(EngineError::PayoffDimensionMismatch {
                matrix: self.size,
                strategies,
            });
        }
        Ok(())
    }
}
