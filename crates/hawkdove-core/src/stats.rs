//! Occupation fractions over the tail of a run, and the mean-field baseline.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::grid::HAWK;
use crate::sweep::{SimulationRun, SweepResult};

/// Per-strategy fractions for each of the last `window` generations of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupationTable {
    pub beta: f64,
    /// Generation number of the first row.
    pub first_generation: usize,
    /// `rows[offset][strategy]`.
    pub rows: Vec<Vec<f64>>,
}

impl OccupationTable {
    pub fn window(&self) -> usize {
        self.rows.len()
    }

    /// Mean fraction of `strategy` across the window.
    pub fn mean(&self, strategy: usize) -> f64 {
        let total: f64 = self.rows.iter().map(|row| row[strategy]).sum();
        total / self.rows.len() as f64
    }

    pub fn means(&self) -> Vec<f64> {
        let strategies = self.rows.first().map_or(0, Vec::len);
        (0..strategies).map(|s| self.mean(s)).collect()
    }
}

/// Fractions `count / (X·Y)` for the last `window` generations of `run`.
pub fn occupation_fractions(run: &SimulationRun, window: usize) -> Result<OccupationTable> {
    let history = run.history();
    if window == 0 || window > history.len() {
        return Err(EngineError::InvalidWindow {
            window,
            available: history.len(),
        });
    }

    let first_generation = history.len() - window;
    let rows = history[first_generation..]
        .iter()
        .map(|grid| {
            let cells = grid.len() as f64;
            grid.counts()
                .into_iter()
                .map(|count| count as f64 / cells)
                .collect::<Vec<f64>>()
        })
        .collect();

    Ok(OccupationTable {
        beta: run.beta,
        first_generation,
        rows,
    })
}

/// Hawk fraction of the well-mixed game: 1 up to β = 1, then 1/β.
pub fn mean_field_hawk_fraction(beta: f64) -> f64 {
    if beta <= 1.0 {
        1.0
    } else {
        1.0 / beta
    }
}

/// Window means for one β next to the mean-field prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaSummary {
    pub beta: f64,
    pub mean_fractions: Vec<f64>,
    pub mean_field_hawk: f64,
}

impl BetaSummary {
    pub fn hawk(&self) -> f64 {
        self.mean_fractions[HAWK as usize]
    }

    /// Spatial Hawk fraction minus the mean-field one.
    pub fn spatial_deviation(&self) -> f64 {
        self.hawk() - self.mean_field_hawk
    }
}

pub fn summarize(result: &SweepResult, window: usize) -> Result<Vec<BetaSummary>> {
    result
        .runs()
        .iter()
        .map(|run| {
            let table = occupation_fractions(run, window)?;
            Ok(BetaSummary {
                beta: run.beta,
                mean_fractions: table.means(),
                mean_field_hawk: mean_field_hawk_fraction(run.beta),
            })
        })
        .collect()
}
