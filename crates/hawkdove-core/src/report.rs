//! Serializable sweep summaries for downstream plotting.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::{BetaSummary, OccupationTable};
use crate::sweep::{SweepConfig, SweepResult};

/// Sweep outcome as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub generated_at: DateTime<Utc>,
    pub config: SweepConfig,
    pub window: usize,
    pub summaries: Vec<BetaSummary>,
    /// Per-generation tables, present when requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<OccupationTable>,
}

impl SweepReport {
    pub fn new(config: &SweepConfig, result: &SweepResult, window: usize) -> Result<Self> {
        Ok(Self {
            generated_at: Utc::now(),
            config: config.clone(),
            window,
            summaries: result.summary(window)?,
            tables: Vec::new(),
        })
    }

    pub fn with_tables(mut self, result: &SweepResult) -> Result<Self> {
        self.tables = result.occupation(self.window)?;
        Ok(self)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report from {}", path.display()))?;
        let report = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report from {}", path.display()))?;
        Ok(report)
    }
}
