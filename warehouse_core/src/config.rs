// Data-driven warehouse configuration.
//
// `WarehouseConfig` describes how to seed a floor: its dimensions, the
// probability that any given cell is an obstacle, the PRNG seed, and a list
// of cells that must stay open (docks, charging pads, pick stations). It is
// loaded from JSON; every field has a default, so a config file only names
// what it changes.
//
// Defaults reproduce the classic 10x10 floor with a fair coin per cell.
//
// See also: `layout.rs` which turns a config into a `Grid`, `warehouse.rs`
// for `Warehouse::from_config`.

use crate::error::{Result, WarehouseError};
use crate::grid::check_dimensions;
use crate::types::Cell;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for a seeded warehouse floor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    pub rows: u32,
    pub cols: u32,
    /// Probability in [0, 1] that a cell is Blocked.
    pub obstacle_density: f64,
    /// Seed for `WarehouseRng`. Same seed, same floor.
    pub seed: u64,
    /// Cells forced Open after obstacles are placed.
    pub keep_clear: Vec<Cell>,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            obstacle_density: 0.5,
            seed: 0,
            keep_clear: Vec::new(),
        }
    }
}

impl WarehouseConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        tracing::debug!(
            rows = config.rows,
            cols = config.cols,
            density = config.obstacle_density,
            seed = config.seed,
            "loaded warehouse config"
        );
        Ok(config)
    }

    /// Read, parse, and validate a config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Check the invariants serde cannot express.
    ///
    /// `keep_clear` bounds are checked by `layout::generate_grid`, which
    /// reports the offending cell against the real grid.
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.rows, self.cols)?;
        if !(0.0..=1.0).contains(&self.obstacle_density) {
            return Err(WarehouseError::InvalidDensity(self.obstacle_density));
        }
        Ok(())
    }
}
