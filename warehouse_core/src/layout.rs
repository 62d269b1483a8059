// Seeded obstacle placement.
//
// Walks the floor in row-major order and draws one Bernoulli sample per cell
// from a `WarehouseRng` seeded with `config.seed`. A draw is taken for every
// cell, including keep-clear cells, so adding a dock to `keep_clear` never
// shifts the obstacles anywhere else on the floor.
//
// This is the only producer of randomized grids. It builds the grid through
// `Grid::from_fn` and never touches it afterwards.

use crate::config::WarehouseConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::types::CellState;
use std::collections::BTreeSet;
use warehouse_prng::WarehouseRng;

/// Build the floor described by `config`.
///
/// Fails on an invalid config or a keep-clear cell outside the grid.
pub fn generate_grid(config: &WarehouseConfig) -> Result<Grid> {
    config.validate()?;
    let keep_clear: BTreeSet<_> = config.keep_clear.iter().copied().collect();
    let mut rng = WarehouseRng::new(config.seed);

    let grid = Grid::from_fn(config.rows, config.cols, |cell| {
        let blocked = rng.chance(config.obstacle_density);
        if blocked && !keep_clear.contains(&cell) {
            CellState::Blocked
        } else {
            CellState::Open
        }
    })?;

    for &cell in &keep_clear {
        grid.linear_offset(cell)?;
    }

    tracing::debug!(
        rows = config.rows,
        cols = config.cols,
        seed = config.seed,
        open = grid.open_count(),
        "generated warehouse layout"
    );
    Ok(grid)
}
