// Core value types shared across the warehouse crate.
//
// `Cell` is the grid coordinate used by every other module, `CellState` is
// the per-cell occupancy, and `Item` is the unit stored in the inventory
// index. All derive `Serialize`/`Deserialize` so fixtures and configs can
// name cells directly in JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A (row, col) position on the warehouse floor, zero-indexed.
///
/// Components are signed so a caller-supplied negative coordinate survives
/// long enough to be rejected as out of bounds. Ordering is row-major, which
/// is also the frontier's tie-break order in `pathfinding.rs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell shifted by `(d_row, d_col)`.
    ///
    /// The result may lie off any grid; callers bounds-check it. Returns
    /// `None` only when a component would overflow `i32`, so neighbors of a
    /// cell on the coordinate edge simply do not exist.
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        Some(Self::new(
            self.row.checked_add(d_row)?,
            self.col.checked_add(d_col)?,
        ))
    }

    /// Manhattan distance between two cells, saturating at `u32::MAX`.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Occupancy of a single floor cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Open,
    Blocked,
}

impl CellState {
    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

// ---------------------------------------------------------------------------
// Inventory types
// ---------------------------------------------------------------------------

/// A stocked item. The name is the only key; quantity rides along.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub quantity: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}
