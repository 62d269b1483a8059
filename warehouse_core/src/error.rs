// Error type for every fallible warehouse operation.
//
// Only caller mistakes and bad inputs are errors. A name missing from the
// inventory is `None` and an unreachable goal is an empty path; neither
// shows up here.

use crate::types::Cell;
use thiserror::Error;

/// Errors raised by grid construction, queries, and config loading.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// A coordinate lies outside `[0, rows) x [0, cols)`.
    #[error("cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds { cell: Cell, rows: u32, cols: u32 },

    /// Both grid dimensions were zero.
    #[error("grid must have at least one non-zero dimension")]
    EmptyGrid,

    /// A dimension does not fit a signed `Cell` coordinate, or the cell
    /// count does not fit in memory addressing.
    #[error("grid dimensions {rows}x{cols} exceed the addressable range")]
    DimensionTooLarge { rows: u32, cols: u32 },

    /// A cell buffer did not match `rows * cols`.
    #[error("expected {expected} cells, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// An ASCII layout row had a different width than the first row.
    #[error("layout line {line} has width {actual}, expected {expected}")]
    RaggedLayout {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// An ASCII layout contained something other than `.` or `#`.
    #[error("unknown glyph {glyph:?} at line {line}, column {column}")]
    InvalidGlyph {
        line: usize,
        column: usize,
        glyph: char,
    },

    /// Obstacle density must be a probability.
    #[error("obstacle density {0} is not within [0, 1]")]
    InvalidDensity(f64),

    #[error("failed to parse warehouse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to read warehouse config: {0}")]
    ConfigIo(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WarehouseError>;
