// Immutable occupancy grid for the warehouse floor.
//
// Stored as a flat row-major `Vec<CellState>` indexed by
// `row * cols + col`, giving O(1) reads. Every public query is bounds-checked
// and reports `WarehouseError::OutOfBounds`; nothing clamps or defaults.
//
// There are no setters. A grid is built once (directly, from an ASCII
// picture, or by `layout.rs` from a seed) and then shared read-only; the
// pathfinder derives its per-call search state from it and never writes back.
//
// See also: `pathfinding.rs` for the search that walks `open_neighbors()`,
// `layout.rs` for seeded construction.

use crate::error::{Result, WarehouseError};
use crate::types::{Cell, CellState};
use smallvec::SmallVec;
use std::fmt;

/// Orthogonal step offsets in expansion order: north, south, west, east.
pub const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Rectangular floor plan of Open and Blocked cells.
///
/// Cells are addressed by `Cell { row, col }` with the origin at the
/// top-left. Both dimensions must fit in an `i32` so that every in-bounds
/// cell has a representable coordinate, and `rows * cols` must fit in
/// `usize`; constructors reject anything larger with `DimensionTooLarge`.
/// A grid with exactly one zero dimension is legal but has no cells.
///
/// The grid is never mutated after construction. Share it by reference (or
/// clone it) across as many concurrent searches as needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Flat storage: index = row * cols + col.
    cells: Vec<CellState>,
    rows: u32,
    cols: u32,
}

impl Grid {
    /// Build a grid from a row-major cell buffer of length `rows * cols`.
    pub fn from_cells(rows: u32, cols: u32, cells: Vec<CellState>) -> Result<Self> {
        let expected = check_dimensions(rows, cols)?;
        if cells.len() != expected {
            return Err(WarehouseError::ShapeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { cells, rows, cols })
    }

    /// A grid with every cell Open.
    pub fn open(rows: u32, cols: u32) -> Result<Self> {
        Self::from_fn(rows, cols, |_| CellState::Open)
    }

    /// Build a grid by asking `f` for each cell in row-major order.
    pub fn from_fn(rows: u32, cols: u32, mut f: impl FnMut(Cell) -> CellState) -> Result<Self> {
        let count = check_dimensions(rows, cols)?;
        // Both fit in i32 once check_dimensions has passed.
        let (max_row, max_col) = (rows as i32, cols as i32);
        let mut cells = Vec::with_capacity(count);
        for row in 0..max_row {
            for col in 0..max_col {
                cells.push(f(Cell::new(row, col)));
            }
        }
        Self::from_cells(rows, cols, cells)
    }

    /// Parse a picture where `.` is Open and `#` is Blocked.
    ///
    /// Blank lines and surrounding whitespace are ignored, so indented raw
    /// string literals work. Line and column numbers in errors are 1-based.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = lines.first().map_or(0, |l| l.chars().count());

        let mut cells = Vec::with_capacity(lines.len() * width);
        for (i, line) in lines.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(WarehouseError::RaggedLayout {
                    line: i + 1,
                    expected: width,
                    actual,
                });
            }
            for (j, glyph) in line.chars().enumerate() {
                cells.push(match glyph {
                    '.' => CellState::Open,
                    '#' => CellState::Blocked,
                    _ => {
                        return Err(WarehouseError::InvalidGlyph {
                            line: i + 1,
                            column: j + 1,
                            glyph,
                        });
                    }
                });
            }
        }
        let rows = u32::try_from(lines.len()).unwrap_or(u32::MAX);
        let cols = u32::try_from(width).unwrap_or(u32::MAX);
        Self::from_cells(rows, cols, cells)
    }

    /// `(rows, cols)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of Open cells.
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|s| s.is_open()).count()
    }

    /// Check whether a cell lies within `[0, rows) x [0, cols)`.
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as u32) < self.rows
            && (cell.col as u32) < self.cols
    }

    /// Flat index of a cell. Returns `None` if out of bounds.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.row as usize * self.cols as usize + cell.col as usize)
    }

    /// Row-major linear offset of a cell, or `OutOfBounds`.
    pub fn linear_offset(&self, cell: Cell) -> Result<usize> {
        self.index(cell).ok_or(WarehouseError::OutOfBounds {
            cell,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Occupancy of a cell, or `OutOfBounds`.
    pub fn state(&self, cell: Cell) -> Result<CellState> {
        self.linear_offset(cell).map(|i| self.cells[i])
    }

    /// Whether the search may enter `cell`. `OutOfBounds` if off the grid.
    pub fn is_traversable(&self, cell: Cell) -> Result<bool> {
        self.state(cell).map(CellState::is_open)
    }

    /// In-bounds Open neighbors of `cell` in N, S, W, E order.
    ///
    /// `cell` itself need not be Open or even in bounds; only the neighbors
    /// are filtered. A step that would leave the `i32` coordinate range is
    /// skipped.
    pub fn open_neighbors(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        ORTHOGONAL
            .iter()
            .filter_map(|&(dr, dc)| cell.offset(dr, dc))
            .filter(|&n| self.index(n).is_some_and(|i| self.cells[i].is_open()))
            .collect()
    }
}

/// Validate a `rows x cols` shape and return its cell count.
///
/// Rejects 0x0 with `EmptyGrid`. Rejects a dimension above `i32::MAX`, or a
/// product that overflows `usize`, with `DimensionTooLarge`.
pub(crate) fn check_dimensions(rows: u32, cols: u32) -> Result<usize> {
    if rows == 0 && cols == 0 {
        return Err(WarehouseError::EmptyGrid);
    }
    let too_large = WarehouseError::DimensionTooLarge { rows, cols };
    if i32::try_from(rows).is_err() || i32::try_from(cols).is_err() {
        return Err(too_large);
    }
    (rows as usize).checked_mul(cols as usize).ok_or(too_large)
}

/// Renders the same `.`/`#` picture `from_ascii` reads, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cols == 0 {
            return Ok(());
        }
        for row in self.cells.chunks(self.cols as usize) {
            for state in row {
                f.write_str(if state.is_open() { "." } else { "#" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
