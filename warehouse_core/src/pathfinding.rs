// Uniform-cost shortest-path search over the warehouse grid.
//
// Dijkstra with unit step costs, using a `BinaryHeap` made into a min-heap by
// reversing `Ord` on the frontier entry. Stale heap entries are never
// removed; they are dropped when popped by the explicit visited check, since
// `BinaryHeap` has no decrease-key.
//
// Per-call search state (tentative distance, visited flag, predecessor) lives
// in `Vec`s indexed by the grid's flat cell index. It is allocated fresh for
// every query and dropped on return, so concurrent queries over one shared
// `Grid` need no coordination; `find_paths` relies on that to fan out with
// rayon.
//
// Behavioral details callers depend on:
// - The search stops as soon as the goal is *popped*.
// - Start and goal traversability is not checked. A blocked start is reached
//   at distance 0 and expands normally; a blocked goal is never entered, so
//   it yields an empty path unless it is also the start.
// - `start == goal` always yields `[start]`.
// - An unreachable goal yields an empty path, not an error.
//
// Frontier ties at equal distance pop in row-major `Cell` order, so the
// returned path is fully reproducible, not just its length.
//
// See also: `grid.rs` for `open_neighbors()`, `warehouse.rs` for
// `route_to_item()` built on `shortest_distance`.

use crate::error::Result;
use crate::grid::Grid;
use crate::types::Cell;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Sentinel for a cell the search has not reached.
const UNREACHED: u32 = u32::MAX;

/// Entry in the frontier (min-heap via reversed ordering).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenEntry {
    cell: Cell,
    index: usize,
    distance: u32,
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest distance, then smallest cell, is "greatest".
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

/// Ephemeral per-query bookkeeping, one slot per grid cell.
struct SearchState {
    distance: Vec<u32>,
    visited: Vec<bool>,
    came_from: Vec<Option<Cell>>,
}

impl SearchState {
    fn new(cell_count: usize) -> Self {
        Self {
            distance: vec![UNREACHED; cell_count],
            visited: vec![false; cell_count],
            came_from: vec![None; cell_count],
        }
    }
}

/// Find a shortest 4-connected path from `start` to `goal`.
///
/// Returns the cells from `start` to `goal` inclusive, or an empty `Vec` if
/// the goal cannot be reached. Fails with `OutOfBounds` if either endpoint
/// is off the grid. Both endpoints are checked before any search state is
/// allocated.
///
/// Every step costs 1, so the path length minus one is the distance. Among
/// equally short paths the result is the one whose frontier pops follow
/// row-major `Cell` order; on an open 3x3 grid, `(0,0)` to `(2,2)` runs
/// along the top row and then down the right column.
///
/// The start cell is not checked for traversability: a route can begin on
/// a Blocked cell (a worker standing on a shelf footprint) and step off it.
/// The goal must be Open unless it equals the start, in which case the
/// result is `[start]`.
///
/// Allocates O(rows * cols) scratch per call and touches only `&Grid`, so
/// any number of calls may run concurrently on one grid.
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Result<Vec<Cell>> {
    let (state, goal_index) = search(grid, start, goal)?;
    Ok(reconstruct_path(&state, grid, start, goal, goal_index))
}

/// Length in steps of a shortest path, or `None` if unreachable.
pub fn shortest_distance(grid: &Grid, start: Cell, goal: Cell) -> Result<Option<u32>> {
    let (state, goal_index) = search(grid, start, goal)?;
    let d = state.distance[goal_index];
    Ok((d != UNREACHED).then_some(d))
}

/// Answer a batch of `(start, goal)` queries in parallel.
///
/// Results come back in query order. Each query gets its own search state;
/// only the grid is shared.
pub fn find_paths(grid: &Grid, queries: &[(Cell, Cell)]) -> Vec<Result<Vec<Cell>>> {
    queries
        .par_iter()
        .map(|&(start, goal)| find_path(grid, start, goal))
        .collect()
}

/// Run the search and hand back the final state plus the goal's flat index.
fn search(grid: &Grid, start: Cell, goal: Cell) -> Result<(SearchState, usize)> {
    let start_index = grid.linear_offset(start)?;
    let goal_index = grid.linear_offset(goal)?;

    let mut state = SearchState::new(grid.cell_count());
    state.distance[start_index] = 0;

    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        cell: start,
        index: start_index,
        distance: 0,
    });

    let mut expanded = 0usize;
    let mut stale = 0usize;

    while let Some(current) = open.pop() {
        if current.cell == goal {
            break;
        }

        let ci = current.index;
        if state.visited[ci] {
            stale += 1;
            continue;
        }
        state.visited[ci] = true;
        expanded += 1;

        let next_distance = state.distance[ci] + 1;
        for neighbor in grid.open_neighbors(current.cell) {
            let Some(ni) = grid.index(neighbor) else {
                continue;
            };
            if next_distance < state.distance[ni] {
                state.distance[ni] = next_distance;
                state.came_from[ni] = Some(current.cell);
                open.push(OpenEntry {
                    cell: neighbor,
                    index: ni,
                    distance: next_distance,
                });
            }
        }
    }

    tracing::debug!(
        %start,
        %goal,
        expanded,
        stale,
        distance = (state.distance[goal_index] != UNREACHED).then_some(state.distance[goal_index]),
        "grid search finished"
    );

    Ok((state, goal_index))
}

/// Walk predecessor links from the goal back to the start.
fn reconstruct_path(
    state: &SearchState,
    grid: &Grid,
    start: Cell,
    goal: Cell,
    goal_index: usize,
) -> Vec<Cell> {
    if state.distance[goal_index] == UNREACHED {
        return Vec::new();
    }

    let mut path = Vec::with_capacity(state.distance[goal_index] as usize + 1);
    let mut current = goal;
    loop {
        path.push(current);
        if current == start {
            break;
        }
        match grid.index(current).and_then(|i| state.came_from[i]) {
            Some(prev) => current = prev,
            None => break,
        }
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarehouseError;

    fn c(row: i32, col: i32) -> Cell {
        Cell::new(row, col)
    }

    fn assert_contiguous(path: &[Cell]) {
        for pair in path.windows(2) {
            assert_eq!(
                pair[0].manhattan_distance(pair[1]),
                1,
                "non-adjacent step {} -> {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn open_three_by_three_corner_to_corner() {
        let grid = Grid::open(3, 3).unwrap();
        let path = find_path(&grid, c(0, 0), c(2, 2)).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&c(0, 0)));
        assert_eq!(path.last(), Some(&c(2, 2)));
        assert_contiguous(&path);
    }

    #[test]
    fn ties_resolve_in_row_major_order() {
        // Equal-distance frontier entries pop smallest cell first, which
        // drags the path along the top row before turning south.
        let grid = Grid::open(3, 3).unwrap();
        let path = find_path(&grid, c(0, 0), c(2, 2)).unwrap();
        assert_eq!(path, vec![c(0, 0), c(0, 1), c(0, 2), c(1, 2), c(2, 2)]);
    }

    #[test]
    fn blocked_column_disconnects_halves() {
        let grid = Grid::from_ascii(
            "
            .#.
            .#.
            .#.
            ",
        )
        .unwrap();
        assert!(find_path(&grid, c(0, 0), c(0, 2)).unwrap().is_empty());
        assert_eq!(shortest_distance(&grid, c(0, 0), c(0, 2)).unwrap(), None);
    }

    #[test]
    fn follows_the_only_corridor() {
        let grid = Grid::from_ascii(
            "
            ..#
            #.#
            #..
            ",
        )
        .unwrap();
        let path = find_path(&grid, c(0, 0), c(2, 2)).unwrap();
        assert_eq!(path, vec![c(0, 0), c(0, 1), c(1, 1), c(2, 1), c(2, 2)]);
    }

    #[test]
    fn detours_around_a_wall() {
        let grid = Grid::from_ascii(
            "
            .....
            .###.
            .#...
            ",
        )
        .unwrap();
        // Two columns apart, but the wall forces the long way round.
        let path = find_path(&grid, c(2, 0), c(2, 2)).unwrap();
        assert_eq!(path.len() - 1, 10);
        assert_contiguous(&path);
        assert_eq!(shortest_distance(&grid, c(2, 0), c(2, 2)).unwrap(), Some(10));
        for cell in &path {
            assert!(grid.is_traversable(*cell).unwrap(), "path enters wall at {cell}");
        }
    }

    #[test]
    fn start_equals_goal_is_single_cell() {
        let grid = Grid::from_ascii(".#").unwrap();
        assert_eq!(find_path(&grid, c(0, 0), c(0, 0)).unwrap(), vec![c(0, 0)]);
        // Identity holds even on a blocked cell.
        assert_eq!(find_path(&grid, c(0, 1), c(0, 1)).unwrap(), vec![c(0, 1)]);
        assert_eq!(shortest_distance(&grid, c(0, 1), c(0, 1)).unwrap(), Some(0));
    }

    #[test]
    fn blocked_start_still_expands() {
        let grid = Grid::from_ascii("#..").unwrap();
        let path = find_path(&grid, c(0, 0), c(0, 2)).unwrap();
        assert_eq!(path, vec![c(0, 0), c(0, 1), c(0, 2)]);
    }

    #[test]
    fn blocked_goal_is_unreachable() {
        let grid = Grid::from_ascii("..#").unwrap();
        assert!(find_path(&grid, c(0, 0), c(0, 2)).unwrap().is_empty());
    }

    #[test]
    fn out_of_bounds_endpoints_fail() {
        let grid = Grid::open(3, 3).unwrap();
        for (start, goal) in [
            (c(-1, 0), c(2, 2)),
            (c(0, 0), c(3, 0)),
            (c(0, 3), c(0, 0)),
            (c(0, 0), c(0, -5)),
            (c(i32::MIN, i32::MIN), c(0, 0)),
            (c(0, 0), c(i32::MAX, i32::MAX)),
        ] {
            let err = find_path(&grid, start, goal).unwrap_err();
            assert!(matches!(err, WarehouseError::OutOfBounds { .. }), "{err}");
        }
    }

    #[test]
    fn repeated_queries_are_identical() {
        let grid = Grid::from_ascii(
            "
            ......
            .##.#.
            ......
            .#.##.
            ......
            ",
        )
        .unwrap();
        let a = find_path(&grid, c(0, 0), c(4, 5)).unwrap();
        let b = find_path(&grid, c(0, 0), c(4, 5)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len() - 1, 9);
    }

    #[test]
    fn batch_queries_match_sequential() {
        let grid = Grid::from_ascii(
            "
            ....
            .##.
            ....
            ",
        )
        .unwrap();
        let queries = [
            (c(0, 0), c(2, 3)),
            (c(1, 0), c(1, 3)),
            (c(2, 2), c(2, 2)),
            (c(0, 0), c(1, 1)),
            (c(0, 0), c(9, 9)),
        ];
        let batch = find_paths(&grid, &queries);
        assert_eq!(batch.len(), queries.len());
        for (&(start, goal), result) in queries.iter().zip(&batch) {
            match find_path(&grid, start, goal) {
                Ok(expected) => assert_eq!(result.as_ref().unwrap(), &expected),
                Err(_) => assert!(result.is_err()),
            }
        }
    }

    #[test]
    fn frontier_pops_smallest_distance_first() {
        let mut heap = BinaryHeap::new();
        for (d, cell) in [(3, c(0, 0)), (1, c(5, 5)), (1, c(0, 4)), (2, c(1, 1))] {
            heap.push(OpenEntry {
                cell,
                index: 0,
                distance: d,
            });
        }
        let order: Vec<(u32, Cell)> = std::iter::from_fn(|| heap.pop())
            .map(|e| (e.distance, e.cell))
            .collect();
        assert_eq!(
            order,
            vec![(1, c(0, 4)), (1, c(5, 5)), (2, c(1, 1)), (3, c(0, 0))]
        );
    }
}
