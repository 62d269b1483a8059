// warehouse_core — warehouse floor model and route search.
//
// This crate models a warehouse floor as an immutable occupancy grid, keeps
// a name-sorted index of stocked items and where they sit, and finds
// shortest obstacle-avoiding routes between cells. It is a pure in-memory
// library: no I/O beyond optional config loading, no global state.
//
// Module overview:
// - `types.rs`:       Cell, CellState, Item.
// - `error.rs`:       WarehouseError and the crate `Result` alias.
// - `grid.rs`:        Immutable row-major occupancy grid with bounds-checked reads.
// - `inventory.rs`:   ItemIndex — sorted name-keyed items plus their locations.
// - `pathfinding.rs`: Uniform-cost search with lazy stale-entry deletion.
// - `config.rs`:      WarehouseConfig — JSON-loadable floor parameters.
// - `layout.rs`:      Seeded obstacle placement producing a Grid.
// - `warehouse.rs`:   Warehouse — grid + inventory facade, route to item.
// - `prng`:           Re-exported from `warehouse_prng` — xoshiro256++ with SplitMix64 seeding.
//
// **Critical constraint: determinism.** Given the same grid and endpoints a
// search returns the same path, and given the same config a layout is the
// same floor. Frontier ties break on cell order; ordered collections are
// `BTreeMap`s; randomness comes only from the seeded PRNG.

pub mod config;
pub mod error;
pub mod grid;
pub mod inventory;
pub mod layout;
pub mod pathfinding;
pub use warehouse_prng as prng;
pub mod types;
pub mod warehouse;

pub use error::{Result, WarehouseError};
