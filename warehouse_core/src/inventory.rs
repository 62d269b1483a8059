// Name-keyed inventory index.
//
// Items live in a `BTreeMap<String, Vec<Item>>`: the map keeps names sorted
// and gives O(log n) insert and lookup, and the per-name `Vec` keeps
// duplicate names as distinct entries in insertion order. Iterating the
// index therefore yields items sorted by name, ties in insertion order,
// exactly what a stable re-sort after every insert would give.
//
// Locations are recorded per name in a second map. The index does not know
// the grid; `Warehouse::add_item` bounds-checks cells before they get here.
//
// Duplicate names: `find_by_name` returns the leftmost (earliest-inserted)
// entry. `find_all` exposes the rest.
//
// Not internally synchronized. `insert` takes `&mut self`, so sharing an
// index across threads needs an outer lock.

use crate::types::{Cell, Item};
use std::collections::BTreeMap;

/// Sorted registry of items and where they were placed.
///
/// Each `insert` files the item under its exact, case-sensitive name and
/// appends the placement cell to that name's location list. Nothing is ever
/// merged: inserting "Bolt" twice leaves two entries and two locations, in
/// insertion order, and `len()` counts both.
///
/// Iteration via `items()` and `names()` is sorted by name, which is what
/// makes lookups O(log n) without re-sorting on every insert.
#[derive(Clone, Debug, Default)]
pub struct ItemIndex {
    items: BTreeMap<String, Vec<Item>>,
    locations: BTreeMap<String, Vec<Cell>>,
    len: usize,
}

impl ItemIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item` and record `cell` under its name.
    pub fn insert(&mut self, item: Item, cell: Cell) {
        tracing::trace!(name = %item.name, quantity = item.quantity, %cell, "indexing item");
        self.locations
            .entry(item.name.clone())
            .or_default()
            .push(cell);
        self.items.entry(item.name.clone()).or_default().push(item);
        self.len += 1;
    }

    /// Exact-name lookup. With duplicates, the earliest-inserted entry wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.get(name).and_then(|entries| entries.first())
    }

    /// Every entry stored under `name`, in insertion order.
    pub fn find_all(&self, name: &str) -> &[Item] {
        self.items.get(name).map_or(&[], Vec::as_slice)
    }

    /// Every cell recorded for `name`, in insertion order.
    pub fn locations(&self, name: &str) -> &[Cell] {
        self.locations.get(name).map_or(&[], Vec::as_slice)
    }

    /// Sum of quantities across all entries named `name`.
    pub fn total_quantity(&self, name: &str) -> u64 {
        self.find_all(name)
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// All items sorted by name, duplicates in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values().flatten()
    }

    /// Distinct names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Number of entries, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
