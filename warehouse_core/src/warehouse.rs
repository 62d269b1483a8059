// Top-level warehouse: one floor grid plus the inventory stocked on it.
//
// `Warehouse` is the convenience entry point tying the pieces together. It
// owns an immutable `Grid` and an `ItemIndex`, bounds-checks item placements
// against the grid, and routes from any cell to the nearest place an item
// was stocked.
//
// Everything here delegates: searches go through `pathfinding.rs`, lookups
// through `inventory.rs`. Callers that only need one piece can use those
// modules directly with their own `Grid`.

use crate::config::WarehouseConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::inventory::ItemIndex;
use crate::layout::generate_grid;
use crate::pathfinding::{find_path, shortest_distance};
use crate::types::{Cell, Item};

/// A warehouse floor and its inventory.
#[derive(Clone, Debug)]
pub struct Warehouse {
    grid: Grid,
    inventory: ItemIndex,
}

impl Warehouse {
    /// An empty warehouse on an existing floor.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            inventory: ItemIndex::new(),
        }
    }

    /// An empty warehouse on a freshly seeded floor.
    pub fn from_config(config: &WarehouseConfig) -> Result<Self> {
        Ok(Self::new(generate_grid(config)?))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn inventory(&self) -> &ItemIndex {
        &self.inventory
    }

    /// Stock `item` at `cell`. Fails with `OutOfBounds` if `cell` is off the floor.
    ///
    /// The cell may be Blocked.
    pub fn add_item(&mut self, item: Item, cell: Cell) -> Result<()> {
        self.grid.linear_offset(cell)?;
        self.inventory.insert(item, cell);
        Ok(())
    }

    /// Exact-name lookup; see `ItemIndex::find_by_name`.
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.inventory.find_by_name(name)
    }

    /// Shortest path between two cells on this floor.
    pub fn find_path(&self, start: Cell, goal: Cell) -> Result<Vec<Cell>> {
        find_path(&self.grid, start, goal)
    }

    /// Shortest path from `start` to the closest reachable location of `name`.
    ///
    /// `Ok(None)` if the item was never stocked or every location is cut off.
    /// Equally close locations resolve to the one recorded first.
    pub fn route_to_item(&self, start: Cell, name: &str) -> Result<Option<Vec<Cell>>> {
        self.grid.linear_offset(start)?;

        let mut best: Option<(u32, Cell)> = None;
        for &location in self.inventory.locations(name) {
            let Some(d) = shortest_distance(&self.grid, start, location)? else {
                continue;
            };
            if best.is_none_or(|(best_d, _)| d < best_d) {
                best = Some((d, location));
            }
        }

        match best {
            Some((_, location)) => {
                tracing::debug!(%start, name, %location, "routing to nearest stock");
                find_path(&self.grid, start, location).map(Some)
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarehouseError;

    fn floor() -> Grid {
        Grid::from_ascii(
            "
            ......
            .####.
            ......
            ",
        )
        .unwrap()
    }

    #[test]
    fn add_and_find_items() {
        let mut wh = Warehouse::new(floor());
        wh.add_item(Item::new("Book", 50), Cell::new(0, 3)).unwrap();
        wh.add_item(Item::new("Laptop", 20), Cell::new(2, 5)).unwrap();

        let laptop = wh.find_item("Laptop").unwrap();
        assert_eq!(laptop.quantity, 20);
        assert!(wh.find_item("Phone").is_none());
        assert_eq!(wh.inventory().len(), 2);
    }

    #[test]
    fn add_item_off_the_floor_fails() {
        let mut wh = Warehouse::new(floor());
        let err = wh.add_item(Item::new("Crate", 1), Cell::new(3, 0)).unwrap_err();
        assert!(matches!(err, WarehouseError::OutOfBounds { .. }));
        assert!(wh.inventory().is_empty());
    }

    #[test]
    fn route_picks_the_nearer_location() {
        let mut wh = Warehouse::new(floor());
        // Stocked first but farther away.
        wh.add_item(Item::new("Tape", 3), Cell::new(2, 5)).unwrap();
        wh.add_item(Item::new("Tape", 7), Cell::new(0, 2)).unwrap();

        let path = wh.route_to_item(Cell::new(0, 0), "Tape").unwrap().unwrap();
        assert_eq!(path.first(), Some(&Cell::new(0, 0)));
        assert_eq!(path.last(), Some(&Cell::new(0, 2)));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn route_ties_go_to_first_recorded() {
        let mut wh = Warehouse::new(floor());
        wh.add_item(Item::new("Glue", 1), Cell::new(2, 0)).unwrap();
        wh.add_item(Item::new("Glue", 1), Cell::new(0, 2)).unwrap();

        let path = wh.route_to_item(Cell::new(0, 0), "Glue").unwrap().unwrap();
        assert_eq!(path.last(), Some(&Cell::new(2, 0)));
    }

    #[test]
    fn route_to_unknown_or_walled_off_item_is_none() {
        let grid = Grid::from_ascii(
            "
            ..#.
            ..#.
            ",
        )
        .unwrap();
        let mut wh = Warehouse::new(grid);
        wh.add_item(Item::new("Drill", 1), Cell::new(0, 3)).unwrap();

        assert!(wh.route_to_item(Cell::new(0, 0), "Saw").unwrap().is_none());
        assert!(wh.route_to_item(Cell::new(0, 0), "Drill").unwrap().is_none());
        assert!(wh.route_to_item(Cell::new(9, 9), "Drill").is_err());
    }

    #[test]
    fn seeded_warehouse_is_reproducible() {
        let config = WarehouseConfig {
            seed: 42,
            keep_clear: vec![Cell::new(0, 0)],
            ..WarehouseConfig::default()
        };
        let a = Warehouse::from_config(&config).unwrap();
        let b = Warehouse::from_config(&config).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.grid().dimensions(), (10, 10));
        assert!(a.grid().is_traversable(Cell::new(0, 0)).unwrap());
        assert_eq!(
            a.find_path(Cell::new(0, 0), Cell::new(9, 9)).unwrap(),
            b.find_path(Cell::new(0, 0), Cell::new(9, 9)).unwrap()
        );
    }
}
