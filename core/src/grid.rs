// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board grid and its copy-on-write owner.

use crate::observe::{GridObserver, Observers};
use crate::CellState;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Square matrix of cell states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create an empty grid with `size` rows and columns
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![CellState::Empty; size * size],
        }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// State of the cell at column `x`, row `y`.
    ///
    /// Panics if the position is off the board; callers own the bounds.
    pub fn cell_state(&self, x: usize, y: usize) -> CellState {
        assert!(
            x < self.size && y < self.size,
            "cell ({x}, {y}) outside {0}x{0} grid",
            self.size
        );
        self.cells[y * self.size + x]
    }

    /// Same as [`Grid::cell_state`] but returns `None` off the board
    pub fn get(&self, x: usize, y: usize) -> Option<CellState> {
        (x < self.size && y < self.size).then(|| self.cells[y * self.size + x])
    }

    /// Overwrite a cell. Returns false if the position is off the board.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        self.cells[y * self.size + x] = state;
        true
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Iterate `(x, y, state)` over occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_occupied())
            .map(move |(idx, c)| (idx % size, idx / size, *c))
    }
}

/// Owner of a grid that hands out immutable snapshots
///
/// Mutation goes through [`SharedGrid::update`], which clones the grid only if a
/// reader still holds the previous snapshot, then notifies observers.
pub struct SharedGrid {
    current: RwLock<Arc<Grid>>,
    observers: Observers<dyn GridObserver>,
}

impl SharedGrid {
    pub fn new(size: usize) -> Self {
        Self {
            current: RwLock::new(Arc::new(Grid::new(size))),
            observers: Observers::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.current.read().size()
    }

    /// Current grid contents
    pub fn snapshot(&self) -> Arc<Grid> {
        self.current.read().clone()
    }

    /// Register for change notifications
    pub fn subscribe(&self, observer: Arc<dyn GridObserver>) {
        self.observers.subscribe(observer);
    }

    /// Mutate the grid and notify observers once the write lock is released
    pub fn update<R>(&self, f: impl FnOnce(&mut Grid) -> R) -> R {
        let result = {
            let mut guard = self.current.write();
            f(Arc::make_mut(&mut guard))
        };
        self.observers.notify(|o| o.grid_changed());
        result
    }

    /// Like [`SharedGrid::update`], but only notifies when `f` succeeds.
    /// `f` must leave the grid untouched when it returns an error.
    pub fn try_update<T, E>(&self, f: impl FnOnce(&mut Grid) -> Result<T, E>) -> Result<T, E> {
        let result = {
            let mut guard = self.current.write();
            f(Arc::make_mut(&mut guard))
        };
        if result.is_ok() {
            self.observers.notify(|o| o.grid_changed());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(15);
        assert_eq!(grid.size(), 15);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.cell_state(14, 14), CellState::Empty);
    }

    #[test]
    fn set_and_read_back() {
        let mut grid = Grid::new(5);
        assert!(grid.set(1, 3, CellState::PlayerA));
        assert!(grid.set(4, 0, CellState::PlayerB));
        assert!(!grid.set(5, 0, CellState::PlayerA));

        assert_eq!(grid.cell_state(1, 3), CellState::PlayerA);
        assert_eq!(grid.get(4, 0), Some(CellState::PlayerB));
        assert_eq!(grid.get(0, 5), None);

        let occupied: Vec<_> = grid.occupied().collect();
        assert_eq!(
            occupied,
            vec![(4, 0, CellState::PlayerB), (1, 3, CellState::PlayerA)]
        );

        grid.clear();
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    #[should_panic]
    fn reading_off_the_board_panics() {
        Grid::new(3).cell_state(3, 0);
    }

    #[test]
    fn snapshots_are_unaffected_by_later_updates() {
        let shared = SharedGrid::new(3);
        let before = shared.snapshot();
        shared.update(|g| g.set(0, 0, CellState::PlayerA));

        assert_eq!(before.cell_state(0, 0), CellState::Empty);
        assert_eq!(shared.snapshot().cell_state(0, 0), CellState::PlayerA);
    }

    #[test]
    fn update_notifies_subscribers() {
        struct Count(AtomicUsize);
        impl GridObserver for Count {
            fn grid_changed(&self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let shared = SharedGrid::new(3);
        let count = Arc::new(Count(AtomicUsize::new(0)));
        shared.subscribe(count.clone());

        shared.update(|g| g.set(1, 1, CellState::PlayerB));
        shared.update(Grid::clear);

        assert_eq!(count.0.load(Ordering::SeqCst), 2);
    }
}
