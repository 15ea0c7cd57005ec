//! `CellStore`: Ordered sequence of cells.
//!
//! Insertion order is display order. Cells are never removed or reordered;
//! the only structural operations are append and insert-after.

use super::cell::{Cell, CellId};
use thiserror::Error;

/// Contract violations on the store.
///
/// The controller validates every index before touching the store, so these
/// only surface when the store's API is misused directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Index past the end of the store.
    #[error("cell index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Store length at the time of the call.
        len: usize,
    },
    /// Replacement cell does not carry the identity of the cell it replaces.
    #[error("cannot replace cell {expected} with cell {found}")]
    IdentityMismatch {
        /// Identity stored at the index.
        expected: CellId,
        /// Identity of the replacement.
        found: CellId,
    },
}

/// Ordered, insertion-only collection of cells.
#[derive(Debug, Clone, Default)]
pub struct CellStore {
    cells: Vec<Cell>,
}

impl CellStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Add a cell at the end. Returns its index.
    pub fn append(&mut self, cell: Cell) -> usize {
        self.cells.push(cell);
        self.cells.len() - 1
    }

    /// Insert a cell immediately after `index`.
    ///
    /// Appends when `index` is `None` or out of range. Cells after the
    /// insertion point shift right by one. Returns the new cell's index.
    pub fn insert_after(&mut self, index: Option<usize>, cell: Cell) -> usize {
        match index {
            Some(i) if i < self.cells.len() => {
                self.cells.insert(i + 1, cell);
                i + 1
            }
            _ => self.append(cell),
        }
    }

    /// Get the cell at `index`.
    pub fn get(&self, index: usize) -> Result<&Cell, StoreError> {
        let len = self.cells.len();
        self.cells
            .get(index)
            .ok_or(StoreError::IndexOutOfBounds { index, len })
    }

    /// Get a mutable reference to the cell at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Cell, StoreError> {
        let len = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfBounds { index, len })
    }

    /// Replace the cell at `index`.
    ///
    /// The replacement must carry the same identity, which also pins its kind.
    pub fn set(&mut self, index: usize, cell: Cell) -> Result<(), StoreError> {
        let slot = self.get_mut(index)?;
        if slot.id() != cell.id() {
            return Err(StoreError::IdentityMismatch {
                expected: slot.id(),
                found: cell.id(),
            });
        }
        *slot = cell;
        Ok(())
    }

    /// Current position of the cell with identity `id`.
    pub fn position_of(&self, id: CellId) -> Option<usize> {
        self.cells.iter().position(|c| c.id() == id)
    }

    /// Find a cell by identity.
    pub fn find(&self, id: CellId) -> Option<&Cell> {
        self.cells.iter().find(|c| c.id() == id)
    }

    /// Find a cell by identity, mutably.
    pub fn find_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|c| c.id() == id)
    }

    /// The last cell's index, if any.
    pub fn last_index(&self) -> Option<usize> {
        self.cells.len().checked_sub(1)
    }

    /// Iterate over cells in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a CellStore {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(contents: &[&str]) -> CellStore {
        let mut store = CellStore::new();
        for c in contents {
            store.append(Cell::shell(*c));
        }
        store
    }

    fn contents(store: &CellStore) -> Vec<&str> {
        store.iter().map(|c| c.content.as_str()).collect()
    }

    #[test]
    fn test_append_returns_index() {
        let mut store = CellStore::new();
        assert!(store.is_empty());
        assert_eq!(store.append(Cell::shell("a")), 0);
        assert_eq!(store.append(Cell::shell("b")), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.last_index(), Some(1));
    }

    #[test]
    fn test_insert_after_shifts_following_cells() {
        let mut store = store_of(&["a", "b", "c"]);
        let b_id = store.get(1).unwrap().id();

        let idx = store.insert_after(Some(0), Cell::markdown("new"));
        assert_eq!(idx, 1);
        assert_eq!(contents(&store), vec!["a", "new", "b", "c"]);
        assert_eq!(store.position_of(b_id), Some(2));
    }

    #[test]
    fn test_insert_after_none_or_out_of_range_appends() {
        let mut store = store_of(&["a"]);
        assert_eq!(store.insert_after(None, Cell::markdown("x")), 1);
        assert_eq!(store.insert_after(Some(10), Cell::markdown("y")), 2);
        assert_eq!(contents(&store), vec!["a", "x", "y"]);
    }

    #[test]
    fn test_insert_after_last() {
        let mut store = store_of(&["a", "b"]);
        assert_eq!(store.insert_after(Some(1), Cell::markdown("z")), 2);
        assert_eq!(contents(&store), vec!["a", "b", "z"]);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let store = store_of(&["a"]);
        assert_eq!(
            store.get(3).unwrap_err(),
            StoreError::IndexOutOfBounds { index: 3, len: 1 }
        );
    }

    #[test]
    fn test_set_replaces_same_identity() {
        let mut store = store_of(&["a"]);
        let mut cell = store.get(0).unwrap().clone();
        cell.content = "changed".to_string();
        store.set(0, cell).unwrap();
        assert_eq!(store.get(0).unwrap().content, "changed");
    }

    #[test]
    fn test_set_rejects_foreign_identity() {
        let mut store = store_of(&["a"]);
        let err = store.set(0, Cell::markdown("b")).unwrap_err();
        assert!(matches!(err, StoreError::IdentityMismatch { .. }));
        assert_eq!(store.get(0).unwrap().content, "a");
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut store = CellStore::new();
        let err = store.set(0, Cell::shell("a")).unwrap_err();
        assert_eq!(err, StoreError::IndexOutOfBounds { index: 0, len: 0 });
    }

    #[test]
    fn test_find_by_identity() {
        let mut store = store_of(&["a", "b"]);
        let id = store.get(1).unwrap().id();
        store.find_mut(id).unwrap().output = "out".to_string();
        assert_eq!(store.find(id).unwrap().output, "out");
        assert_eq!(store.position_of(CellId::fresh()), None);
    }
}
