//! Exclusive claims on destination cells.

use glam::IVec3;
use rustc_hash::FxHashSet;

/// Set of cells currently claimed as some agent's path destination.
///
/// A reserved cell has exactly one holder; a second claim fails until the
/// holder releases it.
#[derive(Debug, Default)]
pub struct ReservationSet {
    cells: FxHashSet<IVec3>,
}

impl ReservationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `cell`. Returns `false` if it is already held.
    pub fn try_reserve(&mut self, cell: IVec3) -> bool {
        self.cells.insert(cell)
    }

    /// Releases `cell`. Returns `false` if it was not held.
    pub fn release(&mut self, cell: IVec3) -> bool {
        self.cells.remove(&cell)
    }

    pub fn is_reserved(&self, cell: IVec3) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
