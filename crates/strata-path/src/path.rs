use glam::{IVec3, Vec3};

/// A resolved route from a start cell to a reserved goal cell.
///
/// Always holds at least one cell. The goal stays reserved until the caller
/// releases it through [`crate::Pathfinder::release_path`] or
/// [`crate::Pathfinder::release`].
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    cells: Vec<IVec3>,
    waypoints: Vec<Vec3>,
    cost: f32,
}

impl Path {
    pub(crate) fn new(cells: Vec<IVec3>, waypoints: Vec<Vec3>, cost: f32) -> Self {
        debug_assert!(!cells.is_empty());
        debug_assert_eq!(cells.len(), waypoints.len());
        Self {
            cells,
            waypoints,
            cost,
        }
    }

    /// Grid cells from start to goal, inclusive.
    pub fn cells(&self) -> &[IVec3] {
        &self.cells
    }

    /// One world-space point per cell: its center, lifted to stand on top of it.
    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    /// Accumulated step cost.
    pub fn cost(&self) -> f32 {
        self.cost
    }

    pub fn start(&self) -> IVec3 {
        self.cells.first().copied().unwrap_or_default()
    }

    /// The reserved destination cell.
    pub fn goal(&self) -> IVec3 {
        self.cells.last().copied().unwrap_or_default()
    }

    /// Number of steps, one less than the number of waypoints.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}
