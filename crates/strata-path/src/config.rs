//! Tunable search parameters.

use serde::{Deserialize, Serialize};

/// Parameters of the step cost model and of start/goal snapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathfinderConfig {
    /// Highest `y` examined when snapping a point down to a walkable cell.
    pub snap_max_height: i32,
    /// Height added to a cell's `y` for its waypoint, so an agent stands on top of it.
    pub waypoint_height_offset: f32,
    /// Cost of a horizontal axis-aligned step.
    pub orthogonal_cost: f32,
    /// Cost of a horizontal diagonal step.
    pub diagonal_cost: f32,
    /// Surcharge added to any step that moves upward.
    pub climb_penalty: f32,
    /// Largest vertical change allowed in a single step.
    pub max_step_height: i32,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            snap_max_height: 32,
            waypoint_height_offset: 1.0,
            orthogonal_cost: 1.0,
            diagonal_cost: std::f32::consts::SQRT_2,
            climb_penalty: 0.5,
            max_step_height: 1,
        }
    }
}

impl PathfinderConfig {
    /// Defaults with the snap ceiling at twice the chunk height.
    pub fn for_chunk_size(chunk_size: usize) -> Self {
        Self {
            snap_max_height: (chunk_size * 2) as i32,
            ..Self::default()
        }
    }

    /// Raises the snap ceiling to at least twice `chunk_size`, so a scan
    /// always starts above the tallest terrain the world can hold.
    pub fn covering_chunk_size(mut self, chunk_size: usize) -> Self {
        let ceiling = i32::try_from(chunk_size.saturating_mul(2)).unwrap_or(i32::MAX);
        self.snap_max_height = self.snap_max_height.max(ceiling);
        self
    }
}
