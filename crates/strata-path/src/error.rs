use glam::IVec3;
use thiserror::Error;

/// Why a path request produced no path.
///
/// Every variant means "no path". None of them leaves the goal reserved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("no walkable cell below start column ({x}, {z})")]
    StartNotWalkable { x: i32, z: i32 },
    #[error("no walkable cell below goal column ({x}, {z})")]
    GoalNotWalkable { x: i32, z: i32 },
    #[error("goal cell {0} is already reserved")]
    GoalReserved(IVec3),
    #[error("no route from {start} to {goal}")]
    NoRoute { start: IVec3, goal: IVec3 },
}
