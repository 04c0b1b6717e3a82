//! A* pathfinding over the voxel grid with goal reservation.
//!
//! [`Pathfinder`] snaps arbitrary world points to walkable cells, reserves the
//! destination, and searches the 3D grid under a step-legality rule that
//! limits climbing and forbids cutting diagonally past solid corners.

mod error;
mod node;
mod open_set;
mod path;
mod pathfinder;
mod reservation;

pub mod config;

pub use config::PathfinderConfig;
pub use error::PathError;
pub use path::Path;
pub use pathfinder::Pathfinder;
pub use reservation::ReservationSet;
