//! Voxel storage for the strata world: typed blocks, fixed-size chunk columns,
//! world/chunk/local coordinate mapping, and the edits built on top of them.

pub mod block;
pub mod chunk;
pub mod coords;
pub mod edit;
pub mod structures;
pub mod world;

pub use block::{Block, BlockType};
pub use chunk::Chunk;
pub use coords::{ChunkCoord, chunk_axis, local_axis, world_to_local};
pub use edit::{RebuildSet, affected_chunks};
pub use structures::{TOTEM_DEPTH, TOTEM_HEIGHT, TOTEM_WIDTH};
pub use world::{VoxelQuery, VoxelWorld, WorldGenParams};
