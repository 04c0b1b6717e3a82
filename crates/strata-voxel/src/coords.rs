//! World, chunk, and local coordinate spaces.
//!
//! The world is chunked horizontally only: a chunk column is addressed by
//! `(cx, cz)` and spans `y` in `[0, chunk_size)`. All mapping uses Euclidean
//! division so negative world coordinates land in the correct chunk with a
//! non-negative local offset.

use glam::IVec3;

/// Identifies a chunk column in the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// Chunk-grid X coordinate.
    pub x: i32,
    /// Chunk-grid Z coordinate.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Returns the chunk containing world column `(x, z)`.
    pub fn containing(x: i32, z: i32, chunk_size: i32) -> Self {
        Self {
            x: chunk_axis(x, chunk_size),
            z: chunk_axis(z, chunk_size),
        }
    }

    /// Returns the coordinate offset by `(dx, dz)` chunks.
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// World position of this chunk's `(0, 0, 0)` local cell.
    pub fn origin(self, chunk_size: i32) -> IVec3 {
        IVec3::new(self.x * chunk_size, 0, self.z * chunk_size)
    }
}

/// `floor(world / chunk_size)` along one axis.
pub fn chunk_axis(world: i32, chunk_size: i32) -> i32 {
    world.div_euclid(chunk_size)
}

/// `world mod chunk_size`, normalized to `[0, chunk_size)`.
pub fn local_axis(world: i32, chunk_size: i32) -> i32 {
    world.rem_euclid(chunk_size)
}

/// Converts a world position to local coordinates inside its chunk column.
///
/// `y` passes through unchanged; the caller bounds-checks it.
pub fn world_to_local(pos: IVec3, chunk_size: i32) -> IVec3 {
    IVec3::new(
        local_axis(pos.x, chunk_size),
        pos.y,
        local_axis(pos.z, chunk_size),
    )
}
