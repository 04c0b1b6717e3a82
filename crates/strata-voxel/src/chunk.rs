//! Dense `size³` block storage for one chunk column.
//!
//! [`Chunk`] stores every cell explicitly (x varies fastest) and offers a
//! bounds-checked API over local coordinates. Out-of-bounds reads return air
//! and out-of-bounds writes are ignored, both with a warning log.

use glam::IVec3;

use crate::block::{Block, BlockType};
use crate::coords::ChunkCoord;

/// A cubic chunk of blocks with a version counter bumped on every edit.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Position of this chunk in the chunk grid.
    coord: ChunkCoord,
    /// Side length in blocks.
    size: usize,
    /// `size³` blocks, indexed `x + y * size + z * size * size`.
    blocks: Vec<Block>,
    /// Monotonically increasing version counter, incremented on each mutation.
    version: u64,
}

impl Chunk {
    /// Creates a chunk filled with air.
    pub fn new(coord: ChunkCoord, size: usize) -> Self {
        Self {
            coord,
            size,
            blocks: vec![Block::AIR; size * size * size],
            version: 0,
        }
    }

    /// Creates a chunk with the flat terrain fill used at world generation.
    ///
    /// Per column: `y < ground_height - 1` is dirt, `y == ground_height - 1`
    /// is grass, everything above is air. A `ground_height` of zero yields an
    /// all-air chunk.
    pub fn generate_flat(coord: ChunkCoord, size: usize, ground_height: usize) -> Self {
        let mut chunk = Self::new(coord, size);
        for z in 0..size {
            for y in 0..size.min(ground_height) {
                let kind = if y + 1 == ground_height {
                    BlockType::Grass
                } else {
                    BlockType::Dirt
                };
                for x in 0..size {
                    let idx = chunk.linear_index(x, y, z);
                    chunk.blocks[idx] = Block::new(kind);
                }
            }
        }
        chunk
    }

    /// Returns this chunk's grid coordinate.
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Returns the side length in blocks.
    pub fn size(&self) -> usize {
        self.size
    }

    /// World position of local cell `(0, 0, 0)`, used for border queries.
    pub fn origin(&self) -> IVec3 {
        self.coord.origin(self.size as i32)
    }

    /// Checks whether every axis of `local` lies in `[0, size)`.
    pub fn in_bounds(&self, local: IVec3) -> bool {
        let size = self.size as i32;
        local.x >= 0
            && local.y >= 0
            && local.z >= 0
            && local.x < size
            && local.y < size
            && local.z < size
    }

    /// Returns the block at `local`, or air if it is out of bounds.
    pub fn get(&self, local: IVec3) -> Block {
        if !self.in_bounds(local) {
            tracing::warn!(?local, "Chunk::get out of bounds");
            return Block::AIR;
        }
        self.blocks[self.linear_index(local.x as usize, local.y as usize, local.z as usize)]
    }

    /// Replaces the block at `local`.
    ///
    /// Returns `false` (and leaves the chunk untouched) if `local` is out of bounds.
    pub fn set(&mut self, local: IVec3, block: Block) -> bool {
        if !self.in_bounds(local) {
            tracing::warn!(?local, "Chunk::set out of bounds");
            return false;
        }
        let idx = self.linear_index(local.x as usize, local.y as usize, local.z as usize);
        self.blocks[idx] = block;
        self.version += 1;
        true
    }

    /// Returns `true` if the block at `local` is in bounds and solid.
    pub fn is_solid(&self, local: IVec3) -> bool {
        self.in_bounds(local) && self.get(local).is_solid()
    }

    /// Returns the current version counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns all blocks in storage order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of solid blocks in the chunk.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_solid()).count()
    }

    /// Converts `(x, y, z)` to a linear index (x varies fastest).
    fn linear_index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.size && y < self.size && z < self.size);
        x + y * self.size + z * self.size * self.size
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn origin_chunk() -> Chunk {
        Chunk::new(ChunkCoord::new(0, 0), 16)
    }

    #[test]
    fn test_new_chunk_is_all_air() {
        let chunk = origin_chunk();
        assert_eq!(chunk.blocks().len(), 16 * 16 * 16);
        assert_eq!(chunk.solid_count(), 0);
        assert_eq!(chunk.get(IVec3::new(15, 15, 15)), Block::AIR);
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let mut chunk = origin_chunk();
        let stone = Block::with_data(BlockType::Stone, 3);
        assert!(chunk.set(IVec3::new(5, 10, 2), stone));
        assert_eq!(chunk.get(IVec3::new(5, 10, 2)), stone);
        // Neighbors untouched.
        assert_eq!(chunk.get(IVec3::new(4, 10, 2)), Block::AIR);
        assert_eq!(chunk.get(IVec3::new(5, 11, 2)), Block::AIR);
        assert_eq!(chunk.get(IVec3::new(5, 10, 3)), Block::AIR);
    }

    #[test]
    fn test_in_bounds_edges() {
        let chunk = origin_chunk();
        assert!(chunk.in_bounds(IVec3::ZERO));
        assert!(chunk.in_bounds(IVec3::splat(15)));
        assert!(!chunk.in_bounds(IVec3::new(16, 0, 0)));
        assert!(!chunk.in_bounds(IVec3::new(0, -1, 0)));
        assert!(!chunk.in_bounds(IVec3::new(0, 0, 16)));
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut chunk = origin_chunk();
        assert!(!chunk.set(IVec3::new(16, 0, 0), Block::new(BlockType::Dirt)));
        assert!(!chunk.set(IVec3::new(0, -1, 0), Block::new(BlockType::Dirt)));
        assert_eq!(chunk.version(), 0);
        assert_eq!(chunk.solid_count(), 0);
    }

    #[test]
    fn test_get_out_of_bounds_returns_air() {
        let chunk = Chunk::generate_flat(ChunkCoord::new(0, 0), 16, 8);
        assert_eq!(chunk.get(IVec3::new(0, -1, 0)), Block::AIR);
        assert_eq!(chunk.get(IVec3::new(-1, 0, 0)), Block::AIR);
    }

    #[test]
    fn test_generate_flat_layers() {
        let chunk = Chunk::generate_flat(ChunkCoord::new(0, 0), 16, 8);
        for y in 0..16 {
            let expected = match y {
                0..=6 => BlockType::Dirt,
                7 => BlockType::Grass,
                _ => BlockType::Air,
            };
            assert_eq!(chunk.get(IVec3::new(3, y, 9)).kind, expected, "y={y}");
        }
        assert_eq!(chunk.solid_count(), 16 * 16 * 8);
        assert_eq!(chunk.version(), 0);
    }

    #[test]
    fn test_generate_flat_zero_ground_is_empty() {
        let chunk = Chunk::generate_flat(ChunkCoord::new(0, 0), 8, 0);
        assert_eq!(chunk.solid_count(), 0);
    }

    #[test]
    fn test_version_bumps_on_each_set() {
        let mut chunk = origin_chunk();
        chunk.set(IVec3::ZERO, Block::new(BlockType::Dirt));
        chunk.set(IVec3::ZERO, Block::new(BlockType::Stone));
        assert_eq!(chunk.version(), 2);
    }

    #[test]
    fn test_origin_uses_chunk_size() {
        let chunk = Chunk::new(ChunkCoord::new(2, -1), 16);
        assert_eq!(chunk.origin(), IVec3::new(32, 0, -16));
    }
}
