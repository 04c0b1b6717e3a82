//! The voxel world: owner of every chunk column, keyed by [`ChunkCoord`].
//!
//! [`VoxelWorld`] is the single place where world coordinates are mapped to a
//! chunk and a local cell. The mesher (at chunk seams) and the pathfinder
//! (anywhere on the grid) both go through it, so they always agree on the
//! floor/mod semantics. Positions with no generated chunk read as absent,
//! which every predicate treats as open air.

use glam::IVec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockType};
use crate::chunk::Chunk;
use crate::coords::{ChunkCoord, world_to_local};

// ---------------------------------------------------------------------------
// Query trait
// ---------------------------------------------------------------------------

/// Read-only solidity queries over world coordinates.
///
/// The pathfinder and the mesher only depend on this trait. [`is_walkable`]
/// is derived from [`is_solid`] and should not be overridden with a
/// different definition.
///
/// [`is_solid`]: VoxelQuery::is_solid
/// [`is_walkable`]: VoxelQuery::is_walkable
pub trait VoxelQuery {
    /// Returns `true` if the cell at `pos` holds a solid block.
    ///
    /// Cells outside the generated world are not solid.
    fn is_solid(&self, pos: IVec3) -> bool;

    /// Solid footing below, and `pos` plus the cell above it both non-solid.
    fn is_walkable(&self, pos: IVec3) -> bool {
        self.is_solid(pos - IVec3::Y) && !self.is_solid(pos) && !self.is_solid(pos + IVec3::Y)
    }
}

// ---------------------------------------------------------------------------
// Generation parameters
// ---------------------------------------------------------------------------

/// Parameters read once when the world is generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldGenParams {
    /// World extent along X, in chunks.
    pub size_x_chunks: u32,
    /// World extent along Z, in chunks.
    pub size_z_chunks: u32,
    /// Side length of every chunk, in blocks.
    pub chunk_size: usize,
    /// Terrain height: the grass layer sits at `ground_height - 1`.
    pub ground_height: usize,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self {
            size_x_chunks: 4,
            size_z_chunks: 4,
            chunk_size: 16,
            ground_height: 8,
        }
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Owns all chunks and provides block access by world coordinate.
pub struct VoxelWorld {
    chunk_size: i32,
    chunks: FxHashMap<ChunkCoord, Chunk>,
}

impl VoxelWorld {
    /// Creates an empty world with the given chunk size (clamped to at least 1).
    pub fn new(chunk_size: usize) -> Self {
        debug_assert!(chunk_size > 0, "chunk size must be positive");
        Self {
            chunk_size: chunk_size.max(1) as i32,
            chunks: FxHashMap::default(),
        }
    }

    /// Generates `size_x × size_z` flat chunks at coordinates `(0.., 0..)`.
    pub fn generate(params: &WorldGenParams) -> Self {
        let mut world = Self::new(params.chunk_size);
        let size = world.chunk_size();
        for cx in 0..params.size_x_chunks as i32 {
            for cz in 0..params.size_z_chunks as i32 {
                let coord = ChunkCoord::new(cx, cz);
                world.insert_chunk(Chunk::generate_flat(coord, size, params.ground_height));
            }
        }
        tracing::info!(
            chunks = world.chunk_count(),
            chunk_size = size,
            ground_height = params.ground_height,
            "generated voxel world"
        );
        world
    }

    /// Inserts a chunk at its own coordinate, returning any chunk it replaced.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> Option<Chunk> {
        debug_assert_eq!(chunk.size(), self.chunk_size(), "chunk size mismatch");
        self.chunks.insert(chunk.coord(), chunk)
    }

    /// Side length of every chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size as usize
    }

    /// Number of chunks in the world.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Immutable access to the chunk at a chunk coordinate.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Returns the chunk containing world column `(x, z)`, if generated.
    pub fn get_chunk(&self, x: i32, z: i32) -> Option<&Chunk> {
        self.chunks.get(&self.chunk_coord_of(x, z))
    }

    /// Returns the chunk coordinate of world column `(x, z)`.
    pub fn chunk_coord_of(&self, x: i32, z: i32) -> ChunkCoord {
        ChunkCoord::containing(x, z, self.chunk_size)
    }

    /// Iterates over all chunk coordinates (unordered).
    pub fn chunk_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Iterates over all chunks (unordered).
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Returns the block at `pos`, or `None` if no chunk covers it.
    pub fn get_block(&self, pos: IVec3) -> Option<Block> {
        let chunk = self.get_chunk(pos.x, pos.z)?;
        let local = world_to_local(pos, self.chunk_size);
        chunk.in_bounds(local).then(|| chunk.get(local))
    }

    /// Replaces the block at `pos` with a fresh `(kind, data)` block.
    ///
    /// Silently ignored (returns `false`) when no chunk covers `pos` or `pos.y`
    /// is outside the chunk. The caller is responsible for remeshing the
    /// affected chunks, see [`crate::RebuildSet`].
    pub fn set_block(&mut self, pos: IVec3, kind: BlockType, data: u8) -> bool {
        let size = self.chunk_size;
        let coord = ChunkCoord::containing(pos.x, pos.z, size);
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            tracing::debug!(?pos, "set_block outside generated world ignored");
            return false;
        };
        let local = world_to_local(pos, size);
        if !chunk.in_bounds(local) {
            tracing::debug!(?pos, "set_block outside chunk height ignored");
            return false;
        }
        chunk.set(local, Block::with_data(kind, data))
    }

    /// Inclusive min and max block positions covered by generated chunks.
    ///
    /// Returns `None` for a world with no chunks.
    pub fn block_extent(&self) -> Option<(IVec3, IVec3)> {
        let mut coords = self.chunks.keys();
        let first = *coords.next()?;
        let (lo, hi) = coords.fold((first, first), |(lo, hi), c| {
            (
                ChunkCoord::new(lo.x.min(c.x), lo.z.min(c.z)),
                ChunkCoord::new(hi.x.max(c.x), hi.z.max(c.z)),
            )
        });
        let size = self.chunk_size;
        let min = IVec3::new(lo.x * size, 0, lo.z * size);
        let max = IVec3::new(hi.x * size + size - 1, size - 1, hi.z * size + size - 1);
        Some((min, max))
    }

    /// Returns `true` if `pos` holds a solid block. Absent chunks are air.
    pub fn is_solid(&self, pos: IVec3) -> bool {
        self.get_block(pos).is_some_and(Block::is_solid)
    }

    /// See [`VoxelQuery::is_walkable`].
    pub fn is_walkable(&self, pos: IVec3) -> bool {
        VoxelQuery::is_walkable(self, pos)
    }

    /// Highest solid `y` in column `(x, z)`.
    ///
    /// Returns `None` if no chunk covers the column or it is entirely air.
    pub fn ground_height(&self, x: i32, z: i32) -> Option<i32> {
        let chunk = self.get_chunk(x, z)?;
        (0..chunk.size() as i32)
            .rev()
            .find(|&y| self.is_solid(IVec3::new(x, y, z)))
    }

    /// Walkable cells at height `y` on the square ring of Chebyshev radius
    /// `radius` around `(center.x, center.z)`.
    ///
    /// Results are ordered by `x`, then `z`. A radius of zero tests only the
    /// center column.
    pub fn walkable_ring(&self, center: IVec3, radius: i32, y: i32) -> Vec<IVec3> {
        let radius = radius.max(0);
        let (min_x, max_x) = (center.x - radius, center.x + radius);
        let (min_z, max_z) = (center.z - radius, center.z + radius);

        let mut result = Vec::new();
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                let on_ring = x == min_x || x == max_x || z == min_z || z == max_z;
                if !on_ring {
                    continue;
                }
                let pos = IVec3::new(x, y, z);
                if self.is_walkable(pos) {
                    result.push(pos);
                }
            }
        }
        result
    }
}

impl VoxelQuery for VoxelWorld {
    fn is_solid(&self, pos: IVec3) -> bool {
        VoxelWorld::is_solid(self, pos)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
