//! Tracking which chunk meshes go stale after block edits.
//!
//! A block edit always dirties its own chunk. An edit on a chunk border also
//! dirties the horizontally adjacent chunk, since that chunk's face culling
//! reads the edited cell across the seam. Chunks are columns, so there is no
//! vertical neighbor to invalidate.

use std::collections::BTreeSet;

use glam::IVec3;

use crate::coords::{ChunkCoord, local_axis};

/// Chunk coordinates dirtied by an edit at world position `pos`.
///
/// The containing chunk comes first, followed by any border neighbors. The
/// returned coordinates may name chunks that were never generated; consumers
/// skip those.
pub fn affected_chunks(pos: IVec3, chunk_size: i32) -> Vec<ChunkCoord> {
    let home = ChunkCoord::containing(pos.x, pos.z, chunk_size);
    let mut dirty = vec![home];

    let lx = local_axis(pos.x, chunk_size);
    let lz = local_axis(pos.z, chunk_size);

    if lx == 0 {
        dirty.push(home.offset(-1, 0));
    }
    if lx == chunk_size - 1 {
        dirty.push(home.offset(1, 0));
    }
    if lz == 0 {
        dirty.push(home.offset(0, -1));
    }
    if lz == chunk_size - 1 {
        dirty.push(home.offset(0, 1));
    }

    dirty
}

/// Deduplicated, deterministically ordered set of chunks awaiting a rebuild.
///
/// Batch edits (a sphere fill, a totem) collect every touched chunk here so
/// each one is remeshed once per batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RebuildSet {
    chunks: BTreeSet<ChunkCoord>,
}

impl RebuildSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single chunk coordinate.
    pub fn insert(&mut self, coord: ChunkCoord) -> bool {
        self.chunks.insert(coord)
    }

    /// Records an edit at world position `pos`, adding every affected chunk.
    pub fn record_edit(&mut self, pos: IVec3, chunk_size: i32) {
        self.chunks.extend(affected_chunks(pos, chunk_size));
    }

    /// Merges another set into this one.
    pub fn merge(&mut self, other: RebuildSet) {
        self.chunks.extend(other.chunks);
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterates in `(x, z)` order.
    pub fn iter(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.iter().copied()
    }

    /// Removes and returns every coordinate, leaving the set empty.
    pub fn take(&mut self) -> Vec<ChunkCoord> {
        std::mem::take(&mut self.chunks).into_iter().collect()
    }
}

impl Extend<ChunkCoord> for RebuildSet {
    fn extend<I: IntoIterator<Item = ChunkCoord>>(&mut self, iter: I) {
        self.chunks.extend(iter);
    }
}

impl FromIterator<ChunkCoord> for RebuildSet {
    fn from_iter<I: IntoIterator<Item = ChunkCoord>>(iter: I) -> Self {
        Self {
            chunks: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
