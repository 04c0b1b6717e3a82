//! Multi-block edits: totem structures and spherical region fills.
//!
//! Every operation here returns the [`RebuildSet`] of chunks it touched, so
//! the caller can remesh each affected chunk exactly once per batch.

use glam::{IVec3, Vec3};

use crate::block::BlockType;
use crate::edit::RebuildSet;
use crate::world::VoxelWorld;

/// Totem footprint along X.
pub const TOTEM_WIDTH: i32 = 2;
/// Totem height; the top layer is [`BlockType::TotemTop`].
pub const TOTEM_HEIGHT: i32 = 3;
/// Totem footprint along Z.
pub const TOTEM_DEPTH: i32 = 2;

/// Free cells kept between a totem's footprint and its spawn ring.
const TOTEM_GAP: i32 = 1;
/// Thickness of the spawn ring.
const TOTEM_RING_DISTANCE: i32 = 1;

impl VoxelWorld {
    /// Places a totem with its lower-left-back corner at `pos`.
    ///
    /// Rejected (returns `None`, world untouched) unless the cell below `pos`
    /// is solid and the entire `TOTEM_WIDTH × TOTEM_HEIGHT × TOTEM_DEPTH`
    /// footprint is non-solid.
    pub fn place_totem(&mut self, pos: IVec3) -> Option<RebuildSet> {
        if !self.is_solid(pos - IVec3::Y) {
            tracing::debug!(?pos, "totem rejected: no footing");
            return None;
        }
        if footprint(pos).any(|cell| self.is_solid(cell)) {
            tracing::debug!(?pos, "totem rejected: footprint occupied");
            return None;
        }

        let size = self.chunk_size() as i32;
        let mut rebuild = RebuildSet::new();
        for cell in footprint(pos) {
            let kind = if cell.y == pos.y + TOTEM_HEIGHT - 1 {
                BlockType::TotemTop
            } else {
                BlockType::TotemBase
            };
            if self.set_block(cell, kind, 0) {
                rebuild.record_edit(cell, size);
            }
        }

        tracing::debug!(?pos, chunks = rebuild.len(), "placed totem");
        Some(rebuild)
    }

    /// Walkable cells at `pos.y` on the ring around a `width × depth` totem.
    ///
    /// The ring lies outside the footprint, separated from it by one free
    /// cell. Results are ordered by `x`, then `z`.
    pub fn positions_around_totem(&self, pos: IVec3, width: i32, depth: i32) -> Vec<IVec3> {
        let outer = TOTEM_GAP + TOTEM_RING_DISTANCE;
        let (min_x, max_x) = (pos.x - outer, pos.x + width - 1 + outer);
        let (min_z, max_z) = (pos.z - outer, pos.z + depth - 1 + outer);

        let mut result = Vec::new();
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                let on_ring = x == min_x || x == max_x || z == min_z || z == max_z;
                if !on_ring {
                    continue;
                }
                let cell = IVec3::new(x, pos.y, z);
                if self.is_walkable(cell) {
                    result.push(cell);
                }
            }
        }
        result
    }

    /// Sets every cell within Euclidean `radius` of `center` to `kind`.
    ///
    /// The returned set holds every generated chunk intersecting the cube of
    /// half-extent `ceil(radius) + 1` around `center`. That cube is one cell
    /// wider than the sphere, so chunks whose only change is a neighbor on
    /// their border are rebuilt as well. The scan is clipped to
    /// [`VoxelWorld::block_extent`], so any finite or infinite radius is safe.
    pub fn fill_sphere(&mut self, center: IVec3, radius: f32, kind: BlockType) -> RebuildSet {
        let radius = radius.max(0.0);
        let mut rebuild = RebuildSet::new();
        let Some((lo, hi)) = self.block_extent() else {
            return rebuild;
        };

        let half = (radius.ceil() as i64).saturating_add(1);
        let span = |c: i32, lo: i32, hi: i32| {
            let min = (c as i64).saturating_sub(half).max(lo as i64);
            let max = (c as i64).saturating_add(half).min(hi as i64);
            // Empty when the cube misses the world: min > max.
            min as i32..=max as i32
        };
        let center_f = center.as_vec3();

        let mut edited = 0usize;
        for x in span(center.x, lo.x, hi.x) {
            for z in span(center.z, lo.z, hi.z) {
                if self.get_chunk(x, z).is_some() {
                    rebuild.insert(self.chunk_coord_of(x, z));
                }
                for y in span(center.y, lo.y, hi.y) {
                    let cell = IVec3::new(x, y, z);
                    if Vec3::distance(center_f, cell.as_vec3()) <= radius
                        && self.set_block(cell, kind, 0)
                    {
                        edited += 1;
                    }
                }
            }
        }

        tracing::debug!(?center, radius, %kind, edited, chunks = rebuild.len(), "filled sphere");
        rebuild
    }
}

fn footprint(pos: IVec3) -> impl Iterator<Item = IVec3> {
    (0..TOTEM_WIDTH).flat_map(move |x| {
        (0..TOTEM_HEIGHT)
            .flat_map(move |y| (0..TOTEM_DEPTH).map(move |z| pos + IVec3::new(x, y, z)))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
