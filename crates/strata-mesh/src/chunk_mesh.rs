//! Chunk mesh data: one shared vertex buffer and one index list per material group.

use glam::{IVec3, Vec2, Vec3};

use crate::face_direction::FaceDirection;
use crate::material::MaterialGroup;

/// UVs for the four corners of every face, in [`FaceDirection::corners`] order.
const FACE_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Metadata for one emitted face, used for statistics and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadInfo {
    /// Which face direction this quad belongs to.
    pub direction: FaceDirection,
    /// Submesh the quad's triangles were written to.
    pub group: MaterialGroup,
    /// Chunk-local cell that owns the face.
    pub cell: IVec3,
}

/// The output of one meshing pass over a chunk.
///
/// Positions are chunk-local. Indices are `u32` unconditionally so large
/// chunk sizes never overflow a 16-bit index range. The same mesh value backs
/// both the render and the collision representation.
#[derive(Clone, Debug, Default)]
pub struct ChunkMesh {
    /// Vertex positions, four per face.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals, filled by [`ChunkMesh::recalculate_normals`].
    pub normals: Vec<Vec3>,
    /// Per-vertex texture coordinates.
    pub uvs: Vec<Vec2>,
    /// Triangle lists indexed by [`MaterialGroup::index`].
    pub submeshes: [Vec<u32>; MaterialGroup::COUNT],
    /// One entry per emitted face.
    pub quads: Vec<QuadInfo>,
}

impl ChunkMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the face of `cell` pointing in `direction` to `group`'s submesh.
    ///
    /// Normals are left zeroed until [`ChunkMesh::recalculate_normals`].
    pub fn push_face(&mut self, direction: FaceDirection, cell: IVec3, group: MaterialGroup) {
        let base = self.positions.len() as u32;
        let offset = cell.as_vec3();

        for (corner, uv) in direction.corners().into_iter().zip(FACE_UVS) {
            self.positions.push(offset + corner);
            self.uvs.push(uv);
            self.normals.push(Vec3::ZERO);
        }

        self.submeshes[group.index()].extend_from_slice(&[
            base,
            base + 1,
            base + 2,
            base,
            base + 2,
            base + 3,
        ]);

        self.quads.push(QuadInfo {
            direction,
            group,
            cell,
        });
    }

    /// Recomputes per-vertex normals from triangle geometry.
    ///
    /// Each vertex receives the normalized sum of the (area-weighted) normals
    /// of every triangle that references it, across all submeshes.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for indices in &self.submeshes {
            for tri in indices.chunks_exact(3) {
                let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
                let n = (self.positions[b] - self.positions[a])
                    .cross(self.positions[c] - self.positions[a]);
                normals[a] += n;
                normals[b] += n;
                normals[c] += n;
            }
        }
        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
    }

    /// Index list of one material group.
    pub fn indices(&self, group: MaterialGroup) -> &[u32] {
        &self.submeshes[group.index()]
    }

    /// Total number of emitted faces.
    pub fn face_count(&self) -> usize {
        self.quads.len()
    }

    /// Total number of triangles across all submeshes.
    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.len() / 3).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Counts the faces emitted for a specific direction.
    pub fn count_quads_for_direction(&self, direction: FaceDirection) -> usize {
        self.quads
            .iter()
            .filter(|q| q.direction == direction)
            .count()
    }

    /// Counts the faces written to a specific material group.
    pub fn count_quads_for_group(&self, group: MaterialGroup) -> usize {
        self.quads.iter().filter(|q| q.group == group).count()
    }
}
