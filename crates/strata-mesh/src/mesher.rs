//! Face-culling surface extraction for one chunk.

use glam::IVec3;
use strata_voxel::{Chunk, VoxelQuery};

use crate::chunk_mesh::ChunkMesh;
use crate::material::MaterialGroup;
use crate::visibility::compute_visible_faces;

/// Builds the visible-surface mesh of a chunk.
///
/// Every visible face is emitted as its own quad; coplanar faces are not
/// merged. Meshing never fails: a chunk with no solid blocks yields an empty
/// mesh.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceMesher;

impl SurfaceMesher {
    pub fn new() -> Self {
        Self
    }

    /// Meshes `chunk`, resolving neighbors across its borders through `world`.
    pub fn build<W: VoxelQuery + ?Sized>(&self, chunk: &Chunk, world: &W) -> ChunkMesh {
        let mut mesh = ChunkMesh::new();
        if chunk.solid_count() == 0 {
            tracing::trace!(coord = ?chunk.coord(), "empty chunk, skipping mesh");
            return mesh;
        }

        let size = chunk.size();
        let visible = compute_visible_faces(chunk, world);
        for (idx, faces) in visible.into_iter().enumerate() {
            if faces.is_empty() {
                continue;
            }
            let cell = IVec3::new(
                (idx % size) as i32,
                ((idx / size) % size) as i32,
                (idx / (size * size)) as i32,
            );
            let kind = chunk.get(cell).kind;
            for dir in faces.iter() {
                mesh.push_face(dir, cell, MaterialGroup::for_face(kind, dir));
            }
        }
        mesh.recalculate_normals();

        tracing::debug!(
            coord = ?chunk.coord(),
            faces = mesh.face_count(),
            triangles = mesh.triangle_count(),
            "meshed chunk"
        );
        mesh
    }
}
