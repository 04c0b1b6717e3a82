//! Face culling: which faces of a chunk's solid cells border non-solid space.

use glam::IVec3;
use strata_voxel::{Chunk, VoxelQuery};

use crate::face_direction::FaceDirection;
use crate::face_mask::FaceMask;

/// Computes a per-cell [`FaceMask`] for a chunk.
///
/// For each solid cell, checks all six neighbors. Neighbors inside the chunk
/// are read directly; neighbors across a chunk border (including above and
/// below the column) are resolved through `world` at the corresponding world
/// coordinate, so a face toward an absent chunk is visible.
///
/// Returns a flat `Vec` of length `size³`, in chunk storage order
/// (`x + y * size + z * size * size`). Non-solid cells have no visible faces.
pub fn compute_visible_faces<W: VoxelQuery + ?Sized>(chunk: &Chunk, world: &W) -> Vec<FaceMask> {
    let size = chunk.size() as i32;
    let origin = chunk.origin();
    let mut result = vec![FaceMask::EMPTY; chunk.blocks().len()];

    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                let cell = IVec3::new(x, y, z);
                if !chunk.is_solid(cell) {
                    continue;
                }

                let mut faces = FaceMask::EMPTY;
                for dir in FaceDirection::ALL {
                    let neighbor = dir.offset(cell);
                    let occluded = if chunk.in_bounds(neighbor) {
                        chunk.is_solid(neighbor)
                    } else {
                        world.is_solid(origin + neighbor)
                    };
                    if !occluded {
                        faces.insert(dir);
                    }
                }

                let idx = (x + y * size + z * size * size) as usize;
                result[idx] = faces;
            }
        }
    }

    result
}

/// Total number of faces across `faces`.
pub fn count_visible_faces(faces: &[FaceMask]) -> usize {
    faces.iter().map(|f| f.len()).sum()
}
