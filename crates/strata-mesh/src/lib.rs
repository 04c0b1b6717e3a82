//! Surface extraction: face-culled chunk meshes partitioned into material groups.

pub mod chunk_mesh;
pub mod face_direction;
pub mod face_mask;
pub mod material;
pub mod mesher;
pub mod visibility;

pub use chunk_mesh::{ChunkMesh, QuadInfo};
pub use face_direction::FaceDirection;
pub use face_mask::FaceMask;
pub use material::MaterialGroup;
pub use mesher::SurfaceMesher;
pub use visibility::{compute_visible_faces, count_visible_faces};
