//! Simulation context tying the voxel world, its chunk meshes, and the
//! pathfinder together.
//!
//! [`Simulation`] owns exactly one [`VoxelWorld`] and one [`Pathfinder`].
//! Block edits go through it so every touched chunk is queued for a rebuild
//! once, and [`Simulation::rebuild_dirty`] remeshes the queue in one batch.

use std::sync::Arc;

use glam::{IVec3, Vec3};
use rustc_hash::FxHashMap;
use strata_config::{Config, ConfigError};
use strata_mesh::{ChunkMesh, SurfaceMesher};
use strata_path::{Path, PathError, Pathfinder};
use strata_voxel::{BlockType, ChunkCoord, RebuildSet, TOTEM_DEPTH, TOTEM_WIDTH, VoxelWorld};

/// Errors surfaced by the simulation and its binary.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not resolve a config directory; pass --config")]
    NoConfigDir,
    #[error(transparent)]
    Path(#[from] PathError),
}

/// The meshes built for one chunk, and the chunk version they reflect.
///
/// `render` and `collider` share one allocation: both consumers get the
/// same geometry.
#[derive(Clone, Debug)]
pub struct ChunkMeshes {
    pub render: Arc<ChunkMesh>,
    pub collider: Arc<ChunkMesh>,
    meshed_version: u64,
}

impl ChunkMeshes {
    fn new(mesh: ChunkMesh, meshed_version: u64) -> Self {
        let mesh = Arc::new(mesh);
        Self {
            render: Arc::clone(&mesh),
            collider: mesh,
            meshed_version,
        }
    }

    /// Chunk version the mesh was built from.
    pub fn meshed_version(&self) -> u64 {
        self.meshed_version
    }
}

/// Totals over every stored chunk mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub chunks: usize,
    pub faces: usize,
    pub triangles: usize,
}

pub struct Simulation {
    world: VoxelWorld,
    pathfinder: Pathfinder,
    mesher: SurfaceMesher,
    meshes: FxHashMap<ChunkCoord, ChunkMeshes>,
    pending: RebuildSet,
}

impl Simulation {
    /// Validates `config`, generates the world, and meshes every chunk.
    ///
    /// The pathfinder's snap ceiling is raised to twice the chunk size when
    /// the configured value is lower.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        let world = VoxelWorld::generate(&config.world);
        let pathfinding = config
            .pathfinding
            .clone()
            .covering_chunk_size(config.world.chunk_size);
        let pathfinder = Pathfinder::new(pathfinding);
        Ok(Self::from_parts(world, pathfinder))
    }

    /// Wraps an existing world and pathfinder, meshing every chunk once.
    pub fn from_parts(world: VoxelWorld, pathfinder: Pathfinder) -> Self {
        let mut sim = Self {
            world,
            pathfinder,
            mesher: SurfaceMesher::new(),
            meshes: FxHashMap::default(),
            pending: RebuildSet::new(),
        };
        let all: RebuildSet = sim.world.chunk_coords().collect();
        sim.rebuild_set(&all);
        sim
    }

    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }

    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    // --- Edits ---

    /// Writes one block and queues the chunks whose meshes it affects.
    pub fn set_block(&mut self, pos: IVec3, kind: BlockType, data: u8) -> bool {
        let written = self.world.set_block(pos, kind, data);
        if written {
            self.pending.record_edit(pos, self.world.chunk_size() as i32);
        }
        written
    }

    /// Places a totem and queues its chunks. Returns `false` if rejected.
    pub fn place_totem(&mut self, pos: IVec3) -> bool {
        match self.world.place_totem(pos) {
            Some(touched) => {
                self.pending.merge(touched);
                true
            }
            None => false,
        }
    }

    /// Fills a sphere and queues every chunk it touches.
    pub fn fill_sphere(&mut self, center: IVec3, radius: f32, kind: BlockType) {
        let touched = self.world.fill_sphere(center, radius, kind);
        self.pending.merge(touched);
    }

    /// Walkable spawn cells around a totem placed at `pos`.
    pub fn spawn_positions(&self, pos: IVec3) -> Vec<IVec3> {
        self.world.positions_around_totem(pos, TOTEM_WIDTH, TOTEM_DEPTH)
    }

    // --- Meshing ---

    /// Chunks queued for a rebuild since the last [`Simulation::rebuild_dirty`].
    pub fn pending_rebuilds(&self) -> &RebuildSet {
        &self.pending
    }

    /// Rebuilds every queued chunk once and clears the queue.
    ///
    /// Returns the number of meshes rebuilt.
    pub fn rebuild_dirty(&mut self) -> usize {
        let queued = std::mem::take(&mut self.pending);
        self.rebuild_set(&queued)
    }

    /// Rebuilds each chunk in `set` once, skipping coordinates with no chunk.
    pub fn rebuild_set(&mut self, set: &RebuildSet) -> usize {
        let rebuilt = set.iter().filter(|&coord| self.rebuild(coord)).count();
        tracing::debug!(requested = set.len(), rebuilt, "rebuilt chunk meshes");
        rebuilt
    }

    /// Remeshes one chunk. Returns `false` if no chunk exists at `coord`.
    pub fn rebuild(&mut self, coord: ChunkCoord) -> bool {
        let Some(chunk) = self.world.chunk(coord) else {
            return false;
        };
        let mesh = self.mesher.build(chunk, &self.world);
        self.meshes.insert(coord, ChunkMeshes::new(mesh, chunk.version()));
        true
    }

    pub fn mesh(&self, coord: ChunkCoord) -> Option<&ChunkMeshes> {
        self.meshes.get(&coord)
    }

    /// `true` if the chunk, or a neighbor cell on its border, changed since
    /// its mesh was built.
    pub fn is_mesh_stale(&self, coord: ChunkCoord) -> bool {
        match (self.world.chunk(coord), self.meshes.get(&coord)) {
            (Some(chunk), Some(meshes)) => {
                chunk.version() != meshes.meshed_version || self.pending.contains(coord)
            }
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    pub fn mesh_stats(&self) -> MeshStats {
        self.meshes.values().fold(
            MeshStats {
                chunks: self.meshes.len(),
                ..MeshStats::default()
            },
            |mut stats, m| {
                stats.faces += m.render.face_count();
                stats.triangles += m.render.triangle_count();
                stats
            },
        )
    }

    // --- Pathfinding ---

    /// Finds a path and reserves its goal. See [`Pathfinder::find_path`].
    pub fn find_path(&mut self, start: Vec3, end: Vec3) -> Result<Path, PathError> {
        self.pathfinder.find_path(&self.world, start, end)
    }

    /// Releases the goal reservation held by `path`.
    pub fn release_path(&mut self, path: &Path) -> bool {
        self.pathfinder.release_path(path)
    }
}
