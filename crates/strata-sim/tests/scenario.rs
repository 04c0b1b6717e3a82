//! End-to-end scenarios over the public API of the voxel, mesh, and path crates.

use std::f32::consts::SQRT_2;

use glam::{IVec3, Vec3};
use strata_config::Config;
use strata_mesh::{FaceDirection, MaterialGroup};
use strata_path::{PathError, Pathfinder, PathfinderConfig};
use strata_sim::Simulation;
use strata_voxel::{BlockType, ChunkCoord, VoxelWorld, WorldGenParams};

const EPS: f32 = 1e-3;

fn slab_16() -> VoxelWorld {
    VoxelWorld::generate(&WorldGenParams {
        size_x_chunks: 1,
        size_z_chunks: 1,
        chunk_size: 16,
        ground_height: 8,
    })
}

#[test]
fn test_single_chunk_layers_and_walkability() {
    let world = slab_16();
    for x in 0..16 {
        for z in 0..16 {
            for y in 0..16 {
                let kind = world.get_block(IVec3::new(x, y, z)).map(|b| b.kind);
                let expected = match y {
                    0..7 => BlockType::Dirt,
                    7 => BlockType::Grass,
                    _ => BlockType::Air,
                };
                assert_eq!(kind, Some(expected), "({x}, {y}, {z})");
            }
            assert!(world.is_walkable(IVec3::new(x, 8, z)));
        }
    }
}

#[test]
fn test_diagonal_path_across_slab() {
    let world = slab_16();
    let mut finder = Pathfinder::new(PathfinderConfig::for_chunk_size(16));
    let path = finder
        .find_path(&world, Vec3::new(1.0, 9.0, 1.0), Vec3::new(14.0, 9.0, 14.0))
        .expect("path across flat slab");

    assert_eq!(path.waypoints().len(), 14);
    assert!((path.cost() - 13.0 * SQRT_2).abs() < EPS, "cost {}", path.cost());
    for (i, cell) in path.cells().iter().enumerate() {
        assert_eq!(*cell, IVec3::new(1 + i as i32, 8, 1 + i as i32));
    }
    let first = path.waypoints()[0];
    assert!((first - Vec3::new(1.5, 9.0, 1.5)).length() < EPS);
}

#[test]
fn test_reservation_lifecycle() {
    let world = slab_16();
    let mut finder = Pathfinder::default();
    let goal = Vec3::new(12.0, 9.0, 3.0);

    let held = finder
        .find_path(&world, Vec3::new(2.0, 9.0, 2.0), goal)
        .expect("first agent");
    let denied = finder.find_path(&world, Vec3::new(2.0, 9.0, 10.0), goal);
    assert!(matches!(denied, Err(PathError::GoalReserved(_))));

    finder.release_path(&held);
    let granted = finder.find_path(&world, Vec3::new(2.0, 9.0, 10.0), goal);
    assert!(granted.is_ok());
}

#[test]
fn test_face_culling_across_every_seam() {
    let mut config = Config::default();
    config.world = WorldGenParams {
        size_x_chunks: 3,
        size_z_chunks: 3,
        chunk_size: 8,
        ground_height: 4,
    };
    let sim = Simulation::new(&config).expect("valid config");

    // The center chunk is surrounded on all four sides: no side faces at all.
    let center = sim.mesh(ChunkCoord::new(1, 1)).expect("meshed");
    for dir in [
        FaceDirection::PosX,
        FaceDirection::NegX,
        FaceDirection::PosZ,
        FaceDirection::NegZ,
    ] {
        assert_eq!(center.render.count_quads_for_direction(dir), 0, "{dir:?}");
    }
    assert_eq!(center.render.count_quads_for_group(MaterialGroup::Grass), 64);

    // World total: top and bottom of 24×24 columns plus the outer perimeter.
    let stats = sim.mesh_stats();
    assert_eq!(stats.faces, 2 * 24 * 24 + 4 * 24 * 4);
    assert_eq!(stats.triangles, 2 * stats.faces);
}

#[test]
fn test_sphere_edit_remesh_and_reroute() {
    let mut config = Config::default();
    config.world = WorldGenParams {
        size_x_chunks: 2,
        size_z_chunks: 1,
        chunk_size: 16,
        ground_height: 8,
    };
    let mut sim = Simulation::new(&config).expect("valid config");

    // Carve a crater straddling the seam between the two chunks.
    sim.fill_sphere(IVec3::new(16, 7, 8), 3.0, BlockType::Air);
    assert!(sim.pending_rebuilds().contains(ChunkCoord::new(0, 0)));
    assert!(sim.pending_rebuilds().contains(ChunkCoord::new(1, 0)));
    assert_eq!(sim.rebuild_dirty(), 2);

    let west = sim.mesh(ChunkCoord::new(0, 0)).expect("meshed");
    assert!(west.render.count_quads_for_direction(FaceDirection::PosX) > 0);

    // A straight walk across the crater rim still finds a route.
    let path = sim
        .find_path(Vec3::new(10.0, 9.0, 1.0), Vec3::new(22.0, 9.0, 1.0))
        .expect("route along the edge");
    assert!(path.cells().iter().all(|c| sim.world().is_walkable(*c)));
    sim.release_path(&path);
}

#[test]
fn test_edit_invalidates_path_target() {
    let mut config = Config::default();
    config.world = WorldGenParams {
        size_x_chunks: 1,
        size_z_chunks: 1,
        chunk_size: 16,
        ground_height: 8,
    };
    let mut sim = Simulation::new(&config).expect("valid config");

    // Wall off the goal with a two-block ring the agent cannot climb.
    let goal = IVec3::new(12, 8, 12);
    for dx in -1..=1 {
        for dz in -1..=1 {
            if dx != 0 || dz != 0 {
                sim.set_block(goal + IVec3::new(dx, 0, dz), BlockType::Stone, 0);
                sim.set_block(goal + IVec3::new(dx, 1, dz), BlockType::Stone, 0);
            }
        }
    }
    let result = sim.find_path(Vec3::new(2.0, 9.0, 2.0), Vec3::new(12.5, 9.0, 12.5));
    assert!(matches!(result, Err(PathError::NoRoute { .. })));
    assert!(!sim.pathfinder().is_reserved(goal));
}

#[test]
fn test_tall_chunks_from_config_file_are_pathable() {
    let dir = tempfile::tempdir().unwrap();
    let mut saved = Config::default();
    saved.world = WorldGenParams {
        size_x_chunks: 1,
        size_z_chunks: 1,
        chunk_size: 48,
        ground_height: 40,
    };
    saved.save(dir.path()).unwrap();

    let config = Config::load_or_create(dir.path()).unwrap();
    assert_eq!(config.world.chunk_size, 48);
    assert_eq!(config.pathfinding.snap_max_height, 32);
    let mut sim = Simulation::new(&config).expect("valid config");

    let path = sim
        .find_path(Vec3::new(2.0, 41.0, 2.0), Vec3::new(10.0, 41.0, 10.0))
        .expect("surface above the configured snap ceiling");
    assert_eq!(path.start(), IVec3::new(2, 40, 2));
    assert_eq!(path.goal(), IVec3::new(10, 40, 10));
    assert!((path.cost() - 8.0 * SQRT_2).abs() < EPS, "cost {}", path.cost());
    assert_eq!(sim.pathfinder().config().snap_max_height, 96);
}
