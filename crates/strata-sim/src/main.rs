//! Headless driver: generates a world, meshes it, places a totem, and runs
//! one path query.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p strata-sim -- --from 1,9,1 --to 14,9,14`.

use std::process::ExitCode;

use clap::Parser;
use glam::{IVec3, Vec3};
use strata_config::{CliArgs, Config, default_config_dir};
use strata_sim::{SimError, Simulation};
use tracing::info;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "strata-sim failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), SimError> {
    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .ok_or(SimError::NoConfigDir)?;

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(args);

    let log_dir = config_dir.join("logs");
    if let Some(log_file) =
        strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config))
    {
        info!(path = %log_file.display(), "writing JSON log");
    }

    let mut sim = Simulation::new(&config)?;
    let stats = sim.mesh_stats();
    info!(
        chunks = stats.chunks,
        faces = stats.faces,
        triangles = stats.triangles,
        "world meshed"
    );

    // Totem in the middle of the world, standing on the ground.
    let world_x = (config.world.size_x_chunks as usize * config.world.chunk_size) as i32;
    let world_z = (config.world.size_z_chunks as usize * config.world.chunk_size) as i32;
    let (cx, cz) = (world_x / 2, world_z / 2);
    if let Some(ground) = sim.world().ground_height(cx, cz) {
        let totem = IVec3::new(cx, ground + 1, cz);
        if sim.place_totem(totem) {
            let rebuilt = sim.rebuild_dirty();
            info!(?totem, rebuilt, spawn_spots = sim.spawn_positions(totem).len(), "placed totem");
        }
    }

    let surface = config.world.ground_height as f32 + 1.0;
    let from = args
        .from
        .map(Vec3::from_array)
        .unwrap_or(Vec3::new(1.0, surface, 1.0));
    let to = args
        .to
        .map(Vec3::from_array)
        .unwrap_or(Vec3::new((world_x - 2) as f32, surface, (world_z - 2) as f32));

    let path = sim.find_path(from, to)?;
    println!(
        "path {} -> {}: {} waypoints, cost {:.3}",
        path.start(),
        path.goal(),
        path.waypoints().len(),
        path.cost()
    );
    for waypoint in path.waypoints() {
        println!("  {:.2} {:.2} {:.2}", waypoint.x, waypoint.y, waypoint.z);
    }
    sim.release_path(&path);

    let stats = sim.mesh_stats();
    println!(
        "{} chunks, {} faces, {} triangles",
        stats.chunks, stats.faces, stats.triangles
    );
    Ok(())
}
