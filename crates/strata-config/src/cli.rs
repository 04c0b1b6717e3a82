//! Command-line argument parsing for the strata simulation.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Strata command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata-sim", about = "Headless voxel world simulation")]
pub struct CliArgs {
    /// World extent along X, in chunks.
    #[arg(long)]
    pub size_x: Option<u32>,

    /// World extent along Z, in chunks.
    #[arg(long)]
    pub size_z: Option<u32>,

    /// Chunk side length in blocks. Also resets the path snap ceiling to twice this value.
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Terrain ground height.
    #[arg(long)]
    pub ground_height: Option<usize>,

    /// Log level (error, warn, info, debug, trace) or a full filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path query start point, as `x,y,z`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub from: Option<[f32; 3]>,

    /// Path query end point, as `x,y,z`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub to: Option<[f32; 3]>,
}

/// Parses `x,y,z` into three floats.
fn parse_point(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z but got {s:?}"));
    };
    let parse = |v: &str| {
        v.parse::<f32>()
            .map_err(|e| format!("invalid coordinate {v:?}: {e}"))
    };
    Ok([parse(x)?, parse(y)?, parse(z)?])
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(x) = args.size_x {
            self.world.size_x_chunks = x;
        }
        if let Some(z) = args.size_z {
            self.world.size_z_chunks = z;
        }
        if let Some(size) = args.chunk_size {
            self.world.chunk_size = size;
            self.pathfinding.snap_max_height = (size * 2) as i32;
        }
        if let Some(height) = args.ground_height {
            self.world.ground_height = height;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
