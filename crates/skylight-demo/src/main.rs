//! Demo binary that samples a light manifest across the day cycle.
//!
//! Loads a RON manifest, builds the environment for one map, and prints the
//! blended channels at a fixed position as the day advances.
//! Run with `cargo run -p skylight-demo -- --manifest sky.ron --map 1`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec3;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use skylight_core::{ColorChannel, DAY_CYCLE, LightEnvironment, ScalarChannel};
use skylight_records::LightLibrary;

/// Skylight demo command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "skylight", about = "Day-cycle ambient lighting demo")]
struct CliArgs {
    /// Path to the RON light manifest.
    #[arg(long)]
    manifest: PathBuf,

    /// Map id to build the environment for.
    #[arg(long, default_value_t = 0)]
    map: u32,

    /// Query position, x component.
    #[arg(long, default_value_t = 0.0)]
    x: f32,

    /// Query position, y component.
    #[arg(long, default_value_t = 0.0)]
    y: f32,

    /// Query position, z component.
    #[arg(long, default_value_t = 0.0)]
    z: f32,

    /// Sampling step in day-cycle ticks (two ticks per minute).
    #[arg(long, default_value_t = 240)]
    step: u32,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();

    let library = match LightLibrary::from_ron(&args.manifest) {
        Ok(library) => library,
        Err(err) => {
            error!("could not load {}: {err}", args.manifest.display());
            return ExitCode::FAILURE;
        }
    };
    info!(
        records = library.len(),
        manifest = %args.manifest.display(),
        "manifest loaded"
    );

    let position = Vec3::new(args.x, args.y, args.z);
    let mut env = LightEnvironment::from_source(args.map, &library);
    info!(map = args.map, zones = env.zones().len(), %position, "environment ready");

    let step = args.step.max(1);
    let mut time = 0;
    while time < DAY_CYCLE {
        env.update(position, time);

        let ambient = env.color(ColorChannel::Ambient);
        let fog = env.color(ColorChannel::Fog);
        let sun = env.color(ColorChannel::Sun);
        println!(
            "{} ambient ({:.3} {:.3} {:.3})  fog ({:.3} {:.3} {:.3})  sun ({:.3} {:.3} {:.3})  \
             density {:.3}  fog end {:.1}  fog scale {:.2}",
            clock(time),
            ambient.x,
            ambient.y,
            ambient.z,
            fog.x,
            fog.y,
            fog.z,
            sun.x,
            sun.y,
            sun.z,
            env.scalar(ScalarChannel::FogDensity),
            env.scalar(ScalarChannel::FogEnd),
            env.scalar(ScalarChannel::FogScale),
        );

        time += step;
    }

    ExitCode::SUCCESS
}

/// Format a day-cycle tick as a wall clock `HH:MM`.
fn clock(time: u32) -> String {
    let minutes = (time % DAY_CYCLE) / 2;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
