//! Headless five-box demo.
//!
//! Builds the scene from a config (the five-box row by default), runs a fixed
//! number of frames against the in-memory scene, taps on the requested
//! frames, and prints how many jumps every box received.
//!
//! ```text
//! RUST_LOG=debug hoppa --frames 240 --tap-at 30 --tap-at 150
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use hoppa::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless tap-to-jump box demo")]
struct Cli {
    /// Scene config JSON (defaults to the five-box row)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 180)]
    frames: u64,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Frame numbers on which a tap is delivered (repeatable)
    #[arg(long = "tap-at", default_values_t = [30u64])]
    tap_at: Vec<u64>,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SceneConfig::five_boxes(),
    };
    if cli.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }
    anyhow::ensure!(cli.fps > 0.0, "--fps must be positive");

    let mut host = Host::new(RecordingScene::new(), config);
    let entities = host.setup()?;

    let mut jumps = 0;
    for frame in 1..=cli.frames {
        if cli.tap_at.contains(&frame) {
            host.tap();
        }
        let report = host.frame(frame as f64 / cli.fps)?;
        jumps += report.impulses;
    }
    info!(
        "simulated {} frames ({:.2}s), {jumps} impulses",
        host.world().time().frame_count(),
        host.world().time().elapsed()
    );

    for entity in entities {
        let Some(geometry) = host
            .world()
            .get(entity, ComponentKind::Geometry)
            .and_then(Component::as_geometry)
        else {
            continue;
        };
        let Some(node) = host.scene().node(geometry.node()) else {
            continue;
        };
        let controlled = host.world().get(entity, ComponentKind::PlayerControl).is_some();
        println!(
            "box {entity} at {:.2}: jumps {}{}",
            node.position,
            node.impulses.len(),
            if controlled { "" } else { " (no control)" }
        );
    }
    Ok(())
}
