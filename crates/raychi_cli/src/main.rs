//! Raychi command line renderer.
//!
//! Loads a JSON scene configuration, applies command-line overrides, renders
//! it with the wavefront engine and saves a gamma-corrected 8-bit image.

mod options;
mod post;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use raychi_core::{load_config, load_objects};
use raychi_renderer::render_config;

use crate::options::RaychiArgs;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = RaychiArgs::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }
    info!("Using {} worker threads", rayon::current_num_threads());

    let mut config = load_config(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    if let Some(path) = &args.objects_config {
        config.objects = load_objects(path)
            .with_context(|| format!("failed to load objects from {}", path.display()))?;
    }
    args.apply(&mut config);

    let output = render_config(&config).context("invalid render configuration")?;

    let degraded = output.tiles.iter().filter(|tile| !tile.is_clean()).count();
    if degraded > 0 {
        warn!("{} tiles rendered with warnings; the image may be biased", degraded);
    }

    post::save(&output.image, &args.output)?;
    info!("Saved {}", args.output.display());
    Ok(())
}
