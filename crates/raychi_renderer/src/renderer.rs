//! Render entry point.
//!
//! Tiles are rendered one after another; all parallelism happens inside a
//! tile. Every tile adds into one shared film, which is divided by the
//! sample count once the last tile is done.

use crate::camera::Camera;
use crate::film::{Film, ImageBuffer};
use crate::report::{RenderWarning, TileReport};
use crate::tile::generate_tiles;
use crate::wavefront::TileRenderer;
use log::info;
use raychi_core::{ConfigResult, RenderConfig, RenderSettings, Scene};
use std::time::Instant;

/// Result of a full render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Mean linear radiance per pixel, before gamma or clamping
    pub image: ImageBuffer,
    /// One report per tile, in render order
    pub tiles: Vec<TileReport>,
}

impl RenderOutput {
    /// All warnings raised by any tile.
    pub fn warnings(&self) -> impl Iterator<Item = &RenderWarning> + '_ {
        self.tiles.iter().flat_map(|tile| tile.warnings.iter())
    }

    /// Total rays consumed by the wavefront passes.
    pub fn rays_processed(&self) -> u64 {
        self.tiles.iter().map(|tile| tile.rays_processed).sum()
    }
}

/// Render `scene` with validated `settings`.
pub fn render(settings: &RenderSettings, scene: &Scene) -> RenderOutput {
    let start = Instant::now();
    info!(
        "Rendering {}x{} ({} pixels) @ {} spp, max depth {}, {} objects",
        settings.image_width,
        settings.image_height,
        settings.pixel_count(),
        settings.samples_per_pixel,
        settings.max_depth,
        scene.len()
    );

    let film = Film::new(settings.image_width, settings.image_height);
    let camera = Camera::from_settings(settings);
    let tiles = generate_tiles(
        settings.image_width,
        settings.image_height,
        settings.tile_width,
        settings.tile_height,
        settings.tile_order,
    );

    let reports: Vec<TileReport> = {
        let mut renderer = TileRenderer::new(settings, scene, &camera, &film);
        tiles.iter().map(|tile| renderer.render_tile(tile)).collect()
    };

    let output = RenderOutput {
        image: film.into_image(settings.samples_per_pixel),
        tiles: reports,
    };

    info!(
        "Rendered {} tiles in {:.2?} ({} rays, {} warnings)",
        output.tiles.len(),
        start.elapsed(),
        output.rays_processed(),
        output.warnings().count()
    );
    output
}

/// Validate `config` and render it.
///
/// Configuration errors are returned before any rendering work is done.
pub fn render_config(config: &RenderConfig) -> ConfigResult<RenderOutput> {
    let (settings, scene) = config.validate()?;
    Ok(render(&settings, &scene))
}
