//! Validated render parameters.
//!
//! `RenderSettings` is built once from a [`RenderConfig`](crate::RenderConfig)
//! and passed by reference to every phase of a render. Nothing mutates it
//! after validation.

use raychi_math::{Color, Vec3};
use serde::Deserialize;

/// Order in which tiles are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileOrder {
    /// Row by row, left to right
    #[default]
    Raster,
    /// Nearest to the image centre first
    Spiral,
}

/// Pinhole camera placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub origin: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vfov_degrees: f32,
}

/// Point light used by the direct-lighting term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    /// Accepted for configuration compatibility. The Blinn-Phong term is
    /// not scaled by it.
    pub color: Color,
}

/// Ambient-occlusion parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientOcclusion {
    pub enabled: bool,
    /// Probe rays per request
    pub samples: u32,
    /// Hits closer than this count as occluded
    pub max_distance: f32,
    pub color: Color,
}

/// Immutable per-render parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub image_width: u32,
    pub image_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_order: TileOrder,

    pub samples_per_pixel: u32,
    /// Depth assigned to primary rays
    pub max_depth: u32,
    /// Survival probability for Russian roulette, in (0, 1]
    pub rr_probability: f32,

    pub direct_lighting: bool,
    pub light: PointLight,
    pub ambient: AmbientOcclusion,

    /// Slots in each of the two ray buffers
    pub ray_pool_capacity: usize,
    /// Slots in the ambient request buffer
    pub ambient_request_capacity: usize,
    /// Wavefront iterations allowed per tile before giving up
    pub max_iterations: u32,

    pub camera: CameraSettings,
    pub seed: u64,
}

impl RenderSettings {
    /// Total number of pixels in the output image.
    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set tile size.
    pub fn with_tiles(mut self, width: u32, height: u32) -> Self {
        self.tile_width = width;
        self.tile_height = height;
        self
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 640,
            image_height: 360,
            tile_width: 16,
            tile_height: 16,
            tile_order: TileOrder::Raster,
            samples_per_pixel: 256,
            max_depth: 8,
            rr_probability: 0.8,
            direct_lighting: true,
            light: PointLight {
                position: Vec3::new(0.0, 5.4, -1.0),
                color: Color::splat(10.0),
            },
            ambient: AmbientOcclusion {
                enabled: true,
                samples: 32,
                max_distance: 2.0,
                color: Color::new(0.2, 0.2, 0.4),
            },
            ray_pool_capacity: 8_000_000,
            ambient_request_capacity: 1_000_000,
            max_iterations: 100,
            camera: CameraSettings {
                origin: Vec3::new(0.0, 1.0, -5.0),
                look_at: Vec3::new(0.0, 1.0, 0.0),
                up: Vec3::Y,
                vfov_degrees: 60.0,
            },
            seed: 0,
        }
    }
}
