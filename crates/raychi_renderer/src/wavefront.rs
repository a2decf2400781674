//! Wavefront driver.
//!
//! A tile is rendered as a sequence of passes. Each pass consumes every ray
//! in the current pool in parallel and appends what it spawns (bounces and
//! ambient probes) to the next pool; the pools are then swapped. The loop
//! ends when a pass spawns nothing or the iteration limit is reached.

use crate::ambient::{resolve_ambient, spawn_ambient, trace_probe, AmbientRequest};
use crate::camera::Camera;
use crate::film::Film;
use crate::intersect::nearest_hit;
use crate::material::{background, scatter};
use crate::pool::{RayPools, WorkQueue};
use crate::ray::{PathRay, RayKind};
use crate::report::{RenderWarning, TileReport};
use crate::shading::direct_lighting;
use crate::tile::Tile;
use log::{debug, info, warn};
use raychi_core::{Material, RenderSettings, Scene};
use raychi_math::sampling::{gen_f32, stream_seed};
use raychi_math::{Color, Ray};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;

/// Offset applied along the scattered direction to bounce origins.
const BOUNCE_BIAS: f32 = 1e-3;

/// Russian roulette: survive with probability `probability`.
///
/// Survivors have their weight divided by `probability`, so the expected
/// weight is unchanged.
pub fn russian_roulette(weight: Color, probability: f32, rng: &mut dyn RngCore) -> Option<Color> {
    if gen_f32(rng) > probability {
        None
    } else {
        Some(weight / probability)
    }
}

/// Everything a single ray needs while a pass is running.
///
/// Shared by all workers of the pass; all writes go through atomics.
pub struct PassContext<'a> {
    pub settings: &'a RenderSettings,
    pub scene: &'a Scene,
    pub film: &'a Film,
    /// Pool receiving rays for the next pass
    pub next: &'a WorkQueue<PathRay>,
    pub requests: &'a WorkQueue<AmbientRequest>,
}

impl PassContext<'_> {
    /// Process one pooled ray.
    pub fn trace(&self, ray: &PathRay, rng: &mut dyn RngCore) {
        match ray.kind {
            RayKind::AmbientProbe { request } => {
                if let Some(request) = self.requests.get(request as usize) {
                    trace_probe(self.scene, ray, request, self.settings.ambient.max_distance);
                }
            }
            RayKind::Path => self.trace_path(ray, rng),
        }
    }

    fn trace_path(&self, ray: &PathRay, rng: &mut dyn RngCore) {
        let settings = self.settings;
        if ray.remaining_depth == 0 {
            return;
        }

        let mut weight = ray.weight;
        if ray.remaining_depth < settings.max_depth {
            match russian_roulette(weight, settings.rr_probability, rng) {
                Some(survivor) => weight = survivor,
                None => return,
            }
        }

        let pixel = ray.pixel_index as usize;
        let Some(hit) = nearest_hit(self.scene, &ray.ray()) else {
            self.film.add(pixel, weight * background(ray.direction));
            return;
        };

        let object = &self.scene.objects()[hit.object_index];
        if matches!(object.material, Material::Emissive) {
            self.film.add(pixel, weight * object.diffuse);
            return;
        }

        if settings.direct_lighting {
            let direct = direct_lighting(self.scene, settings.light.position, ray.direction, &hit, object);
            self.film.add(pixel, weight * direct);
        }

        if ray.remaining_depth > 1 {
            if let Some(scattered) = scatter(object, ray.direction, &hit, rng) {
                let bounce_weight = weight * scattered.attenuation;
                // Zero-throughput paths cannot contribute
                if bounce_weight != Color::ZERO {
                    let bounce =
                        Ray::offset(hit.point, scattered.direction, BOUNCE_BIAS, scattered.direction);
                    self.next.push(ray.bounce(bounce, bounce_weight));
                }
            }
        }

        if settings.ambient.enabled && object.material.receives_ambient() {
            spawn_ambient(
                &settings.ambient,
                ray.pixel_index,
                &hit,
                weight,
                self.requests,
                self.next,
                rng,
            );
        }
    }
}

/// Slot counts for the ray buffers and the ambient request buffer.
///
/// The configured capacities are upper bounds. A tile never needs more than
/// `pixels × spp × (1 + ao_samples)` ray slots in one pass, since every path
/// ray spawns at most one bounce plus its probes, nor more than
/// `pixels × spp × max_depth` requests.
pub fn pool_capacities(settings: &RenderSettings) -> (usize, usize) {
    let tile_pixels = settings.tile_width.min(settings.image_width) as usize
        * settings.tile_height.min(settings.image_height) as usize;
    let paths = tile_pixels.saturating_mul(settings.samples_per_pixel as usize);

    let (probes, request_demand) = if settings.ambient.enabled {
        (
            settings.ambient.samples as usize,
            paths.saturating_mul(settings.max_depth as usize),
        )
    } else {
        (0, 0)
    };

    let rays = settings
        .ray_pool_capacity
        .min(paths.saturating_mul(1 + probes));
    let requests = settings.ambient_request_capacity.min(request_demand);
    (rays, requests)
}

/// Renders tiles one at a time, reusing its pools between tiles.
pub struct TileRenderer<'a> {
    settings: &'a RenderSettings,
    scene: &'a Scene,
    camera: &'a Camera,
    film: &'a Film,
    pools: RayPools,
    requests: WorkQueue<AmbientRequest>,
}

impl<'a> TileRenderer<'a> {
    /// Create a tile renderer with pools sized by [`pool_capacities`].
    pub fn new(
        settings: &'a RenderSettings,
        scene: &'a Scene,
        camera: &'a Camera,
        film: &'a Film,
    ) -> Self {
        let (rays, requests) = pool_capacities(settings);
        Self::with_capacity(settings, scene, camera, film, rays, requests)
    }

    /// Create a tile renderer with explicit pool sizes.
    pub fn with_capacity(
        settings: &'a RenderSettings,
        scene: &'a Scene,
        camera: &'a Camera,
        film: &'a Film,
        ray_capacity: usize,
        request_capacity: usize,
    ) -> Self {
        debug!(
            "Allocating ray pools: 2 x {} rays, {} ambient requests",
            ray_capacity, request_capacity
        );
        Self {
            settings,
            scene,
            camera,
            film,
            pools: RayPools::with_capacity(ray_capacity),
            requests: WorkQueue::with_capacity(request_capacity),
        }
    }

    /// Render one tile into the film.
    pub fn render_tile(&mut self, tile: &Tile) -> TileReport {
        let start = Instant::now();
        let settings = self.settings;

        self.pools.reset();
        self.requests.reset();
        self.generate(tile);

        let mut warnings = Vec::new();
        let mut iterations = 0;
        let mut rays_processed = 0u64;

        while !self.pools.current.is_empty() {
            if iterations == settings.max_iterations {
                warnings.push(RenderWarning::IterationLimitExceeded {
                    x: tile.x,
                    y: tile.y,
                    limit: settings.max_iterations,
                    pending: self.pools.current.len(),
                });
                break;
            }

            rays_processed += self.pools.current.len() as u64;
            let pass_seed = stream_seed(settings.seed, tile.index as u64, iterations as u64 + 1);
            let context = PassContext {
                settings,
                scene: self.scene,
                film: self.film,
                next: &self.pools.next,
                requests: &self.requests,
            };
            self.pools.current.par_iter().for_each(|(slot, ray)| {
                let mut rng = SmallRng::seed_from_u64(stream_seed(pass_seed, slot as u64, 1));
                context.trace(ray, &mut rng);
            });

            debug!(
                "Tile {} pass {}: {} rays in, {} rays out, {} ambient requests",
                tile.index,
                iterations,
                self.pools.current.len(),
                self.pools.next.len(),
                self.requests.len()
            );

            self.pools.promote();
            iterations += 1;
        }

        if self.pools.overflowed() {
            warnings.push(RenderWarning::RayPoolOverflow { x: tile.x, y: tile.y });
        }
        if self.requests.overflowed() {
            warnings.push(RenderWarning::AmbientPoolOverflow { x: tile.x, y: tile.y });
        }
        resolve_ambient(&self.requests, self.film);

        for warning in &warnings {
            warn!("{}", warning);
        }

        let elapsed = start.elapsed();
        info!(
            "Tile ({},{}) processed in {:.2?} with {} rays",
            tile.x, tile.y, elapsed, rays_processed
        );

        TileReport {
            tile: *tile,
            iterations,
            rays_processed,
            ambient_requests: self.requests.len(),
            elapsed,
            warnings,
        }
    }

    /// Emit `samples_per_pixel` jittered camera rays for every pixel of `tile`.
    fn generate(&self, tile: &Tile) {
        let settings = self.settings;
        let camera = self.camera;
        let current = &self.pools.current;

        (0..tile.pixel_count()).into_par_iter().for_each(|local| {
            let (x, y) = tile.pixel(local);
            let pixel_index = y * settings.image_width + x;
            let mut rng = SmallRng::seed_from_u64(stream_seed(settings.seed, pixel_index as u64, 0));

            for _ in 0..settings.samples_per_pixel {
                let ray = camera.get_ray(x, y, &mut rng);
                if current
                    .push(PathRay::primary(pixel_index, ray, settings.max_depth))
                    .is_none()
                {
                    break;
                }
            }
        });
    }
}
