//! Ambient occlusion.
//!
//! A diffuse hit records one [`AmbientRequest`] and launches probe rays that
//! reference it. Probes only count hits; the request is folded into the film
//! once per tile, after the wavefront loop has drained.

use crate::film::Film;
use crate::intersect::{nearest_hit, Hit};
use crate::pool::WorkQueue;
use crate::ray::PathRay;
use raychi_core::{AmbientOcclusion, Scene};
use raychi_math::sampling::random_cosine_direction;
use raychi_math::{Color, Ray};
use rand::RngCore;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};

/// Offset applied along the normal to probe origins.
const PROBE_BIAS: f32 = 1e-3;

/// Pending ambient contribution for one pixel, with its probe statistics.
#[derive(Debug)]
pub struct AmbientRequest {
    pub pixel_index: u32,
    /// Contribution if nothing is occluded
    pub contribution: Color,
    occluded: AtomicU32,
    total: AtomicU32,
}

impl AmbientRequest {
    /// Create a request with no probes recorded.
    pub fn new(pixel_index: u32, contribution: Color) -> Self {
        Self::with_counts(pixel_index, contribution, 0, 0)
    }

    /// Create a request with existing probe statistics.
    pub fn with_counts(pixel_index: u32, contribution: Color, occluded: u32, total: u32) -> Self {
        Self {
            pixel_index,
            contribution,
            occluded: AtomicU32::new(occluded),
            total: AtomicU32::new(total),
        }
    }

    /// Record one probe whose nearest hit was at distance `t`.
    pub fn record_probe(&self, t: f32, max_distance: f32) {
        self.total.fetch_add(1, Ordering::Relaxed);
        if t < max_distance {
            self.occluded.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// `(occluded, total)` probe counts.
    pub fn counts(&self) -> (u32, u32) {
        (
            self.occluded.load(Ordering::Relaxed),
            self.total.load(Ordering::Relaxed),
        )
    }

    /// Fraction of unoccluded probes; 1 when no probe was traced.
    pub fn visibility(&self) -> f32 {
        match self.counts() {
            (_, 0) => 1.0,
            (occluded, total) => 1.0 - occluded as f32 / total as f32,
        }
    }

    /// The contribution scaled by visibility.
    pub fn resolved(&self) -> Color {
        self.contribution * self.visibility()
    }
}

/// Record an ambient request for `hit` and append its probe rays.
///
/// Follows the pool overflow discipline: if the request pool is full nothing
/// is spawned; probes that do not fit are dropped (the request then resolves
/// over fewer samples).
pub fn spawn_ambient(
    settings: &AmbientOcclusion,
    pixel_index: u32,
    hit: &Hit,
    weight: Color,
    requests: &WorkQueue<AmbientRequest>,
    rays: &WorkQueue<PathRay>,
    rng: &mut dyn RngCore,
) {
    let Some(request) = requests.push(AmbientRequest::new(pixel_index, weight * settings.color)) else {
        return;
    };

    for _ in 0..settings.samples {
        let direction = random_cosine_direction(hit.normal, rng);
        let probe = Ray::offset(hit.point, hit.normal, PROBE_BIAS, direction);
        if rays
            .push(PathRay::probe(pixel_index, probe, request as u32))
            .is_none()
        {
            break;
        }
    }
}

/// Trace one probe ray and record the outcome on its request.
pub fn trace_probe(
    scene: &Scene,
    probe: &PathRay,
    request: &AmbientRequest,
    max_distance: f32,
) {
    let t = nearest_hit(scene, &Ray::new(probe.origin, probe.direction))
        .map_or(f32::INFINITY, |hit| hit.t);
    request.record_probe(t, max_distance);
}

/// Fold every request into the film.
pub fn resolve_ambient(requests: &WorkQueue<AmbientRequest>, film: &Film) {
    requests.par_iter().for_each(|(_, request)| {
        film.add(request.pixel_index as usize, request.resolved());
    });
}
