//! In-flight ray records stored in the ray pools.

use raychi_math::{Color, Ray, Vec3};

/// What a pooled ray is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayKind {
    /// Camera or bounce ray carrying path throughput.
    Path,
    /// Occlusion probe for the ambient request at this index.
    AmbientProbe { request: u32 },
}

/// A ray waiting in a pool.
///
/// Records are never mutated in place: processing either terminates the ray
/// or appends a new record to the next pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathRay {
    /// Target pixel in the row-major film
    pub pixel_index: u32,
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
    /// Bounces left, including this one
    pub remaining_depth: u32,
    /// Path throughput
    pub weight: Color,
    pub kind: RayKind,
}

impl PathRay {
    /// A camera ray starting a new path.
    pub fn primary(pixel_index: u32, ray: Ray, depth: u32) -> Self {
        Self {
            pixel_index,
            origin: ray.origin,
            direction: ray.direction.normalize(),
            remaining_depth: depth,
            weight: Color::ONE,
            kind: RayKind::Path,
        }
    }

    /// The continuation of this path after a scattering event.
    pub fn bounce(&self, ray: Ray, weight: Color) -> Self {
        Self {
            pixel_index: self.pixel_index,
            origin: ray.origin,
            direction: ray.direction.normalize(),
            remaining_depth: self.remaining_depth.saturating_sub(1),
            weight,
            kind: RayKind::Path,
        }
    }

    /// An occlusion probe for ambient request `request`.
    pub fn probe(pixel_index: u32, ray: Ray, request: u32) -> Self {
        Self {
            pixel_index,
            origin: ray.origin,
            direction: ray.direction,
            remaining_depth: 0,
            weight: Color::ONE,
            kind: RayKind::AmbientProbe { request },
        }
    }

    /// The geometric ray.
    #[inline]
    pub fn ray(&self) -> Ray {
        Ray::new(self.origin, self.direction)
    }
}
