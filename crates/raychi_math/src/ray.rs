use crate::Vec3;

/// A ray in 3D space with origin and direction.
///
/// Rays traced by the wavefront engine always carry a unit-length direction,
/// so `t` along the ray is a distance in world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray whose origin is nudged `bias` along `offset_dir`.
    ///
    /// Secondary rays start slightly off the surface they leave so the
    /// surface is not hit again at `t ≈ 0`.
    pub fn offset(origin: Vec3, offset_dir: Vec3, bias: f32, direction: Vec3) -> Self {
        Self::new(origin + bias * offset_dir, direction)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
