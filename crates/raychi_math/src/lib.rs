// Re-export glam for convenience
pub use glam::*;

// Raychi math types
mod interval;
mod optics;
mod ray;
pub mod sampling;

pub use interval::Interval;
pub use optics::{reflect, refract, schlick_reflectance};
pub use ray::Ray;

/// Color type alias (linear RGB radiance, unbounded above).
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_componentwise() {
        let weight = Color::new(0.5, 1.0, 2.0);
        let albedo = Color::new(0.2, 0.4, 0.8);
        assert_eq!(weight * albedo, Color::new(0.1, 0.4, 1.6));
    }

    #[test]
    fn test_lerp_matches_sky_endpoints() {
        let white = Color::ONE;
        let sky = Color::new(0.5, 0.7, 1.0);
        assert_eq!(white.lerp(sky, 0.0), white);
        assert_eq!(white.lerp(sky, 1.0), sky);
    }
}
