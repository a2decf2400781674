//! Pinhole camera for primary ray generation.

use raychi_core::{CameraSettings, RenderSettings};
use raychi_math::sampling::gen_f32;
use raychi_math::{Ray, Vec3};
use rand::RngCore;

/// Pinhole camera described by its viewport corner and spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub origin: Vec3,
    pub lower_left_corner: Vec3,
    pub horizontal: Vec3,
    pub vertical: Vec3,
    image_width: u32,
    image_height: u32,
}

impl Camera {
    /// Build the viewport for an image of the given size.
    ///
    /// Look-at basis: `w` points from the target back to the eye, `u` to
    /// the right, `v` up. The viewport sits one unit in front of the eye.
    /// `up` must not be parallel to the view direction; configuration
    /// validation rejects that case.
    pub fn new(settings: &CameraSettings, image_width: u32, image_height: u32) -> Self {
        let theta = settings.vfov_degrees.to_radians();
        let half_height = (theta / 2.0).tan();
        let aspect = image_width as f32 / image_height as f32;
        let half_width = aspect * half_height;

        let w = (settings.origin - settings.look_at).normalize();
        let u = settings.up.normalize().cross(w).normalize();
        let v = w.cross(u);

        let origin = settings.origin;
        Self {
            origin,
            lower_left_corner: origin - half_width * u - half_height * v - w,
            horizontal: 2.0 * half_width * u,
            vertical: 2.0 * half_height * v,
            image_width,
            image_height,
        }
    }

    /// Build the camera for a full render.
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self::new(&settings.camera, settings.image_width, settings.image_height)
    }

    /// Unit direction through viewport coordinates `(s, t)`, both in [0, 1]
    /// with `t = 0` at the bottom edge.
    pub fn direction(&self, s: f32, t: f32) -> Vec3 {
        (self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin).normalize()
    }

    /// Generate a jittered ray through pixel (x, y), with y growing downward.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let s = (x as f32 + gen_f32(rng)) / self.image_width as f32;
        let t = 1.0 - (y as f32 + gen_f32(rng)) / self.image_height as f32;
        Ray::new(self.origin, self.direction(s, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn settings(vfov: f32) -> CameraSettings {
        CameraSettings {
            origin: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            vfov_degrees: vfov,
        }
    }

    #[test]
    fn test_viewport_vectors() {
        // tan(45°) = 1, aspect 2 → half extents (2, 1)
        let camera = Camera::new(&settings(90.0), 200, 100);

        assert!((camera.horizontal - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
        assert!((camera.vertical - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        assert!((camera.lower_left_corner - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_center_direction() {
        let camera = Camera::new(&settings(60.0), 64, 64);
        let d = camera.direction(0.5, 0.5);
        assert!((d - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_look_at_basis() {
        let camera = Camera::new(
            &CameraSettings {
                origin: Vec3::new(0.0, 1.0, -5.0),
                look_at: Vec3::new(0.0, 1.0, 0.0),
                up: Vec3::Y,
                vfov_degrees: 60.0,
            },
            640,
            360,
        );

        // Looking down +Z with +Y up: right is -X
        assert!(camera.horizontal.x < 0.0);
        assert!(camera.vertical.y > 0.0);
        assert!((camera.direction(0.5, 0.5) - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_get_ray_stays_in_pixel() {
        let camera = Camera::new(&settings(90.0), 10, 10);
        let mut rng = StdRng::seed_from_u64(42);

        // Top-left pixel looks up and to the left
        for _ in 0..32 {
            let ray = camera.get_ray(0, 0, &mut rng);
            assert_eq!(ray.origin, Vec3::ZERO);
            assert!(ray.direction.x < 0.0);
            assert!(ray.direction.y > 0.0);
            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        }
    }
}
