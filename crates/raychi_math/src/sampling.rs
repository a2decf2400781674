//! Random sampling helpers.
//!
//! All samplers take `&mut dyn RngCore` so callers can hand in whatever
//! per-ray stream they own.

use crate::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform sample inside the unit ball (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Orthonormal tangent frame around a unit normal.
///
/// Returns `(tangent, bitangent)` such that `(tangent, bitangent, normal)`
/// is right-handed.
pub fn tangent_frame(normal: Vec3) -> (Vec3, Vec3) {
    let helper = if normal.z.abs() < 0.999 { Vec3::Z } else { Vec3::X };
    let tangent = normal.cross(helper).normalize();
    let bitangent = normal.cross(tangent);
    (tangent, bitangent)
}

/// Cosine-weighted direction on the hemisphere around `normal`.
///
/// Malley's method: a uniform point on the unit disk is projected up onto
/// the hemisphere, giving a pdf of `cos θ / π`.
pub fn random_cosine_direction(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let u1 = gen_f32(rng);
    let u2 = gen_f32(rng);

    let phi = 2.0 * PI * u2;
    let cos_theta = u1.sqrt();
    let sin_theta = (1.0 - u1).sqrt();

    let (tangent, bitangent) = tangent_frame(normal);
    let local = Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);
    (local.x * tangent + local.y * bitangent + local.z * normal).normalize()
}

/// Derive an independent stream seed from a base seed and two coordinates.
///
/// SplitMix64 finalizer applied over the packed inputs, so neighbouring
/// coordinates produce unrelated seeds.
pub fn stream_seed(base: u64, a: u64, b: u64) -> u64 {
    fn mix(mut z: u64) -> u64 {
        z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
    mix(mix(mix(base) ^ a) ^ b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_unit_sphere_samples_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn test_tangent_frame_orthonormal() {
        for normal in [Vec3::X, Vec3::Y, Vec3::Z, -Vec3::Z, Vec3::new(1.0, 2.0, 3.0).normalize()] {
            let (t, b) = tangent_frame(normal);
            assert!((t.length() - 1.0).abs() < 1e-5);
            assert!((b.length() - 1.0).abs() < 1e-5);
            assert!(t.dot(normal).abs() < 1e-5);
            assert!(b.dot(normal).abs() < 1e-5);
            assert!(t.dot(b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cosine_directions_stay_in_hemisphere() {
        let mut rng = StdRng::seed_from_u64(7);
        let normal = Vec3::new(0.3, -0.8, 0.2).normalize();
        let mut mean_cos = 0.0;
        let n = 20_000;

        for _ in 0..n {
            let d = random_cosine_direction(normal, &mut rng);
            assert!((d.length() - 1.0).abs() < 1e-4);
            assert!(d.dot(normal) >= -1e-5);
            mean_cos += d.dot(normal);
        }

        // E[cos θ] under a cosine-weighted pdf is 2/3.
        mean_cos /= n as f32;
        assert!((mean_cos - 2.0 / 3.0).abs() < 0.02, "mean cos = {}", mean_cos);
    }

    #[test]
    fn test_stream_seed_distinct() {
        let a = stream_seed(0, 1, 2);
        let b = stream_seed(0, 2, 1);
        let c = stream_seed(1, 1, 2);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, stream_seed(0, 1, 2));
    }
}
