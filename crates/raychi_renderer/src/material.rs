//! Per-material scattering and background shading.

use crate::intersect::Hit;
use raychi_core::{Material, SceneObject};
use raychi_math::sampling::{gen_f32, random_cosine_direction, random_in_unit_sphere};
use raychi_math::{reflect, refract, schlick_reflectance, Color, Vec3};
use rand::RngCore;
use std::f32::consts::PI;

/// Albedo scale applied to the "off" cells of a checkered object.
const CHECKER_DARKEN: f32 = 0.5;

/// A scattered continuation of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Unit direction of the new ray
    pub direction: Vec3,
    /// Factor applied to the path throughput
    pub attenuation: Color,
}

/// Diffuse colour of `object` at `hit`, with checkerboard decoration applied.
pub fn surface_albedo(object: &SceneObject, hit: &Hit) -> Color {
    if object.checker.enabled && !hit.checker {
        object.diffuse * CHECKER_DARKEN
    } else {
        object.diffuse
    }
}

/// Scatter an incoming ray off `object`.
///
/// Returns `None` when the ray is absorbed, which includes every hit on an
/// emissive object (emission is accounted for by the caller).
pub fn scatter(
    object: &SceneObject,
    incoming: Vec3,
    hit: &Hit,
    rng: &mut dyn RngCore,
) -> Option<Scatter> {
    match object.material {
        Material::Emissive => None,
        Material::Diffuse => Some(lambertian(hit.normal, surface_albedo(object, hit), rng)),
        Material::Metal => metal(incoming, hit.normal, object.specular, 0.0, rng),
        Material::Dielectric { ior } => Some(dielectric(incoming, hit.normal, ior, rng)),
        Material::FuzzyMetal { fuzz } => metal(incoming, hit.normal, object.specular, fuzz, rng),
    }
}

/// Lambertian: cosine-weighted bounce, attenuated by the diffuse BRDF.
fn lambertian(normal: Vec3, albedo: Color, rng: &mut dyn RngCore) -> Scatter {
    Scatter {
        direction: random_cosine_direction(normal, rng),
        attenuation: albedo / PI,
    }
}

/// Mirror reflection perturbed by `fuzz`. Absorbed if the perturbed ray
/// points into the surface.
fn metal(
    incoming: Vec3,
    normal: Vec3,
    albedo: Color,
    fuzz: f32,
    rng: &mut dyn RngCore,
) -> Option<Scatter> {
    let reflected = reflect(incoming.normalize(), normal);
    let scattered = if fuzz > 0.0 {
        reflected + fuzz * random_in_unit_sphere(rng)
    } else {
        reflected
    };

    if scattered.dot(normal) > 0.0 {
        Some(Scatter {
            direction: scattered.normalize(),
            attenuation: albedo,
        })
    } else {
        None
    }
}

/// Glass: Schlick's approximation picks reflection or refraction.
fn dielectric(incoming: Vec3, normal: Vec3, ior: f32, rng: &mut dyn RngCore) -> Scatter {
    let unit_direction = incoming.normalize();
    let front_face = unit_direction.dot(normal) < 0.0;
    let (normal, refraction_ratio) = if front_face {
        (normal, 1.0 / ior)
    } else {
        (-normal, ior)
    };

    let cos_theta = (-unit_direction).dot(normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

    // Check for total internal reflection
    let cannot_refract = refraction_ratio * sin_theta > 1.0;

    let direction = if cannot_refract || schlick_reflectance(cos_theta, ior) > gen_f32(rng) {
        reflect(unit_direction, normal)
    } else {
        refract(unit_direction, normal, refraction_ratio)
    };

    Scatter {
        direction: direction.normalize(),
        attenuation: Color::ONE,
    }
}

/// Vertical sky gradient seen by rays that leave the scene.
pub fn background(direction: Vec3) -> Color {
    let white = Color::ONE;
    let sky = Color::new(0.5, 0.7, 1.0);
    let t = 0.5 * (direction.normalize().y + 1.0);
    (1.0 - t) * white + t * sky
}
