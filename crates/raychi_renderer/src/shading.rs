//! Direct lighting from the point light.

use crate::intersect::{nearest_hit, Hit};
use crate::material::surface_albedo;
use raychi_core::{Scene, SceneObject};
use raychi_math::{Color, Ray, Vec3};

/// Blinn-Phong highlight exponent.
pub const SPECULAR_EXPONENT: i32 = 10;

/// Fraction of light passed by a dielectric occluder on the shadow ray.
/// A flat approximation of transmission, not a refracted light path.
pub const DIELECTRIC_SHADOW_TRANSMISSION: f32 = 0.5;

/// Offset applied along the normal before casting the shadow ray.
const SHADOW_BIAS: f32 = 1e-3;

/// Blinn-Phong contribution of the point light at `hit`, shadowed.
///
/// The local term is `diffuse·max(N·L, 0) + specular·max(N·H, 0)^10`. A
/// non-dielectric occluder between the surface and the light zeroes it; a
/// dielectric one halves it.
pub fn direct_lighting(
    scene: &Scene,
    light_position: Vec3,
    incoming: Vec3,
    hit: &Hit,
    object: &SceneObject,
) -> Color {
    let to_light = (light_position - hit.point).normalize();
    let diffuse = hit.normal.dot(to_light).max(0.0);
    let view = (-incoming).normalize();
    let half = (to_light + view).normalize_or_zero();
    let specular = hit.normal.dot(half).max(0.0).powi(SPECULAR_EXPONENT);

    let local = surface_albedo(object, hit) * diffuse + object.specular * specular;
    if local == Color::ZERO {
        return local;
    }

    local * shadow_factor(scene, light_position, hit)
}

/// Visibility of the light from `hit`: 1, 0.5 (behind glass) or 0.
fn shadow_factor(scene: &Scene, light_position: Vec3, hit: &Hit) -> f32 {
    let to_light = (light_position - hit.point).normalize();
    let shadow_ray = Ray::offset(hit.point, hit.normal, SHADOW_BIAS, to_light);
    let light_distance = shadow_ray.origin.distance(light_position);

    match nearest_hit(scene, &shadow_ray) {
        Some(blocker) if blocker.t < light_distance => {
            if scene.objects()[blocker.object_index].material.is_dielectric() {
                DIELECTRIC_SHADOW_TRANSMISSION
            } else {
                0.0
            }
        }
        _ => 1.0,
    }
}
