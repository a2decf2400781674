//! Ray-object intersection.

use raychi_core::{Scene, Shape};
use raychi_math::{Interval, Ray, Vec3};
use std::f32::consts::PI;

/// Minimum hit distance; guards against self-intersection.
pub const HIT_EPSILON: f32 = 1e-3;

/// Rays with `|N·D|` below this never hit a plane.
const PARALLEL_EPSILON: f32 = 1e-4;

/// Result of a single primitive test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveHit {
    pub t: f32,
    /// Checkerboard parity of the cell containing the hit
    pub checker: bool,
}

/// Nearest intersection across the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub t: f32,
    pub object_index: usize,
    pub point: Vec3,
    /// Unit normal. Planes face the incoming ray; spheres point outward.
    pub normal: Vec3,
    pub checker: bool,
}

/// Trait for shapes that can be hit by rays.
pub trait Intersect {
    /// Test if a ray hits this shape strictly inside `ray_t`.
    fn intersect(&self, ray: &Ray, ray_t: Interval, checker_scale: i32) -> Option<PrimitiveHit>;

    /// Unit normal at `point`, facing against `direction` where the shape
    /// is two-sided.
    fn normal_at(&self, point: Vec3, direction: Vec3) -> Vec3;
}

impl Intersect for Shape {
    fn intersect(&self, ray: &Ray, ray_t: Interval, checker_scale: i32) -> Option<PrimitiveHit> {
        match *self {
            Shape::Sphere { center, radius } => hit_sphere(ray, center, radius, checker_scale, ray_t),
            Shape::Plane { normal, offset } => hit_plane(ray, normal, offset, checker_scale, ray_t),
        }
    }

    fn normal_at(&self, point: Vec3, direction: Vec3) -> Vec3 {
        match *self {
            Shape::Sphere { center, radius } => ((point - center) / radius).normalize(),
            Shape::Plane { normal, .. } => {
                if normal.dot(direction) > 0.0 {
                    -normal
                } else {
                    normal
                }
            }
        }
    }
}

/// Ray-sphere test.
///
/// Takes the nearer root inside `ray_t`, falling back to the farther one so
/// rays starting inside the sphere still find its surface.
pub fn hit_sphere(
    ray: &Ray,
    center: Vec3,
    radius: f32,
    checker_scale: i32,
    ray_t: Interval,
) -> Option<PrimitiveHit> {
    let oc = center - ray.origin;
    let a = ray.direction.length_squared();
    let h = ray.direction.dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant <= 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let mut root = (h - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (h + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    let p = ray.at(root) - center;
    Some(PrimitiveHit {
        t: root,
        checker: sphere_checker(p, radius, checker_scale),
    })
}

/// Checker parity from spherical UV coordinates.
fn sphere_checker(local: Vec3, radius: f32, scale: i32) -> bool {
    let phi = local.z.atan2(local.x);
    let theta = (local.y / radius).clamp(-1.0, 1.0).acos();
    let u = (phi + PI) / (2.0 * PI);
    let v = theta / PI;
    checker_parity(u, v, scale)
}

/// Ray-plane test for the plane `normal · p = offset`.
pub fn hit_plane(
    ray: &Ray,
    normal: Vec3,
    offset: f32,
    checker_scale: i32,
    ray_t: Interval,
) -> Option<PrimitiveHit> {
    let denom = normal.dot(ray.direction);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (offset - normal.dot(ray.origin)) / denom;
    if !ray_t.surrounds(t) {
        return None;
    }

    let p = ray.at(t);
    Some(PrimitiveHit {
        t,
        checker: checker_parity(p.x, p.z, checker_scale),
    })
}

#[inline]
fn checker_parity(a: f32, b: f32, scale: i32) -> bool {
    let scale = scale as f32;
    let cells = (a * scale).floor() as i64 + (b * scale).floor() as i64;
    cells.rem_euclid(2) == 0
}

/// Find the closest object hit by `ray`, if any.
pub fn nearest_hit(scene: &Scene, ray: &Ray) -> Option<Hit> {
    let mut closest: Option<(usize, PrimitiveHit)> = None;
    let mut window = Interval::beyond(HIT_EPSILON);

    for (index, object) in scene.objects().iter().enumerate() {
        if let Some(hit) = object.shape.intersect(ray, window, object.checker.scale) {
            window = window.with_max(hit.t);
            closest = Some((index, hit));
        }
    }

    closest.map(|(object_index, hit)| {
        let point = ray.at(hit.t);
        Hit {
            t: hit.t,
            object_index,
            point,
            normal: scene.objects()[object_index]
                .shape
                .normal_at(point, ray.direction),
            checker: hit.checker,
        }
    })
}
