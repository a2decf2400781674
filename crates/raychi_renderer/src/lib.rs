//! Raychi Renderer - wavefront path tracing.
//!
//! Rays of the same generation are processed together in parallel passes
//! instead of recursing per ray. Each tile of the image runs its own
//! generate → process → promote loop over two fixed-capacity ray buffers,
//! then resolves its ambient-occlusion requests into the shared film.

mod ambient;
mod camera;
mod film;
mod intersect;
mod material;
mod pool;
mod ray;
mod renderer;
mod report;
mod shading;
mod tile;
mod wavefront;

pub use ambient::{resolve_ambient, AmbientRequest};
pub use camera::Camera;
pub use film::{Film, ImageBuffer};
pub use intersect::{hit_plane, hit_sphere, nearest_hit, Hit, Intersect, PrimitiveHit, HIT_EPSILON};
pub use material::{background, scatter, surface_albedo, Scatter};
pub use pool::{RayPools, WorkQueue};
pub use ray::{PathRay, RayKind};
pub use renderer::{render, render_config, RenderOutput};
pub use report::{RenderWarning, TileReport};
pub use shading::{direct_lighting, DIELECTRIC_SHADOW_TRANSMISSION, SPECULAR_EXPONENT};
pub use tile::{generate_tiles, Tile};
pub use wavefront::{pool_capacities, russian_roulette, PassContext, TileRenderer};

/// Re-export the scene model and math types used by the public API.
pub use raychi_core::{Material, RenderSettings, Scene, SceneObject, Shape};
pub use raychi_math::{Color, Interval, Ray, Vec3};
