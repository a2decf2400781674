//! Raychi Core - scene model and render configuration.
//!
//! This crate provides:
//!
//! - **Configuration**: `RenderConfig`, the serde-facing description of a
//!   render, and `RenderSettings`, the validated immutable parameters
//!   threaded through every render phase
//! - **Scene model**: `Scene`, `SceneObject`, `Shape`, `Material`
//! - **Loading**: JSON configuration files
//!
//! # Example
//!
//! ```ignore
//! use raychi_core::load_config;
//!
//! let config = load_config("raychi_config.json")?;
//! let (settings, scene) = config.validate()?;
//! println!("{} objects, {}x{}", scene.len(), settings.image_width, settings.image_height);
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use config::{ObjectDescription, RenderConfig};
pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, load_config_from_str, load_objects};
pub use scene::{Checker, Material, Scene, SceneObject, Shape};
pub use settings::{AmbientOcclusion, CameraSettings, PointLight, RenderSettings, TileOrder};

/// Re-export math types used throughout the scene model.
pub use raychi_math::{Color, Vec3};
