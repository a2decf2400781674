//! Render configuration as read from JSON.
//!
//! Key names follow the Raychi config file format (`light_pos`, `cam_origin`,
//! `lookat`, `vup`, `theta`, `objects`, ...). Scene vectors are kept as plain
//! lists until [`RenderConfig::validate`] so that a wrong component count is
//! reported as a configuration error rather than a parse error.

use crate::error::{ConfigError, ConfigResult};
use crate::scene::Scene;
use crate::settings::{AmbientOcclusion, CameraSettings, PointLight, RenderSettings, TileOrder};
use raychi_math::Vec3;
use serde::Deserialize;

/// Description of one scene object.
///
/// `type`, `material` and `diffuse` are always required; spheres also need
/// `center` + `radius`, planes `normal` + `offset`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ObjectDescription {
    /// 0 = plane, 1 = sphere
    #[serde(rename = "type")]
    pub kind: Option<i64>,
    pub center: Option<Vec<f32>>,
    pub radius: Option<f32>,
    pub normal: Option<Vec<f32>>,
    pub offset: Option<f32>,
    pub diffuse: Option<Vec<f32>>,
    pub specular: Option<Vec<f32>>,
    pub ior: Option<f32>,
    #[serde(rename = "do_checkboard", default)]
    pub checkerboard: i32,
    #[serde(rename = "scale")]
    pub checker_scale: Option<i32>,
    pub fuzz: Option<f32>,
    /// 0 = emissive, 1 = diffuse, 2 = metal, 3 = dielectric, 4 = fuzzy metal
    pub material: Option<i64>,
}

/// Everything needed to describe a render.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    #[serde(alias = "width")]
    pub image_width: u32,
    #[serde(alias = "height")]
    pub image_height: u32,
    #[serde(alias = "tile_w")]
    pub tile_width: u32,
    #[serde(alias = "tile_h")]
    pub tile_height: u32,
    pub tile_order: TileOrder,

    #[serde(alias = "ENABLE_AO")]
    pub enable_ao: bool,
    #[serde(alias = "ENABLE_DIRECT_LIGHTING")]
    pub enable_direct_lighting: bool,
    #[serde(alias = "RR_prob")]
    pub rr_prob: f32,
    pub max_ray_pool: usize,
    pub max_ambient_requests: usize,

    pub samples_per_pixel: u32,
    pub max_depth: u32,
    #[serde(alias = "num_AO_samples")]
    pub num_ao_samples: u32,
    #[serde(alias = "max_AO_distance")]
    pub max_ao_distance: f32,
    pub max_iterations: u32,
    pub seed: u64,

    pub light_pos: Option<Vec<f32>>,
    pub ambient_color: Option<Vec<f32>>,
    pub light_color: Option<Vec<f32>>,
    pub cam_origin: Option<Vec<f32>>,
    pub lookat: Option<Vec<f32>>,
    pub vup: Option<Vec<f32>>,
    /// Vertical field of view in degrees
    pub theta: f32,

    pub objects: Vec<ObjectDescription>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let defaults = RenderSettings::default();
        Self {
            image_width: defaults.image_width,
            image_height: defaults.image_height,
            tile_width: defaults.tile_width,
            tile_height: defaults.tile_height,
            tile_order: defaults.tile_order,
            enable_ao: defaults.ambient.enabled,
            enable_direct_lighting: defaults.direct_lighting,
            rr_prob: defaults.rr_probability,
            max_ray_pool: defaults.ray_pool_capacity,
            max_ambient_requests: defaults.ambient_request_capacity,
            samples_per_pixel: defaults.samples_per_pixel,
            max_depth: defaults.max_depth,
            num_ao_samples: defaults.ambient.samples,
            max_ao_distance: defaults.ambient.max_distance,
            max_iterations: defaults.max_iterations,
            seed: defaults.seed,
            light_pos: None,
            ambient_color: None,
            light_color: None,
            cam_origin: None,
            lookat: None,
            vup: None,
            theta: defaults.camera.vfov_degrees,
            objects: Vec::new(),
        }
    }
}

/// Squared sine below which `vup` counts as parallel to the view direction.
const PARALLEL_TOLERANCE: f32 = 1e-6;

impl RenderConfig {
    /// Validate the configuration and build the render inputs.
    ///
    /// All checks run before any rendering work; the first failure is
    /// returned.
    pub fn validate(&self) -> ConfigResult<(RenderSettings, Scene)> {
        let light_position = required_vec3("light_pos", &self.light_pos)?;
        let ambient_color = required_vec3("ambient_color", &self.ambient_color)?;
        let light_color = required_vec3("light_color", &self.light_color)?;
        let origin = required_vec3("cam_origin", &self.cam_origin)?;
        let look_at = required_vec3("lookat", &self.lookat)?;
        let up = required_vec3("vup", &self.vup)?;

        positive_int("image_width", self.image_width)?;
        positive_int("image_height", self.image_height)?;
        positive_int("tile_width", self.tile_width)?;
        positive_int("tile_height", self.tile_height)?;
        positive_int("samples_per_pixel", self.samples_per_pixel)?;
        positive_int("max_depth", self.max_depth)?;
        positive_int("num_ao_samples", self.num_ao_samples)?;
        positive_int("max_iterations", self.max_iterations)?;
        positive_int("max_ray_pool", self.max_ray_pool)?;
        positive_int("max_ambient_requests", self.max_ambient_requests)?;

        if !(self.rr_prob > 0.0 && self.rr_prob <= 1.0) {
            return Err(ConfigError::invalid("rr_prob", "must be in (0, 1]"));
        }
        if !(self.max_ao_distance > 0.0) {
            return Err(ConfigError::invalid("max_ao_distance", "must be positive"));
        }
        if !(self.theta > 0.0 && self.theta < 180.0) {
            return Err(ConfigError::invalid("theta", "must be in (0, 180) degrees"));
        }
        if ambient_color.min_element() < 0.0 {
            return Err(ConfigError::invalid("ambient_color", "must not be negative"));
        }

        let forward = (origin - look_at)
            .try_normalize()
            .ok_or_else(|| ConfigError::invalid("lookat", "must differ from cam_origin"))?;
        let up = up
            .try_normalize()
            .ok_or_else(|| ConfigError::invalid("vup", "must be non-zero"))?;
        if up.cross(forward).length_squared() <= PARALLEL_TOLERANCE {
            return Err(ConfigError::DegenerateCamera);
        }

        let scene = Scene::from_descriptions(&self.objects)?;

        let settings = RenderSettings {
            image_width: self.image_width,
            image_height: self.image_height,
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            tile_order: self.tile_order,
            samples_per_pixel: self.samples_per_pixel,
            max_depth: self.max_depth,
            rr_probability: self.rr_prob,
            direct_lighting: self.enable_direct_lighting,
            light: PointLight {
                position: light_position,
                color: light_color,
            },
            ambient: AmbientOcclusion {
                enabled: self.enable_ao,
                samples: self.num_ao_samples,
                max_distance: self.max_ao_distance,
                color: ambient_color,
            },
            ray_pool_capacity: self.max_ray_pool,
            ambient_request_capacity: self.max_ambient_requests,
            max_iterations: self.max_iterations,
            camera: CameraSettings {
                origin,
                look_at,
                up,
                vfov_degrees: self.theta,
            },
            seed: self.seed,
        };

        log::debug!(
            "Validated config: {}x{} @ {} spp, {} objects",
            settings.image_width,
            settings.image_height,
            settings.samples_per_pixel,
            scene.len()
        );

        Ok((settings, scene))
    }
}

/// Convert a component list into a `Vec3`, requiring exactly 3 finite values.
pub(crate) fn vec3(name: &str, components: &[f32]) -> ConfigResult<Vec3> {
    match components {
        [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => {
            Ok(Vec3::new(*x, *y, *z))
        }
        [_, _, _] => Err(ConfigError::invalid(name, "components must be finite")),
        _ => Err(ConfigError::InvalidVector {
            name: name.to_string(),
            len: components.len(),
        }),
    }
}

fn required_vec3(name: &'static str, value: &Option<Vec<f32>>) -> ConfigResult<Vec3> {
    let components = value.as_deref().ok_or(ConfigError::MissingParameter(name))?;
    vec3(name, components)
}

fn positive_int<T: Default + PartialOrd>(name: &str, value: T) -> ConfigResult<()> {
    if value > T::default() {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, "must be greater than zero"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> RenderConfig {
        RenderConfig {
            light_pos: Some(vec![0.0, 5.4, -1.0]),
            ambient_color: Some(vec![0.2, 0.2, 0.4]),
            light_color: Some(vec![10.0, 10.0, 10.0]),
            cam_origin: Some(vec![0.0, 1.0, -5.0]),
            lookat: Some(vec![0.0, 1.0, 0.0]),
            vup: Some(vec![0.0, 1.0, 0.0]),
            objects: vec![ObjectDescription {
                kind: Some(1),
                center: Some(vec![0.0, 0.0, -1.0]),
                radius: Some(0.5),
                diffuse: Some(vec![0.8, 0.8, 0.8]),
                material: Some(1),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_ok() {
        let (settings, scene) = valid_config().validate().unwrap();
        assert_eq!(scene.len(), 1);
        assert_eq!(settings.image_width, 640);
        assert_eq!(settings.camera.vfov_degrees, 60.0);
        assert_eq!(settings.ambient.color, Vec3::new(0.2, 0.2, 0.4));
        assert!(settings.ambient.enabled);
        assert_eq!(settings.rr_probability, 0.8);
    }

    #[test]
    fn test_missing_vector() {
        let mut config = valid_config();
        config.vup = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingParameter("vup"))
        ));
    }

    #[test]
    fn test_short_vector() {
        let mut config = valid_config();
        config.light_pos = Some(vec![1.0, 2.0]);
        match config.validate() {
            Err(ConfigError::InvalidVector { name, len }) => {
                assert_eq!(name, "light_pos");
                assert_eq!(len, 2);
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_empty_scene() {
        let mut config = valid_config();
        config.objects.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyScene)));
    }

    #[test]
    fn test_bad_scalars() {
        let mut config = valid_config();
        config.rr_prob = 0.0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.rr_prob = 1.0;
        assert!(config.validate().is_ok());

        let mut config = valid_config();
        config.theta = -10.0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.samples_per_pixel = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.max_ao_distance = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_camera() {
        let mut config = valid_config();
        config.cam_origin = Some(vec![0.0, 5.0, 0.0]);
        config.lookat = Some(vec![0.0, 0.0, 0.0]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DegenerateCamera)
        ));

        // Nearly parallel is still degenerate, whatever the lengths
        let mut config = valid_config();
        config.vup = Some(vec![0.0, 1e-8, 1e-4]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DegenerateCamera)
        ));

        let mut config = valid_config();
        config.vup = Some(vec![0.0, 0.0, 0.0]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_short_up_vector_accepted() {
        let mut config = valid_config();
        config.cam_origin = Some(vec![0.0, 0.0, 5.0]);
        config.lookat = Some(vec![0.0, 0.0, 0.0]);
        config.vup = Some(vec![0.0, 1e-4, 0.0]);

        let (settings, _) = config.validate().unwrap();
        assert!((settings.camera.up - Vec3::Y).length() < 1e-6);
    }
}
