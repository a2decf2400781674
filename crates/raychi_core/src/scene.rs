//! Scene model.
//!
//! A scene is an immutable, ordered list of analytic objects (planes and
//! spheres), each carrying its own surface parameters. It is built once per
//! render and only read afterwards.

use crate::config::{vec3, ObjectDescription};
use crate::error::{ConfigError, ConfigResult};
use raychi_math::{Color, Vec3};

/// Geometric part of a scene object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Infinite plane `normal · p = offset`. `normal` is unit length.
    Plane { normal: Vec3, offset: f32 },
    /// Sphere with `radius > 0`.
    Sphere { center: Vec3, radius: f32 },
}

/// Surface response of a scene object.
///
/// The shared `diffuse` and `specular` colours live on [`SceneObject`]; the
/// variants only carry what is specific to them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Light source. `diffuse` is its radiance; rays stop here.
    Emissive,
    /// Lambertian reflector with albedo `diffuse`.
    Diffuse,
    /// Perfect mirror tinted by `specular`.
    Metal,
    /// Glass-like refractor.
    Dielectric { ior: f32 },
    /// Mirror tinted by `specular` with a perturbed reflection lobe.
    FuzzyMetal { fuzz: f32 },
}

impl Material {
    /// Whether hits on this material spawn ambient-occlusion probes.
    pub fn receives_ambient(&self) -> bool {
        matches!(self, Material::Diffuse)
    }

    /// Whether this material only partially blocks shadow rays.
    pub fn is_dielectric(&self) -> bool {
        matches!(self, Material::Dielectric { .. })
    }
}

/// Checkerboard decoration settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checker {
    /// Darken alternate cells of the diffuse albedo.
    pub enabled: bool,
    /// Cells per unit (planes) or per UV period (spheres).
    pub scale: i32,
}

impl Default for Checker {
    fn default() -> Self {
        Self {
            enabled: false,
            scale: 1,
        }
    }
}

/// One analytic object with its surface parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub material: Material,
    /// Albedo, or radiance for emissive objects
    pub diffuse: Color,
    /// Specular colour, used by metals and the Blinn-Phong highlight
    pub specular: Color,
    pub checker: Checker,
}

impl SceneObject {
    /// Create a sphere with default surface parameters.
    pub fn sphere(center: Vec3, radius: f32, material: Material, diffuse: Color) -> Self {
        Self {
            shape: Shape::Sphere { center, radius },
            material,
            diffuse,
            specular: Color::ZERO,
            checker: Checker::default(),
        }
    }

    /// Create a plane with default surface parameters.
    ///
    /// `normal` is normalized; `offset` is rescaled so the plane is unchanged.
    pub fn plane(normal: Vec3, offset: f32, material: Material, diffuse: Color) -> Self {
        let len = normal.length();
        Self {
            shape: Shape::Plane {
                normal: normal / len,
                offset: offset / len,
            },
            material,
            diffuse,
            specular: Color::ZERO,
            checker: Checker::default(),
        }
    }

    /// Set the specular colour.
    pub fn with_specular(mut self, specular: Color) -> Self {
        self.specular = specular;
        self
    }

    /// Set the checkerboard decoration.
    pub fn with_checker(mut self, scale: i32) -> Self {
        self.checker = Checker {
            enabled: true,
            scale,
        };
        self
    }

    /// Build an object from its configuration description.
    ///
    /// `index` is the object's position in the scene list, used in error
    /// messages.
    pub fn from_description(index: usize, desc: &ObjectDescription) -> ConfigResult<Self> {
        let missing = |field| ConfigError::MissingField { index, field };
        let kind = desc.kind.ok_or(missing("type"))?;

        let shape = match kind {
            0 => {
                let normal = desc.normal.as_deref().ok_or(missing("normal"))?;
                let normal = vec3(&format!("objects[{index}].normal"), normal)?;
                let offset = desc.offset.ok_or(missing("offset"))?;
                let len = normal.length();
                if !(len > 0.0) {
                    return Err(ConfigError::invalid(
                        format!("objects[{index}].normal"),
                        "plane normal must be non-zero",
                    ));
                }
                Shape::Plane {
                    normal: normal / len,
                    offset: offset / len,
                }
            }
            1 => {
                let center = desc.center.as_deref().ok_or(missing("center"))?;
                let center = vec3(&format!("objects[{index}].center"), center)?;
                let radius = desc.radius.ok_or(missing("radius"))?;
                if !(radius > 0.0) {
                    return Err(ConfigError::invalid(
                        format!("objects[{index}].radius"),
                        "sphere radius must be positive",
                    ));
                }
                Shape::Sphere { center, radius }
            }
            other => {
                return Err(ConfigError::UnknownObjectType {
                    index,
                    value: other,
                })
            }
        };

        let diffuse = desc.diffuse.as_deref().ok_or(missing("diffuse"))?;
        let diffuse = non_negative_color(index, "diffuse", diffuse)?;
        let specular = match desc.specular.as_deref() {
            Some(specular) => non_negative_color(index, "specular", specular)?,
            None => Color::ZERO,
        };

        let material = match desc.material.ok_or(missing("material"))? {
            0 => Material::Emissive,
            1 => Material::Diffuse,
            2 => Material::Metal,
            3 => {
                let ior = desc.ior.unwrap_or(1.0);
                if !(ior > 0.0) {
                    return Err(ConfigError::invalid(
                        format!("objects[{index}].ior"),
                        "index of refraction must be positive",
                    ));
                }
                Material::Dielectric { ior }
            }
            4 => {
                let fuzz = desc.fuzz.unwrap_or(0.0);
                if !(fuzz >= 0.0) {
                    return Err(ConfigError::invalid(
                        format!("objects[{index}].fuzz"),
                        "fuzz must not be negative",
                    ));
                }
                Material::FuzzyMetal { fuzz }
            }
            other => {
                return Err(ConfigError::UnknownMaterial {
                    index,
                    value: other,
                })
            }
        };

        Ok(Self {
            shape,
            material,
            diffuse,
            specular,
            checker: Checker {
                enabled: desc.checkerboard != 0,
                scale: desc.checker_scale.unwrap_or(1),
            },
        })
    }
}

fn non_negative_color(index: usize, field: &str, components: &[f32]) -> ConfigResult<Color> {
    let name = format!("objects[{index}].{field}");
    let color = vec3(&name, components)?;
    if color.min_element() < 0.0 || !color.is_finite() {
        return Err(ConfigError::invalid(
            name,
            "colour components must be finite and non-negative",
        ));
    }
    Ok(color)
}

/// The immutable object list for one render.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Wrap an already-built object list.
    ///
    /// No validation is done here; an empty scene simply hits nothing.
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self { objects }
    }

    /// Build a scene from configuration descriptions.
    ///
    /// Fails on an empty list or on the first invalid description.
    pub fn from_descriptions(descriptions: &[ObjectDescription]) -> ConfigResult<Self> {
        if descriptions.is_empty() {
            return Err(ConfigError::EmptyScene);
        }

        let objects = descriptions
            .iter()
            .enumerate()
            .map(|(index, desc)| SceneObject::from_description(index, desc))
            .collect::<ConfigResult<Vec<_>>>()?;

        log::debug!("Built scene with {} objects", objects.len());
        Ok(Self { objects })
    }

    /// All objects in scene order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_desc() -> ObjectDescription {
        ObjectDescription {
            kind: Some(1),
            center: Some(vec![0.0, 0.0, -1.0]),
            radius: Some(0.5),
            diffuse: Some(vec![0.8, 0.3, 0.3]),
            material: Some(1),
            ..Default::default()
        }
    }

    fn plane_desc() -> ObjectDescription {
        ObjectDescription {
            kind: Some(0),
            normal: Some(vec![0.0, 2.0, 0.0]),
            offset: Some(-1.0),
            diffuse: Some(vec![0.5, 0.5, 0.5]),
            material: Some(1),
            checkerboard: 1,
            checker_scale: Some(4),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_sphere() {
        let obj = SceneObject::from_description(0, &sphere_desc()).unwrap();
        assert_eq!(
            obj.shape,
            Shape::Sphere {
                center: Vec3::new(0.0, 0.0, -1.0),
                radius: 0.5
            }
        );
        assert_eq!(obj.material, Material::Diffuse);
        assert_eq!(obj.specular, Color::ZERO);
        assert!(!obj.checker.enabled);
    }

    #[test]
    fn test_build_plane_normalizes() {
        let obj = SceneObject::from_description(0, &plane_desc()).unwrap();
        assert_eq!(
            obj.shape,
            Shape::Plane {
                normal: Vec3::Y,
                offset: -0.5
            }
        );
        assert_eq!(obj.checker, Checker { enabled: true, scale: 4 });
    }

    #[test]
    fn test_missing_type_specific_field() {
        let mut desc = sphere_desc();
        desc.radius = None;
        match SceneObject::from_description(3, &desc) {
            Err(ConfigError::MissingField { index: 3, field: "radius" }) => {}
            other => panic!("unexpected result: {:?}", other),
        }

        // A sphere description does not satisfy the plane requirements
        let mut desc = sphere_desc();
        desc.kind = Some(0);
        assert!(matches!(
            SceneObject::from_description(0, &desc),
            Err(ConfigError::MissingField { field: "normal", .. })
        ));
    }

    #[test]
    fn test_unknown_codes() {
        let mut desc = sphere_desc();
        desc.kind = Some(7);
        assert!(matches!(
            SceneObject::from_description(0, &desc),
            Err(ConfigError::UnknownObjectType { value: 7, .. })
        ));

        let mut desc = sphere_desc();
        desc.material = Some(5);
        assert!(matches!(
            SceneObject::from_description(0, &desc),
            Err(ConfigError::UnknownMaterial { value: 5, .. })
        ));
    }

    #[test]
    fn test_material_parameters() {
        let mut desc = sphere_desc();
        desc.material = Some(3);
        desc.ior = Some(1.5);
        let obj = SceneObject::from_description(0, &desc).unwrap();
        assert_eq!(obj.material, Material::Dielectric { ior: 1.5 });
        assert!(obj.material.is_dielectric());
        assert!(!obj.material.receives_ambient());

        desc.material = Some(4);
        desc.fuzz = Some(0.1);
        let obj = SceneObject::from_description(0, &desc).unwrap();
        assert_eq!(obj.material, Material::FuzzyMetal { fuzz: 0.1 });
    }

    #[test]
    fn test_negative_colour_rejected() {
        let mut desc = sphere_desc();
        desc.diffuse = Some(vec![0.5, -0.1, 0.5]);
        assert!(matches!(
            SceneObject::from_description(0, &desc),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_bad_vector_length() {
        let mut desc = sphere_desc();
        desc.center = Some(vec![0.0, 1.0]);
        assert!(matches!(
            SceneObject::from_description(0, &desc),
            Err(ConfigError::InvalidVector { len: 2, .. })
        ));
    }

    #[test]
    fn test_scene_from_descriptions() {
        let scene = Scene::from_descriptions(&[sphere_desc(), plane_desc()]).unwrap();
        assert_eq!(scene.len(), 2);
        assert!(matches!(scene.objects()[1].shape, Shape::Plane { .. }));

        assert!(matches!(
            Scene::from_descriptions(&[]),
            Err(ConfigError::EmptyScene)
        ));
    }
}
