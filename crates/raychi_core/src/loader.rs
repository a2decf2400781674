//! JSON configuration loading.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::{ObjectDescription, RenderConfig};
use crate::error::ConfigResult;

/// Load a render configuration from a JSON file.
///
/// Missing keys take their defaults; validation happens separately in
/// [`RenderConfig::validate`].
///
/// # Example
///
/// ```ignore
/// let config = load_config("raychi_config.json")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> ConfigResult<RenderConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let config = load_config_from_str(&text)?;
    log::info!(
        "Loaded config {:?} ({} objects)",
        path,
        config.objects.len()
    );
    Ok(config)
}

/// Parse a render configuration from a JSON string.
pub fn load_config_from_str(text: &str) -> ConfigResult<RenderConfig> {
    Ok(serde_json::from_str(text)?)
}

/// Object files are either a bare list or a document with an `objects` key.
#[derive(Deserialize)]
#[serde(untagged)]
enum ObjectsFile {
    List(Vec<ObjectDescription>),
    Document { objects: Vec<ObjectDescription> },
}

/// Load a separate scene-object list from a JSON file.
pub fn load_objects<P: AsRef<Path>>(path: P) -> ConfigResult<Vec<ObjectDescription>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let objects = match serde_json::from_str(&text)? {
        ObjectsFile::List(objects) => objects,
        ObjectsFile::Document { objects } => objects,
    };
    log::info!("Loaded {} objects from {:?}", objects.len(), path);
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    const CONFIG: &str = r#"{
        "light_pos": [0.0, 5.4, -1.0],
        "ambient_color": [0.2, 0.2, 0.4],
        "light_color": [10.0, 10.0, 10.0],
        "cam_origin": [0.0, 1.0, -5.0],
        "lookat": [0.0, 1.0, 0.0],
        "vup": [0.0, 1.0, 0.0],
        "theta": 45.0,
        "width": 32,
        "height": 16,
        "RR_prob": 0.5,
        "num_AO_samples": 4,
        "tile_order": "spiral",
        "objects": [
            {"type": 1, "center": [0.0, 5.4, -1.0], "radius": 3.0,
             "diffuse": [10.0, 10.0, 10.0], "material": 0},
            {"type": 0, "normal": [0.0, 1.0, 0.0], "offset": -0.5,
             "diffuse": [0.8, 0.8, 0.8], "do_checkboard": 1, "scale": 2, "material": 1},
            {"type": 1, "center": [0.6, -0.3, -2.0], "radius": 0.2,
             "diffuse": [0.0, 0.0, 0.0], "specular": [0.8, 0.6, 0.2],
             "fuzz": 0.1, "material": 4}
        ]
    }"#;

    #[test]
    fn test_parse_config() {
        let config = load_config_from_str(CONFIG).unwrap();
        assert_eq!(config.image_width, 32);
        assert_eq!(config.image_height, 16);
        assert_eq!(config.rr_prob, 0.5);
        assert_eq!(config.num_ao_samples, 4);
        assert_eq!(config.objects.len(), 3);
        assert_eq!(config.objects[1].checkerboard, 1);
        assert_eq!(config.objects[1].checker_scale, Some(2));

        // Unspecified keys keep their defaults
        assert_eq!(config.samples_per_pixel, 256);
        assert!(config.enable_ao);

        let (settings, scene) = config.validate().unwrap();
        assert_eq!(settings.tile_order, crate::TileOrder::Spiral);
        assert_eq!(settings.camera.vfov_degrees, 45.0);
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_missing_type_is_config_error() {
        let text = CONFIG.replace(r#""type": 1, "center": [0.6"#, r#""center": [0.6"#);
        let config = load_config_from_str(&text).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { index: 2, field: "type" })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_config_from_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/raychi_config.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_demo_scene_validates() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenes/default.json");
        let (settings, scene) = load_config(path).unwrap().validate().unwrap();
        assert_eq!((settings.image_width, settings.image_height), (640, 360));
        assert_eq!(scene.len(), 10);
        assert!(scene.objects()[1].checker.enabled);
    }

    #[test]
    fn test_load_objects_both_layouts() {
        let dir = std::env::temp_dir();
        let list = dir.join(format!("raychi_objects_list_{}.json", std::process::id()));
        let document = dir.join(format!("raychi_objects_doc_{}.json", std::process::id()));
        let object = r#"{"type": 1, "center": [0, 0, 0], "radius": 1, "diffuse": [1, 1, 1], "material": 1}"#;

        fs::write(&list, format!("[{object}, {object}]")).unwrap();
        fs::write(&document, format!(r#"{{"objects": [{object}]}}"#)).unwrap();

        assert_eq!(load_objects(&list).unwrap().len(), 2);
        assert_eq!(load_objects(&document).unwrap().len(), 1);

        fs::remove_file(list).ok();
        fs::remove_file(document).ok();
    }
}
