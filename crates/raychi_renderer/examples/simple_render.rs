//! Simple wavefront render example.
//!
//! Renders a small box scene and saves it in PPM format.

use raychi_renderer::{render, Color, ImageBuffer, Material, RenderSettings, Scene, SceneObject, Vec3};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Raychi Wavefront Path Tracer - Simple Example");
    println!("=============================================");

    let scene = build_scene();
    let mut settings = RenderSettings::default()
        .with_resolution(320, 180)
        .with_quality(16, 6)
        .with_tiles(32, 32);
    settings.ambient.samples = 8;
    settings.light.position = Vec3::new(0.0, 2.3, -1.0);

    println!(
        "Rendering {}x{} @ {} spp...",
        settings.image_width, settings.image_height, settings.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let output = render(&settings, &scene);
    println!("Rendered in {:?} ({} rays)", start.elapsed(), output.rays_processed());

    for warning in output.warnings() {
        println!("Warning: {}", warning);
    }

    let filename = "output.ppm";
    save_ppm(&output.image, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> Scene {
    Scene::new(vec![
        // Light
        SceneObject::sphere(Vec3::new(0.0, 5.4, -1.0), 3.0, Material::Emissive, Color::splat(10.0)),
        // Floor, checkered
        SceneObject::plane(Vec3::Y, -0.5, Material::Diffuse, Color::splat(0.8)).with_checker(1),
        // Red and green walls
        SceneObject::sphere(Vec3::new(-101.5, 0.0, -1.0), 100.0, Material::Diffuse, Color::new(0.6, 0.0, 0.0)),
        SceneObject::sphere(Vec3::new(101.5, 0.0, -1.0), 100.0, Material::Diffuse, Color::new(0.0, 0.6, 0.0)),
        // Diffuse, metal, glass and brushed gold
        SceneObject::sphere(Vec3::new(0.0, -0.2, -1.5), 0.3, Material::Diffuse, Color::new(0.8, 0.3, 0.3)),
        SceneObject::sphere(Vec3::new(-0.8, 0.2, -1.0), 0.7, Material::Metal, Color::ZERO)
            .with_specular(Color::new(0.6, 0.8, 0.8)),
        SceneObject::sphere(Vec3::new(0.7, 0.0, -0.5), 0.5, Material::Dielectric { ior: 1.5 }, Color::ONE),
        SceneObject::sphere(Vec3::new(0.6, -0.3, -2.0), 0.2, Material::FuzzyMetal { fuzz: 0.1 }, Color::ZERO)
            .with_specular(Color::new(0.8, 0.6, 0.2)),
    ])
}

/// Gamma 2.2 and clamp to a byte.
fn to_byte(linear: f32) -> u8 {
    (255.0 * linear.max(0.0).powf(1.0 / 2.2).min(1.0)) as u8
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let color = image.get(x, y);
            writeln!(writer, "{} {} {}", to_byte(color.x), to_byte(color.y), to_byte(color.z))?;
        }
    }

    Ok(())
}
