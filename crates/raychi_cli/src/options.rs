//! Command line option parsing.

use std::path::PathBuf;

use clap::Parser;
use raychi_core::RenderConfig;

/// Render a scene with the Raychi wavefront path tracer.
///
/// Values given on the command line override the configuration file.
#[derive(Clone, Debug, Parser)]
#[command(name = "raychi", author, version, about)]
pub struct RaychiArgs {
    /// Path to the JSON configuration file.
    #[arg(long, default_value = "raychi_config.json", value_name = "FILE")]
    pub config: PathBuf,

    /// Path to a separate JSON object list, replacing the config's objects.
    #[arg(long = "objects-config", value_name = "FILE")]
    pub objects_config: Option<PathBuf>,

    /// Output image path. The format follows the extension.
    #[arg(long, short = 'o', default_value = "raychi.png", value_name = "FILE")]
    pub output: PathBuf,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// Tile edge length in pixels (square tiles).
    #[arg(long, value_name = "PIXELS")]
    pub tile: Option<u32>,

    /// Samples per pixel.
    #[arg(long)]
    pub spp: Option<u32>,

    #[arg(long = "max-depth")]
    pub max_depth: Option<u32>,

    #[arg(long = "disable-ao")]
    pub disable_ao: bool,

    #[arg(long = "disable-direct-lighting")]
    pub disable_direct_lighting: bool,

    /// Russian roulette survival probability, in (0, 1].
    #[arg(long = "rr-prob")]
    pub rr_prob: Option<f32>,

    /// Ambient occlusion probes per diffuse hit.
    #[arg(long = "ao-samples")]
    pub ao_samples: Option<u32>,

    /// Ambient occlusion probe distance.
    #[arg(long = "ao-distance")]
    pub ao_distance: Option<f32>,

    /// Slots in each of the two ray buffers.
    #[arg(long = "max-ray-pool")]
    pub max_ray_pool: Option<usize>,

    /// Slots in the ambient request buffer.
    #[arg(long = "max-ambient-requests")]
    pub max_ambient_requests: Option<usize>,

    /// Light position.
    #[arg(long = "light-pos", num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub light_pos: Option<Vec<f32>>,

    /// Light colour.
    #[arg(long = "light-color", num_args = 3, value_names = ["R", "G", "B"])]
    pub light_color: Option<Vec<f32>>,

    /// Ambient occlusion colour.
    #[arg(long = "ambient-color", num_args = 3, value_names = ["R", "G", "B"])]
    pub ambient_color: Option<Vec<f32>>,

    /// Camera origin.
    #[arg(long = "cam-origin", num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub cam_origin: Option<Vec<f32>>,

    /// Camera look-at target.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub lookat: Option<Vec<f32>>,

    /// Camera up vector.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub vup: Option<Vec<f32>>,

    /// Vertical field of view in degrees.
    #[arg(long)]
    pub theta: Option<f32>,

    /// Seed for the per-ray random streams.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads. Defaults to one per core.
    #[arg(long)]
    pub threads: Option<usize>,
}

impl RaychiArgs {
    /// Override `config` with every value given on the command line.
    pub fn apply(&self, config: &mut RenderConfig) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }
        fn set_vec(target: &mut Option<Vec<f32>>, value: &Option<Vec<f32>>) {
            if value.is_some() {
                target.clone_from(value);
            }
        }

        set(&mut config.image_width, &self.width);
        set(&mut config.image_height, &self.height);
        set(&mut config.tile_width, &self.tile);
        set(&mut config.tile_height, &self.tile);
        set(&mut config.samples_per_pixel, &self.spp);
        set(&mut config.max_depth, &self.max_depth);
        set(&mut config.rr_prob, &self.rr_prob);
        set(&mut config.num_ao_samples, &self.ao_samples);
        set(&mut config.max_ao_distance, &self.ao_distance);
        set(&mut config.max_ray_pool, &self.max_ray_pool);
        set(&mut config.max_ambient_requests, &self.max_ambient_requests);
        set(&mut config.theta, &self.theta);
        set(&mut config.seed, &self.seed);

        set_vec(&mut config.light_pos, &self.light_pos);
        set_vec(&mut config.light_color, &self.light_color);
        set_vec(&mut config.ambient_color, &self.ambient_color);
        set_vec(&mut config.cam_origin, &self.cam_origin);
        set_vec(&mut config.lookat, &self.lookat);
        set_vec(&mut config.vup, &self.vup);

        if self.disable_ao {
            config.enable_ao = false;
        }
        if self.disable_direct_lighting {
            config.enable_direct_lighting = false;
        }
    }
}
