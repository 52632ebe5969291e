use clap::{Parser, ValueEnum};
use glam::Vec3;
use shade_core::{AddressMode, CompareFilter};
use shade_preview::{parse_vec3, LightConfig, LightKind, PreviewConfig};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "shade-preview")]
#[command(about = "Shade a ground plane with Blinn-Phong lighting and PCF shadows", long_about = None)]
#[command(version)]
struct Cli {
    /// Output PNG path
    #[arg(short, long, default_value = "preview.png")]
    output: PathBuf,

    /// Output width in pixels
    #[arg(long, default_value = "256")]
    width: u32,

    /// Output height in pixels
    #[arg(long, default_value = "256")]
    height: u32,

    /// Half-size of the ground plane in world units
    #[arg(long, default_value = "8.0")]
    extent: f32,

    /// Eye position (x,y,z)
    #[arg(long, value_parser = parse_vec3, default_value = "0,6,6")]
    eye: Vec3,

    /// Ambient light (r,g,b)
    #[arg(long, value_parser = parse_vec3, default_value = "0.25,0.25,0.25")]
    ambient: Vec3,

    /// Light model
    #[arg(long, value_enum, default_value_t = LightArg::Directional)]
    light: LightArg,

    /// Light strength (r,g,b)
    #[arg(long, value_parser = parse_vec3, default_value = "0.9,0.9,0.9")]
    strength: Vec3,

    /// Light travel direction for directional and spot lights (x,y,z)
    #[arg(long, value_parser = parse_vec3, default_value = "-0.4,-1,-0.3", allow_hyphen_values = true)]
    direction: Vec3,

    /// Light position for point and spot lights (x,y,z)
    #[arg(long, value_parser = parse_vec3, default_value = "0,4,0", allow_hyphen_values = true)]
    position: Vec3,

    /// Distance where point/spot attenuation begins
    #[arg(long, default_value = "2.0")]
    falloff_start: f32,

    /// Distance where point/spot lights stop contributing
    #[arg(long, default_value = "12.0")]
    falloff_end: f32,

    /// Spot cone exponent
    #[arg(long, default_value = "16.0")]
    spot_power: f32,

    /// Diffuse albedo (r,g,b)
    #[arg(long, value_parser = parse_vec3, default_value = "1,1,1")]
    albedo_color: Vec3,

    /// Fresnel reflectance at normal incidence (r,g,b)
    #[arg(long, value_parser = parse_vec3, default_value = "0.05,0.05,0.05")]
    fresnel_r0: Vec3,

    /// Surface roughness in [0, 1]
    #[arg(long, default_value = "0.5")]
    roughness: f32,

    /// Base-color texture repeats across the plane
    #[arg(long, default_value = "4.0")]
    uv_scale: f32,

    /// Base-color texture (PNG)
    #[arg(long)]
    albedo: Option<PathBuf>,

    /// Shadow map depth image (grayscale PNG, white = far)
    #[arg(long)]
    shadow_map: Option<PathBuf>,

    /// Shadow comparison filter
    #[arg(long, value_enum, default_value_t = FilterArg::Linear)]
    filter: FilterArg,

    /// Shadow map addressing outside [0, 1]
    #[arg(long, value_enum, default_value_t = AddressArg::Clamp)]
    address: AddressArg,

    /// Border depth used with `--address border`
    #[arg(long, default_value = "0.0")]
    border_depth: f32,

    /// Suppress progress output (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LightArg {
    Directional,
    Point,
    Spot,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    Point,
    Linear,
}

#[derive(Clone, Copy, ValueEnum)]
enum AddressArg {
    Clamp,
    Border,
}

impl Cli {
    fn into_config(self) -> PreviewConfig {
        let kind = match self.light {
            LightArg::Directional => LightKind::Directional,
            LightArg::Point => LightKind::Point,
            LightArg::Spot => LightKind::Spot,
        };
        let filter = match self.filter {
            FilterArg::Point => CompareFilter::Point,
            FilterArg::Linear => CompareFilter::Linear,
        };
        let address = match self.address {
            AddressArg::Clamp => AddressMode::Clamp,
            AddressArg::Border => AddressMode::Border(self.border_depth),
        };

        PreviewConfig {
            width: self.width,
            height: self.height,
            extent: self.extent,
            eye: self.eye,
            ambient: self.ambient,
            light: LightConfig {
                kind,
                strength: self.strength,
                direction: self.direction,
                position: self.position,
                falloff_start: self.falloff_start,
                falloff_end: self.falloff_end,
                spot_power: self.spot_power,
            },
            diffuse_albedo: self.albedo_color,
            fresnel_r0: self.fresnel_r0,
            roughness: self.roughness,
            uv_scale: self.uv_scale,
            albedo_path: self.albedo,
            shadow_map_path: self.shadow_map,
            filter,
            address,
            out_path: self.output,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging (suppressed if --quiet)
    if !cli.quiet {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let quiet = cli.quiet;
    let config = cli.into_config();

    match shade_preview::render_preview(&config) {
        Ok(summary) => {
            if !quiet {
                eprintln!(
                    "Success: Rendered {} ({}×{}, mean visibility {:.3})",
                    summary.out_path.display(),
                    summary.width,
                    summary.height,
                    summary.mean_visibility
                );
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
