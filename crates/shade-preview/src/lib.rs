/// Error types for preview rendering.
pub mod error;

/// Configuration and summary types.
pub mod types;

/// Ground-plane fragment generation and shadow projection.
pub mod scene;

/// PNG loading for albedo and shadow-map inputs.
pub mod textures;

/// Per-pixel shading loop and output conversion.
pub mod render;

pub use error::PreviewError;
pub use types::{parse_vec3, LightConfig, LightKind, PreviewConfig, RenderSummary};

use shade_core::shadow::ConstantDepth;
use shade_core::{ComparisonSampler, PassConstants, ShadingComposer};
use shade_hal::DepthTexture;

use scene::GroundPlane;
use textures::RgbaTexture;

/// Resolution of the stand-in shadow map used when no depth image is given.
const OPEN_SHADOW_MAP_SIZE: u32 = 1024;

/// Render the ground plane described by `config` and write it as a PNG.
pub fn render_preview(config: &PreviewConfig) -> Result<RenderSummary, PreviewError> {
    config.validate()?;

    let albedo = config
        .albedo_path
        .as_deref()
        .map(textures::load_albedo)
        .transpose()?;
    let depth = config
        .shadow_map_path
        .as_deref()
        .map(textures::load_depth)
        .transpose()?;

    let (image, mean_visibility) = match &depth {
        Some(depth) => {
            let map = depth.as_depth_map()?;
            render_with(config, &map, albedo.as_ref())
        }
        None => {
            let open = ConstantDepth::new(OPEN_SHADOW_MAP_SIZE, OPEN_SHADOW_MAP_SIZE, 1.0);
            render_with(config, &open, albedo.as_ref())
        }
    };

    if let Some(parent) = config.out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    image
        .save(&config.out_path)
        .map_err(|e| PreviewError::ImageEncode {
            path: config.out_path.clone(),
            message: e.to_string(),
        })?;

    log::info!(
        "Wrote {} ({}×{}, mean visibility {:.3})",
        config.out_path.display(),
        config.width,
        config.height,
        mean_visibility
    );

    Ok(RenderSummary {
        width: config.width,
        height: config.height,
        mean_visibility,
        out_path: config.out_path.clone(),
    })
}

/// Build the pass and composer around `shadow_map` and shade the plane.
pub fn render_with<T: DepthTexture + ?Sized>(
    config: &PreviewConfig,
    shadow_map: &T,
    albedo: Option<&RgbaTexture>,
) -> (image::RgbaImage, f32) {
    let plane = GroundPlane::new(config.extent);
    let light = config.light.to_light();

    let mut pass = PassConstants::with_light(config.eye, config.ambient_light(), light);
    pass.shadow_transform = scene::shadow_transform(&light, &plane);
    log::debug!("Shadow transform: {:?}", pass.shadow_transform);

    let material = config.material();
    let sampler = ComparisonSampler::new(config.filter, config.address);
    let composer = ShadingComposer::new(shadow_map, sampler);

    log::info!(
        "Shading {}×{} plane (extent {}) with {:?} light",
        config.width,
        config.height,
        config.extent,
        config.light.kind
    );

    render::render_plane(
        &plane,
        config.width,
        config.height,
        &pass,
        &material,
        &composer,
        albedo,
    )
}
