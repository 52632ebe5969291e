//! Percentage-closer filtered shadow visibility.

pub mod depth_map;
pub mod sampler;

use glam::{Vec2, Vec4};
use shade_hal::DepthTexture;

pub use depth_map::{ConstantDepth, DepthMap, TextureError};
pub use sampler::{AddressMode, CompareFilter, ComparisonSampler};

/// 3x3 PCF kernel in texel units, centered on the sample point.
pub const PCF_OFFSETS: [Vec2; 9] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
];

/// Fraction of the fragment visible from the shadow-casting light.
///
/// `shadow_pos` is the fragment in the shadow map's projective texture
/// space (x, y in [0, 1] after the divide, z the depth reference). Points
/// with `w <= 0` lie behind the light's projection and are fully lit.
///
/// The kernel spacing is one texel of the map's width, on both axes.
pub fn compute_visibility<T: DepthTexture + ?Sized>(
    shadow_pos: Vec4,
    texture: &T,
    sampler: &ComparisonSampler,
) -> f32 {
    if shadow_pos.w <= 0.0 {
        return 1.0;
    }
    let width = texture.width();
    if width == 0 || texture.height() == 0 {
        return 1.0;
    }

    let ndc = shadow_pos.truncate() / shadow_pos.w;
    let reference = ndc.z;
    let center = Vec2::new(ndc.x, ndc.y);
    let dx = 1.0 / width as f32;

    let lit: f32 = PCF_OFFSETS
        .iter()
        .map(|offset| sampler.sample_cmp(texture, center + *offset * dx, reference))
        .sum();

    lit / PCF_OFFSETS.len() as f32
}
