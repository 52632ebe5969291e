//! Per-pixel driver: fragment generation, base-color lookup, shading and
//! output merge.

use glam::{Mat4, Vec4};
use image::{Rgba, RgbaImage};
use shade_core::{MaterialConstants, PassConstants, ShadingComposer};
use shade_hal::{ColorTexture, DepthTexture};

use crate::scene::GroundPlane;
use crate::textures::sample_nearest_wrap;

/// Convert a shaded color to RGBA8, clamping each channel to [0, 1].
pub fn to_rgba8(color: Vec4) -> [u8; 4] {
    let c = color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0 + Vec4::splat(0.5);
    [c.x as u8, c.y as u8, c.z as u8, c.w as u8]
}

/// Shade every pixel of `plane` into a `width` x `height` image.
///
/// Returns the image and the mean shadow visibility.
#[allow(clippy::too_many_arguments)]
pub fn render_plane<T, C>(
    plane: &GroundPlane,
    width: u32,
    height: u32,
    pass: &PassConstants,
    material: &MaterialConstants,
    composer: &ShadingComposer<'_, T>,
    albedo: Option<&C>,
) -> (RgbaImage, f32)
where
    T: DepthTexture + ?Sized,
    C: ColorTexture + ?Sized,
{
    let tex_transform: Mat4 = material.mat_transform;
    let mut image = RgbaImage::new(width, height);
    let mut visibility_sum = 0.0f64;

    for (px, py, pixel) in image.enumerate_pixels_mut() {
        let fragment = plane.fragment(px, py, width, height, &pass.shadow_transform);

        let base_color = match albedo {
            Some(texture) => {
                let uv = plane.tex_coord(fragment.world_pos);
                let uv = tex_transform.transform_point3(uv.extend(0.0)).truncate();
                sample_nearest_wrap(texture, uv)
            }
            None => Vec4::ONE,
        };

        let (color, visibility) =
            composer.shade_with_visibility(&fragment, pass, material, base_color);
        visibility_sum += visibility as f64;
        *pixel = Rgba(to_rgba8(color));
    }

    let count = (width as u64 * height as u64).max(1) as f64;
    (image, (visibility_sum / count) as f32)
}
