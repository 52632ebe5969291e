//! PNG loading for the base-color texture and the shadow map.

use std::path::Path;

use glam::{Vec2, Vec4};
use image::{DynamicImage, GenericImageView};
use shade_core::math::depth::unorm8_to_unorm16;
use shade_core::shadow::DepthMap;
use shade_hal::ColorTexture;

use crate::error::PreviewError;

/// Decoded RGBA8 base-color texture.
#[derive(Debug, Clone)]
pub struct RgbaTexture {
    width: u32,
    height: u32,
    /// RGBA8888 pixel data (row-major), exactly `width * height * 4` bytes.
    data: Vec<u8>,
}

impl RgbaTexture {
    /// Wrap row-major RGBA8888 pixels, checking the buffer covers the size.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PreviewError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PreviewError::Validation(format!(
                "albedo {}×{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

impl ColorTexture for RgbaTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    /// Out-of-range texels read as opaque white.
    fn load(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [u8::MAX; 4];
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        match self.data.get(i..i + 4) {
            Some(&[r, g, b, a]) => [r, g, b, a],
            _ => [u8::MAX; 4],
        }
    }
}

/// Decoded UNORM16 shadow map.
#[derive(Debug, Clone)]
pub struct DepthImage {
    pub width: u32,
    pub height: u32,
    pub texels: Vec<u16>,
}

impl DepthImage {
    /// Borrow as a depth texture for the shading core.
    pub fn as_depth_map(&self) -> Result<DepthMap<'_>, PreviewError> {
        Ok(DepthMap::new(self.width, self.height, &self.texels)?)
    }
}

fn open_image(path: &Path) -> Result<DynamicImage, PreviewError> {
    image::open(path).map_err(|e| PreviewError::ImageDecode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn validate_dimensions(path: &Path, width: u32, height: u32) -> Result<(), PreviewError> {
    if width == 0 || height == 0 {
        return Err(PreviewError::Validation(format!(
            "{} has empty dimensions {}×{}",
            path.display(),
            width,
            height
        )));
    }
    Ok(())
}

/// Load a PNG as an RGBA8 base-color texture.
pub fn load_albedo(path: &Path) -> Result<RgbaTexture, PreviewError> {
    let img = open_image(path)?;
    let (width, height) = img.dimensions();
    validate_dimensions(path, width, height)?;

    log::info!(
        "Loaded albedo {}: {}×{} RGBA8",
        path.display(),
        width,
        height
    );

    RgbaTexture::new(width, height, img.to_rgba8().into_raw())
}

/// Load a grayscale PNG as a shadow map. White is the far plane.
///
/// 8-bit images are expanded to 16 bits so that 0xFF maps to exactly 1.0.
pub fn load_depth(path: &Path) -> Result<DepthImage, PreviewError> {
    let img = open_image(path)?;
    let (width, height) = img.dimensions();
    validate_dimensions(path, width, height)?;

    let texels: Vec<u16> = match img {
        DynamicImage::ImageLuma8(buf) => buf.into_raw().into_iter().map(unorm8_to_unorm16).collect(),
        other => other.to_luma16().into_raw(),
    };

    log::info!(
        "Loaded shadow map {}: {}×{} depth texels",
        path.display(),
        width,
        height
    );

    Ok(DepthImage {
        width,
        height,
        texels,
    })
}

/// Nearest-texel lookup with repeat addressing. Returns RGBA in [0, 1].
pub fn sample_nearest_wrap<T: ColorTexture + ?Sized>(texture: &T, uv: Vec2) -> Vec4 {
    let width = texture.width();
    let height = texture.height();
    if width == 0 || height == 0 {
        return Vec4::ONE;
    }

    let wrapped = uv - uv.floor();
    let x = ((wrapped.x * width as f32) as u32).min(width - 1);
    let y = ((wrapped.y * height as f32) as u32).min(height - 1);

    let [r, g, b, a] = texture.load(x, y);
    Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
}
