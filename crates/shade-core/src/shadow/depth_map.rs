//! In-memory depth textures.

use core::fmt;

use shade_hal::DepthTexture;

use crate::math::depth::unorm16_to_f32;

/// Error constructing a depth texture view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureError {
    /// Texel slice length does not equal `width * height`.
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::SizeMismatch { expected, actual } => {
                write!(f, "expected {} depth texels, got {}", expected, actual)
            }
        }
    }
}

impl core::error::Error for TextureError {}

/// Row-major UNORM16 depth texels borrowed from the caller.
#[derive(Clone, Copy, Debug)]
pub struct DepthMap<'a> {
    width: u32,
    height: u32,
    texels: &'a [u16],
}

impl<'a> DepthMap<'a> {
    /// Wrap `texels` as a `width` x `height` depth map.
    pub fn new(width: u32, height: u32, texels: &'a [u16]) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize;
        if texels.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }
}

impl DepthTexture for DepthMap<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn load(&self, x: u32, y: u32) -> f32 {
        let idx = y as usize * self.width as usize + x as usize;
        self.texels.get(idx).copied().map_or(1.0, unorm16_to_f32)
    }
}

/// A depth texture storing the same depth in every texel.
///
/// `ConstantDepth::new(w, h, 1.0)` stands in for a pass with no occluders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantDepth {
    pub width: u32,
    pub height: u32,
    pub depth: f32,
}

impl ConstantDepth {
    pub const fn new(width: u32, height: u32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

impl DepthTexture for ConstantDepth {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn load(&self, _x: u32, _y: u32) -> f32 {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_texel_count() {
        let texels = [0u16; 5];
        assert_eq!(
            DepthMap::new(2, 2, &texels).unwrap_err(),
            TextureError::SizeMismatch {
                expected: 4,
                actual: 5
            }
        );
    }

    #[test]
    fn loads_row_major() {
        let texels = [0x0000, 0xFFFF, 0x8000, 0x0000];
        let map = DepthMap::new(2, 2, &texels).unwrap();
        assert_eq!(map.load(1, 0), 1.0);
        assert_eq!(map.load(0, 0), 0.0);
        assert!((map.load(0, 1) - 0.5).abs() < 1e-4);
    }
}
