//! Depth-comparison sampler.
//!
//! Models a hardware comparison sampler: every tap compares the reference
//! depth against the stored depth and yields 1.0 (lit) or 0.0 (shadowed)
//! before any filtering happens.

use glam::Vec2;
use shade_hal::DepthTexture;

/// How comparison results are combined within one sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CompareFilter {
    /// Compare against the single texel containing the sample point.
    Point,
    /// Bilinearly weight the comparisons of the four nearest texels.
    #[default]
    Linear,
}

/// Policy for texels outside the texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AddressMode {
    /// Use the nearest edge texel.
    Clamp,
    /// Use a constant stored depth. 0.0 (opaque black) reads as occluded for
    /// every reference depth above zero, 1.0 reads as lit.
    Border(f32),
}

impl Default for AddressMode {
    fn default() -> Self {
        AddressMode::Border(0.0)
    }
}

/// Comparison sampler state.
///
/// The comparison is `reference <= stored`: a fragment no deeper than the
/// nearest occluder recorded in the map is lit.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ComparisonSampler {
    pub filter: CompareFilter,
    pub address: AddressMode,
}

impl ComparisonSampler {
    pub const fn new(filter: CompareFilter, address: AddressMode) -> Self {
        Self { filter, address }
    }

    /// Sample `texture` at texture-space `uv` and compare against
    /// `reference`. Returns the lit fraction in [0, 1].
    ///
    /// An empty texture has nothing to occlude and samples as lit.
    pub fn sample_cmp<T: DepthTexture + ?Sized>(&self, texture: &T, uv: Vec2, reference: f32) -> f32 {
        let width = texture.width();
        let height = texture.height();
        if width == 0 || height == 0 {
            return 1.0;
        }

        let px = uv.x * width as f32;
        let py = uv.y * height as f32;

        match self.filter {
            CompareFilter::Point => {
                let x = libm::floorf(px) as i64;
                let y = libm::floorf(py) as i64;
                self.compare(texture, x, y, reference)
            }
            CompareFilter::Linear => {
                // Texel centers sit at half-integer coordinates.
                let fx = px - 0.5;
                let fy = py - 0.5;
                let x0f = libm::floorf(fx);
                let y0f = libm::floorf(fy);
                let tx = fx - x0f;
                let ty = fy - y0f;
                // Far-out coordinates saturate; the neighbor must not overflow.
                let x0 = x0f as i64;
                let y0 = y0f as i64;
                let x1 = x0.saturating_add(1);
                let y1 = y0.saturating_add(1);

                let c00 = self.compare(texture, x0, y0, reference);
                let c10 = self.compare(texture, x1, y0, reference);
                let c01 = self.compare(texture, x0, y1, reference);
                let c11 = self.compare(texture, x1, y1, reference);

                let top = c00 + (c10 - c00) * tx;
                let bottom = c01 + (c11 - c01) * tx;
                top + (bottom - top) * ty
            }
        }
    }

    fn compare<T: DepthTexture + ?Sized>(&self, texture: &T, x: i64, y: i64, reference: f32) -> f32 {
        if reference <= self.fetch(texture, x, y) {
            1.0
        } else {
            0.0
        }
    }

    /// Stored depth at a possibly out-of-range texel, resolved through the
    /// address mode. The texture is known to be non-empty.
    fn fetch<T: DepthTexture + ?Sized>(&self, texture: &T, x: i64, y: i64) -> f32 {
        let max_x = texture.width() as i64 - 1;
        let max_y = texture.height() as i64 - 1;
        let inside = (0..=max_x).contains(&x) && (0..=max_y).contains(&y);

        match self.address {
            _ if inside => texture.load(x as u32, y as u32),
            AddressMode::Clamp => texture.load(x.clamp(0, max_x) as u32, y.clamp(0, max_y) as u32),
            AddressMode::Border(depth) => depth,
        }
    }
}
