#![no_std]

/// Read-only single-channel depth texture, such as a shadow map produced
/// by an earlier depth-only pass.
///
/// Texel `(0, 0)` is the top-left corner, matching texture-space UV origin.
/// Callers only read texels inside `0..width()` x `0..height()`; addressing
/// outside that range is resolved by the sampler before `load` is called.
pub trait DepthTexture {
    /// Texture width in texels.
    fn width(&self) -> u32;

    /// Texture height in texels.
    fn height(&self) -> u32;

    /// Stored depth at texel `(x, y)`, normalized to 0.0 (near) - 1.0 (far).
    fn load(&self, x: u32, y: u32) -> f32;
}

/// Read-only RGBA8 color texture used for base-color lookups.
pub trait ColorTexture {
    /// Texture width in texels.
    fn width(&self) -> u32;

    /// Texture height in texels.
    fn height(&self) -> u32;

    /// Texel at `(x, y)` as [R, G, B, A].
    fn load(&self, x: u32, y: u32) -> [u8; 4];
}
