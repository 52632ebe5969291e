//! Ground-plane fragments and the shadow-map projection that covers them.
//!
//! The preview has no rasterizer: every output pixel maps straight onto a
//! point of the plane `y = 0`, viewed from above with +X to the right and
//! +Z toward the bottom of the image.

use std::f32::consts::SQRT_2;

use glam::{Mat4, Vec2, Vec3, Vec4};
use shade_core::{Fragment, Light};

/// Maps NDC (x, y in [-1, 1], y up) to texture space (u, v in [0, 1], v down).
pub const NDC_TO_TEXTURE: Mat4 = Mat4::from_cols(
    Vec4::new(0.5, 0.0, 0.0, 0.0),
    Vec4::new(0.0, -0.5, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 1.0, 0.0),
    Vec4::new(0.5, 0.5, 0.0, 1.0),
);

/// Square plane at `y = 0` spanning `[-extent, extent]` on X and Z.
#[derive(Debug, Clone, Copy)]
pub struct GroundPlane {
    pub extent: f32,
}

impl GroundPlane {
    pub fn new(extent: f32) -> Self {
        Self { extent }
    }

    /// World position under the center of pixel `(px, py)` of a
    /// `width` x `height` image.
    pub fn world_pos(&self, px: u32, py: u32, width: u32, height: u32) -> Vec3 {
        let u = (px as f32 + 0.5) / width as f32;
        let v = (py as f32 + 0.5) / height as f32;
        Vec3::new(
            (u * 2.0 - 1.0) * self.extent,
            0.0,
            (v * 2.0 - 1.0) * self.extent,
        )
    }

    /// Untransformed texture coordinate of a point on the plane, [0, 1]
    /// across the plane.
    pub fn tex_coord(&self, world_pos: Vec3) -> Vec2 {
        Vec2::new(world_pos.x, world_pos.z) / (2.0 * self.extent) + Vec2::splat(0.5)
    }

    /// Interpolated attributes for pixel `(px, py)`.
    pub fn fragment(
        &self,
        px: u32,
        py: u32,
        width: u32,
        height: u32,
        shadow_transform: &Mat4,
    ) -> Fragment {
        let world_pos = self.world_pos(px, py, width, height);
        Fragment {
            world_pos,
            normal: Vec3::Y,
            shadow_pos: *shadow_transform * world_pos.extend(1.0),
        }
    }
}

/// World to shadow-map texture transform for `light` over `plane`.
///
/// An orthographic projection looking along the light's direction (straight
/// down for lights without one), sized to the plane's bounding sphere so
/// every point of the plane lands inside the map with depth in [0, 1].
pub fn shadow_transform(light: &Light, plane: &GroundPlane) -> Mat4 {
    let dir = light
        .direction()
        .and_then(Vec3::try_normalize)
        .unwrap_or(Vec3::NEG_Y);
    let radius = plane.extent * SQRT_2;

    let eye = -dir * (2.0 * radius);
    let up = if dir.y.abs() > 0.99 { Vec3::Z } else { Vec3::Y };
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, up);
    let proj = Mat4::orthographic_rh(-radius, radius, -radius, radius, radius, 3.0 * radius);

    NDC_TO_TEXTURE * proj * view
}
