//! Fragment shading: ambient + shadowed lighting, modulated by base color.

use glam::{Mat4, Vec3, Vec4};
use shade_hal::DepthTexture;

use crate::lighting::{accumulate, Light, Material};
use crate::math::normalize_or;
use crate::shadow::{compute_visibility, ComparisonSampler};

/// Maximum lights in one pass.
pub const MAX_LIGHTS: usize = 16;

/// Used when an interpolated normal collapses to zero length.
pub const FALLBACK_NORMAL: Vec3 = Vec3::Y;

/// Interpolated per-fragment attributes from the rasterizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    /// World-space position.
    pub world_pos: Vec3,
    /// World-space normal, not necessarily unit length after interpolation.
    pub normal: Vec3,
    /// Position in the shadow map's projective texture space.
    pub shadow_pos: Vec4,
}

/// Constants shared by every fragment of a pass.
#[derive(Clone, Debug)]
pub struct PassConstants {
    /// World-space eye position.
    pub eye_pos: Vec3,
    /// Ambient light, added before modulation by the diffuse color.
    pub ambient_light: Vec4,
    /// World to shadow-map texture space. Applied upstream to produce
    /// [`Fragment::shadow_pos`].
    pub shadow_transform: Mat4,
    /// Lights in evaluation order. The first light casts the shadow map.
    pub lights: heapless::Vec<Light, MAX_LIGHTS>,
}

impl PassConstants {
    /// A pass lit by a single light.
    pub fn with_light(eye_pos: Vec3, ambient_light: Vec4, light: Light) -> Self {
        let mut lights = heapless::Vec::new();
        lights.extend(core::iter::once(light));
        Self {
            eye_pos,
            ambient_light,
            shadow_transform: Mat4::IDENTITY,
            lights,
        }
    }
}

/// Per-material constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialConstants {
    pub diffuse_albedo: Vec4,
    pub fresnel_r0: Vec3,
    /// Surface roughness in [0, 1]. Not validated; out-of-range values
    /// produce out-of-range shininess.
    pub roughness: f32,
    /// Texture-coordinate transform, applied upstream before the base color
    /// is sampled.
    pub mat_transform: Mat4,
}

impl MaterialConstants {
    /// Lighting material for a fragment whose diffuse color is `diffuse`.
    pub fn material(&self, diffuse: Vec4) -> Material {
        Material {
            diffuse_albedo: diffuse,
            fresnel_r0: self.fresnel_r0,
            shininess: 1.0 - self.roughness,
        }
    }
}

/// Combines shadow visibility, lights and ambient into the fragment color.
///
/// Holds only borrowed, read-only resources and is shared freely between
/// threads shading different fragments.
pub struct ShadingComposer<'a, T: DepthTexture + ?Sized> {
    shadow_map: &'a T,
    sampler: ComparisonSampler,
}

impl<'a, T: DepthTexture + ?Sized> ShadingComposer<'a, T> {
    pub fn new(shadow_map: &'a T, sampler: ComparisonSampler) -> Self {
        Self {
            shadow_map,
            sampler,
        }
    }

    /// Shadow-casting light visibility for `fragment`.
    pub fn visibility(&self, fragment: &Fragment) -> f32 {
        compute_visibility(fragment.shadow_pos, self.shadow_map, &self.sampler)
    }

    /// Final RGBA color of `fragment`.
    ///
    /// `base_color` is the already-sampled texture color. The result's alpha
    /// is always the diffuse alpha.
    pub fn shade(
        &self,
        fragment: &Fragment,
        pass: &PassConstants,
        material: &MaterialConstants,
        base_color: Vec4,
    ) -> Vec4 {
        self.shade_with_visibility(fragment, pass, material, base_color).0
    }

    /// [`shade`](Self::shade), also returning the shadow visibility the
    /// color was lit with. The kernel is filtered once.
    pub fn shade_with_visibility(
        &self,
        fragment: &Fragment,
        pass: &PassConstants,
        material: &MaterialConstants,
        base_color: Vec4,
    ) -> (Vec4, f32) {
        let diffuse = base_color * material.diffuse_albedo;

        let normal = normalize_or(fragment.normal, FALLBACK_NORMAL);
        // Eye on the surface: view straight down the normal.
        let to_eye = normalize_or(pass.eye_pos - fragment.world_pos, normal);

        let mat = material.material(diffuse);
        let visibility = self.visibility(fragment);

        let lit = accumulate(
            &pass.lights,
            &mat,
            fragment.world_pos,
            normal,
            to_eye,
            &[visibility],
        );

        let color = diffuse * (pass.ambient_light + lit.extend(1.0));
        (color.truncate().extend(diffuse.w), visibility)
    }
}
