//! Blinn-Phong reflectance building blocks.

use glam::Vec3;

use super::Material;
use crate::math::{normalize_or, saturate};

/// Scale from normalized shininess to the Blinn-Phong specular exponent.
pub const SHININESS_SCALE: f32 = 256.0;

/// Linear falloff between `start` and `end`.
///
/// Returns 1.0 at or before `start` and 0.0 at or beyond `end`. When the
/// ramp has no width (`end <= start`) this degenerates into a step: 1.0 for
/// `distance < end`, 0.0 otherwise.
#[inline]
pub fn attenuation(distance: f32, start: f32, end: f32) -> f32 {
    let width = end - start;
    if width <= 0.0 {
        return if distance < end { 1.0 } else { 0.0 };
    }
    saturate((end - distance) / width)
}

/// Schlick's approximation of Fresnel reflectance.
///
/// `normal` is whatever surface orientation the reflection is measured
/// against; from [`blinn_phong`] it is the half vector, not the geometric
/// normal.
#[inline]
pub fn fresnel_schlick(r0: Vec3, normal: Vec3, light_dir: Vec3) -> Vec3 {
    let cos_incident = saturate(normal.dot(light_dir));
    let f0 = 1.0 - cos_incident;
    r0 + (Vec3::ONE - r0) * (f0 * f0 * f0 * f0 * f0)
}

/// Map unbounded specular intensity into [0, 1): `s / (s + 1)` per channel.
#[inline]
pub fn compress_specular(specular: Vec3) -> Vec3 {
    specular / (specular + Vec3::ONE)
}

/// Blinn-Phong reflected radiance for light arriving from `light_dir` with
/// the given (already Lambert-weighted and attenuated) `strength`.
///
/// `light_dir` points from the surface toward the light; `normal` and
/// `to_eye` are unit length.
pub fn blinn_phong(
    strength: Vec3,
    light_dir: Vec3,
    normal: Vec3,
    to_eye: Vec3,
    material: &Material,
) -> Vec3 {
    let m = material.shininess * SHININESS_SCALE;
    // Eye exactly opposite the light has no half vector; use the normal.
    let half_vec = normalize_or(to_eye + light_dir, normal);

    let n_dot_h = half_vec.dot(normal).max(0.0);
    let roughness_factor = (m + 8.0) * libm::powf(n_dot_h, m) / 8.0;
    let fresnel = fresnel_schlick(material.fresnel_r0, half_vec, light_dir);

    let specular = compress_specular(fresnel * roughness_factor);

    (material.diffuse_albedo.truncate() + specular) * strength
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attenuation_inside_ramp() {
        assert!((attenuation(15.0, 10.0, 20.0) - 0.5).abs() < 1e-6);
        assert!((attenuation(12.5, 10.0, 20.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn attenuation_zero_width_is_step() {
        assert_eq!(attenuation(4.999, 5.0, 5.0), 1.0);
        assert_eq!(attenuation(5.0, 5.0, 5.0), 0.0);
        assert_eq!(attenuation(6.0, 5.0, 5.0), 0.0);
    }

    #[test]
    fn compress_maps_zero_to_zero() {
        assert_eq!(compress_specular(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(compress_specular(Vec3::ONE), Vec3::splat(0.5));
    }
}
