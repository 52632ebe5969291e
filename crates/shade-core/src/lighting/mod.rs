//! Analytic light evaluation for directional, point and spot lights.
//!
//! Each light kind has its own struct and `evaluate` method; [`Light`] wraps
//! them so a pass can carry a mixed, ordered list of lights.

pub mod brdf;

use glam::{Vec3, Vec4};

pub use brdf::{attenuation, blinn_phong, compress_specular, fresnel_schlick};

use crate::math::normalize_or;

/// Surface reflectance parameters for one shading evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Diffuse albedo. Alpha is carried through untouched by lighting.
    pub diffuse_albedo: Vec4,
    /// Fresnel reflectance at normal incidence, per channel in [0, 1].
    pub fresnel_r0: Vec3,
    /// Normalized shininess in [0, 1], scaled to the specular exponent.
    pub shininess: f32,
}

/// Linear distance falloff range for point and spot lights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Falloff {
    /// Distance at which attenuation starts (full strength before this).
    pub start: f32,
    /// Distance at which the light stops contributing.
    pub end: f32,
}

impl Falloff {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Attenuation factor at `distance`.
    #[inline]
    pub fn at(&self, distance: f32) -> f32 {
        attenuation(distance, self.start, self.end)
    }
}

/// Light arriving from a single direction with no falloff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Radiant intensity per channel.
    pub strength: Vec3,
    /// Unit direction the light travels (from the light toward the scene).
    pub direction: Vec3,
}

/// Omnidirectional light at a world position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub strength: Vec3,
    pub position: Vec3,
    pub falloff: Falloff,
}

/// Cone light at a world position aimed along `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub strength: Vec3,
    pub position: Vec3,
    /// Unit aim direction (from the light toward the scene).
    pub direction: Vec3,
    pub falloff: Falloff,
    /// Cone sharpness exponent, >= 0.
    pub spot_power: f32,
}

impl DirectionalLight {
    /// Reflected radiance from this light at a surface with unit `normal`,
    /// viewed along unit `to_eye`.
    pub fn evaluate(&self, material: &Material, normal: Vec3, to_eye: Vec3) -> Vec3 {
        let light_dir = -self.direction;
        let n_dot_l = light_dir.dot(normal).max(0.0);
        let strength = self.strength * n_dot_l;
        blinn_phong(strength, light_dir, normal, to_eye, material)
    }
}

impl PointLight {
    /// Reflected radiance at `pos`. Zero when `pos` is farther than
    /// `falloff.end` from the light.
    pub fn evaluate(&self, material: &Material, pos: Vec3, normal: Vec3, to_eye: Vec3) -> Vec3 {
        match incident(self.position, self.strength, self.falloff, pos, normal) {
            Some((light_dir, strength)) => {
                blinn_phong(strength, light_dir, normal, to_eye, material)
            }
            None => Vec3::ZERO,
        }
    }
}

impl SpotLight {
    /// Reflected radiance at `pos`: the point-light result further scaled by
    /// the cone factor `max(dot(-light_dir, direction), 0) ^ spot_power`.
    pub fn evaluate(&self, material: &Material, pos: Vec3, normal: Vec3, to_eye: Vec3) -> Vec3 {
        let Some((light_dir, strength)) =
            incident(self.position, self.strength, self.falloff, pos, normal)
        else {
            return Vec3::ZERO;
        };

        let cone = (-light_dir).dot(self.direction).max(0.0);
        let spot_factor = libm::powf(cone, self.spot_power);

        blinn_phong(strength * spot_factor, light_dir, normal, to_eye, material)
    }
}

/// Shared point/spot setup: unit direction toward the light and the
/// Lambert-weighted, attenuated strength. `None` past the falloff end.
fn incident(
    light_pos: Vec3,
    light_strength: Vec3,
    falloff: Falloff,
    pos: Vec3,
    normal: Vec3,
) -> Option<(Vec3, Vec3)> {
    let light_vec = light_pos - pos;
    let distance = light_vec.length();

    if distance > falloff.end {
        return None;
    }

    // A light sitting on the surface shines straight along the normal.
    let light_dir = normalize_or(light_vec, normal);
    let n_dot_l = light_dir.dot(normal).max(0.0);

    Some((light_dir, light_strength * n_dot_l * falloff.at(distance)))
}

/// Any supported light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl Light {
    /// Reflected radiance from this light at `pos`.
    ///
    /// `pos` is ignored for directional lights.
    #[inline]
    pub fn evaluate(&self, material: &Material, pos: Vec3, normal: Vec3, to_eye: Vec3) -> Vec3 {
        match self {
            Light::Directional(light) => light.evaluate(material, normal, to_eye),
            Light::Point(light) => light.evaluate(material, pos, normal, to_eye),
            Light::Spot(light) => light.evaluate(material, pos, normal, to_eye),
        }
    }

    /// Aim direction, if the light kind has one.
    pub fn direction(&self) -> Option<Vec3> {
        match self {
            Light::Directional(light) => Some(light.direction),
            Light::Point(_) => None,
            Light::Spot(light) => Some(light.direction),
        }
    }

    /// World position, if the light kind has one.
    pub fn position(&self) -> Option<Vec3> {
        match self {
            Light::Directional(_) => None,
            Light::Point(light) => Some(light.position),
            Light::Spot(light) => Some(light.position),
        }
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<SpotLight> for Light {
    fn from(light: SpotLight) -> Self {
        Light::Spot(light)
    }
}

/// Sum the contributions of `lights` in order.
///
/// Light `i` is scaled by `shadow_factors[i]`; lights past the end of
/// `shadow_factors` are unshadowed.
pub fn accumulate(
    lights: &[Light],
    material: &Material,
    pos: Vec3,
    normal: Vec3,
    to_eye: Vec3,
    shadow_factors: &[f32],
) -> Vec3 {
    lights
        .iter()
        .enumerate()
        .fold(Vec3::ZERO, |sum, (i, light)| {
            let shadow = shadow_factors.get(i).copied().unwrap_or(1.0);
            sum + shadow * light.evaluate(material, pos, normal, to_eye)
        })
}
