use std::path::PathBuf;

use glam::{Mat4, Vec3, Vec4};
use shade_core::{
    AddressMode, CompareFilter, DirectionalLight, Falloff, Light, MaterialConstants, PointLight,
    SpotLight,
};

use crate::error::PreviewError;

/// Which analytic light model drives the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Directional,
    Point,
    Spot,
}

/// Light parameters as given on the command line. Only the fields used by
/// `kind` are read.
#[derive(Debug, Clone)]
pub struct LightConfig {
    pub kind: LightKind,
    /// Radiant intensity per channel.
    pub strength: Vec3,
    /// Travel direction for directional and spot lights (normalized on use).
    pub direction: Vec3,
    /// World position for point and spot lights.
    pub position: Vec3,
    pub falloff_start: f32,
    pub falloff_end: f32,
    pub spot_power: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            kind: LightKind::Directional,
            strength: Vec3::splat(0.9),
            direction: Vec3::new(-0.4, -1.0, -0.3),
            position: Vec3::new(0.0, 4.0, 0.0),
            falloff_start: 2.0,
            falloff_end: 12.0,
            spot_power: 16.0,
        }
    }
}

impl LightConfig {
    /// Build the shading-core light. Directions are normalized, falling back
    /// to straight down for a zero vector.
    pub fn to_light(&self) -> Light {
        let direction = self.direction.try_normalize().unwrap_or(Vec3::NEG_Y);
        let falloff = Falloff::new(self.falloff_start, self.falloff_end);
        match self.kind {
            LightKind::Directional => DirectionalLight {
                strength: self.strength,
                direction,
            }
            .into(),
            LightKind::Point => PointLight {
                strength: self.strength,
                position: self.position,
                falloff,
            }
            .into(),
            LightKind::Spot => SpotLight {
                strength: self.strength,
                position: self.position,
                direction,
                falloff,
                spot_power: self.spot_power,
            }
            .into(),
        }
    }
}

/// Configuration for one preview render.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Output image width in pixels.
    pub width: u32,
    /// Output image height in pixels.
    pub height: u32,
    /// Half-size of the square ground plane in world units.
    pub extent: f32,
    /// World-space eye position.
    pub eye: Vec3,
    /// Ambient light RGB (alpha is 1).
    pub ambient: Vec3,
    pub light: LightConfig,
    /// Material diffuse albedo RGB (alpha is 1).
    pub diffuse_albedo: Vec3,
    pub fresnel_r0: Vec3,
    pub roughness: f32,
    /// Texture repeats across the plane.
    pub uv_scale: f32,
    /// Optional base-color texture. Without one the base color is white.
    pub albedo_path: Option<PathBuf>,
    /// Optional grayscale depth image used as the shadow map.
    pub shadow_map_path: Option<PathBuf>,
    pub filter: CompareFilter,
    pub address: AddressMode,
    /// Output PNG path.
    pub out_path: PathBuf,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            extent: 8.0,
            eye: Vec3::new(0.0, 6.0, 6.0),
            ambient: Vec3::splat(0.25),
            light: LightConfig::default(),
            diffuse_albedo: Vec3::ONE,
            fresnel_r0: Vec3::splat(0.05),
            roughness: 0.5,
            uv_scale: 4.0,
            albedo_path: None,
            shadow_map_path: None,
            filter: CompareFilter::Linear,
            address: AddressMode::Clamp,
            out_path: PathBuf::from("preview.png"),
        }
    }
}

impl PreviewConfig {
    /// Maximum output dimension on either axis.
    pub const MAX_DIMENSION: u32 = 4096;

    /// Reject configurations that would produce an empty or meaningless
    /// render.
    pub fn validate(&self) -> Result<(), PreviewError> {
        if self.width == 0 || self.height == 0 {
            return Err(PreviewError::Validation(format!(
                "Image size {}×{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.width > Self::MAX_DIMENSION || self.height > Self::MAX_DIMENSION {
            return Err(PreviewError::Validation(format!(
                "Image size {}×{} exceeds maximum ({}×{})",
                self.width,
                self.height,
                Self::MAX_DIMENSION,
                Self::MAX_DIMENSION
            )));
        }
        if self.extent.is_nan() || self.extent <= 0.0 {
            return Err(PreviewError::Validation(format!(
                "Plane extent must be positive, got {}",
                self.extent
            )));
        }
        if !(0.0..=1.0).contains(&self.roughness) {
            return Err(PreviewError::Validation(format!(
                "Roughness must be in [0, 1], got {}",
                self.roughness
            )));
        }
        let r0 = self.fresnel_r0;
        if r0.min_element() < 0.0 || r0.max_element() > 1.0 {
            return Err(PreviewError::Validation(format!(
                "Fresnel R0 must be in [0, 1] per channel, got {}",
                r0
            )));
        }
        if self.light.falloff_end < self.light.falloff_start {
            return Err(PreviewError::Validation(format!(
                "Falloff end {} is before falloff start {}",
                self.light.falloff_end, self.light.falloff_start
            )));
        }
        if self.light.spot_power < 0.0 {
            return Err(PreviewError::Validation(format!(
                "Spot power must be non-negative, got {}",
                self.light.spot_power
            )));
        }
        Ok(())
    }

    /// Material constants for the ground plane.
    pub fn material(&self) -> MaterialConstants {
        MaterialConstants {
            diffuse_albedo: self.diffuse_albedo.extend(1.0),
            fresnel_r0: self.fresnel_r0,
            roughness: self.roughness,
            mat_transform: Mat4::from_scale(Vec3::new(self.uv_scale, self.uv_scale, 1.0)),
        }
    }

    /// Ambient light as RGBA.
    pub fn ambient_light(&self) -> Vec4 {
        self.ambient.extend(1.0)
    }
}

/// Parse a comma-separated `x,y,z` triple.
pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected three comma-separated values, got '{}'", s));
    }
    let mut v = [0.0f32; 3];
    for (slot, part) in v.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid number '{}': {}", part, e))?;
    }
    Ok(Vec3::from_array(v))
}

/// Summary of a finished render.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub width: u32,
    pub height: u32,
    /// Mean shadow visibility over all pixels.
    pub mean_visibility: f32,
    pub out_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1,2,3").unwrap(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(parse_vec3(" -0.5, 0 ,4e1").unwrap(), Vec3::new(-0.5, 0.0, 40.0));
    }

    #[test]
    fn test_parse_vec3_rejects_bad_input() {
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,3,4").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(PreviewConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let config = PreviewConfig {
            width: 0,
            ..PreviewConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_material() {
        let rough = PreviewConfig {
            roughness: 1.5,
            ..PreviewConfig::default()
        };
        assert!(rough.validate().is_err());

        let r0 = PreviewConfig {
            fresnel_r0: Vec3::new(0.1, -0.1, 0.1),
            ..PreviewConfig::default()
        };
        assert!(r0.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_falloff() {
        let mut config = PreviewConfig::default();
        config.light.falloff_start = 10.0;
        config.light.falloff_end = 5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_light_normalizes_direction() {
        let light = LightConfig {
            direction: Vec3::new(0.0, -4.0, 0.0),
            ..LightConfig::default()
        }
        .to_light();
        assert_eq!(light.direction(), Some(Vec3::NEG_Y));
    }

    #[test]
    fn test_to_light_kinds() {
        let mut config = LightConfig::default();
        config.kind = LightKind::Point;
        assert!(matches!(config.to_light(), Light::Point(_)));
        config.kind = LightKind::Spot;
        assert!(matches!(config.to_light(), Light::Spot(_)));
    }
}
