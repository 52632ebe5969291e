//! Small vector helpers shared by the lighting and shadow code.

pub mod depth;

use glam::Vec3;

/// Vectors shorter than this are treated as having no direction.
pub const MIN_LENGTH: f32 = 1e-6;

/// Normalize `v`, returning `fallback` when `v` is too short to have a
/// meaningful direction.
///
/// `fallback` is returned as-is and is expected to be unit length already.
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len = v.length();
    if len > MIN_LENGTH {
        v / len
    } else {
        fallback
    }
}

/// Clamp to [0, 1].
#[inline]
pub fn saturate(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_or_keeps_direction() {
        let n = normalize_or(Vec3::new(0.0, 3.0, 4.0), Vec3::X);
        assert!((n - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn normalize_or_zero_vector_uses_fallback() {
        assert_eq!(normalize_or(Vec3::ZERO, Vec3::Y), Vec3::Y);
        assert_eq!(normalize_or(Vec3::splat(1e-9), Vec3::Z), Vec3::Z);
    }

    #[test]
    fn saturate_clamps() {
        assert_eq!(saturate(-0.5), 0.0);
        assert_eq!(saturate(0.25), 0.25);
        assert_eq!(saturate(7.0), 1.0);
    }
}
