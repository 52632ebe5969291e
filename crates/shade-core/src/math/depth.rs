//! Depth quantization for UNORM16 shadow-map storage.
//!
//! Depth values are normalized 0.0 (near) to 1.0 (far). 16-bit storage maps
//! 0.0 to 0x0000 and 1.0 to 0xFFFF.

/// Convert f32 depth to 16-bit unsigned normalized.
///
/// Input is clamped to [0.0, 1.0] and rounded to the nearest code.
pub fn f32_to_unorm16(val: f32) -> u16 {
    let clamped = val.clamp(0.0, 1.0);
    let scaled = (clamped * 65535.0 + 0.5) as u32;
    scaled.min(0xFFFF) as u16
}

/// Convert 16-bit unsigned normalized depth back to f32.
pub fn unorm16_to_f32(val: u16) -> f32 {
    val as f32 / 65535.0
}

/// Expand an 8-bit depth code to 16 bits (0xAB -> 0xABAB).
pub fn unorm8_to_unorm16(val: u8) -> u16 {
    ((val as u16) << 8) | val as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(f32_to_unorm16(0.0), 0);
        assert_eq!(f32_to_unorm16(1.0), 0xFFFF);
        assert_eq!(unorm16_to_f32(0), 0.0);
        assert_eq!(unorm16_to_f32(0xFFFF), 1.0);
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(f32_to_unorm16(-3.0), 0);
        assert_eq!(f32_to_unorm16(2.0), 0xFFFF);
    }

    #[test]
    fn midpoint_rounds_to_nearest() {
        // 0.5 * 65535 = 32767.5 -> 32768
        assert_eq!(f32_to_unorm16(0.5), 0x8000);
    }

    #[test]
    fn unorm8_expansion_hits_endpoints() {
        assert_eq!(unorm8_to_unorm16(0x00), 0x0000);
        assert_eq!(unorm8_to_unorm16(0xFF), 0xFFFF);
        assert_eq!(unorm8_to_unorm16(0x80), 0x8080);
    }
}
