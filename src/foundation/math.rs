use crate::foundation::core::Rgb8;

/// Round half away from zero, then saturate into `[0, 255]`. NaN maps to 0.
pub fn clamp_f32(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Saturate a signed accumulator into `[0, 255]`.
pub fn clamp_i32(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Luminance with integer percent weights `30R + 59G + 11B`, i.e. 100× the 0..=255 scale.
///
/// Exact, so threshold comparisons never depend on float rounding.
pub fn luma_percent(px: Rgb8) -> u32 {
    30 * u32::from(px.r) + 59 * u32::from(px.g) + 11 * u32::from(px.b)
}

/// Perceptual luminance `0.3R + 0.59G + 0.11B` on the 0..=255 scale.
pub fn luma(px: Rgb8) -> f32 {
    luma_percent(px) as f32 / 100.0
}

/// Luminance normalized to `[0, 1]`. Pure white is exactly `1.0`, pure black exactly `0.0`.
pub fn luma_unit(px: Rgb8) -> f32 {
    luma_percent(px) as f32 / 25_500.0
}

/// Quantize one channel onto `levels` steps: `round(round(v / scale) * scale)`,
/// `scale = 255 / levels`. `levels == 0` is treated as 1.
pub fn truncate_channel(value: u8, levels: u32) -> u8 {
    let scale = 255.0 / levels.max(1) as f32;
    clamp_f32((f32::from(value) / scale).round() * scale)
}

/// Straight-alpha "over" for one channel: `round(fg * a + bg * (1 - a))`.
pub fn over_channel(fg: u8, bg: u8, alpha: f32) -> u8 {
    clamp_f32(f32::from(fg) * alpha + f32::from(bg) * (1.0 - alpha))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
