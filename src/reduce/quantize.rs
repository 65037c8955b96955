use crate::foundation::core::Rgb8;
use crate::foundation::math::{luma_percent, truncate_channel};
use crate::raster::store::Raster;

/// Luminance at or above this (0..=255 scale) maps to white.
pub const THRESHOLD_LEVEL: u32 = 128;

/// Black/white for a boolean decision.
pub(crate) fn bilevel(white: bool) -> Rgb8 {
    if white { Rgb8::WHITE } else { Rgb8::BLACK }
}

/// 1-bit threshold on weighted luminance `0.3R + 0.59G + 0.11B >= 128`.
pub fn threshold_weighted(raster: &mut Raster<Rgb8>) {
    for px in raster.pixels_mut() {
        *px = bilevel(luma_percent(*px) >= THRESHOLD_LEVEL * 100);
    }
}

/// 1-bit threshold on the plain channel sum `R + G + B >= 3 * 128`.
pub fn threshold_unweighted(raster: &mut Raster<Rgb8>) {
    for px in raster.pixels_mut() {
        let total = u32::from(px.r) + u32::from(px.g) + u32::from(px.b);
        *px = bilevel(total >= 3 * THRESHOLD_LEVEL);
    }
}

/// Quantize every channel onto `levels` uniform steps. `levels == 0` is treated as 1.
pub fn truncate(raster: &mut Raster<Rgb8>, levels: u32) {
    for px in raster.pixels_mut() {
        *px = Rgb8::from_channels(px.channels().map(|c| truncate_channel(c, levels)));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reduce/quantize.rs"]
mod tests;
