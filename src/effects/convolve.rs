use crate::effects::kernel::{BorderPolicy, Kernel};
use crate::foundation::core::Rgb8;
use crate::foundation::math::{clamp_f32, luma};
use crate::raster::rows::for_each_row;
use crate::raster::store::Raster;

/// Convolve `source` with `kernel` into `dest`.
///
/// Samples outside the raster are skipped, never clamped or wrapped. Each channel is
/// `clamp(round(sum) * scale + bias)` where `scale` is `1 / samples` under
/// [`BorderPolicy::Adaptive`] and the fixed divisor otherwise.
///
/// Panics if the rasters differ in size.
pub fn convolve(source: &Raster<Rgb8>, dest: &mut Raster<Rgb8>, kernel: &Kernel, parallel: bool) {
    assert_eq!(
        source.size(),
        dest.size(),
        "convolve expects equal-size source and destination"
    );
    let size = source.size() as i64;
    let h = kernel.half();

    for_each_row(dest, parallel, |y, row| {
        let y = y as i64;
        for (x, out) in row.iter_mut().enumerate() {
            let x = x as i64;
            let mut acc = [0.0f32; 3];
            let mut samples = 0u32;
            for ky in -h..=h {
                let sy = y + ky;
                if sy < 0 || sy >= size {
                    continue;
                }
                for kx in -h..=h {
                    let sx = x + kx;
                    if sx < 0 || sx >= size {
                        continue;
                    }
                    let w = kernel.weight(kx, ky);
                    let px = source.at(sx as usize, sy as usize);
                    acc[0] += f32::from(px.r) * w;
                    acc[1] += f32::from(px.g) * w;
                    acc[2] += f32::from(px.b) * w;
                    samples += 1;
                }
            }

            let (scale, bias) = match kernel.policy() {
                BorderPolicy::Adaptive => (1.0 / samples.max(1) as f32, 0.0),
                BorderPolicy::Fixed { divisor, bias } => (divisor, bias),
            };
            *out = Rgb8::from_channels(acc.map(|sum| clamp_f32(sum.round() * scale + bias)));
        }
    });
}

/// Replace every pixel with its luminance `0.3R + 0.59G + 0.11B`.
pub fn grayscale(source: &Raster<Rgb8>, dest: &mut Raster<Rgb8>, parallel: bool) {
    assert_eq!(
        source.size(),
        dest.size(),
        "grayscale expects equal-size source and destination"
    );
    for_each_row(dest, parallel, |y, row| {
        for (out, &px) in row.iter_mut().zip(source.row(y)) {
            *out = Rgb8::gray(clamp_f32(luma(px)));
        }
    });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/convolve.rs"]
mod tests;
