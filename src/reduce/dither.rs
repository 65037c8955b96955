use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::foundation::core::Rgb8;
use crate::foundation::math::{luma, luma_unit};
use crate::raster::store::Raster;
use crate::reduce::quantize::{THRESHOLD_LEVEL, bilevel};

/// Ordered-dither matrix size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BayerMatrix {
    #[default]
    Bayer2,
    Bayer4,
}

const BAYER2: [[u8; 2]; 2] = [[0, 2], [3, 1]];
const BAYER4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

impl BayerMatrix {
    pub fn dim(self) -> usize {
        match self {
            BayerMatrix::Bayer2 => 2,
            BayerMatrix::Bayer4 => 4,
        }
    }

    /// Rank of cell `(x mod M, y mod M)`.
    pub fn rank(self, x: usize, y: usize) -> u8 {
        match self {
            BayerMatrix::Bayer2 => BAYER2[y % 2][x % 2],
            BayerMatrix::Bayer4 => BAYER4[y % 4][x % 4],
        }
    }

    /// Luminance bias `128 - (rank + 0.5) * 256 / M²` for position `(x, y)`.
    pub fn bias(self, x: usize, y: usize) -> f32 {
        let cells = (self.dim() * self.dim()) as f32;
        THRESHOLD_LEVEL as f32 - (f32::from(self.rank(x, y)) + 0.5) * 256.0 / cells
    }
}

/// Largest useful noise half-width: the whole luminance scale.
pub const MAX_RANDOM_AMPLITUDE: f32 = 255.0;

/// 1-bit random dither: luminance plus uniform noise in `[-amplitude, amplitude]`, thresholded.
///
/// `seed` makes a run reproducible; without it a fresh seed is drawn per call. `amplitude` is
/// taken by magnitude and capped at [`MAX_RANDOM_AMPLITUDE`]; NaN means no noise.
pub fn random_dither(raster: &mut Raster<Rgb8>, amplitude: f32, seed: Option<u64>) {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::debug!(seed, amplitude, "random dither");
    let mut rng = StdRng::seed_from_u64(seed);
    let amplitude = if amplitude.is_nan() {
        0.0
    } else {
        amplitude.abs().min(MAX_RANDOM_AMPLITUDE)
    };

    for px in raster.pixels_mut() {
        let noise = if amplitude > 0.0 {
            rng.random_range(-amplitude..=amplitude)
        } else {
            0.0
        };
        *px = bilevel(luma(*px) + noise >= THRESHOLD_LEVEL as f32);
    }
}

/// 1-bit ordered dither with a position-dependent Bayer bias.
pub fn ordered_dither(raster: &mut Raster<Rgb8>, matrix: BayerMatrix) {
    let size = raster.size();
    for y in 0..size {
        for x in 0..size {
            let px = raster.at(x, y);
            let white = luma(px) + matrix.bias(x, y) >= THRESHOLD_LEVEL as f32;
            raster.set(x, y, bilevel(white));
        }
    }
}

/// Floyd–Steinberg weights as `(dx, dy, weight)`; every target is either right of the current
/// pixel or on the next row, so row-major order always visits it later.
const FLOYD_STEINBERG: [(i64, i64, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// 1-bit Floyd–Steinberg error diffusion.
///
/// Builds the whole luminance field in `[0, 1]` first, then scans rows top to bottom and each row
/// left to right. Error pushed past the raster edge is dropped. Strictly sequential.
pub fn error_diffusion(raster: &mut Raster<Rgb8>) {
    let size = raster.size();
    let mut field: Vec<f32> = raster.pixels().iter().map(|&px| luma_unit(px)).collect();
    let n = size as i64;

    for y in 0..size {
        for x in 0..size {
            let lum = field[y * size + x];
            let white = lum > 0.5;
            let error = if white { lum - 1.0 } else { lum };
            raster.set(x, y, bilevel(white));
            if error == 0.0 {
                continue;
            }
            for (dx, dy, w) in FLOYD_STEINBERG {
                let tx = x as i64 + dx;
                let ty = y as i64 + dy;
                if tx < 0 || tx >= n || ty >= n {
                    continue;
                }
                field[ty as usize * size + tx as usize] += error * w;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reduce/dither.rs"]
mod tests;
