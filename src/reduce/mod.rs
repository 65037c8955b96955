//! Bit-depth reduction: thresholding, truncation and dithering.
//!
//! Every reducer rewrites the result raster in place. Only one is active at a time; the
//! controller re-runs the selected one over a fresh effect output rather than chaining them.

pub(crate) mod dither;
pub(crate) mod quantize;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{RasterError, RasterResult};
use crate::raster::store::Raster;
use dither::{BayerMatrix, MAX_RANDOM_AMPLITUDE};

/// Closed set of reducers the controller can select.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reducer {
    /// 1-bit, weighted luminance.
    #[default]
    Threshold,
    /// 1-bit, plain channel sum.
    ThresholdUnweighted,
    /// Uniform per-channel quantization.
    Truncate,
    /// 1-bit with uniform noise.
    Random,
    /// 1-bit with a Bayer bias.
    Ordered,
    /// 1-bit Floyd–Steinberg.
    ErrorDiffusion,
}

impl Reducer {
    pub const ALL: [Reducer; 6] = [
        Reducer::Threshold,
        Reducer::ThresholdUnweighted,
        Reducer::Truncate,
        Reducer::Random,
        Reducer::Ordered,
        Reducer::ErrorDiffusion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Reducer::Threshold => "threshold",
            Reducer::ThresholdUnweighted => "threshold_unweighted",
            Reducer::Truncate => "truncate",
            Reducer::Random => "random",
            Reducer::Ordered => "ordered",
            Reducer::ErrorDiffusion => "error_diffusion",
        }
    }
}

/// Tunables shared by the reducers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReduceParams {
    /// Steps per channel for [`Reducer::Truncate`], in `1..=255`. Direct calls to
    /// [`quantize::truncate`] treat 0 as 1.
    pub truncate_levels: u32,
    /// Half-width of the noise added by [`Reducer::Random`], on the 0..=255 luminance scale.
    /// At most [`MAX_RANDOM_AMPLITUDE`].
    pub random_amplitude: f32,
    /// Fixed seed for [`Reducer::Random`]; `None` draws a new one per run.
    pub seed: Option<u64>,
    pub bayer: BayerMatrix,
}

impl Default for ReduceParams {
    fn default() -> Self {
        Self {
            truncate_levels: 4,
            random_amplitude: 127.0,
            seed: None,
            bayer: BayerMatrix::default(),
        }
    }
}

impl ReduceParams {
    pub fn validate(&self) -> RasterResult<()> {
        if !(1..=255).contains(&self.truncate_levels) {
            return Err(RasterError::validation(format!(
                "truncate_levels must be in 1..=255, got {}",
                self.truncate_levels
            )));
        }
        if !(0.0..=MAX_RANDOM_AMPLITUDE).contains(&self.random_amplitude) {
            return Err(RasterError::validation(format!(
                "random_amplitude must be in 0..={MAX_RANDOM_AMPLITUDE}, got {}",
                self.random_amplitude
            )));
        }
        Ok(())
    }
}

/// Run `reducer` over `raster` in place.
pub fn reduce(raster: &mut Raster<Rgb8>, reducer: Reducer, params: &ReduceParams) {
    match reducer {
        Reducer::Threshold => quantize::threshold_weighted(raster),
        Reducer::ThresholdUnweighted => quantize::threshold_unweighted(raster),
        Reducer::Truncate => quantize::truncate(raster, params.truncate_levels),
        Reducer::Random => dither::random_dither(raster, params.random_amplitude, params.seed),
        Reducer::Ordered => dither::ordered_dither(raster, params.bayer),
        Reducer::ErrorDiffusion => dither::error_diffusion(raster),
    }
}
