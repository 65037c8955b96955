//! rasterfx is a fixed-resolution raster processing pipeline.
//!
//! A [`Pipeline`] owns a square RGB source raster, a separate result raster and any number of
//! RGBA layers. Each [`Pipeline::render`] call runs one pass for the caller-owned
//! [`PipelineState`]:
//!
//! 1. **Effect**: convolution preset, grayscale or identity, `source -> result`
//! 2. **Compose** (compose mode): layers blended "over" the result at their offsets
//! 3. **Fractal** (fractal mode): escape-time field written straight into the result
//! 4. **Reduce** (reduce mode): threshold, truncation or dithering, cached until invalidated
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: every stage except the unseeded random dither is a pure function of its
//!   inputs; parallel and sequential execution produce identical pixels.
//! - **IO front-loaded**: the only IO is loading raw resources, which either fully succeeds or
//!   leaves the pipeline untouched.
//! - **Row-major** everywhere: pixel `(x, y)` lives at `y * size + x`.
#![forbid(unsafe_code)]

mod config;
mod effects;
mod foundation;
mod pipeline;
mod raster;
mod reduce;

pub use config::{LayerSpec, PipelineConfig, ThreadingConfig};
pub use effects::composite::{blend, over};
pub use effects::convolve::{convolve, grayscale};
pub use effects::fractal::{FractalParams, render_fractal};
pub use effects::kernel::{BorderPolicy, EMBOSS_BIAS, Kernel, KernelPreset, MAX_KERNEL_SIZE};
pub use foundation::core::{DEFAULT_LAYER_SIZE, DEFAULT_SIZE, Offset, Rgb8, Rgba8};
pub use foundation::error::{RasterError, RasterResult};
pub use foundation::math::{clamp_f32, clamp_i32, luma, luma_percent, luma_unit, truncate_channel};
pub use pipeline::controller::{Layer, Pipeline};
pub use pipeline::state::{DisplayMode, Effect, EffectStage, PipelineEvent, PipelineState};
pub use raster::store::{Raster, load_rgb, load_rgba};
pub use reduce::dither::{
    BayerMatrix, MAX_RANDOM_AMPLITUDE, error_diffusion, ordered_dither, random_dither,
};
pub use reduce::quantize::{THRESHOLD_LEVEL, threshold_unweighted, threshold_weighted, truncate};
pub use reduce::{ReduceParams, Reducer, reduce};
