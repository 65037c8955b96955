use std::path::Path;

use crate::config::PipelineConfig;
use crate::effects::composite::blend;
use crate::effects::convolve::{convolve, grayscale};
use crate::effects::fractal::{FractalParams, render_fractal};
use crate::foundation::core::{Rgb8, Rgba8};
use crate::foundation::error::{RasterError, RasterResult};
use crate::pipeline::state::{DisplayMode, Effect, EffectStage, PipelineState};
use crate::raster::store::{Raster, load_rgb, load_rgba};
use crate::reduce::{ReduceParams, reduce};

/// RGBA overlay blended onto the result in compose mode.
pub type Layer = Raster<Rgba8>;

struct ReducedFrame {
    raster: Raster<Rgb8>,
    generation: u64,
}

/// Owns the raster store and drives one pass per [`Pipeline::render`] call.
///
/// Source and result are separate buffers: stages read `source` and write `result`, so no stage
/// ever reads the buffer it is writing.
pub struct Pipeline {
    config: PipelineConfig,
    source: Raster<Rgb8>,
    result: Raster<Rgb8>,
    layers: Vec<Layer>,
    reduced: Option<ReducedFrame>,
    // Bumped whenever an input of the reduced frame changes outside the selection state.
    generation: u64,
    pool: Option<rayon::ThreadPool>,
}

impl Pipeline {
    /// Build a pipeline around an already decoded source.
    pub fn new(config: PipelineConfig, source: Raster<Rgb8>) -> RasterResult<Self> {
        config.validate()?;
        if source.size() != config.size {
            return Err(RasterError::validation(format!(
                "source is {}px wide, pipeline expects {}px",
                source.size(),
                config.size
            )));
        }
        let pool = if config.threading.parallel {
            Some(build_thread_pool(config.threading.threads)?)
        } else {
            None
        };
        let result = Raster::filled(config.size, Rgb8::BLACK);
        Ok(Self {
            config,
            source,
            result,
            layers: Vec::new(),
            reduced: None,
            generation: 0,
            pool,
        })
    }

    /// Load the source and every layer named in `config`. Any missing or short resource fails
    /// the whole load.
    #[tracing::instrument(skip(config), fields(size = config.size, layers = config.layers.len()))]
    pub fn load(config: PipelineConfig) -> RasterResult<Self> {
        let source_path = config
            .source
            .clone()
            .ok_or_else(|| RasterError::validation("config has no source path"))?;
        let source = load_rgb(&source_path, config.size)?;
        let layers = config
            .layers
            .iter()
            .map(|spec| load_rgba(&spec.path, config.layer_size))
            .collect::<RasterResult<Vec<_>>>()?;

        let mut pipeline = Self::new(config, source)?;
        pipeline.layers = layers;
        tracing::info!(layers = pipeline.layers.len(), "pipeline loaded");
        Ok(pipeline)
    }

    /// Fresh selection state sized for the current layers.
    pub fn initial_state(&self) -> PipelineState {
        let mut state = self.config.initial_state();
        state.track_layers(self.layers.len());
        state
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    pub fn source(&self) -> &Raster<Rgb8> {
        &self.source
    }

    /// Output of the most recent effect, compose or fractal pass.
    pub fn result(&self) -> &Raster<Rgb8> {
        &self.result
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Replace the source. The previous source stays in place if `raster` has the wrong size.
    pub fn set_source(&mut self, raster: Raster<Rgb8>) -> RasterResult<()> {
        if raster.size() != self.config.size {
            return Err(RasterError::validation(format!(
                "source is {}px wide, pipeline expects {}px",
                raster.size(),
                self.config.size
            )));
        }
        self.source = raster;
        self.generation += 1;
        Ok(())
    }

    /// Reload the source from a raw RGB stream. On failure nothing changes.
    pub fn load_source(&mut self, path: impl AsRef<Path>) -> RasterResult<()> {
        let raster = load_rgb(path, self.config.size)?;
        self.set_source(raster)
    }

    /// Append a layer and return its index.
    pub fn add_layer(&mut self, layer: Layer) -> RasterResult<usize> {
        if layer.size() != self.config.layer_size {
            return Err(RasterError::validation(format!(
                "layer is {}px wide, pipeline expects {}px",
                layer.size(),
                self.config.layer_size
            )));
        }
        self.layers.push(layer);
        Ok(self.layers.len() - 1)
    }

    /// Load a raw RGBA layer and append it.
    pub fn load_layer(&mut self, path: impl AsRef<Path>) -> RasterResult<usize> {
        let layer = load_rgba(path, self.config.layer_size)?;
        self.add_layer(layer)
    }

    pub fn set_reduce_params(&mut self, params: ReduceParams) -> RasterResult<()> {
        params.validate()?;
        self.config.reduce = params;
        self.generation += 1;
        Ok(())
    }

    pub fn set_fractal_params(&mut self, params: FractalParams) -> RasterResult<()> {
        params.validate()?;
        self.config.fractal = params;
        Ok(())
    }

    /// Run one frame for `state` and return the buffer to display.
    ///
    /// Compose and fractal modes recompute every call. Reduce mode recomputes only when
    /// `state.dirty` is set or the source/reducer parameters changed since the cached frame,
    /// and clears `state.dirty` afterwards.
    #[tracing::instrument(
        level = "debug",
        skip(self, state),
        fields(mode = state.mode.name(), effect = state.effect.name())
    )]
    pub fn render(&mut self, state: &mut PipelineState) -> &Raster<Rgb8> {
        state.track_layers(self.layers.len());
        match state.mode {
            DisplayMode::ComposeAndEffect => {
                self.run_effect(state.effect);
                let pool = self.pool.as_ref();
                let (result, layers) = (&mut self.result, &self.layers);
                in_pool(pool, |parallel| {
                    for (index, layer) in layers.iter().enumerate() {
                        blend(result, layer, state.layer_offset(index), parallel);
                    }
                });
                &self.result
            }
            DisplayMode::Fractal => {
                let pool = self.pool.as_ref();
                let (result, params) = (&mut self.result, &self.config.fractal);
                in_pool(pool, |parallel| render_fractal(result, params, parallel));
                &self.result
            }
            DisplayMode::Reduce => {
                let stale = state.dirty
                    || self
                        .reduced
                        .as_ref()
                        .is_none_or(|frame| frame.generation != self.generation);
                if stale {
                    self.run_effect(state.effect);
                    reduce(&mut self.result, state.reducer, &self.config.reduce);
                    tracing::debug!(reducer = state.reducer.name(), "reduced frame recomputed");
                    self.reduced = Some(ReducedFrame {
                        raster: self.result.clone(),
                        generation: self.generation,
                    });
                    state.dirty = false;
                }
                match &self.reduced {
                    Some(frame) => &frame.raster,
                    None => &self.result,
                }
            }
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        let pool = self.pool.as_ref();
        let (source, result) = (&self.source, &mut self.result);
        in_pool(pool, |parallel| match effect.stage() {
            EffectStage::Convolve(preset) => convolve(source, result, &preset.kernel(), parallel),
            EffectStage::Grayscale => grayscale(source, result, parallel),
            EffectStage::Copy => result.copy_from(source),
        });
    }
}

fn in_pool<R: Send>(pool: Option<&rayon::ThreadPool>, f: impl FnOnce(bool) -> R + Send) -> R {
    match pool {
        Some(pool) => pool.install(|| f(true)),
        None => f(false),
    }
}

fn build_thread_pool(threads: Option<usize>) -> RasterResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(RasterError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RasterError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/controller.rs"]
mod tests;
