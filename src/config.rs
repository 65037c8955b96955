use std::path::{Path, PathBuf};

use crate::effects::fractal::FractalParams;
use crate::foundation::core::{DEFAULT_LAYER_SIZE, DEFAULT_SIZE, Offset};
use crate::foundation::error::{RasterError, RasterResult};
use crate::pipeline::state::{DisplayMode, Effect, PipelineState};
use crate::reduce::{ReduceParams, Reducer};

/// A layer resource and where it starts out.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerSpec {
    /// Raw RGBA stream of `layer_size * layer_size` quadruplets.
    pub path: PathBuf,
    #[serde(default)]
    pub offset: Offset,
}

/// Threading controls for the per-pixel-independent stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThreadingConfig {
    /// Process rows in parallel on a dedicated rayon pool.
    pub parallel: bool,
    /// Worker count override. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Everything a [`Pipeline`](crate::Pipeline) needs at construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Edge length of the source and result rasters.
    pub size: usize,
    /// Edge length of every layer.
    pub layer_size: usize,
    /// Raw RGB source stream, used by [`Pipeline::load`](crate::Pipeline::load).
    pub source: Option<PathBuf>,
    pub layers: Vec<LayerSpec>,
    pub fractal: FractalParams,
    pub reduce: ReduceParams,
    pub threading: ThreadingConfig,
    pub mode: DisplayMode,
    pub effect: Effect,
    pub reducer: Reducer,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            layer_size: DEFAULT_LAYER_SIZE,
            source: None,
            layers: Vec::new(),
            fractal: FractalParams::default(),
            reduce: ReduceParams::default(),
            threading: ThreadingConfig::default(),
            mode: DisplayMode::default(),
            effect: Effect::default(),
            reducer: Reducer::default(),
        }
    }
}

impl PipelineConfig {
    /// Read and validate a JSON config. Relative resource paths are resolved against the
    /// config file's directory.
    pub fn from_json_path(path: impl AsRef<Path>) -> RasterResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| RasterError::io(path, e))?;
        let mut cfg = Self::from_json_str(&text)?;
        if let Some(base) = path.parent() {
            cfg.resolve_paths(base);
        }
        Ok(cfg)
    }

    pub fn from_json_str(text: &str) -> RasterResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| RasterError::serde(format!("parse pipeline config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> RasterResult<()> {
        if self.size == 0 {
            return Err(RasterError::validation("size must be > 0"));
        }
        if self.layer_size == 0 {
            return Err(RasterError::validation("layer_size must be > 0"));
        }
        if let Some(0) = self.threading.threads {
            return Err(RasterError::validation(
                "threading 'threads' must be >= 1 when set",
            ));
        }
        self.fractal.validate()?;
        self.reduce.validate()?;
        Ok(())
    }

    /// Initial selection state: configured mode/effect/reducer and layer offsets.
    pub fn initial_state(&self) -> PipelineState {
        PipelineState::new(self.mode, self.effect, self.reducer)
            .with_layer_offsets(self.layers.iter().map(|l| l.offset).collect())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(source) = self.source.as_mut() {
            resolve(source);
        }
        for layer in &mut self.layers {
            resolve(&mut layer.path);
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
