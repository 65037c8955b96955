use std::str::FromStr;

use crate::effects::kernel::KernelPreset;
use crate::foundation::core::Offset;
use crate::foundation::error::RasterError;
use crate::reduce::Reducer;

/// What the controller produces each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Effect over the source, then every layer blended on top. Recomputed every frame.
    #[default]
    ComposeAndEffect,
    /// Escape-time fractal. Recomputed every frame.
    Fractal,
    /// Effect over the source, then the active reducer. Cached until invalidated.
    Reduce,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::ComposeAndEffect,
        DisplayMode::Fractal,
        DisplayMode::Reduce,
    ];

    /// Following mode, wrapping from the last back to the first.
    pub fn next(self) -> Self {
        match self {
            DisplayMode::ComposeAndEffect => DisplayMode::Fractal,
            DisplayMode::Fractal => DisplayMode::Reduce,
            DisplayMode::Reduce => DisplayMode::ComposeAndEffect,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::ComposeAndEffect => "compose",
            DisplayMode::Fractal => "fractal",
            DisplayMode::Reduce => "reduce",
        }
    }
}

/// How an [`Effect`] is computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectStage {
    Convolve(KernelPreset),
    Grayscale,
    Copy,
}

/// Transform applied to the source before compositing or reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Blur,
    Blur5,
    Sharpen,
    Edge1,
    Edge2,
    Emboss,
    Grayscale,
    #[default]
    Identity,
}

impl Effect {
    pub const ALL: [Effect; 8] = [
        Effect::Blur,
        Effect::Blur5,
        Effect::Sharpen,
        Effect::Edge1,
        Effect::Edge2,
        Effect::Emboss,
        Effect::Grayscale,
        Effect::Identity,
    ];

    /// Stage that implements this effect.
    pub fn stage(self) -> EffectStage {
        match self {
            Effect::Blur => EffectStage::Convolve(KernelPreset::Blur),
            Effect::Blur5 => EffectStage::Convolve(KernelPreset::Blur5),
            Effect::Sharpen => EffectStage::Convolve(KernelPreset::Sharpen),
            Effect::Edge1 => EffectStage::Convolve(KernelPreset::Edge1),
            Effect::Edge2 => EffectStage::Convolve(KernelPreset::Edge2),
            Effect::Emboss => EffectStage::Convolve(KernelPreset::Emboss),
            Effect::Grayscale => EffectStage::Grayscale,
            Effect::Identity => EffectStage::Copy,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Effect::Blur => "blur",
            Effect::Blur5 => "blur5",
            Effect::Sharpen => "sharpen",
            Effect::Edge1 => "edge1",
            Effect::Edge2 => "edge2",
            Effect::Emboss => "emboss",
            Effect::Grayscale => "grayscale",
            Effect::Identity => "identity",
        }
    }
}

fn parse_named<T: Copy>(
    kind: &str,
    s: &str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, RasterError> {
    let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
    all.iter()
        .copied()
        .find(|v| name(*v) == wanted)
        .ok_or_else(|| {
            let known = all.iter().map(|v| name(*v)).collect::<Vec<_>>().join(", ");
            RasterError::validation(format!("unknown {kind} '{s}' (expected one of: {known})"))
        })
}

impl FromStr for DisplayMode {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("display mode", s, &DisplayMode::ALL, DisplayMode::name)
    }
}

impl FromStr for Effect {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("effect", s, &Effect::ALL, Effect::name)
    }
}

impl FromStr for Reducer {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("reducer", s, &Reducer::ALL, Reducer::name)
    }
}

/// Discrete input applied between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineEvent {
    NextMode,
    SetMode(DisplayMode),
    SelectEffect(Effect),
    SelectReducer(Reducer),
    /// Shift one layer by `(dx, dy)` pixels.
    MoveLayer { index: usize, dx: i32, dy: i32 },
    /// Shift every layer by `(dx, dy)` pixels.
    MoveAllLayers { dx: i32, dy: i32 },
    SetLayerOffset { index: usize, offset: Offset },
}

/// Caller-owned selection state handed to every render call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineState {
    pub mode: DisplayMode,
    pub effect: Effect,
    pub reducer: Reducer,
    /// Set when the cached reduced frame no longer matches the selection.
    pub dirty: bool,
    layer_offsets: Vec<Offset>,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            effect: Effect::default(),
            reducer: Reducer::default(),
            dirty: true,
            layer_offsets: Vec::new(),
        }
    }
}

impl PipelineState {
    pub fn new(mode: DisplayMode, effect: Effect, reducer: Reducer) -> Self {
        Self {
            mode,
            effect,
            reducer,
            ..Self::default()
        }
    }

    pub fn with_layer_offsets(mut self, offsets: Vec<Offset>) -> Self {
        self.layer_offsets = offsets;
        self
    }

    pub fn layer_offsets(&self) -> &[Offset] {
        &self.layer_offsets
    }

    /// Offset of layer `index`; layers without a recorded offset sit at the origin.
    pub fn layer_offset(&self, index: usize) -> Offset {
        self.layer_offsets.get(index).copied().unwrap_or_default()
    }

    /// Make sure `count` layers have an offset slot.
    pub(crate) fn track_layers(&mut self, count: usize) {
        if self.layer_offsets.len() < count {
            self.layer_offsets.resize(count, Offset::default());
        }
    }

    /// Apply one input event. Effect and reducer selections always invalidate the reduced
    /// cache, even when they re-select the current value.
    pub fn apply(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::NextMode => self.mode = self.mode.next(),
            PipelineEvent::SetMode(mode) => self.mode = mode,
            PipelineEvent::SelectEffect(effect) => {
                self.effect = effect;
                self.dirty = true;
            }
            PipelineEvent::SelectReducer(reducer) => {
                self.reducer = reducer;
                self.dirty = true;
            }
            PipelineEvent::MoveLayer { index, dx, dy } => match self.layer_offsets.get_mut(index) {
                Some(offset) => *offset = offset.shifted(dx, dy),
                None => tracing::warn!(index, "move for unknown layer ignored"),
            },
            PipelineEvent::MoveAllLayers { dx, dy } => {
                for offset in &mut self.layer_offsets {
                    *offset = offset.shifted(dx, dy);
                }
            }
            PipelineEvent::SetLayerOffset { index, offset } => {
                match self.layer_offsets.get_mut(index) {
                    Some(slot) => *slot = offset,
                    None => tracing::warn!(index, "offset for unknown layer ignored"),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/state.rs"]
mod tests;
