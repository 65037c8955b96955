use crate::foundation::error::{RasterError, RasterResult};

/// Largest supported kernel edge length.
pub const MAX_KERNEL_SIZE: usize = 7;

/// How a convolution scales its sum, and what that means at the image border.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BorderPolicy {
    /// Divide by the number of in-bounds samples actually summed. Border pixels of an averaging
    /// kernel are normalized by fewer samples instead of darkening.
    Adaptive,
    /// Multiply by a fixed `divisor` and add `bias` once per channel. Out-of-range samples are
    /// dropped without renormalizing.
    Fixed { divisor: f32, bias: f32 },
}

/// Odd-sized square weight grid, row-major: `weights[(ky + h) * size + (kx + h)]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
    policy: BorderPolicy,
}

impl Kernel {
    pub fn new(size: usize, weights: Vec<f32>, policy: BorderPolicy) -> RasterResult<Self> {
        if size == 0 || size % 2 == 0 || size > MAX_KERNEL_SIZE {
            return Err(RasterError::validation(format!(
                "kernel size must be odd and in 1..={MAX_KERNEL_SIZE}, got {size}"
            )));
        }
        if weights.len() != size * size {
            return Err(RasterError::validation(format!(
                "kernel of size {size} needs {} weights, got {}",
                size * size,
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(RasterError::validation("kernel weights must be finite"));
        }
        if let BorderPolicy::Fixed { divisor, bias } = policy
            && (!divisor.is_finite() || !bias.is_finite())
        {
            return Err(RasterError::validation(
                "kernel divisor and bias must be finite",
            ));
        }
        Ok(Self {
            size,
            weights,
            policy,
        })
    }

    /// Single 1 at the center, fixed divisor 1, bias 0.
    pub fn identity(size: usize) -> RasterResult<Self> {
        let mut weights = vec![0.0; size * size];
        if let Some(center) = weights.get_mut(size * size / 2) {
            *center = 1.0;
        }
        Self::new(
            size,
            weights,
            BorderPolicy::Fixed {
                divisor: 1.0,
                bias: 0.0,
            },
        )
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Half-size `h`; offsets run over `-h..=h`.
    pub fn half(&self) -> i64 {
        (self.size / 2) as i64
    }

    pub fn policy(&self) -> BorderPolicy {
        self.policy
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight for offset `(kx, ky)` relative to the center.
    pub fn weight(&self, kx: i64, ky: i64) -> f32 {
        let h = self.half();
        self.weights[((ky + h) as usize) * self.size + (kx + h) as usize]
    }
}

/// Fixed convolution presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelPreset {
    Blur,
    Blur5,
    Sharpen,
    Edge1,
    Edge2,
    Emboss,
}

const SHARPEN: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];
const EDGE1: [f32; 9] = [0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0];
const EDGE2: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];
const EMBOSS: [f32; 9] = [-1.0, -1.0, 0.0, -1.0, 0.0, 1.0, 0.0, 1.0, 1.0];

/// Re-centers emboss sums (which are zero on flat areas) into mid-gray.
pub const EMBOSS_BIAS: f32 = 128.0;

impl KernelPreset {
    pub const ALL: [KernelPreset; 6] = [
        KernelPreset::Blur,
        KernelPreset::Blur5,
        KernelPreset::Sharpen,
        KernelPreset::Edge1,
        KernelPreset::Edge2,
        KernelPreset::Emboss,
    ];

    /// Build the preset's kernel. The tables are static, so this never fails.
    pub fn kernel(self) -> Kernel {
        let signed = |weights: &[f32], bias: f32| Kernel {
            size: 3,
            weights: weights.to_vec(),
            policy: BorderPolicy::Fixed { divisor: 1.0, bias },
        };
        match self {
            KernelPreset::Blur => Kernel {
                size: 3,
                weights: vec![1.0; 9],
                policy: BorderPolicy::Adaptive,
            },
            KernelPreset::Blur5 => Kernel {
                size: 5,
                weights: vec![1.0; 25],
                policy: BorderPolicy::Adaptive,
            },
            KernelPreset::Sharpen => signed(&SHARPEN, 0.0),
            KernelPreset::Edge1 => signed(&EDGE1, 0.0),
            KernelPreset::Edge2 => signed(&EDGE2, 0.0),
            KernelPreset::Emboss => signed(&EMBOSS, EMBOSS_BIAS),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/kernel.rs"]
mod tests;
