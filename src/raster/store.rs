use std::path::Path;

use crate::foundation::core::{Rgb8, Rgba8};
use crate::foundation::error::{RasterError, RasterResult};

/// Square, row-major pixel grid: pixel `(x, y)` lives at `y * size + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster<P> {
    size: usize,
    pixels: Vec<P>,
}

impl<P: Copy> Raster<P> {
    /// Build a `size × size` raster filled with `fill`.
    pub fn filled(size: usize, fill: P) -> Self {
        Self {
            size,
            pixels: vec![fill; size * size],
        }
    }

    /// Wrap an existing pixel vector. Fails unless it holds exactly `size * size` pixels.
    pub fn from_pixels(size: usize, pixels: Vec<P>) -> RasterResult<Self> {
        let expected = size
            .checked_mul(size)
            .ok_or_else(|| RasterError::validation("raster size overflow"))?;
        if pixels.len() != expected {
            return Err(RasterError::validation(format!(
                "raster of size {size} needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self { size, pixels })
    }

    /// Edge length in pixels.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: i64, y: i64) -> Option<P> {
        let idx = self.index(x, y)?;
        Some(self.pixels[idx])
    }

    /// Pixel at `(x, y)`. Panics outside the grid.
    pub fn at(&self, x: usize, y: usize) -> P {
        self.pixels[y * self.size + x]
    }

    pub fn set(&mut self, x: usize, y: usize, px: P) {
        self.pixels[y * self.size + x] = px;
    }

    /// Row `y` as a slice.
    pub fn row(&self, y: usize) -> &[P] {
        &self.pixels[y * self.size..(y + 1) * self.size]
    }

    /// Overwrite every pixel with the contents of `other`. Both rasters must share a size.
    pub fn copy_from(&mut self, other: &Raster<P>) {
        assert_eq!(self.size, other.size, "raster size mismatch");
        self.pixels.copy_from_slice(&other.pixels);
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let size = self.size as i64;
        if x < 0 || y < 0 || x >= size || y >= size {
            return None;
        }
        Some((y * size + x) as usize)
    }
}

impl Raster<Rgb8> {
    /// Decode `size * size` RGB triplets. Bytes past the first raster are ignored.
    pub fn from_rgb_bytes(size: usize, bytes: &[u8]) -> RasterResult<Self> {
        let expected = raw_len(size, 3)?;
        if bytes.len() < expected {
            return Err(RasterError::validation(format!(
                "rgb buffer needs {expected} bytes, got {}",
                bytes.len()
            )));
        }
        let pixels = bytes[..expected]
            .chunks_exact(3)
            .map(|c| Rgb8::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self { size, pixels })
    }

    /// Row-major RGB triplets, ready for texture upload or PNG encoding.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for px in &self.pixels {
            out.extend_from_slice(&[px.r, px.g, px.b]);
        }
        out
    }
}

impl Raster<Rgba8> {
    /// Decode `size * size` straight RGBA quadruplets.
    pub fn from_rgba_bytes(size: usize, bytes: &[u8]) -> RasterResult<Self> {
        let expected = raw_len(size, 4)?;
        if bytes.len() < expected {
            return Err(RasterError::validation(format!(
                "rgba buffer needs {expected} bytes, got {}",
                bytes.len()
            )));
        }
        let pixels = bytes[..expected]
            .chunks_exact(4)
            .map(|c| Rgba8::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self { size, pixels })
    }
}

/// Load a raw RGB stream (`size * size` triplets, row-major) from `path`.
///
/// Nothing is written anywhere unless the whole raster could be read.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_rgb(path: impl AsRef<Path>, size: usize) -> RasterResult<Raster<Rgb8>> {
    let path = path.as_ref();
    let bytes = read_exact_raster(path, raw_len(size, 3)?)?;
    let raster = Raster::from_rgb_bytes(size, &bytes)?;
    tracing::debug!(size, "loaded rgb raster");
    Ok(raster)
}

/// Load a raw RGBA stream (`size * size` quadruplets, row-major) from `path`.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_rgba(path: impl AsRef<Path>, size: usize) -> RasterResult<Raster<Rgba8>> {
    let path = path.as_ref();
    let bytes = read_exact_raster(path, raw_len(size, 4)?)?;
    let raster = Raster::from_rgba_bytes(size, &bytes)?;
    tracing::debug!(size, "loaded rgba raster");
    Ok(raster)
}

fn read_exact_raster(path: &Path, expected: usize) -> RasterResult<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| RasterError::io(path, e))?;
    if bytes.len() < expected {
        return Err(RasterError::short_resource(path, expected, bytes.len()));
    }
    Ok(bytes)
}

fn raw_len(size: usize, channels: usize) -> RasterResult<usize> {
    if size == 0 {
        return Err(RasterError::validation("raster size must be > 0"));
    }
    size.checked_mul(size)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| RasterError::validation("raster byte length overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/store.rs"]
mod tests;
