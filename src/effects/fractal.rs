use crate::foundation::core::Rgb8;
use crate::foundation::error::{RasterError, RasterResult};
use crate::raster::rows::for_each_row;
use crate::raster::store::Raster;

/// Escape-time Mandelbrot parameters.
///
/// Pixel `(x, y)` of a `size`-wide raster maps to
/// `c = (left + x * (right - left) / size, top + y * (bottom - top) / size)`, so the sampled
/// region is half-open: `left` and `top` are hit exactly, `right` and `bottom` never are.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FractalParams {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub max_iterations: u32,
    /// Color of points that never escaped.
    pub inside_color: Rgb8,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            left: -2.0,
            right: 1.0,
            top: -1.5,
            bottom: 1.5,
            max_iterations: 64,
            inside_color: Rgb8::new(64, 64, 128),
        }
    }
}

impl FractalParams {
    pub fn validate(&self) -> RasterResult<()> {
        let bounds = [self.left, self.right, self.top, self.bottom];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(RasterError::validation("fractal bounds must be finite"));
        }
        if self.left == self.right || self.top == self.bottom {
            return Err(RasterError::validation(
                "fractal bounds must span a non-empty area",
            ));
        }
        Ok(())
    }

    /// True when `c` stays bounded for all `max_iterations` iterations.
    ///
    /// With zero iterations nothing was ever tested, so the point counts as outside.
    pub fn is_inside(&self, cx: f64, cy: f64) -> bool {
        if self.max_iterations == 0 {
            return false;
        }
        let (mut zx, mut zy) = (0.0f64, 0.0f64);
        for _ in 0..self.max_iterations {
            let next_x = zx * zx - zy * zy + cx;
            zy = 2.0 * zx * zy + cy;
            zx = next_x;
            if zx * zx + zy * zy > 4.0 {
                return false;
            }
        }
        true
    }
}

/// Render the two-color escape-time field into `dest`: inside points get
/// [`FractalParams::inside_color`], escaping points are black.
pub fn render_fractal(dest: &mut Raster<Rgb8>, params: &FractalParams, parallel: bool) {
    let size = dest.size() as f64;
    let step_x = (params.right - params.left) / size;
    let step_y = (params.bottom - params.top) / size;

    for_each_row(dest, parallel, |y, row| {
        let cy = params.top + y as f64 * step_y;
        for (x, out) in row.iter_mut().enumerate() {
            let cx = params.left + x as f64 * step_x;
            *out = if params.is_inside(cx, cy) {
                params.inside_color
            } else {
                Rgb8::BLACK
            };
        }
    });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fractal.rs"]
mod tests;
