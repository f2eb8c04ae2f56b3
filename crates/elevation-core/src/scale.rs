// File: crates/elevation-core/src/scale.rs
// Summary: Sample-index (X) and elevation (Y) transforms onto the raster canvas.

use crate::error::RenderError;
use crate::types::CanvasSize;

/// Maps sample ordinal and elevation to pixels.
///
/// X is uniform per sample: real distance or duration is not preserved.
/// Y is inverted so higher elevation lands nearer the top of the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileScale {
    pub height_px: f32,
    pub x_increment: f32,
    pub y_scale: f64,
    pub vmin: f64,
    pub vmax: f64,
}

impl ProfileScale {
    /// Fit `data` onto `canvas`.
    /// Errors when there are fewer than two samples, any sample is not finite,
    /// or all samples are equal.
    pub fn fit(data: &[f64], canvas: CanvasSize) -> Result<Self, RenderError> {
        if !canvas.is_valid() {
            return Err(RenderError::InvalidCanvas { width: canvas.width, height: canvas.height });
        }
        if data.len() < 2 {
            return Err(RenderError::TooFewSamples(data.len()));
        }
        if let Some(i) = data.iter().position(|v| !v.is_finite()) {
            return Err(RenderError::NonFiniteSample(i));
        }
        let (vmin, vmax) = data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let span = vmax - vmin;
        if span <= 0.0 {
            return Err(RenderError::FlatProfile(vmin));
        }
        Ok(Self {
            height_px: canvas.height as f32,
            x_increment: canvas.width as f32 / data.len() as f32,
            y_scale: canvas.height as f64 / span,
            vmin,
            vmax,
        })
    }

    #[inline]
    pub fn to_px_x(&self, index: usize) -> f32 {
        index as f32 * self.x_increment
    }

    #[inline]
    pub fn to_px_y(&self, v: f64) -> f32 {
        self.height_px - ((v - self.vmin) * self.y_scale) as f32
    }
}
