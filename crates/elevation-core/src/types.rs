// File: crates/elevation-core/src/types.rs
// Summary: Shared constants (canvas size, stroke, merge thresholds, fetch defaults).

/// Default canvas width in pixels.
pub const WIDTH: i32 = 1024;
/// Default canvas height in pixels.
pub const HEIGHT: i32 = 300;
/// Default profile stroke width in pixels.
pub const LINE_WIDTH: f32 = 2.0;

/// Fraction used by the one-way classifier.
pub const ONE_WAY_FRACTION: f64 = 0.25;

/// Trailing window of activities fetched per run.
pub const DEFAULT_WINDOW_DAYS: i64 = 14;
/// Default number of elevation streams fetched at once.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;
/// Default output artifact, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "out.png";

/// Pixel size of the output canvas.
/// Contract: both dimensions are positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: i32,
    pub height: i32,
}

impl CanvasSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}
