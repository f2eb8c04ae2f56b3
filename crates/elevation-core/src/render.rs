// File: crates/elevation-core/src/render.rs
// Summary: Headless PNG rendering of a merged elevation profile using Skia CPU raster surfaces.

use std::path::Path;

use skia_safe as skia;
use tracing::debug;

use crate::error::RenderError;
use crate::merge::{BoundaryTag, MergedStream};
use crate::scale::ProfileScale;
use crate::theme::Theme;
use crate::types::{CanvasSize, LINE_WIDTH};

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub size: CanvasSize,
    pub line_width: f32,
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: CanvasSize::default(),
            line_width: LINE_WIDTH,
            theme: Theme::default(),
        }
    }
}

/// Walks boundary tags alongside the sample index and reports whether the
/// segment ending at that index belongs to a one-way activity.
///
/// Tags that share a start index (zero-length contributions) are skipped
/// together; the last of them becomes active. Tags starting at index 0 are
/// consumed up front without taking their tone, so the profile always opens
/// with the solid stroke.
#[derive(Debug)]
pub struct BoundaryCursor<'a> {
    tags: &'a [BoundaryTag],
    next: usize,
    one_way: bool,
}

impl<'a> BoundaryCursor<'a> {
    pub fn new(tags: &'a [BoundaryTag]) -> Self {
        let next = tags.iter().take_while(|t| t.start_index == 0).count();
        Self { tags, next, one_way: false }
    }

    /// Move past every tag starting at or before `index`; returns the active tone.
    pub fn advance_to(&mut self, index: usize) -> bool {
        while let Some(tag) = self.tags.get(self.next) {
            if tag.start_index > index {
                break;
            }
            self.one_way = tag.is_one_way;
            self.next += 1;
        }
        self.one_way
    }
}

/// A merged profile ready to be drawn.
pub struct ProfileChart<'a> {
    pub stream: &'a MergedStream,
}

impl<'a> ProfileChart<'a> {
    pub fn new(stream: &'a MergedStream) -> Self {
        Self { stream }
    }

    /// Render to encoded PNG bytes in memory.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        let data = &self.stream.data;
        let scale = ProfileScale::fit(data, opts.size)?;

        let mut surface = skia::surfaces::raster_n32_premul((opts.size.width, opts.size.height))
            .ok_or(RenderError::Surface)?;
        let canvas = surface.canvas();
        canvas.clear(opts.theme.background);

        let mut stroke = skia::Paint::default();
        stroke.set_anti_alias(true);
        stroke.set_style(skia::paint::Style::Stroke);
        stroke.set_stroke_width(opts.line_width);

        let mut cursor = BoundaryCursor::new(&self.stream.tags);
        for i in 1..data.len() {
            let one_way = cursor.advance_to(i);
            stroke.set_color(opts.theme.stroke_for(one_way));
            let from = (scale.to_px_x(i - 1), scale.to_px_y(data[i - 1]));
            let to = (scale.to_px_x(i), scale.to_px_y(data[i]));
            canvas.draw_line(from, to, &stroke);
        }
        debug!(
            samples = data.len(),
            tags = self.stream.tags.len(),
            vmin = scale.vmin,
            vmax = scale.vmax,
            "profile drawn"
        );

        // Snapshot and encode PNG
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let encoded = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(RenderError::Encode)?;
        Ok(encoded.as_bytes().to_vec())
    }

    /// Render and write a PNG at `output_png_path`.
    ///
    /// The image is fully encoded before anything touches the filesystem and is
    /// moved into place with a rename, so a failed run leaves no file behind.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<Path>,
    ) -> Result<(), RenderError> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(opts)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".partial");
        let written = std::fs::write(&tmp, &bytes).and_then(|()| std::fs::rename(&tmp, path));
        if let Err(err) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }
}
