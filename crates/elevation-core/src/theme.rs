// File: crates/elevation-core/src/theme.rs
// Summary: Color presets for profile rendering (background, solid and one-way strokes).

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub line_stroke: skia::Color,
    /// Stroke for segments that belong to a one-way activity.
    pub one_way_stroke: skia::Color,
}

impl Theme {
    /// White canvas, black line, half-transparent black for one-way activities.
    pub fn print() -> Self {
        Self {
            name: "print",
            background: skia::Color::from_argb(255, 255, 255, 255),
            line_stroke: skia::Color::from_argb(255, 0, 0, 0),
            one_way_stroke: skia::Color::from_argb(128, 0, 0, 0),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            line_stroke: skia::Color::from_argb(255, 235, 235, 245),
            one_way_stroke: skia::Color::from_argb(128, 235, 235, 245),
        }
    }

    /// Stroke color for a segment, depending on its activity's direction.
    pub fn stroke_for(&self, one_way: bool) -> skia::Color {
        if one_way { self.one_way_stroke } else { self.line_stroke }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::print() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::print(), Theme::dark()]
}

/// Find a theme by its `name` (case-insensitive).
pub fn find(name: &str) -> Option<Theme> {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
}
