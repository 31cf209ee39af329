// File: crates/bar-core/src/geometry.rs
// Summary: Pixel rectangles for bars and the plot area they live in.

use serde::Serialize;

use crate::types::Insets;

/// Bar rectangle in plot coordinates (origin top-left, y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BarRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BarRect {
    /// Rectangle spanning vertically between two pixel rows, in any order.
    pub fn from_rows(x: f32, width: f32, row_a: f32, row_b: f32) -> Self {
        let top = row_a.min(row_b);
        Self { x, y: top, width, height: (row_a - row_b).abs() }
    }

    pub fn bottom(&self) -> f32 { self.y + self.height }
}

/// Drawable region inside the surface margins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlotArea {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
}

impl PlotArea {
    /// Plot size for a surface; margins larger than the surface leave zero.
    pub fn new(surface_width: u32, surface_height: u32, insets: Insets) -> Self {
        Self {
            width: surface_width.saturating_sub(insets.hsum()),
            height: surface_height.saturating_sub(insets.vsum()),
            insets,
        }
    }
}
