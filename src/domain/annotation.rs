//! Annotation tool state for drawing on a captured region
//!
//! Tool, color, and width live in the capture session, never on the engine,
//! so back-to-back sessions always start from the configured defaults.

use serde::{Deserialize, Serialize};

/// Pen width limits accepted from the toolbar
pub const MIN_STROKE_WIDTH: f32 = 1.0;
pub const MAX_STROKE_WIDTH: f32 = 50.0;

/// Serializable RGBA color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Active annotation tool; at most one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// No tool selected, pointer input is ignored
    #[default]
    None,
    /// Freehand pen
    Pen,
}

/// Color and width applied to pen strokes
///
/// Changing the style mid-session only affects strokes that start afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        // Red 3px pen
        Self {
            color: Rgba::rgb(220, 53, 69),
            width: 3.0,
        }
    }
}

impl StrokeStyle {
    /// Replace the width, clamped to the accepted range
    pub fn with_width(self, width: f32) -> Self {
        Self {
            width: width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH),
            ..self
        }
    }

    /// Replace the color
    pub fn with_color(self, color: Rgba) -> Self {
        Self { color, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_clamped() {
        let style = StrokeStyle::default();
        assert_eq!(style.with_width(0.0).width, MIN_STROKE_WIDTH);
        assert_eq!(style.with_width(500.0).width, MAX_STROKE_WIDTH);
        assert_eq!(style.with_width(7.0).width, 7.0);
    }

    #[test]
    fn color_change_keeps_width() {
        let style = StrokeStyle::default().with_width(9.0);
        let recolored = style.with_color(Rgba::rgb(0, 128, 255));
        assert_eq!(recolored.width, 9.0);
        assert_eq!(recolored.color, Rgba::rgb(0, 128, 255));
    }
}
