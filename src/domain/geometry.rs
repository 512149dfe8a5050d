//! Geometric types for page coordinates, viewports, and selection regions

use std::num::NonZeroU32;

/// Point in page-viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Visible page area as reported by the host
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Horizontal scroll offset of the page in CSS pixels
    pub scroll_x: f32,
    /// Vertical scroll offset of the page in CSS pixels
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

/// User-dragged rectangle in page-viewport coordinates (not scroll-adjusted)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SelectionRect {
    /// Bounding box of a drag's start and end points, valid for any of the
    /// four drag directions
    pub fn from_drag(start: Point, end: Point) -> Self {
        Self {
            x: start.x.min(end.x),
            y: start.y.min(end.y),
            width: (start.x - end.x).abs(),
            height: (start.y - end.y).abs(),
        }
    }

    /// Top-left corner of the rectangle
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// A rectangle with zero width or height selects nothing
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Convert to pixel dimensions, or `None` for a degenerate rectangle
    pub fn dimensions(&self) -> Option<RectDimension> {
        let width = NonZeroU32::new(self.width.round() as u32)?;
        let height = NonZeroU32::new(self.height.round() as u32)?;
        Some(RectDimension { width, height })
    }

    /// Scale all four components by the given factor
    pub fn scaled(&self, factor: f32) -> SelectionRect {
        SelectionRect {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Check if this rectangle contains a point
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Map a page-coordinate point into this rectangle's local space
    pub fn to_local(&self, p: Point) -> Point {
        Point::new(p.x - self.x, p.y - self.y)
    }

    /// Anchor point `gap` pixels below the rectangle's bottom-left corner
    pub fn below(&self, gap: f32) -> Point {
        Point::new(self.x, self.y + self.height + gap)
    }
}

/// Non-zero pixel dimensions of a rectangle
#[derive(Clone, Copy, Debug)]
pub struct RectDimension {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl RectDimension {
    /// Get the width as u32
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Get the height as u32
    pub fn height(&self) -> u32 {
        self.height.get()
    }
}
