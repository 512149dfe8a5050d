//! Pure domain types shared by both engines

pub mod annotation;
pub mod geometry;

pub use annotation::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, Rgba, StrokeStyle, Tool};
pub use geometry::{Point, RectDimension, SelectionRect, Viewport};
