//! Raster surfaces for live selection feedback and pen strokes

use tiny_skia::{
    Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use crate::config::SelectionStyle;
use crate::domain::{Point, RectDimension, Rgba, SelectionRect, StrokeStyle, Viewport};

fn color(rgba: Rgba) -> Color {
    Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Transparent surface covering the whole viewport
pub(crate) fn viewport_surface(viewport: Viewport) -> Option<Pixmap> {
    Pixmap::new(viewport.width, viewport.height)
}

/// Transparent surface sized exactly to a selection
pub(crate) fn region_surface(dims: RectDimension) -> Option<Pixmap> {
    Pixmap::new(dims.width(), dims.height())
}

/// Redraw the scrim and, if a drag is in progress, the live rectangle as a
/// translucent fill plus an outline stroke
pub(crate) fn draw_selection_feedback(
    pixmap: &mut Pixmap,
    style: &SelectionStyle,
    rect: Option<&SelectionRect>,
) {
    pixmap.fill(color(style.scrim));

    let Some(rect) = rect else { return };
    let Some(skia_rect) = Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
        return;
    };

    let mut fill = Paint::default();
    fill.set_color(color(style.fill));
    pixmap.fill_rect(skia_rect, &fill, Transform::identity(), None);

    let mut pb = PathBuilder::new();
    pb.push_rect(skia_rect);
    if let Some(path) = pb.finish() {
        let mut outline = Paint::default();
        outline.set_color(color(style.outline));
        outline.anti_alias = true;
        let stroke = Stroke {
            width: style.outline_width,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &outline, &stroke, Transform::identity(), None);
    }
}

/// Extend a pen stroke with one joined, round-capped segment in
/// surface-local coordinates
pub(crate) fn draw_stroke_segment(
    pixmap: &mut Pixmap,
    from: Point,
    to: Point,
    style: &StrokeStyle,
) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.x, from.y);
    pb.line_to(to.x, to.y);
    let Some(path) = pb.finish() else { return };

    let mut paint = Paint::default();
    paint.set_color(color(style.color));
    paint.anti_alias = true;

    let stroke = Stroke {
        width: style.width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
