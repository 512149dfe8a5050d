//! Host-page seam for the capture engine
//!
//! The engine owns every state machine and raster surface; the host page
//! owns presentation. An integration implements [`HostPage`] on top of
//! whatever the embedding environment provides (a browser widget bridge, a
//! compositor layer, a test double) and forwards user input back into the
//! engine as [`crate::capture::InputEvent`]s.

use anyhow::Result;
use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::domain::{Point, Viewport};

/// Overlay layers the engine presents above the host page
///
/// The host must stack them above all page content, `Selection` below
/// `Annotation`, and keep them out of any page rasterization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Full-viewport scrim with the live selection rectangle
    Selection,
    /// Annotation drawing surface, sized and positioned to the selection
    Annotation,
}

/// Document-level listener kinds a capture session attaches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerKind {
    /// Pointer down/move/up/leave
    Pointer,
    /// Keyboard, for the Escape cancel gesture
    Keyboard,
}

/// Options for one full-page rasterization pass
#[derive(Clone, Debug)]
pub struct RasterizeOptions {
    /// Downscale factor applied to the whole page
    pub scale: f32,
    /// Stable element ids that must not appear in the raster
    pub exclude: Vec<String>,
}

/// Platform drawing, compositing, and rasterization primitives
///
/// All methods are called from the single UI thread that drives the engine.
pub trait HostPage {
    /// Current visible page area and scroll offset
    fn viewport(&self) -> Viewport;

    /// Rasterize the visible page at `options.scale`
    ///
    /// The raster's origin is the current scroll offset and its size is the
    /// viewport scaled by `options.scale`. Implementations must omit every
    /// element listed in `options.exclude`; the engine hides its own overlay
    /// layers before calling.
    fn rasterize(&mut self, options: &RasterizeOptions) -> Result<RgbaImage>;

    /// Show or refresh a layer's content at the given page origin
    fn present_layer(&mut self, layer: Layer, origin: Point, content: &Pixmap);

    /// Remove a layer from the page; a no-op if it is not present
    fn clear_layer(&mut self, layer: Layer);

    /// Show the annotation toolbar anchored at the given page point
    fn place_toolbar(&mut self, anchor: Point);

    /// Remove the annotation toolbar; a no-op if it is not present
    fn remove_toolbar(&mut self);

    /// Toggle visibility of a host element by its stable id
    fn set_element_visible(&mut self, element_id: &str, visible: bool);

    /// Start delivering events of the given kind to the engine
    fn attach_listener(&mut self, kind: ListenerKind);

    /// Stop delivering events of the given kind
    fn detach_listener(&mut self, kind: ListenerKind);
}
