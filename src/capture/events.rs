//! Input events the host forwards into the capture engine
//!
//! These provide a decoupled interface between the host page and the
//! engine's state machine: the integration translates its native pointer,
//! keyboard, and toolbar callbacks into these values and feeds them to
//! [`CaptureEngine::handle_input`](crate::capture::CaptureEngine::handle_input).

use crate::domain::{Point, Rgba};

/// Pointer gestures in page-viewport coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Moved(Point),
    Up(Point),
    /// Pointer left the annotation surface
    Left,
}

/// Keyboard gestures the engine reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    /// Universal cancel gesture during interactive phases
    Escape,
}

/// Annotation toolbar actions
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToolbarEvent {
    /// Pen tool activated
    PenSelected,
    /// Pen color changed; applies to subsequent strokes
    ColorPicked(Rgba),
    /// Pen width changed; applies to subsequent strokes
    WidthChanged(f32),
    /// Finish the session and composite the image
    Confirm,
    /// Discard the session
    Cancel,
}

/// All events the capture engine consumes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
    Toolbar(ToolbarEvent),
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::Down(Point::new(x, y)))
    }

    pub fn pointer_moved(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::Moved(Point::new(x, y)))
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::Up(Point::new(x, y)))
    }

    pub fn pointer_left() -> Self {
        Self::Pointer(PointerEvent::Left)
    }

    pub fn escape() -> Self {
        Self::Key(KeyEvent::Escape)
    }

    pub fn pen_selected() -> Self {
        Self::Toolbar(ToolbarEvent::PenSelected)
    }

    pub fn color_picked(color: Rgba) -> Self {
        Self::Toolbar(ToolbarEvent::ColorPicked(color))
    }

    pub fn width_changed(width: f32) -> Self {
        Self::Toolbar(ToolbarEvent::WidthChanged(width))
    }

    pub fn confirm() -> Self {
        Self::Toolbar(ToolbarEvent::Confirm)
    }

    pub fn cancel() -> Self {
        Self::Toolbar(ToolbarEvent::Cancel)
    }
}
