//! Ephemeral per-capture session state
//!
//! One session exists per `capture()` invocation and is destroyed on
//! confirm, cancel, or error. Tool and style state live here, not on the
//! engine, so a new session always starts from the configured defaults.

use tiny_skia::Pixmap;

use crate::artifact::Artifact;
use crate::domain::{Point, SelectionRect, StrokeStyle, Tool};
use crate::error::CaptureError;
use crate::session::{ListenerSet, ResultSlot};

/// In-progress drag, tracked as its start and latest pointer position
#[derive(Clone, Copy, Debug)]
pub(crate) struct DragTrack {
    start: Point,
    current: Point,
}

impl DragTrack {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub fn update(&mut self, point: Point) {
        self.current = point;
    }

    /// Bounding box of the drag so far
    pub fn rect(&self) -> SelectionRect {
        SelectionRect::from_drag(self.start, self.current)
    }
}

/// A pen stroke being drawn right now
///
/// The style is frozen at stroke start; toolbar changes apply to the next
/// stroke only.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ActiveStroke {
    pub last: Point,
    pub style: StrokeStyle,
}

/// Annotation-phase state
pub(crate) struct Annotating {
    /// Frozen selection, in page-viewport coordinates
    pub rect: SelectionRect,
    /// Accumulated strokes, sized exactly to `rect`
    pub surface: Pixmap,
    pub tool: Tool,
    pub style: StrokeStyle,
    pub active_stroke: Option<ActiveStroke>,
}

pub(crate) enum Phase {
    Selecting {
        drag: Option<DragTrack>,
        /// Full-viewport scrim plus live rectangle feedback
        feedback: Pixmap,
    },
    Annotating(Annotating),
}

pub(crate) struct CaptureSession {
    pub phase: Phase,
    pub listeners: ListenerSet,
    /// Whether this session hid the host trigger widget
    pub widget_hidden: bool,
    pub result: ResultSlot<Artifact, CaptureError>,
}

impl CaptureSession {
    /// The cancellation outcome appropriate to the current phase
    pub fn cancellation(&self) -> CaptureError {
        match self.phase {
            Phase::Selecting { .. } => CaptureError::SelectionCancelled,
            Phase::Annotating(_) => CaptureError::AnnotationCancelled,
        }
    }
}
