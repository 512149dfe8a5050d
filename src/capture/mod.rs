//! Region capture engine
//!
//! Drives one session at a time through selection, annotation, and
//! compositing: `Idle -> Selecting -> Annotating -> terminal`, always
//! returning to `Idle` with every overlay layer and listener torn down.
//!
//! The host forwards user input via [`CaptureEngine::handle_input`]; the
//! outcome of a session arrives on the [`PendingCapture`] returned by
//! [`CaptureEngine::capture`].

mod compose;
mod events;
mod session;
mod surface;

pub use events::{InputEvent, KeyEvent, PointerEvent, ToolbarEvent};

use crate::artifact::Artifact;
use crate::config::CaptureConfig;
use crate::domain::{Point, SelectionRect, Tool};
use crate::error::CaptureError;
use crate::host::{HostPage, Layer, ListenerKind, RasterizeOptions};
use crate::session::{ListenerSet, Pending, ResultSlot};
use session::{ActiveStroke, Annotating, CaptureSession, DragTrack, Phase};

/// Content type of every capture artifact
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Pending outcome of a `capture()` call
pub type PendingCapture = Pending<Artifact, CaptureError>;

/// Interactive region-select, annotate, and composite engine
pub struct CaptureEngine<H: HostPage> {
    host: H,
    config: CaptureConfig,
    session: Option<CaptureSession>,
}

impl<H: HostPage> CaptureEngine<H> {
    pub fn new(host: H, config: CaptureConfig) -> Self {
        Self {
            host,
            config,
            session: None,
        }
    }

    /// The host this engine drives
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Whether a session is currently in flight
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Begin an interactive capture
    ///
    /// At most one session can be active. A stale session left behind by the
    /// caller is torn down first and its pending result fails with the
    /// cancellation matching its phase, so no pending outcome is ever
    /// abandoned.
    pub fn capture(&mut self) -> PendingCapture {
        if let Some(stale) = &self.session {
            let error = stale.cancellation();
            log::warn!("capture() called with a session still active, discarding it");
            self.teardown(Err(error));
        }

        let viewport = self.host.viewport();
        let Some(mut feedback) = surface::viewport_surface(viewport) else {
            return Pending::failed(CaptureError::CompositionFailed(
                "selection overlay allocation failed".into(),
            ));
        };

        surface::draw_selection_feedback(&mut feedback, &self.config.selection, None);
        self.host
            .present_layer(Layer::Selection, Point::default(), &feedback);

        let mut listeners = ListenerSet::new();
        listeners.attach(&mut self.host, ListenerKind::Pointer);
        listeners.attach(&mut self.host, ListenerKind::Keyboard);

        let (result, rx) = ResultSlot::channel();
        self.session = Some(CaptureSession {
            phase: Phase::Selecting {
                drag: None,
                feedback,
            },
            listeners,
            widget_hidden: false,
            result,
        });
        log::debug!(
            "Capture session started, viewport {}x{}",
            viewport.width,
            viewport.height
        );

        Pending::new(
            rx,
            CaptureError::CompositionFailed("capture session dropped before completion".into()),
        )
    }

    /// Feed one host input event into the active session
    ///
    /// Events arriving while no session is active are ignored.
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.session.is_none() {
            return;
        }
        match event {
            InputEvent::Pointer(PointerEvent::Down(p)) => self.pointer_down(p),
            InputEvent::Pointer(PointerEvent::Moved(p)) => self.pointer_moved(p),
            InputEvent::Pointer(PointerEvent::Up(p)) => self.pointer_up(p),
            InputEvent::Pointer(PointerEvent::Left) => self.pointer_left(),
            InputEvent::Key(KeyEvent::Escape) => self.escape(),
            InputEvent::Toolbar(action) => self.toolbar(action),
        }
    }

    fn pointer_down(&mut self, p: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match &mut session.phase {
            Phase::Selecting { drag, feedback } => {
                *drag = Some(DragTrack::new(p));
                let rect = SelectionRect::from_drag(p, p);
                surface::draw_selection_feedback(feedback, &self.config.selection, Some(&rect));
                self.host
                    .present_layer(Layer::Selection, Point::default(), feedback);
            }
            Phase::Annotating(a) => {
                if a.tool == Tool::Pen && a.rect.contains(p) {
                    a.active_stroke = Some(ActiveStroke {
                        last: a.rect.to_local(p),
                        style: a.style,
                    });
                }
            }
        }
    }

    fn pointer_moved(&mut self, p: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match &mut session.phase {
            Phase::Selecting {
                drag: Some(track),
                feedback,
            } => {
                track.update(p);
                let rect = track.rect();
                surface::draw_selection_feedback(feedback, &self.config.selection, Some(&rect));
                self.host
                    .present_layer(Layer::Selection, Point::default(), feedback);
            }
            Phase::Annotating(a) => {
                let Some(stroke) = a.active_stroke else {
                    return;
                };
                if a.rect.contains(p) {
                    let local = a.rect.to_local(p);
                    surface::draw_stroke_segment(&mut a.surface, stroke.last, local, &stroke.style);
                    a.active_stroke = Some(ActiveStroke {
                        last: local,
                        ..stroke
                    });
                    self.host
                        .present_layer(Layer::Annotation, a.rect.origin(), &a.surface);
                } else {
                    // Leaving the surface ends the stroke
                    a.active_stroke = None;
                }
            }
            _ => {}
        }
    }

    fn pointer_up(&mut self, p: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let rect = match &mut session.phase {
            Phase::Selecting { drag, .. } => match drag.take() {
                Some(mut track) => {
                    track.update(p);
                    track.rect()
                }
                None => return,
            },
            Phase::Annotating(a) => {
                a.active_stroke = None;
                return;
            }
        };
        self.finish_drag(rect);
    }

    fn pointer_left(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Phase::Annotating(a) = &mut session.phase {
            a.active_stroke = None;
        }
    }

    fn escape(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let error = session.cancellation();
        log::debug!("Escape pressed, cancelling capture");
        self.teardown(Err(error));
    }

    fn toolbar(&mut self, action: ToolbarEvent) {
        match action {
            ToolbarEvent::Confirm => self.confirm(),
            ToolbarEvent::Cancel => self.teardown(Err(CaptureError::AnnotationCancelled)),
            _ => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                let Phase::Annotating(a) = &mut session.phase else {
                    return;
                };
                match action {
                    ToolbarEvent::PenSelected => a.tool = Tool::Pen,
                    ToolbarEvent::ColorPicked(color) => a.style = a.style.with_color(color),
                    ToolbarEvent::WidthChanged(width) => a.style = a.style.with_width(width),
                    _ => {}
                }
            }
        }
    }

    /// Selection drag finished: validate the rectangle and move to annotation
    fn finish_drag(&mut self, rect: SelectionRect) {
        // The selection overlay comes down whatever the outcome
        self.host.clear_layer(Layer::Selection);

        let Some(dims) = rect.dimensions() else {
            self.teardown(Err(CaptureError::NoRegionSelected));
            return;
        };
        let Some(surface) = surface::region_surface(dims) else {
            self.teardown(Err(CaptureError::CompositionFailed(
                "annotation surface allocation failed".into(),
            )));
            return;
        };

        // The trigger widget must not appear in the final image
        self.host
            .set_element_visible(&self.config.widget_element_id, false);
        self.host
            .present_layer(Layer::Annotation, rect.origin(), &surface);
        self.host
            .place_toolbar(rect.below(self.config.toolbar_gap));

        if let Some(session) = self.session.as_mut() {
            session.widget_hidden = true;
            session.phase = Phase::Annotating(Annotating {
                rect,
                surface,
                tool: Tool::default(),
                style: self.config.pen,
                active_stroke: None,
            });
        }
        log::debug!("Annotating region {}x{}", dims.width(), dims.height());
    }

    /// Composite the final image and deliver the session outcome
    fn confirm(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        if !matches!(session.phase, Phase::Annotating(_)) {
            return;
        }

        // Hide the tool UI so it cannot appear in the capture
        self.host.clear_layer(Layer::Annotation);
        self.host.remove_toolbar();

        let options = RasterizeOptions {
            scale: self.config.page_scale,
            exclude: vec![self.config.widget_element_id.clone()],
        };
        let page = match self.host.rasterize(&options) {
            Ok(page) => page,
            Err(err) => {
                log::error!("Page rasterization failed: {err:#}");
                self.teardown(Err(CaptureError::CompositionFailed(format!("{err:#}"))));
                return;
            }
        };

        let outcome = {
            let Some(session) = &self.session else {
                return;
            };
            let Phase::Annotating(a) = &session.phase else {
                return;
            };
            compose::compose_region(&page, &a.rect, self.config.page_scale, &a.surface)
                .and_then(|img| compose::encode_jpeg(&img, self.config.jpeg_quality))
                .map(|bytes| Artifact::image(IMAGE_CONTENT_TYPE, bytes))
                .map_err(|err| CaptureError::CompositionFailed(format!("{err:#}")))
        };

        if let Ok(artifact) = &outcome {
            log::info!("Region captured ({} bytes)", artifact.len());
        }
        self.teardown(outcome);
    }

    /// Tear down all session UI and listeners, then deliver the outcome
    ///
    /// Safe to call with no active session. Teardown always completes before
    /// the outcome is signalled.
    fn teardown(&mut self, outcome: Result<Artifact, CaptureError>) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        self.host.clear_layer(Layer::Selection);
        self.host.clear_layer(Layer::Annotation);
        self.host.remove_toolbar();
        if session.widget_hidden {
            self.host
                .set_element_visible(&self.config.widget_element_id, true);
        }
        session.listeners.detach_all(&mut self.host);

        if let Err(error) = &outcome {
            if error.is_cancellation() {
                log::debug!("Capture ended: {error}");
            } else {
                log::error!("Capture failed: {error}");
            }
        }
        session.result.resolve(outcome);
    }
}
