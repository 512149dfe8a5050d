#![allow(dead_code)]

//! Test doubles for the host page and the media platform

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use anyhow::bail;
use crossbeam_channel::{Receiver, Sender, unbounded};
use image::{Rgba, RgbaImage};
use tiny_skia::Pixmap;

use feedback_capture::config::{CaptureConfig, RecorderConfig};
use feedback_capture::domain::{Point, Viewport};
use feedback_capture::host::{HostPage, Layer, ListenerKind, RasterizeOptions};
use feedback_capture::screencast::{
    ClipFormat, DisplayStream, MediaPlatform, RecorderEvent, StreamConstraints,
};
use feedback_capture::{CaptureEngine, RecordingEngine};

pub const WIDGET_ID: &str = "feedback-widget-container";
/// Uniform page color painted by the mock rasterizer
pub const PAGE_COLOR: [u8; 4] = [10, 20, 200, 255];
/// Color of the trigger widget when it leaks into a raster
pub const WIDGET_COLOR: [u8; 4] = [255, 0, 255, 255];

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// In-memory host page: records layers, toolbar, visibility, and listeners,
/// and rasterizes a synthetic page
pub struct MockHost {
    pub viewport: Viewport,
    /// Widget footprint in page coordinates (x, y, width, height)
    pub widget_rect: (u32, u32, u32, u32),
    pub fail_rasterize: bool,
    pub layers: HashMap<Layer, (Point, Pixmap)>,
    pub toolbar: Option<Point>,
    pub hidden: HashSet<String>,
    pub listeners: Vec<ListenerKind>,
    pub rasterize_calls: Vec<RasterizeOptions>,
    /// Layers that were still presented when rasterize ran
    pub layers_at_rasterize: Vec<Layer>,
}

impl MockHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            widget_rect: (0, height.saturating_sub(60), 200, 60),
            fail_rasterize: false,
            layers: HashMap::new(),
            toolbar: None,
            hidden: HashSet::new(),
            listeners: Vec::new(),
            rasterize_calls: Vec::new(),
            layers_at_rasterize: Vec::new(),
        }
    }

    pub fn has_layer(&self, layer: Layer) -> bool {
        self.layers.contains_key(&layer)
    }

    pub fn layer_origin(&self, layer: Layer) -> Option<Point> {
        self.layers.get(&layer).map(|(origin, _)| *origin)
    }
}

impl HostPage for MockHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn rasterize(&mut self, options: &RasterizeOptions) -> anyhow::Result<RgbaImage> {
        self.rasterize_calls.push(options.clone());
        self.layers_at_rasterize = self.layers.keys().copied().collect();
        if self.fail_rasterize {
            bail!("canvas tainted by cross-origin content");
        }

        let width = (self.viewport.width as f32 * options.scale).round() as u32;
        let height = (self.viewport.height as f32 * options.scale).round() as u32;
        let mut img = RgbaImage::from_pixel(width, height, Rgba(PAGE_COLOR));

        let widget_gone = options.exclude.iter().any(|id| id == WIDGET_ID)
            || self.hidden.contains(WIDGET_ID);
        if !widget_gone {
            let (wx, wy, ww, wh) = self.widget_rect;
            let x0 = (wx as f32 * options.scale) as u32;
            let y0 = (wy as f32 * options.scale) as u32;
            let x1 = ((wx + ww) as f32 * options.scale).round() as u32;
            let y1 = ((wy + wh) as f32 * options.scale).round() as u32;
            for y in y0..y1.min(height) {
                for x in x0..x1.min(width) {
                    img.put_pixel(x, y, Rgba(WIDGET_COLOR));
                }
            }
        }
        Ok(img)
    }

    fn present_layer(&mut self, layer: Layer, origin: Point, content: &Pixmap) {
        self.layers.insert(layer, (origin, content.clone()));
    }

    fn clear_layer(&mut self, layer: Layer) {
        self.layers.remove(&layer);
    }

    fn place_toolbar(&mut self, anchor: Point) {
        self.toolbar = Some(anchor);
    }

    fn remove_toolbar(&mut self) {
        self.toolbar = None;
    }

    fn set_element_visible(&mut self, element_id: &str, visible: bool) {
        if visible {
            self.hidden.remove(element_id);
        } else {
            self.hidden.insert(element_id.to_string());
        }
    }

    fn attach_listener(&mut self, kind: ListenerKind) {
        self.listeners.push(kind);
    }

    fn detach_listener(&mut self, kind: ListenerKind) {
        if let Some(pos) = self.listeners.iter().position(|k| *k == kind) {
            self.listeners.remove(pos);
        }
    }
}

/// Capture engine over a fresh mock host
pub fn capture_engine(width: u32, height: u32) -> CaptureEngine<MockHost> {
    init_logs();
    CaptureEngine::new(MockHost::new(width, height), CaptureConfig::default())
}

/// Shared view into the mock stream, kept by tests across session teardown
#[derive(Default)]
pub struct StreamProbe {
    pub sender: Option<Sender<RecorderEvent>>,
    pub encoder_started: bool,
    pub stop_requests: u32,
    pub tracks_stopped: u32,
    /// Chunk emitted when the encoder finalizes
    pub flush_chunk: Vec<u8>,
}

pub struct MockPlatform {
    pub supported: bool,
    pub fail_request: bool,
    pub fail_encoder: bool,
    pub requests: u32,
    pub last_constraints: Option<StreamConstraints>,
    pub probe: Rc<RefCell<StreamProbe>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            supported: true,
            fail_request: false,
            fail_encoder: false,
            requests: 0,
            last_constraints: None,
            probe: Rc::new(RefCell::new(StreamProbe::default())),
        }
    }
}

pub struct MockStream {
    active: bool,
    tx: Sender<RecorderEvent>,
    probe: Rc<RefCell<StreamProbe>>,
    fail_encoder: bool,
}

impl MediaPlatform for MockPlatform {
    type Stream = MockStream;

    fn supports_display_capture(&self) -> bool {
        self.supported
    }

    fn request_stream(
        &mut self,
        constraints: &StreamConstraints,
    ) -> anyhow::Result<(MockStream, Receiver<RecorderEvent>)> {
        self.requests += 1;
        self.last_constraints = Some(*constraints);
        if self.fail_request {
            bail!("user declined the share prompt");
        }
        let (tx, rx) = unbounded();
        self.probe.borrow_mut().sender = Some(tx.clone());
        Ok((
            MockStream {
                active: false,
                tx,
                probe: self.probe.clone(),
                fail_encoder: self.fail_encoder,
            },
            rx,
        ))
    }
}

impl DisplayStream for MockStream {
    fn start_encoder(&mut self, _format: ClipFormat) -> anyhow::Result<()> {
        if self.fail_encoder {
            bail!("no encoder available for the requested format");
        }
        self.active = true;
        self.probe.borrow_mut().encoder_started = true;
        Ok(())
    }

    fn encoder_active(&self) -> bool {
        self.active
    }

    fn request_stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let flush = {
            let mut probe = self.probe.borrow_mut();
            probe.stop_requests += 1;
            probe.flush_chunk.clone()
        };
        if !flush.is_empty() {
            let _ = self.tx.send(RecorderEvent::DataAvailable(flush));
        }
        let _ = self.tx.send(RecorderEvent::Stopped);
    }

    fn stop_tracks(&mut self) {
        self.probe.borrow_mut().tracks_stopped += 1;
    }
}

/// Recording engine over a fresh mock platform
pub fn recording_engine() -> RecordingEngine<MockPlatform> {
    init_logs();
    RecordingEngine::new(MockPlatform::new(), RecorderConfig::default())
}

/// The probe shared with the engine's platform
pub fn probe(engine: &RecordingEngine<MockPlatform>) -> Rc<RefCell<StreamProbe>> {
    engine.platform().probe.clone()
}

/// Send one platform event into the live stream's channel
pub fn send_event(engine: &RecordingEngine<MockPlatform>, event: RecorderEvent) {
    let sender = probe(engine)
        .borrow()
        .sender
        .clone()
        .expect("no stream requested yet");
    sender.send(event).expect("event channel closed");
}
