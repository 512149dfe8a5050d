//! Screen recording engine
//!
//! `Idle -> Requesting -> Recording -> terminal`, back to `Idle` with the
//! stream, encoder, and chunk buffer released. The explicit stop call and
//! the platform's own "stop sharing" path are idempotent with respect to
//! each other: whichever lands first finalizes the session, the other is a
//! no-op.

use chrono::{DateTime, Utc};
use crossbeam_channel::Receiver;

use super::platform::{ClipFormat, DisplayStream, MediaPlatform, RecorderEvent};
use crate::artifact::Artifact;
use crate::config::RecorderConfig;
use crate::error::RecordError;
use crate::session::{Pending, ResultSlot};

/// Pending outcome of a `start_recording()` call
pub type PendingClip = Pending<Artifact, RecordError>;

/// Ephemeral per-recording state, destroyed when the stream ends
struct RecordSession<S> {
    stream: S,
    events: Receiver<RecorderEvent>,
    chunks: Vec<Vec<u8>>,
    format: ClipFormat,
    started_at: DateTime<Utc>,
    result: ResultSlot<Artifact, RecordError>,
}

/// Live screen/window recording engine
pub struct RecordingEngine<P: MediaPlatform> {
    platform: P,
    config: RecorderConfig,
    session: Option<RecordSession<P::Stream>>,
}

impl<P: MediaPlatform> RecordingEngine<P> {
    pub fn new(platform: P, config: RecorderConfig) -> Self {
        Self {
            platform,
            config,
            session: None,
        }
    }

    /// The platform this engine drives
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Pure capability check, no side effects
    pub fn is_supported(&self) -> bool {
        self.platform.supports_display_capture()
    }

    /// Whether a recording session is in flight
    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// Acquire a display stream and start accumulating encoded chunks
    ///
    /// Fails immediately, without acquiring any stream, when the platform
    /// lacks display capture, and while another recording is in flight.
    pub fn start_recording(&mut self) -> PendingClip {
        if !self.is_supported() {
            log::error!("Screen recording requested on an unsupported platform");
            return Pending::failed(RecordError::UnsupportedPlatform);
        }
        if self.session.is_some() {
            log::warn!("start_recording() called while a recording is active");
            return Pending::failed(RecordError::StreamAcquisitionFailed(
                "a recording is already in progress".into(),
            ));
        }

        let (mut stream, events) = match self.platform.request_stream(&self.config.constraints) {
            Ok(pair) => pair,
            Err(err) => {
                log::error!("Display stream acquisition failed: {err:#}");
                return Pending::failed(RecordError::StreamAcquisitionFailed(format!("{err:#}")));
            }
        };

        if let Err(err) = stream.start_encoder(self.config.format) {
            stream.stop_tracks();
            log::error!("Encoder start failed: {err:#}");
            return Pending::failed(RecordError::EncodingFailed(format!("{err:#}")));
        }

        let (result, rx) = ResultSlot::channel();
        self.session = Some(RecordSession {
            stream,
            events,
            chunks: Vec::new(),
            format: self.config.format,
            started_at: Utc::now(),
            result,
        });
        log::info!("Screen recording started");

        Pending::new(
            rx,
            RecordError::EncodingFailed("recording session dropped before completion".into()),
        )
    }

    /// Synchronously request finalization of the active recording
    ///
    /// Safe to call when already inactive. The encoder flushes its buffered
    /// data and the pending clip resolves once [`RecorderEvent::Stopped`]
    /// arrives.
    pub fn stop_recording(&mut self, release_tracks: bool) {
        let Some(session) = self.session.as_mut() else {
            log::debug!("stop_recording() with no active session");
            return;
        };
        // Stopping an inactive encoder is a no-op, not an error
        if session.stream.encoder_active() {
            session.stream.request_stop();
        }
        if release_tracks {
            session.stream.stop_tracks();
        }
    }

    /// Drain all pending platform events
    pub fn pump_events(&mut self) {
        loop {
            let event = match self.session.as_mut() {
                Some(session) => match session.events.try_recv() {
                    Ok(event) => event,
                    Err(_) => break,
                },
                None => break,
            };
            self.handle_event(event);
        }
    }

    /// Handle one platform event
    pub fn handle_event(&mut self, event: RecorderEvent) {
        match event {
            RecorderEvent::DataAvailable(chunk) => {
                if chunk.is_empty() {
                    return;
                }
                if let Some(session) = self.session.as_mut() {
                    session.chunks.push(chunk);
                }
            }
            RecorderEvent::Stopped => self.finalize(),
            RecorderEvent::Error(cause) => {
                log::error!("Encoder error: {cause}");
                let Some(mut session) = self.session.take() else {
                    return;
                };
                // Stream and encoder references are cleared unconditionally
                session.stream.stop_tracks();
                session.result.resolve(Err(RecordError::EncodingFailed(cause)));
            }
            RecorderEvent::TrackEnded => {
                log::info!("Sharing stopped from the platform chrome");
                // The track is already gone; finalize without touching it
                self.stop_recording(false);
            }
        }
    }

    /// Optional stop affordance wired to this engine's `stop_recording`
    pub fn create_stop_ui(&self, on_stopped: impl FnMut() + 'static) -> StopUi {
        StopUi {
            on_stopped: Box::new(on_stopped),
            detached: false,
        }
    }

    /// Concatenate buffered chunks into the final clip and resolve
    fn finalize(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        let clip = assemble_clip(std::mem::take(&mut session.chunks));
        let elapsed = Utc::now().signed_duration_since(session.started_at);
        log::info!(
            "Recording finished after {}s ({} bytes)",
            elapsed.num_seconds(),
            clip.len()
        );
        session
            .result
            .resolve(Ok(Artifact::clip(session.format.content_type(), clip)));
        // Dropping the session clears the buffer and releases the stream
    }
}

/// Detachable stop control
///
/// Convenience sugar for hosts that want a ready-made affordance: pressing
/// it stops the engine and invokes the caller's callback once. Not required
/// for correctness.
pub struct StopUi {
    on_stopped: Box<dyn FnMut()>,
    detached: bool,
}

impl StopUi {
    /// Stop the recording and notify the caller; a no-op once detached
    pub fn press<P: MediaPlatform>(&mut self, engine: &mut RecordingEngine<P>) {
        if self.detached {
            return;
        }
        engine.stop_recording(true);
        (self.on_stopped)();
        self.detach();
    }

    pub fn detach(&mut self) {
        self.detached = true;
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

/// Join encoded chunks into one contiguous clip
fn assemble_clip(chunks: Vec<Vec<u8>>) -> Vec<u8> {
    let total = chunks.iter().map(Vec::len).sum();
    let mut clip = Vec::with_capacity(total);
    for chunk in chunks {
        clip.extend_from_slice(&chunk);
    }
    clip
}
