//! Platform seam for display capture and encoding
//!
//! The engine never touches capture or encoding machinery directly: an
//! integration implements [`MediaPlatform`] and [`DisplayStream`] over
//! whatever the environment provides, and delivers [`RecorderEvent`]s on the
//! channel returned from `request_stream`.

use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};

/// Which display surface the stream should capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplaySurface {
    /// A single application window
    #[default]
    Window,
    /// A whole screen
    Screen,
}

/// Constraints for requesting a display stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConstraints {
    pub surface: DisplaySurface,
    /// Include the cursor in captured frames
    pub cursor: bool,
    /// Request an audio track alongside video
    pub audio: bool,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            surface: DisplaySurface::Window,
            cursor: true,
            audio: true,
        }
    }
}

/// Container format of the encoded clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClipFormat {
    #[default]
    Webm,
    Mp4,
    Mkv,
}

impl ClipFormat {
    /// MIME type stamped on the finished artifact
    pub fn content_type(&self) -> &'static str {
        match self {
            ClipFormat::Webm => "video/webm",
            ClipFormat::Mp4 => "video/mp4",
            ClipFormat::Mkv => "video/x-matroska",
        }
    }

    /// File extension for this container
    pub fn extension(&self) -> &'static str {
        match self {
            ClipFormat::Webm => "webm",
            ClipFormat::Mp4 => "mp4",
            ClipFormat::Mkv => "mkv",
        }
    }
}

/// Events a platform stream delivers while recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderEvent {
    /// An encoded chunk became available
    DataAvailable(Vec<u8>),
    /// The encoder finalized; always the last event after a stop request
    Stopped,
    /// Encoder-level failure with the underlying cause
    Error(String),
    /// The user stopped sharing via the platform's own chrome
    TrackEnded,
}

/// Platform entry point for acquiring display streams
pub trait MediaPlatform {
    type Stream: DisplayStream;

    /// Capability probe; must have no side effects
    fn supports_display_capture(&self) -> bool;

    /// Request a live display stream
    ///
    /// Returns the stream handle and the channel its recorder events will
    /// arrive on. An error here means the user declined or acquisition
    /// failed.
    fn request_stream(
        &mut self,
        constraints: &StreamConstraints,
    ) -> anyhow::Result<(Self::Stream, Receiver<RecorderEvent>)>;
}

/// A live display stream with an attachable encoder
pub trait DisplayStream {
    /// Attach and start the encoder; chunks arrive as [`RecorderEvent`]s
    fn start_encoder(&mut self, format: ClipFormat) -> anyhow::Result<()>;

    /// Whether the encoder is currently active
    fn encoder_active(&self) -> bool;

    /// Ask the encoder to finalize: flush buffered data, then emit
    /// [`RecorderEvent::Stopped`] exactly once. A no-op when inactive.
    fn request_stop(&mut self);

    /// Release all stream tracks
    fn stop_tracks(&mut self);
}
