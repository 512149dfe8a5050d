//! Capture and recording engines for embeddable feedback widgets
//!
//! Two independent engines, invoked on demand and fully torn down between
//! uses:
//!
//! - [`capture::CaptureEngine`] lets the user drag out a page region,
//!   annotate it freehand, and composites a cropped JPEG of the result.
//! - [`screencast::RecordingEngine`] acquires a live screen/window stream
//!   and assembles its encoded output into a video clip.
//!
//! Both hand the caller a single pending [`Artifact`] per invocation. The
//! embedding environment supplies the platform primitives through the
//! [`host::HostPage`] and [`screencast::MediaPlatform`] traits and pumps
//! user/platform events into the engines from its UI thread.

pub mod artifact;
pub mod capture;
pub mod config;
pub mod domain;
pub mod error;
pub mod host;
pub mod screencast;
pub mod session;

pub use artifact::{Artifact, ArtifactKind};
pub use capture::{CaptureEngine, InputEvent, PendingCapture};
pub use config::{CaptureConfig, Config, RecorderConfig};
pub use error::{CaptureError, RecordError};
pub use host::{HostPage, Layer, ListenerKind, RasterizeOptions};
pub use screencast::{PendingClip, RecordingEngine};
