//! Screen recording engine and its platform seam

pub mod platform;
pub mod recorder;

pub use platform::{
    ClipFormat, DisplaySurface, DisplayStream, MediaPlatform, RecorderEvent, StreamConstraints,
};
pub use recorder::{PendingClip, RecordingEngine, StopUi};
