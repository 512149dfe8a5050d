//! Failure taxonomy for both engines
//!
//! Cancellations are expected outcomes and should be handled silently by the
//! caller; everything else is a platform failure worth showing to the user.

use thiserror::Error;

/// How a region capture can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The drag collapsed to a zero-area rectangle
    #[error("no region selected")]
    NoRegionSelected,

    /// Escape pressed while the selection overlay was up
    #[error("screenshot selection cancelled by user")]
    SelectionCancelled,

    /// Escape pressed or Cancel clicked while annotating
    #[error("screenshot annotation cancelled by user")]
    AnnotationCancelled,

    /// Page rasterization, cropping, or encoding failed
    #[error("screenshot composition failed: {0}")]
    CompositionFailed(String),
}

impl CaptureError {
    /// User-initiated outcomes the caller should swallow without alarming
    /// the end user
    pub fn is_cancellation(&self) -> bool {
        !matches!(self, CaptureError::CompositionFailed(_))
    }
}

/// How a screen recording can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The platform offers no display capture or media encoding
    #[error("screen recording is not supported on this platform")]
    UnsupportedPlatform,

    /// The user declined the stream request, or acquisition errored
    #[error("failed to acquire display stream: {0}")]
    StreamAcquisitionFailed(String),

    /// The platform encoder reported an error mid-recording
    #[error("video encoding failed: {0}")]
    EncodingFailed(String),
}
