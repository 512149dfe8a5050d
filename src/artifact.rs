//! Final encoded outputs handed to the caller

use chrono::{DateTime, Utc};

/// What kind of media an artifact holds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Still image from a region capture
    Image,
    /// Video clip from a screen recording
    Clip,
}

/// Encoded capture output: opaque bytes plus their content type
///
/// Ownership passes entirely to the caller; the producing engine keeps no
/// reference once the artifact is delivered.
#[derive(Clone, Debug)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub content_type: String,
    pub data: Vec<u8>,
    created_at: DateTime<Utc>,
}

impl Artifact {
    /// Wrap an encoded still image
    pub fn image(content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            kind: ArtifactKind::Image,
            content_type: content_type.into(),
            data,
            created_at: Utc::now(),
        }
    }

    /// Wrap an encoded video clip
    pub fn clip(content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            kind: ArtifactKind::Clip,
            content_type: content_type.into(),
            data,
            created_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// When this artifact was produced
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamped filename for downloads and uploads
    pub fn suggested_filename(&self) -> String {
        let stamp = self.created_at.format("%Y%m%d-%H%M%S");
        format!("feedback-{}.{}", stamp, extension_for(&self.content_type))
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "video/webm" => "webm",
        "video/mp4" => "mp4",
        "video/x-matroska" => "mkv",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_carries_extension() {
        let artifact = Artifact::image("image/jpeg", vec![0xFF, 0xD8]);
        let name = artifact.suggested_filename();
        assert!(name.starts_with("feedback-"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn unknown_content_type_falls_back() {
        let artifact = Artifact::clip("application/x-unknown", vec![]);
        assert!(artifact.suggested_filename().ends_with(".bin"));
        assert!(artifact.is_empty());
    }
}
