use thiserror::Error;

/// Failures around the caption pipeline: resolving the video and picking a
/// caption track. Parsing itself never fails.
#[derive(Error, Debug)]
pub enum CaptextError {
    #[error("Invalid YouTube URL: '{0}'")]
    InvalidUrl(String),

    #[error("No captions in the preferred languages (available: {})", .available.join(", "))]
    NoCaptions { available: Vec<String> },

    #[error("Could not get caption URL for language '{0}'")]
    NoCaptionUrl(String),

    #[error("Failed to decode video metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}
