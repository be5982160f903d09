use serde::Serialize;

/// One caption cue, as read from a caption payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Seconds from the start of the video.
    pub start: f64,
    pub duration: f64,
    /// Decoded and trimmed. Never empty.
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, duration: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            duration,
            text: text.into(),
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// A window of one or more segments merged together by the grouper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}
