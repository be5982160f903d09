//! Turns a video's caption track into a readable, timestamped transcript.
//!
//! The pipeline is `parse` → `group` → `assemble`; every step is pure and
//! infallible, so a malformed payload yields an empty transcript rather than
//! an error. Resolving the video and picking a track live in [`video`] and
//! [`tracks`].

pub mod assembler;
pub mod caption;
pub mod entities;
pub mod error;
pub mod grouper;
pub mod parser;
pub mod response;
pub mod tracks;
pub mod video;

pub use assembler::{assemble, Transcript, DEFAULT_MAX_LENGTH};
pub use caption::{GroupedSegment, Segment};
pub use error::CaptextError;
pub use grouper::{group, DEFAULT_INTERVAL};
pub use parser::{parse, CaptionFormat};
pub use response::TranscriptResponse;
pub use tracks::{SelectedTrack, VideoInfo, DEFAULT_LANGUAGES};
pub use video::extract_video_id;

use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranscriptOptions {
    /// Grouping window in seconds.
    pub interval: f64,
    /// Character ceiling of the flattened transcript.
    pub max_length: usize,
}

impl Default for TranscriptOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Runs a caption payload through the whole pipeline.
pub fn build_transcript(
    payload: &str,
    format: CaptionFormat,
    opts: &TranscriptOptions,
) -> (Vec<GroupedSegment>, Transcript) {
    let segments = parse(payload, format);
    let segment_count = segments.len();
    let groups = group(segments, opts.interval);
    let transcript = assemble(&groups, opts.max_length);
    info!(
        "Built transcript: {} segments in {} groups, {} characters",
        segment_count,
        groups.len(),
        transcript.length
    );
    (groups, transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_transcript_json3() {
        let payload = r#"{"events": [
            {"tStartMs": 0, "dDurationMs": 5000, "segs": [{"utf8": "We&#39;re"}, {"utf8": "live"}]},
            {"tStartMs": 6000, "dDurationMs": 5000, "segs": [{"utf8": "\n"}]},
            {"tStartMs": 6000, "dDurationMs": 5000, "segs": [{"utf8": "right  now"}]},
            {"tStartMs": 35000, "dDurationMs": 5000, "segs": [{"utf8": "bye"}]}
        ]}"#;

        let (groups, transcript) =
            build_transcript(payload, CaptionFormat::Structured, &TranscriptOptions::default());

        assert_eq!(
            groups,
            vec![
                GroupedSegment {
                    start: 0.0,
                    end: 11.0,
                    text: "We're live right  now".to_string(),
                },
                GroupedSegment {
                    start: 30.0,
                    end: 40.0,
                    text: "bye".to_string(),
                },
            ]
        );
        assert_eq!(
            transcript,
            Transcript {
                text: "We're live right now bye".to_string(),
                length: 24,
            }
        );
    }

    #[test]
    fn test_build_transcript_markup_fallback() {
        let payload = r#"<transcript><text start="12.5" dur="3">one</text><text start="70" dur="2.5">two</text></transcript>"#;
        let opts = TranscriptOptions {
            interval: 60.0,
            max_length: 5,
        };

        let (groups, transcript) = build_transcript(payload, CaptionFormat::Structured, &opts);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].start, 60.0);
        assert_eq!(groups[1].end, 72.5);
        assert_eq!(transcript.text, "one t");
        assert_eq!(transcript.length, 7);
    }

    #[test]
    fn test_build_transcript_nothing_found() {
        let (groups, transcript) = build_transcript(
            "<html>blocked</html>",
            CaptionFormat::Structured,
            &TranscriptOptions::default(),
        );
        assert!(groups.is_empty());
        assert_eq!(transcript.text, "");
        assert_eq!(transcript.length, 0);
    }
}
