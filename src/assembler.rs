use crate::caption::GroupedSegment;

use serde::Serialize;

/// Character ceiling for a flattened transcript.
pub const DEFAULT_MAX_LENGTH: usize = 15_000;

/// The flattened text of a caption track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    /// At most `max_length` characters.
    pub text: String,
    /// Character count before truncation.
    pub length: usize,
}

/// Joins the group texts into one line of single-space separated words and
/// cuts it to `max_length` characters.
pub fn assemble(groups: &[GroupedSegment], max_length: usize) -> Transcript {
    let collapsed = groups
        .iter()
        .flat_map(|group| group.text.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ");

    let length = collapsed.chars().count();
    let text = if length > max_length {
        collapsed.chars().take(max_length).collect()
    } else {
        collapsed
    };

    Transcript { text, length }
}
