use crate::caption::{GroupedSegment, Segment};

use tracing::warn;

/// Width of a grouping window, in seconds.
pub const DEFAULT_INTERVAL: f64 = 30.0;

/// Merges consecutive segments that fall into the same `interval`-second
/// window.
///
/// Segments are expected in start order and are never re-sorted: whenever the
/// window changes a new group is opened, so input that jumps back to an
/// earlier window produces a second group for that window.
///
/// A group starts at its window boundary and ends where the last merged
/// segment ends. A non-positive or non-finite `interval` is replaced by
/// [`DEFAULT_INTERVAL`].
pub fn group(segments: Vec<Segment>, interval: f64) -> Vec<GroupedSegment> {
    let interval = if interval.is_finite() && interval > 0.0 {
        interval
    } else {
        warn!(
            "Invalid grouping interval {}, using {}s",
            interval, DEFAULT_INTERVAL
        );
        DEFAULT_INTERVAL
    };

    let mut groups = Vec::new();
    let mut current: Option<GroupedSegment> = None;

    for segment in segments {
        let window = (segment.start / interval).floor() * interval;
        let end = segment.end();
        match current.as_mut() {
            Some(open) if open.start == window => {
                open.text.push(' ');
                open.text.push_str(&segment.text);
                open.end = end;
            }
            _ => {
                if let Some(closed) = current.take() {
                    groups.push(closed);
                }
                current = Some(GroupedSegment {
                    start: window,
                    end,
                    text: segment.text,
                });
            }
        }
    }

    if let Some(closed) = current {
        groups.push(closed);
    }
    groups
}
