use crate::caption::Segment;
use crate::entities;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Deserialize)]
struct Document {
    events: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct Event {
    #[serde(rename = "tStartMs", default)]
    start_ms: Option<f64>,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: Option<f64>,
    #[serde(default)]
    segs: Option<Vec<Value>>,
}

/// Parses a `json3` caption document into segments, one per event that
/// carries any text.
///
/// Only a payload that isn't a JSON object with an optional `events` array is
/// an error. Events that don't fit the expected shape are skipped, as are
/// segments without string text.
pub fn parse(input: &str) -> Result<Vec<Segment>, serde_json::Error> {
    let document: Document = serde_json::from_str(input)?;
    let events = document.events.unwrap_or_default();

    let segments = events
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value::<Event>(value) {
            Ok(event) => event_segment(event),
            Err(err) => {
                debug!("Skipping malformed caption event #{}: {}", idx, err);
                None
            }
        })
        .collect();

    Ok(segments)
}

fn event_segment(event: Event) -> Option<Segment> {
    let start_ms = event.start_ms.unwrap_or(0.0);
    let duration_ms = event.duration_ms.unwrap_or(0.0);
    if start_ms < 0.0 || duration_ms < 0.0 {
        debug!(
            "Skipping caption event with negative timing ({}ms, {}ms)",
            start_ms, duration_ms
        );
        return None;
    }

    let fragments: Vec<&str> = event
        .segs
        .iter()
        .flatten()
        .filter_map(|seg| seg.get("utf8").and_then(Value::as_str))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect();
    if fragments.is_empty() {
        return None;
    }

    let text = entities::decode(&fragments.join(" "));
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Some(Segment::new(start_ms / 1000.0, duration_ms / 1000.0, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_events() {
        let payload = r#"{
            "wireMagic": "pb3",
            "events": [
                {"tStartMs": 0, "dDurationMs": 5000, "id": 1, "wpWinPosId": 1},
                {"tStartMs": 1200, "dDurationMs": 3400, "segs": [{"utf8": "hello"}, {"utf8": " world", "tOffsetMs": 400}]},
                {"tStartMs": 4600, "dDurationMs": 10, "aAppend": 1, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 4610, "dDurationMs": 2000, "segs": [{"utf8": "rock &amp; roll"}]}
            ]
        }"#;

        assert_eq!(
            parse(payload).unwrap(),
            vec![
                Segment::new(1.2, 3.4, "hello world"),
                Segment::new(4.61, 2.0, "rock & roll"),
            ]
        );
    }

    #[test]
    fn test_parse_defaults_missing_timing() {
        let payload = r#"{"events": [{"segs": [{"utf8": "untimed"}]}]}"#;
        assert_eq!(
            parse(payload).unwrap(),
            vec![Segment::new(0.0, 0.0, "untimed")]
        );
    }

    #[test]
    fn test_parse_skips_malformed_events() {
        let payload = r#"{"events": [
            {"tStartMs": "soon", "segs": [{"utf8": "bad timing"}]},
            {"tStartMs": -5, "segs": [{"utf8": "negative"}]},
            {"tStartMs": 1000, "segs": [{"utf8": 42}]},
            {"tStartMs": 2000, "segs": [{}, {"utf8": ""}, {"utf8": "  "}]},
            {"tStartMs": 3000, "dDurationMs": 500, "segs": [{"utf8": "&nbsp;"}]},
            {"tStartMs": 4000, "dDurationMs": 500, "segs": [{"utf8": "survivor"}]}
        ]}"#;

        assert_eq!(
            parse(payload).unwrap(),
            vec![Segment::new(4.0, 0.5, "survivor")]
        );
    }

    #[test]
    fn test_parse_skips_malformed_segs_only() {
        let payload = r#"{"events": [
            {"tStartMs": 0, "dDurationMs": 1000, "segs": [{"utf8": "keep"}, {"utf8": null}, {"utf8": 7}]},
            {"tStartMs": 1000, "dDurationMs": 1000, "segs": ["bare", {"utf8": "this"}, [], {"utf8": "too"}]}
        ]}"#;

        assert_eq!(
            parse(payload).unwrap(),
            vec![
                Segment::new(0.0, 1.0, "keep"),
                Segment::new(1.0, 1.0, "this too"),
            ]
        );
    }

    #[test]
    fn test_parse_without_events() {
        assert!(parse("{}").unwrap().is_empty());
        assert!(parse(r#"{"events": null}"#).unwrap().is_empty());
        assert!(parse(r#"{"events": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_container() {
        assert!(parse("").is_err());
        assert!(parse("[1, 2, 3]").is_err());
        assert!(parse(r#"{"events": {"not": "a list"}}"#).is_err());
        assert!(parse(r#"<text start="0" dur="1">markup</text>"#).is_err());
    }
}
