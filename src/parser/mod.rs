//! Caption payload parsing.
//!
//! Two serialisations are understood: YouTube's `json3` event documents and
//! the older XML flavours built from `<text start=".." dur="..">` elements.
//! Both produce the same [`Segment`] sequence.

pub mod json3;
pub mod tags;

use crate::caption::Segment;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionFormat {
    /// `json3` event documents.
    Structured,
    /// Markup with `<text>` elements (`srv1` and friends).
    TagPattern,
}

impl CaptionFormat {
    /// Maps a caption track's file extension to the parser that handles it.
    pub fn from_extension(ext: &str) -> Self {
        if ext.eq_ignore_ascii_case("json3") {
            CaptionFormat::Structured
        } else {
            CaptionFormat::TagPattern
        }
    }
}

impl FromStr for CaptionFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "structured" | "json3" => Ok(CaptionFormat::Structured),
            "tag-pattern" | "xml" | "srv1" => Ok(CaptionFormat::TagPattern),
            other => Err(format!(
                "Unknown caption format '{}', expected 'structured' or 'tag-pattern'",
                other
            )),
        }
    }
}

impl fmt::Display for CaptionFormat {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CaptionFormat::Structured => write!(fmt, "structured"),
            CaptionFormat::TagPattern => write!(fmt, "tag-pattern"),
        }
    }
}

/// Parses a caption payload into time-ordered segments.
///
/// Never fails. A payload that claims to be structured but isn't valid JSON
/// is rescanned as tag markup; a payload with nothing recognisable yields an
/// empty list.
pub fn parse(payload: &str, format: CaptionFormat) -> Vec<Segment> {
    let segments = match format {
        CaptionFormat::Structured => match json3::parse(payload) {
            Ok(segments) => segments,
            Err(err) => {
                warn!(
                    "Caption payload is not a json3 document ({}), falling back to tag scanning",
                    err
                );
                tags::parse(payload)
            }
        },
        CaptionFormat::TagPattern => tags::parse(payload),
    };
    debug!("Parsed {} segments as {}", segments.len(), format);
    segments
}
