use crate::assembler::Transcript;
use crate::caption::GroupedSegment;
use crate::tracks::VideoInfo;

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;

/// What a caller gets back for one video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptResponse {
    pub video_id: String,
    pub title: Option<String>,
    pub channel: Option<String>,
    pub duration: Option<f64>,
    pub transcript: String,
    pub segments: Vec<GroupedSegment>,
    pub length: usize,
}

impl TranscriptResponse {
    pub fn new(
        video_id: impl Into<String>,
        info: Option<&VideoInfo>,
        segments: Vec<GroupedSegment>,
        transcript: Transcript,
    ) -> Self {
        Self {
            video_id: video_id.into(),
            title: info.and_then(|i| i.title.clone()),
            channel: info.and_then(|i| i.channel.clone()),
            duration: info.and_then(|i| i.duration),
            transcript: transcript.text,
            segments,
            length: transcript.length,
        }
    }
}

pub fn serialise<T: Serialize, W: Write>(value: &T, dst: W, pretty: bool) -> Result<()> {
    let mut writer = BufWriter::new(dst);
    write_json(&mut writer, value, pretty).context("Failed to write response.")?;
    writer.flush().context("Failed to write response.")?;
    Ok(())
}

fn write_json<T: Serialize, W: Write>(buf: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *buf, value)?;
    } else {
        serde_json::to_writer(&mut *buf, value)?;
    }
    writeln!(buf)?;
    Ok(())
}
