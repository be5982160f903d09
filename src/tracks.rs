//! Caption track discovery over a video metadata record (the JSON emitted by
//! `yt-dlp --dump-json`).

use crate::error::CaptextError;
use crate::parser::CaptionFormat;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_LANGUAGES: [&str; 4] = ["en", "en-US", "en-GB", "en-orig"];

/// One downloadable rendition of a caption track.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackFormat {
    pub ext: Option<String>,
    pub url: Option<String>,
}

type Tracks = BTreeMap<String, Vec<TrackFormat>>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoInfo {
    pub title: Option<String>,
    pub channel: Option<String>,
    pub duration: Option<f64>,
    subtitles: Option<Tracks>,
    automatic_captions: Option<Tracks>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedTrack {
    pub language: String,
    /// Whether the track came from the auto-generated captions.
    pub automatic: bool,
    pub format: CaptionFormat,
    pub url: String,
}

impl VideoInfo {
    pub fn from_json(data: &str) -> Result<Self, CaptextError> {
        Ok(serde_json::from_str(data)?)
    }

    fn manual(&self) -> Option<&Tracks> {
        self.subtitles.as_ref()
    }

    fn automatic(&self) -> Option<&Tracks> {
        self.automatic_captions.as_ref()
    }

    /// Every language with a caption track, manual ones first.
    pub fn available_languages(&self) -> Vec<String> {
        self.manual()
            .into_iter()
            .chain(self.automatic())
            .flat_map(|tracks| tracks.keys().cloned())
            .collect()
    }

    /// Picks the caption track to transcribe.
    ///
    /// Manual subtitles win over automatic captions; within each, `languages`
    /// is tried in order. Among the chosen track's renditions `json3` is
    /// preferred, otherwise the first one listed is used.
    pub fn select_track<S: AsRef<str>>(
        &self,
        languages: &[S],
    ) -> Result<SelectedTrack, CaptextError> {
        let found = find_language(self.manual(), languages)
            .map(|(lang, formats)| (lang, formats, false))
            .or_else(|| {
                find_language(self.automatic(), languages).map(|(lang, formats)| (lang, formats, true))
            });

        let (language, formats, automatic) = match found {
            Some(found) => found,
            None => {
                return Err(CaptextError::NoCaptions {
                    available: self.available_languages(),
                })
            }
        };
        debug!(
            "Using {} captions for '{}' ({} renditions)",
            if automatic { "automatic" } else { "manual" },
            language,
            formats.len()
        );

        let chosen = formats
            .iter()
            .find(|f| f.ext.as_deref() == Some("json3"))
            .or_else(|| formats.first());
        let (ext, url) = match chosen {
            Some(TrackFormat {
                ext,
                url: Some(url),
            }) => (ext.as_deref().unwrap_or_default(), url),
            _ => return Err(CaptextError::NoCaptionUrl(language.to_string())),
        };

        let track = SelectedTrack {
            language: language.to_string(),
            automatic,
            format: CaptionFormat::from_extension(ext),
            url: url.clone(),
        };
        info!(
            "Selected {} caption track '{}'",
            track.format, track.language
        );
        Ok(track)
    }
}

fn find_language<'a, S: AsRef<str>>(
    tracks: Option<&'a Tracks>,
    languages: &[S],
) -> Option<(&'a str, &'a [TrackFormat])> {
    let tracks = tracks?;
    languages.iter().find_map(|lang| {
        tracks
            .get_key_value(lang.as_ref())
            .map(|(key, formats)| (key.as_str(), formats.as_slice()))
    })
}
