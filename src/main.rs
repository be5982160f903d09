use captext::parser::CaptionFormat;
use captext::response::{self, TranscriptResponse};
use captext::tracks::{SelectedTrack, VideoInfo, DEFAULT_LANGUAGES};
use captext::video;
use captext::{
    build_transcript, CaptextError, TranscriptOptions, DEFAULT_INTERVAL, DEFAULT_MAX_LENGTH,
};

use std::io::{self, Read};
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::Parser as ClapParser;
use tracing::{debug, info};

fn main() {
    init_logging();
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            process::exit(1);
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "captext=info".into()),
        )
        .with_writer(io::stderr)
        .init();
}

#[derive(ClapParser)]
#[command(about = "Extract a readable, timestamped transcript from a video's caption track")]
struct Cli {
    #[arg(long, value_name = "URL", help = "The YouTube URL of the video.")]
    url: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The caption payload to read. If not supplied, it will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write the JSON response to. If not supplied, it will be written to standard output.",
        default_value = "-"
    )]
    output: String,
    #[arg(
        long,
        value_name = "FILE",
        help = "Video metadata JSON (as printed by `yt-dlp --dump-json`) used to pick the caption track."
    )]
    info: Option<String>,
    #[arg(
        short,
        long,
        value_name = "FORMAT",
        help = "Caption payload format: 'structured' (json3) or 'tag-pattern'. Overrides the selected track's format."
    )]
    format: Option<CaptionFormat>,
    #[arg(
        long = "lang",
        value_name = "CODE",
        help = "Preferred caption language, in order of preference. May be repeated."
    )]
    languages: Vec<String>,
    #[arg(
        long,
        value_name = "SECONDS",
        env = "CAPTEXT_INTERVAL",
        default_value_t = DEFAULT_INTERVAL,
        value_parser = parse_interval,
        help = "Width of the time windows captions are grouped into."
    )]
    interval: f64,
    #[arg(
        long,
        value_name = "CHARS",
        env = "CAPTEXT_MAX_LENGTH",
        default_value_t = DEFAULT_MAX_LENGTH,
        help = "Maximum length of the flattened transcript."
    )]
    max_length: usize,
    #[arg(
        long,
        help = "Print the selected caption track and exit without reading a payload.",
        requires = "info"
    )]
    show_track: bool,
    #[arg(long, help = "Write compact instead of pretty-printed JSON.")]
    compact: bool,
}

fn parse_interval(s: &str) -> Result<f64, String> {
    let interval: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if interval.is_finite() && interval > 0.0 {
        Ok(interval)
    } else {
        Err("the interval must be a positive number of seconds".to_string())
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let video_id =
        video::extract_video_id(&cli.url).ok_or_else(|| CaptextError::InvalidUrl(cli.url.clone()))?;
    debug!("Resolved {} to video id '{}'", cli.url, video_id);

    let info = match &cli.info {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .context(format!("Failed to open metadata file: '{}'", path))?;
            Some(VideoInfo::from_json(&data).context(format!("Failed to read metadata file: '{}'", path))?)
        }
        None => None,
    };

    let languages: Vec<String> = if cli.languages.is_empty() {
        DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
    } else {
        cli.languages.clone()
    };
    let track = match &info {
        Some(info) => Some(info.select_track(languages.as_slice())?),
        None => None,
    };

    if cli.show_track {
        if let Some(track) = &track {
            return write_output(&cli, track);
        }
    }

    let format = cli
        .format
        .or(track.as_ref().map(|t: &SelectedTrack| t.format))
        .unwrap_or(CaptionFormat::Structured);

    let payload = if cli.input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&cli.input)
            .context(format!("Failed to open caption file: '{}'", cli.input))?
    };

    let opts = TranscriptOptions {
        interval: cli.interval,
        max_length: cli.max_length,
    };
    let (segments, transcript) = build_transcript(&payload, format, &opts);
    if segments.is_empty() {
        let available = info
            .as_ref()
            .map(VideoInfo::available_languages)
            .unwrap_or_default();
        return Err(anyhow!(
            "No captions could be extracted from '{}' for video {} (available languages: {})",
            cli.input,
            video_id,
            if available.is_empty() {
                "unknown".to_string()
            } else {
                available.join(", ")
            }
        ));
    }

    let resp = TranscriptResponse::new(video_id, info.as_ref(), segments, transcript);
    info!(
        "Transcript for {}: {} characters ({} kept)",
        video::watch_url(&resp.video_id),
        resp.length,
        resp.transcript.chars().count()
    );
    write_output(&cli, &resp)
}

fn write_output<T: serde::Serialize>(cli: &Cli, value: &T) -> Result<()> {
    let pretty = !cli.compact;
    if cli.output == "-" {
        response::serialise(value, io::stdout(), pretty)
    } else {
        let dst = std::fs::File::create(&cli.output)
            .context(format!("Failed to create output file: '{}'", cli.output))?;
        response::serialise(value, dst, pretty)
    }
}
