use std::sync::LazyLock;

use regex::Regex;

static VIDEO_ID_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
            .expect("video id pattern is valid"),
        Regex::new(r"youtube\.com/shorts/([^&\n?#]+)").expect("shorts pattern is valid"),
    ]
});

/// Pulls the video id out of a watch, short-link, embed or shorts URL.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_video_id {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected): (&str, Option<&str>) = $value;
                assert_eq!(extract_video_id(input).as_deref(), expected);
            }
        )*
        }
    }

    test_video_id! {
        test_video_id_watch: ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", Some("dQw4w9WgXcQ")),
        test_video_id_watch_params: ("https://youtube.com/watch?v=dQw4w9WgXcQ&t=42s", Some("dQw4w9WgXcQ")),
        test_video_id_short_link: ("https://youtu.be/dQw4w9WgXcQ?si=abc", Some("dQw4w9WgXcQ")),
        test_video_id_embed: ("https://www.youtube.com/embed/dQw4w9WgXcQ#frag", Some("dQw4w9WgXcQ")),
        test_video_id_shorts: ("https://www.youtube.com/shorts/abc123XYZ_-", Some("abc123XYZ_-")),
        test_video_id_no_scheme: ("youtu.be/xyz", Some("xyz")),
        test_video_id_other_site: ("https://vimeo.com/12345", None),
        test_video_id_channel: ("https://www.youtube.com/@somechannel", None),
        test_video_id_empty: ("", None),
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(watch_url("abc"), "https://www.youtube.com/watch?v=abc");
    }
}
