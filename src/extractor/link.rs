//! YouTube link recognition

use regex::Regex;
use std::sync::LazyLock;

/// Accepts youtube.com, youtube-nocookie.com and youtu.be links, with or
/// without scheme and `www.`/`m.` prefix. Group 6 is the video ID.
static YOUTUBE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^((?:https?:)?//)?((?:www|m)\.)?",
        r"(youtube(-nocookie)?\.com|youtu.be)",
        r"(/(?:[\w\-]+\?v=|embed/|live/|v/)?)",
        r"([\w\-]+)(\S+)?$",
    ))
    .expect("static link pattern")
});

/// Returns true if the whole link matches a YouTube host and path shape
pub fn is_valid(link: &str) -> bool {
    YOUTUBE_LINK.is_match(link)
}

/// Video ID part of a valid link
pub fn video_id(link: &str) -> Option<&str> {
    YOUTUBE_LINK
        .captures(link)
        .and_then(|caps| caps.get(6))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_links() {
        let links = [
            "https://www.youtube.com/watch?v=abc123",
            "http://youtube.com/watch?v=abc123",
            "https://youtu.be/abc123",
            "youtu.be/abc123",
            "//m.youtube.com/live/abc123",
            "https://www.youtube-nocookie.com/embed/abc123",
            "https://youtube.com/v/abc123",
            "https://www.youtube.com/watch?v=abc123&t=42s",
        ];
        for link in links {
            assert!(is_valid(link), "{} should be valid", link);
        }
    }

    #[test]
    fn test_invalid_links() {
        let links = [
            "",
            "https://example.com/video",
            "https://vimeo.com/12345",
            "ftp://youtube.com/watch?v=abc123",
            "https://www.youtube.com/",
            "https://www.youtube.com/watch?v=abc 123",
        ];
        for link in links {
            assert!(!is_valid(link), "{} should be invalid", link);
        }
    }

    #[test]
    fn test_video_id() {
        assert_eq!(video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
        assert_eq!(video_id("https://youtu.be/dQw4w9WgXcQ?t=1"), Some("dQw4w9WgXcQ"));
        assert_eq!(video_id("https://youtube.com/embed/abc-_9"), Some("abc-_9"));
        assert_eq!(video_id("https://example.com/video"), None);
    }

    proptest! {
        #[test]
        fn short_links_are_valid(id in "[A-Za-z0-9_-]{1,16}") {
            let link = format!("https://youtu.be/{}", id);
            prop_assert!(is_valid(&link));
        }

        #[test]
        fn foreign_hosts_are_invalid(host in "[a-z]{3,10}", id in "[A-Za-z0-9]{1,11}") {
            prop_assume!(!host.starts_with("youtu"));
            let link = format!("https://{}.org/watch?v={}", host, id);
            prop_assert!(!is_valid(&link));
        }
    }
}
