//! URL matchers.
//!
//! A matcher either accepts a URL, returning it unchanged, or rejects it.
//! Matchers never rewrite the URL; extracting a video id or a host for
//! display happens when the component is rendered.

/// Accepts site-absolute paths to an SVG under `/src/`.
///
/// ```
/// use blogmark_astro::registry::matchers::excalidraw_url;
///
/// assert_eq!(excalidraw_url("/src/assets/diagram.svg"), Some("/src/assets/diagram.svg"));
/// assert_eq!(excalidraw_url("http://example.com/diagram.svg"), None);
/// ```
pub fn excalidraw_url(url: &str) -> Option<&str> {
    (url.starts_with("/src/") && url.ends_with(".svg")).then_some(url)
}

/// Accepts YouTube watch, embed, shorts and `youtu.be` links.
pub fn youtube_url(url: &str) -> Option<&str> {
    youtube_video_id(url).map(|_| url)
}

/// Accepts any absolute `http(s)` URL with a host.
pub fn link_card_url(url: &str) -> Option<&str> {
    http_host(url).map(|_| url)
}

/// The 11-character video id of a YouTube link.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    let host = http_host(url)?;
    let rest = url.split_once("://")?.1;
    let path = rest.strip_prefix(host)?.trim_start_matches('/');

    let candidate = match host {
        "youtu.be" => path,
        "youtube.com" | "www.youtube.com" | "m.youtube.com" => {
            if let Some(query) = path.strip_prefix("watch?") {
                query.split('&').find_map(|pair| pair.strip_prefix("v="))?
            } else if let Some(rest) = path.strip_prefix("embed/") {
                rest
            } else {
                path.strip_prefix("shorts/")?
            }
        }
        _ => return None,
    };

    let id = candidate.split(['?', '&', '#', '/']).next()?;
    let valid = id.len() == 11
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    valid.then_some(id)
}

/// Host of an absolute `http(s)` URL without whitespace, port included.
pub fn http_host(url: &str) -> Option<&str> {
    if url.chars().any(char::is_whitespace) {
        return None;
    }
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#']).next()?;
    (!host.is_empty()).then_some(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excalidraw_accepts_only_local_svgs() {
        assert_eq!(
            excalidraw_url("/src/assets/diagram.svg"),
            Some("/src/assets/diagram.svg")
        );
        assert_eq!(excalidraw_url("http://example.com/diagram.svg"), None);
        assert_eq!(excalidraw_url("/src/assets/diagram.png"), None);
        assert_eq!(excalidraw_url("/public/diagram.svg"), None);
    }

    #[test]
    fn youtube_link_shapes() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ&t=42",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
            "http://youtu.be/dQw4w9WgXcQ",
        ] {
            assert_eq!(youtube_video_id(url), Some("dQw4w9WgXcQ"), "{url}");
            assert_eq!(youtube_url(url), Some(url));
        }
    }

    #[test]
    fn youtube_rejects_other_links() {
        for url in [
            "https://www.youtube.com/watch?v=short",
            "https://www.youtube.com/channel/UC123",
            "https://vimeo.com/123456",
            "https://notyoutube.com/watch?v=dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9Wg$cQ",
        ] {
            assert_eq!(youtube_url(url), None, "{url}");
        }
    }

    #[test]
    fn link_card_needs_absolute_http_url() {
        assert_eq!(
            link_card_url("https://example.com/post?a=1"),
            Some("https://example.com/post?a=1")
        );
        assert_eq!(http_host("http://localhost:4321/x"), Some("localhost:4321"));
        assert_eq!(link_card_url("ftp://example.com"), None);
        assert_eq!(link_card_url("https://"), None);
        assert_eq!(link_card_url("https://exa mple.com"), None);
        assert_eq!(link_card_url("/relative/path"), None);
    }
}
