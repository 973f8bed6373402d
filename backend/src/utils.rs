use url::Url;

/// Extract the YouTube video id from a stream URL. Accepts watch links,
/// youtu.be short links and embed links, with or without extra query
/// parameters.
pub fn extract_youtube_video_id(url: &str) -> Option<String> {
    if let Some(captures) = regex::Regex::new(
        r"(?:youtube\.com/watch\?(?:[^#\s]*&)?v=|youtu\.be/|youtube\.com/embed/)([a-zA-Z0-9_-]{11})",
    )
    .ok()?
    .captures(url)
    {
        return captures.get(1).map(|m| m.as_str().to_string());
    }
    None
}

/// Build the public deep link for a site, e.g. https://example.org/sites/42
pub fn site_frontend_url(site_id: i64, front_url: &str) -> String {
    match Url::parse(front_url).and_then(|base| base.join(&format!("sites/{site_id}"))) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}/sites/{}", front_url.trim_end_matches('/'), site_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_watch_link() {
        assert_eq!(
            extract_youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn extracts_id_from_watch_link_with_extra_params() {
        assert_eq!(
            extract_youtube_video_id("https://www.youtube.com/watch?t=42&v=dQw4w9WgXcQ&ab=x"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn extracts_id_from_short_link() {
        assert_eq!(
            extract_youtube_video_id("https://youtu.be/dQw4w9WgXcQ?t=10"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn extracts_id_from_embed_link() {
        assert_eq!(
            extract_youtube_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn rejects_urls_without_a_video_id() {
        assert_eq!(extract_youtube_video_id(""), None);
        assert_eq!(
            extract_youtube_video_id("https://example.org/watch?v=short"),
            None
        );
        assert_eq!(extract_youtube_video_id("https://www.youtube.com/"), None);
        assert_eq!(extract_youtube_video_id("not a url"), None);
    }

    #[test]
    fn builds_site_deep_links() {
        assert_eq!(
            site_frontend_url(42, "https://app.example.org/"),
            "https://app.example.org/sites/42"
        );
        assert_eq!(
            site_frontend_url(7, "https://app.example.org"),
            "https://app.example.org/sites/7"
        );
    }
}
