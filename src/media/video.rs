//! Embeddable-video detection for listing pages.

use url::Url;

/// YouTube video ids are exactly 11 characters of `[A-Za-z0-9_-]`.
const VIDEO_ID_LEN: usize = 11;

/// Recognize a known video URL shape and build an embeddable player URL.
///
/// Handled shapes: `youtube.com/watch?v=ID`, `youtu.be/ID`,
/// `youtube.com/embed/ID` and `youtube.com/shorts/ID`, with or without a
/// `www.`/`m.` prefix. Anything else, including empty/absent input, is
/// "no embeddable link" rather than an error.
pub fn embed_url(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = Url::parse(raw).ok()?;
    let host = parsed.host_str()?;
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(host);

    let id = match host {
        "youtu.be" => parsed.path_segments()?.next().map(str::to_string),
        "youtube.com" => {
            let mut segments = parsed.path_segments()?;
            match segments.next() {
                Some("watch") => parsed
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned()),
                Some("embed") | Some("shorts") => segments.next().map(str::to_string),
                _ => None,
            }
        }
        _ => None,
    }?;

    // Anchor on the exact id shape to avoid over-matching playlist or
    // channel paths.
    is_video_id(&id).then(|| format!("https://www.youtube.com/embed/{id}"))
}

fn is_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
