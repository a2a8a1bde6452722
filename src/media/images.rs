//! Image-field normalization and display-URL optimization.
//!
//! The `image` column holds either a bare URL/path (legacy rows) or a
//! JSON-encoded ordered list of URLs. Everything downstream works with the
//! normalized list; the first element is the cover image.

/// Shown whenever a listing has no usable image data.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.jpg";

const CLOUDINARY_HOST: &str = "res.cloudinary.com";
const UPLOAD_MARKER: &str = "/upload/";

/// Resolve a stored `image` field to a non-empty ordered list of URLs.
///
/// Valid JSON array of strings -> that list, order preserved. Anything that
/// fails to parse is treated as one literal URL. Empty/absent input (and an
/// empty JSON array) degrade to the placeholder. Never fails.
pub fn image_urls(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return vec![PLACEHOLDER_IMAGE.to_string()];
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return vec![PLACEHOLDER_IMAGE.to_string()];
    }
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(urls) if !urls.is_empty() => urls,
        Ok(_) => vec![PLACEHOLDER_IMAGE.to_string()],
        Err(_) => vec![raw.to_string()],
    }
}

/// First (cover) image for a listing card.
pub fn cover_url(raw: Option<&str>) -> String {
    image_urls(raw).swap_remove(0)
}

/// Rewrite a Cloudinary delivery URL to request a resized, fill-cropped,
/// auto-quality/auto-format rendition at `width` pixels.
///
/// The transformation is inserted immediately after the single `/upload/`
/// path marker. URLs from other hosts, or with zero or multiple markers,
/// come back unchanged.
pub fn optimized_url(url: &str, width: u32) -> String {
    if !url.contains(CLOUDINARY_HOST) {
        return url.to_string();
    }
    if url.matches(UPLOAD_MARKER).count() != 1 {
        return url.to_string();
    }
    url.replacen(
        UPLOAD_MARKER,
        &format!("{UPLOAD_MARKER}w_{width},c_fill,q_auto,f_auto/"),
        1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_list_is_returned_in_order() {
        let raw = r#"["https://a.example/1.jpg", "https://a.example/2.jpg"]"#;
        assert_eq!(
            image_urls(Some(raw)),
            vec!["https://a.example/1.jpg", "https://a.example/2.jpg"]
        );
    }

    #[test]
    fn absent_and_empty_inputs_yield_the_placeholder() {
        assert_eq!(image_urls(None), vec![PLACEHOLDER_IMAGE]);
        assert_eq!(image_urls(Some("")), vec![PLACEHOLDER_IMAGE]);
        assert_eq!(image_urls(Some("   ")), vec![PLACEHOLDER_IMAGE]);
        assert_eq!(image_urls(Some("[]")), vec![PLACEHOLDER_IMAGE]);
    }

    #[test]
    fn bare_url_becomes_a_single_element_list() {
        assert_eq!(
            image_urls(Some("/static/images/x.jpg")),
            vec!["/static/images/x.jpg"]
        );
    }

    #[test]
    fn malformed_json_degrades_to_the_literal_string() {
        assert_eq!(image_urls(Some("[not json")), vec!["[not json"]);
        // JSON, but not an array of strings.
        assert_eq!(image_urls(Some(r#"{"url": "x"}"#)), vec![r#"{"url": "x"}"#]);
    }

    #[test]
    fn cover_is_the_first_element() {
        let raw = r#"["first.jpg", "second.jpg"]"#;
        assert_eq!(cover_url(Some(raw)), "first.jpg");
        assert_eq!(cover_url(None), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn cloudinary_url_gets_the_transformation_after_the_marker() {
        let url = "https://res.cloudinary.com/demo/image/upload/v123/villa.jpg";
        assert_eq!(
            optimized_url(url, 600),
            "https://res.cloudinary.com/demo/image/upload/w_600,c_fill,q_auto,f_auto/v123/villa.jpg"
        );
    }

    #[test]
    fn foreign_hosts_are_left_alone() {
        let url = "https://images.example.com/upload/villa.jpg";
        assert_eq!(optimized_url(url, 600), url);
    }

    #[test]
    fn ambiguous_or_missing_markers_are_left_alone() {
        let twice = "https://res.cloudinary.com/demo/upload/x/upload/y.jpg";
        assert_eq!(optimized_url(twice, 300), twice);
        let none = "https://res.cloudinary.com/demo/image/fetch/villa.jpg";
        assert_eq!(optimized_url(none, 300), none);
    }
}
