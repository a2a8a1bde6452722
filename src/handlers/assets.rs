//! Static asset serving for local and uploaded images.

use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};

use crate::config::CONFIG;
use crate::render;

pub async fn serve_static(Path(path): Path<String>) -> Response {
    // Only plain relative paths below the static root are served.
    if path.starts_with('/') || path.contains('\\') || path.split('/').any(|seg| seg == "..") {
        return not_found();
    }
    match tokio::fs::read(CONFIG.static_dir.join(&path)).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response(),
        Err(_) => not_found(),
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(render::error_page("Not Found", "No such file.")),
    )
        .into_response()
}

fn content_type(path: &str) -> &'static str {
    let extension = path.rsplit('.').next().unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "css" => "text/css",
        "js" => "text/javascript",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}
