use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::render;

#[derive(Debug, ThisError)]
pub enum SiteError {
    #[error("database error: {0}")]
    Database(#[from] SqlxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload request error: {0}")]
    Upload(#[from] reqwest::Error),

    #[error("multipart form error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("listing {0} not found")]
    ListingNotFound(i64),

    #[error("admin session required")]
    AdminRequired,

    #[error("invalid form input: {0}")]
    InvalidForm(String),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> axum::response::Response {
        match self {
            SiteError::ListingNotFound(id) => {
                (StatusCode::NOT_FOUND, Html(render::not_found_page(id))).into_response()
            }
            // Admin-gated pages bounce to the login form rather than erroring.
            SiteError::AdminRequired => Redirect::to("/admin").into_response(),
            SiteError::InvalidForm(reason) => (
                StatusCode::BAD_REQUEST,
                Html(render::error_page("Invalid input", &reason)),
            )
                .into_response(),
            SiteError::Multipart(e) => {
                error!(error = %e, "malformed multipart form");
                (
                    StatusCode::BAD_REQUEST,
                    Html(render::error_page(
                        "Invalid upload",
                        "The submitted form could not be read.",
                    )),
                )
                    .into_response()
            }
            SiteError::Upload(e) => {
                error!(error = %e, "image host request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Html(render::error_page(
                        "Upload failed",
                        "The image host is unavailable. Try again later.",
                    )),
                )
                    .into_response()
            }
            other @ (SiteError::Database(_) | SiteError::Json(_) | SiteError::Io(_)) => {
                error!(error = %other, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(render::error_page(
                        "Something went wrong",
                        "An internal error occurred.",
                    )),
                )
                    .into_response()
            }
        }
    }
}
