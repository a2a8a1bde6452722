//! Inline image uploads for the add-property form.
//!
//! Uploads run one file at a time within the request. A failed upload is
//! skipped, not fatal, so a listing can end up with fewer images than
//! submitted; each skip is logged at WARN with the filename.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::SiteError;

pub struct ImageUploader {
    client: reqwest::Client,
    backend: Backend,
}

enum Backend {
    /// Cloudinary unsigned upload; stores the returned `secure_url`.
    Cloudinary { cloud_name: String, preset: String },
    /// Fallback when Cloudinary is not configured: write under the static
    /// directory and serve from `/static/uploads/...`.
    LocalDir { dir: PathBuf },
}

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    secure_url: String,
}

impl ImageUploader {
    pub fn from_config(cfg: &Config) -> Self {
        let backend = match (&cfg.cloudinary_cloud, &cfg.cloudinary_preset) {
            (Some(cloud_name), Some(preset)) => Backend::Cloudinary {
                cloud_name: cloud_name.clone(),
                preset: preset.clone(),
            },
            _ => Backend::LocalDir {
                dir: cfg.static_dir.join("uploads"),
            },
        };
        Self {
            client: reqwest::Client::new(),
            backend,
        }
    }

    /// Upload every submitted file, returning the display URLs of the ones
    /// that succeeded, in submission order. No retries.
    pub async fn upload_all(&self, files: Vec<(String, Bytes)>) -> Vec<String> {
        let mut urls = Vec::with_capacity(files.len());
        for (filename, data) in files {
            match self.upload(&filename, data).await {
                Ok(url) => urls.push(url),
                Err(e) => {
                    warn!(file = %filename, error = %e, "image upload failed; skipping");
                }
            }
        }
        urls
    }

    pub async fn upload(&self, filename: &str, data: Bytes) -> Result<String, SiteError> {
        match &self.backend {
            Backend::Cloudinary { cloud_name, preset } => {
                self.upload_to_cloudinary(cloud_name, preset, filename, data)
                    .await
            }
            Backend::LocalDir { dir } => store_locally(dir, filename, data).await,
        }
    }

    async fn upload_to_cloudinary(
        &self,
        cloud_name: &str,
        preset: &str,
        filename: &str,
        data: Bytes,
    ) -> Result<String, SiteError> {
        let endpoint = format!("https://api.cloudinary.com/v1_1/{cloud_name}/image/upload");
        let form = Form::new()
            .text("upload_preset", preset.to_string())
            .part("file", Part::bytes(data.to_vec()).file_name(filename.to_string()));
        let response: CloudinaryUploadResponse = self
            .client
            .post(endpoint)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!(file = %filename, url = %response.secure_url, "image uploaded");
        Ok(response.secure_url)
    }
}

async fn store_locally(dir: &Path, filename: &str, data: Bytes) -> Result<String, SiteError> {
    tokio::fs::create_dir_all(dir).await?;
    // Millisecond prefix keeps names unique; the original name is kept for
    // recognizability but stripped of anything path-like.
    let name = format!("{}-{}", Utc::now().timestamp_millis(), sanitize(filename));
    tokio::fs::write(dir.join(&name), &data).await?;
    Ok(format!("/static/uploads/{name}"))
}

fn sanitize(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches(['.', '_']).is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_path_separators() {
        assert_eq!(sanitize("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize("villa front.jpg"), "villa_front.jpg");
    }

    #[test]
    fn sanitize_never_yields_an_empty_name() {
        assert_eq!(sanitize(""), "image");
        assert_eq!(sanitize("///"), "image");
    }

    #[tokio::test]
    async fn failed_uploads_are_skipped_without_aborting() {
        let root = std::env::temp_dir().join(format!(
            "dream-properties-upload-skip-test-{}",
            std::process::id()
        ));
        tokio::fs::create_dir_all(&root).await.expect("temp root");
        // A regular file where the upload directory should be makes every
        // write fail.
        tokio::fs::write(root.join("uploads"), b"not a directory")
            .await
            .expect("blocking file");

        let cfg = Config {
            static_dir: root.clone(),
            ..Config::default()
        };
        let uploader = ImageUploader::from_config(&cfg);
        let urls = uploader
            .upload_all(vec![
                ("front.jpg".to_string(), Bytes::from_static(b"a")),
                ("back.jpg".to_string(), Bytes::from_static(b"b")),
            ])
            .await;

        // Every upload failed, none aborted the batch.
        assert!(urls.is_empty());
        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn local_backend_writes_the_file_and_returns_a_static_url() {
        let dir = std::env::temp_dir().join(format!(
            "dream-properties-upload-test-{}",
            std::process::id()
        ));
        let url = store_locally(&dir, "villa.jpg", Bytes::from_static(b"jpegdata"))
            .await
            .expect("local store");
        assert!(url.starts_with("/static/uploads/"));
        assert!(url.ends_with("-villa.jpg"));

        let name = url.rsplit('/').next().expect("file name");
        let stored = tokio::fs::read(dir.join(name)).await.expect("written file");
        assert_eq!(stored, b"jpegdata");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
