use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, FromRef};
use axum::routing::{get, post};
use axum_extra::extract::cookie::Key;

use crate::db::CatalogStorage;
use crate::handlers::{admin, assets, pages};
use crate::media::ImageUploader;

/// Limit covers the multipart add-property form (a handful of photos).
const BODY_LIMIT_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct SiteState {
    pub storage: CatalogStorage,
    pub uploader: Arc<ImageUploader>,
    cookie_key: Key,
}

impl SiteState {
    pub fn new(storage: CatalogStorage, uploader: Arc<ImageUploader>, cookie_key: Key) -> Self {
        Self {
            storage,
            uploader,
            cookie_key,
        }
    }
}

// Lets the private cookie jar extract its key from the router state.
impl FromRef<SiteState> for Key {
    fn from_ref(state: &SiteState) -> Key {
        state.cookie_key.clone()
    }
}

pub fn site_router(state: SiteState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/property/{id}", get(pages::property_detail))
        .route("/admin", get(admin::login_form))
        .route("/login", post(admin::login))
        .route("/logout", get(admin::logout))
        .route(
            "/add-property",
            get(admin::add_property_form).post(admin::add_property),
        )
        .route(
            "/edit-property/{id}",
            get(admin::edit_property_form).post(admin::update_property),
        )
        .route("/delete-property/{id}", get(admin::delete_property))
        .route("/static/{*path}", get(assets::serve_static))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
