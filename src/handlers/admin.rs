//! Admin login/logout and the catalog mutation handlers.

use axum::Form;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::body::Bytes;
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::config::CONFIG;
use crate::db::models::{Category, NewProperty, PropertyUpdate, Status};
use crate::error::SiteError;
use crate::middleware::auth::{RequireAdmin, clear_session_cookie, session_cookie};
use crate::render;
use crate::router::SiteState;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    let message = query
        .error
        .as_deref()
        .map(|_| "Invalid username or password.");
    Html(render::login_page(message))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn login(jar: PrivateCookieJar, Form(form): Form<LoginForm>) -> Response {
    if credentials_match(&form) {
        info!(username = %form.username, "admin login");
        (jar.add(session_cookie()), Redirect::to("/")).into_response()
    } else {
        warn!(username = %form.username, "rejected admin login");
        Redirect::to("/admin?error=invalid").into_response()
    }
}

fn credentials_match(form: &LoginForm) -> bool {
    // An unset password keeps the admin surface closed entirely.
    if CONFIG.admin_password.is_empty() {
        return false;
    }
    let user_ok = form
        .username
        .as_bytes()
        .ct_eq(CONFIG.admin_username.as_bytes());
    let pass_ok = form
        .password
        .as_bytes()
        .ct_eq(CONFIG.admin_password.as_bytes());
    bool::from(user_ok & pass_ok)
}

pub async fn logout(jar: PrivateCookieJar) -> impl IntoResponse {
    (jar.remove(clear_session_cookie()), Redirect::to("/"))
}

pub async fn add_property_form(_admin: RequireAdmin) -> Html<String> {
    Html(render::add_property_page())
}

/// Multipart add: text fields plus any number of image files. Images are
/// uploaded inline; failed uploads are skipped (logged by the uploader), so
/// the listing may carry fewer images than were submitted.
pub async fn add_property(
    State(state): State<SiteState>,
    _admin: RequireAdmin,
    mut multipart: Multipart,
) -> Result<Redirect, SiteError> {
    let mut title = String::new();
    let mut location = String::new();
    let mut price = String::new();
    let mut description = String::new();
    let mut category = Category::default();
    let mut video_url: Option<String> = None;
    let mut files: Vec<(String, Bytes)> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "title" => title = field.text().await?,
            "location" => location = field.text().await?,
            "price" => price = field.text().await?,
            "description" => description = field.text().await?,
            "category" => {
                let raw = field.text().await?;
                category = raw.parse().map_err(|_| {
                    SiteError::InvalidForm(format!("category must be Buy or Rent, got {raw:?}"))
                })?;
            }
            "video_url" => {
                let raw = field.text().await?;
                video_url = non_blank(raw);
            }
            "images" => {
                let filename = field.file_name().unwrap_or("image").to_string();
                let data = field.bytes().await?;
                if !data.is_empty() {
                    files.push((filename, data));
                }
            }
            _ => {}
        }
    }

    if title.trim().is_empty() {
        return Err(SiteError::InvalidForm("title is required".to_string()));
    }

    let uploaded = state.uploader.upload_all(files).await;
    let image = if uploaded.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&uploaded)?)
    };

    let id = state
        .storage
        .insert(NewProperty {
            title,
            location,
            price,
            description,
            image,
            category,
            video_url,
        })
        .await?;
    info!(id, "listing created");
    Ok(Redirect::to(&format!("/property/{id}")))
}

pub async fn edit_property_form(
    State(state): State<SiteState>,
    _admin: RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Html<String>, SiteError> {
    let property = state
        .storage
        .get(id)
        .await?
        .ok_or(SiteError::ListingNotFound(id))?;
    Ok(Html(render::edit_property_page(&property)))
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    pub title: String,
    pub location: String,
    pub price: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub video_url: Option<String>,
    /// Raw image field: bare URL or JSON list, exactly as stored.
    pub image: Option<String>,
}

pub async fn update_property(
    State(state): State<SiteState>,
    _admin: RequireAdmin,
    Path(id): Path<i64>,
    Form(form): Form<EditForm>,
) -> Result<Redirect, SiteError> {
    let category: Category = form.category.parse().map_err(|_| {
        SiteError::InvalidForm(format!("category must be Buy or Rent, got {:?}", form.category))
    })?;
    let status: Status = form.status.parse().map_err(|_| {
        SiteError::InvalidForm(format!(
            "status must be Available, Sold or Rented, got {:?}",
            form.status
        ))
    })?;

    let update = PropertyUpdate {
        title: form.title,
        location: form.location,
        price: form.price,
        description: form.description,
        image: form.image.and_then(non_blank),
        category,
        status,
        video_url: form.video_url.and_then(non_blank),
    };
    if !state.storage.update(id, update).await? {
        return Err(SiteError::ListingNotFound(id));
    }
    info!(id, "listing updated");
    Ok(Redirect::to(&format!("/property/{id}")))
}

/// Irreversible delete. A missing id is a no-op, per the catalog contract.
pub async fn delete_property(
    State(state): State<SiteState>,
    _admin: RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Redirect, SiteError> {
    if state.storage.delete(id).await? {
        info!(id, "listing deleted");
    } else {
        info!(id, "delete of missing listing ignored");
    }
    Ok(Redirect::to("/"))
}

fn non_blank(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
