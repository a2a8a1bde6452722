//! Public catalog pages.

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;

use crate::db::models::{CatalogFilter, Category};
use crate::error::SiteError;
use crate::middleware::auth;
use crate::render;
use crate::router::SiteState;

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub location: Option<String>,
}

impl CatalogQuery {
    /// `All`, empty or unknown category text means "no category clause";
    /// blank location means no containment clause.
    pub fn into_filter(self) -> CatalogFilter {
        let category = self
            .category
            .as_deref()
            .and_then(|c| c.parse::<Category>().ok());
        let location = self
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        CatalogFilter { category, location }
    }
}

pub async fn home(
    State(state): State<SiteState>,
    Query(query): Query<CatalogQuery>,
    jar: PrivateCookieJar,
) -> Result<Html<String>, SiteError> {
    let filter = query.into_filter();
    let properties = state.storage.list(&filter).await?;
    Ok(Html(render::home_page(
        &properties,
        filter.category,
        filter.location.as_deref(),
        auth::is_admin(&jar),
    )))
}

pub async fn property_detail(
    State(state): State<SiteState>,
    Path(id): Path<i64>,
    jar: PrivateCookieJar,
) -> Result<Html<String>, SiteError> {
    let property = state
        .storage
        .get(id)
        .await?
        .ok_or(SiteError::ListingNotFound(id))?;
    Ok(Html(render::detail_page(&property, auth::is_admin(&jar))))
}
