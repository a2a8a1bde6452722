use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use time::Duration;

/// Name of the encrypted admin session cookie. The value is only readable
/// through the private jar, so a forged cookie never authenticates.
pub const ADMIN_COOKIE: &str = "admin_session";
const ADMIN_COOKIE_VALUE: &str = "logged_in";
const SESSION_HOURS: i64 = 12;

pub fn is_admin(jar: &PrivateCookieJar) -> bool {
    jar.get(ADMIN_COOKIE)
        .map(|c| c.value() == ADMIN_COOKIE_VALUE)
        .unwrap_or(false)
}

pub fn session_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(ADMIN_COOKIE.to_string(), ADMIN_COOKIE_VALUE.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(SESSION_HOURS))
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(ADMIN_COOKIE.to_string(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Extractor guarding the catalog-mutation routes: requests without a valid
/// admin session are redirected to the login page.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = match PrivateCookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        if is_admin(&jar) {
            Ok(Self)
        } else {
            Err(Redirect::to("/admin").into_response())
        }
    }
}
