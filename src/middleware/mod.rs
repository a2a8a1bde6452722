pub mod auth;

pub use auth::{ADMIN_COOKIE, RequireAdmin, clear_session_cookie, is_admin, session_cookie};
