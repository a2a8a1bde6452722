pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod media;
pub mod middleware;
pub mod render;
pub mod router;

pub use error::SiteError;
