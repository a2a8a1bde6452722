//! Database module: models and schema for the property catalog.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and the catalog filter
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool setup and the `CatalogStorage` query layer

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{CatalogFilter, Category, NewProperty, Property, PropertyUpdate, Status};
pub use schema::SQLITE_INIT;
pub use sqlite::{CatalogStorage, SqlitePool, connect};
