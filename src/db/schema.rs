//! SQL DDL for initializing the property catalog.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT (ids are never reused)
/// - `price` stored as display text, not numeric
/// - `image` either a bare URL or a JSON-encoded array of URLs
/// - `category` / `status` stored as TEXT, closed enums at the Rust boundary
/// - `created_at` RFC3339
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS properties (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    location TEXT NOT NULL,
    price TEXT NOT NULL,
    description TEXT NOT NULL,
    image TEXT NULL, -- bare URL or JSON array, serialized as text
    category TEXT NOT NULL DEFAULT 'Buy',
    status TEXT NOT NULL DEFAULT 'Available',
    video_url TEXT NULL,
    created_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_properties_category ON properties(category);
"#;
