use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use crate::db::models::{CatalogFilter, Category, NewProperty, Property, PropertyUpdate, Status};
use crate::db::schema::SQLITE_INIT;
use crate::error::SiteError;

pub type SqlitePool = Pool<Sqlite>;

const PROPERTY_COLUMNS: &str =
    "id, title, location, price, description, image, category, status, video_url, created_at";

/// Open a pool on the configured database, creating the file if needed.
pub async fn connect(database_url: &str) -> Result<SqlitePool, SiteError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct CatalogStorage {
    pool: SqlitePool,
}

impl CatalogStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), SiteError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a new listing and return its assigned id.
    /// Status starts as `Available`; `created_at` is stamped here.
    pub async fn insert(&self, new: NewProperty) -> Result<i64, SiteError> {
        let created_at = Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"
            INSERT INTO properties (
                title, location, price, description, image,
                category, status, video_url, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.title)
        .bind(new.location)
        .bind(new.price)
        .bind(new.description)
        .bind(new.image)
        .bind(new.category.as_str())
        .bind(Status::Available.as_str())
        .bind(new.video_url)
        .bind(created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Property>, SiteError> {
        let row = sqlx::query(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_model).transpose()
    }

    /// List the catalog, ascending id (insertion order). Optional category
    /// equality and location substring containment; see [`CatalogFilter`]
    /// for the containment semantics.
    pub async fn list(&self, filter: &CatalogFilter) -> Result<Vec<Property>, SiteError> {
        let mut sql = format!("SELECT {PROPERTY_COLUMNS} FROM properties");
        let mut clauses: Vec<&str> = Vec::new();
        if filter.category.is_some() {
            clauses.push("category = ?");
        }
        if filter.location.is_some() {
            clauses.push(r"location LIKE ? ESCAPE '\'");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let mut query = sqlx::query(&sql);
        if let Some(category) = filter.category {
            query = query.bind(category.as_str());
        }
        if let Some(location) = &filter.location {
            query = query.bind(format!("%{}%", escape_like(location)));
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Full-field update. Returns false when the id does not exist.
    pub async fn update(&self, id: i64, update: PropertyUpdate) -> Result<bool, SiteError> {
        let result = sqlx::query(
            r#"UPDATE properties SET
                title = ?,
                location = ?,
                price = ?,
                description = ?,
                image = ?,
                category = ?,
                status = ?,
                video_url = ?
              WHERE id = ?"#,
        )
        .bind(update.title)
        .bind(update.location)
        .bind(update.price)
        .bind(update.description)
        .bind(update.image)
        .bind(update.category.as_str())
        .bind(update.status.as_str())
        .bind(update.video_url)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a listing. A missing id is a no-op, reported as false.
    pub async fn delete(&self, id: i64) -> Result<bool, SiteError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn row_to_model(row: SqliteRow) -> Result<Property, SiteError> {
        let id: i64 = row.try_get("id")?;
        let title: String = row.try_get("title")?;
        let location: String = row.try_get("location")?;
        let price: String = row.try_get("price")?;
        let description: String = row.try_get("description")?;
        let image: Option<String> = row.try_get("image")?;
        let category_str: String = row.try_get("category")?;
        let status_str: String = row.try_get("status")?;
        let video_url: Option<String> = row.try_get("video_url")?;
        let created_at_str: String = row.try_get("created_at")?;

        // Legacy rows may hold free-text category/status; degrade to defaults.
        let category = Category::from_str(&category_str).unwrap_or_default();
        let status = Status::from_str(&status_str).unwrap_or_default();
        let created_at: DateTime<Utc> = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);

        Ok(Property {
            id,
            title,
            location,
            price,
            description,
            image,
            category,
            status,
            video_url,
            created_at,
        })
    }
}

/// Escape `%`, `_` and the escape character itself so LIKE matches the
/// filter text literally.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_storage() -> CatalogStorage {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        let storage = CatalogStorage::new(pool);
        storage.init_schema().await.expect("schema init");
        storage
    }

    fn listing(title: &str, location: &str, category: Category) -> NewProperty {
        NewProperty {
            title: title.to_string(),
            location: location.to_string(),
            price: "45 Lakh".to_string(),
            description: "2BHK with balcony".to_string(),
            image: None,
            category,
            video_url: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids_and_list_preserves_order() {
        let storage = memory_storage().await;
        let first = storage.insert(listing("A", "Virar", Category::Buy)).await.unwrap();
        let second = storage.insert(listing("B", "Thane", Category::Rent)).await.unwrap();
        assert!(second > first);

        let all = storage.list(&CatalogFilter::default()).await.unwrap();
        assert_eq!(
            all.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        assert_eq!(all[0].status, Status::Available);
    }

    #[tokio::test]
    async fn filter_combines_category_and_location() {
        let storage = memory_storage().await;
        storage.insert(listing("Flat", "Virar West", Category::Rent)).await.unwrap();
        storage.insert(listing("Shop", "Virar East", Category::Buy)).await.unwrap();
        storage.insert(listing("Villa", "Thane", Category::Rent)).await.unwrap();

        let filter = CatalogFilter {
            category: Some(Category::Rent),
            location: Some("Virar".to_string()),
        };
        let hits = storage.list(&filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Flat");
    }

    #[tokio::test]
    async fn location_containment_is_case_insensitive() {
        let storage = memory_storage().await;
        storage.insert(listing("Flat", "Virar", Category::Buy)).await.unwrap();

        let filter = CatalogFilter {
            category: None,
            location: Some("virar".to_string()),
        };
        assert_eq!(storage.list(&filter).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn like_wildcards_in_the_filter_match_literally() {
        let storage = memory_storage().await;
        storage.insert(listing("Flat", "Virar", Category::Buy)).await.unwrap();
        storage.insert(listing("Odd", "100% Virar", Category::Buy)).await.unwrap();

        let filter = CatalogFilter {
            category: None,
            location: Some("%".to_string()),
        };
        let hits = storage.list(&filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].location, "100% Virar");
    }

    #[tokio::test]
    async fn get_returns_none_for_missing_id() {
        let storage = memory_storage().await;
        assert!(storage.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_is_full_field_and_status_is_unconstrained() {
        let storage = memory_storage().await;
        let id = storage.insert(listing("Flat", "Virar", Category::Buy)).await.unwrap();

        // Any status may follow any other.
        for status in [Status::Sold, Status::Rented, Status::Available, Status::Sold] {
            let update = PropertyUpdate {
                title: "Flat (renovated)".to_string(),
                location: "Virar West".to_string(),
                price: "50 Lakh".to_string(),
                description: "Now with modular kitchen".to_string(),
                image: Some(r#"["https://img.example/one.jpg"]"#.to_string()),
                category: Category::Rent,
                status,
                video_url: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
            };
            assert!(storage.update(id, update).await.unwrap());
            let stored = storage.get(id).await.unwrap().expect("listing exists");
            assert_eq!(stored.status, status);
            assert_eq!(stored.title, "Flat (renovated)");
            assert_eq!(stored.category, Category::Rent);
        }
    }

    #[tokio::test]
    async fn update_of_missing_id_reports_false() {
        let storage = memory_storage().await;
        let update = PropertyUpdate {
            title: String::new(),
            location: String::new(),
            price: String::new(),
            description: String::new(),
            image: None,
            category: Category::Buy,
            status: Status::Available,
            video_url: None,
        };
        assert!(!storage.update(7, update).await.unwrap());
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_a_noop() {
        let storage = memory_storage().await;
        let id = storage.insert(listing("Flat", "Virar", Category::Buy)).await.unwrap();

        assert!(!storage.delete(id + 100).await.unwrap());
        assert_eq!(storage.list(&CatalogFilter::default()).await.unwrap().len(), 1);

        assert!(storage.delete(id).await.unwrap());
        assert!(storage.list(&CatalogFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn legacy_free_text_category_degrades_to_default() {
        let storage = memory_storage().await;
        sqlx::query(
            "INSERT INTO properties (title, location, price, description, category, status, created_at)
             VALUES ('Old row', 'Virar', '1', 'legacy', 'buy/sell', 'pending', ?)",
        )
        .bind(Utc::now().to_rfc3339())
        .execute(storage.pool())
        .await
        .unwrap();

        let all = storage.list(&CatalogFilter::default()).await.unwrap();
        assert_eq!(all[0].category, Category::Buy);
        assert_eq!(all[0].status, Status::Available);
    }
}
