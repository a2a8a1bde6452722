use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a listing is for sale or for lease. Stored as TEXT but treated as
/// a closed enum everywhere in Rust; unknown stored text degrades to the
/// default on read rather than failing the whole row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Buy,
    Rent,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Buy => "Buy",
            Category::Rent => "Rent",
        }
    }

    pub const ALL: [Category; 2] = [Category::Buy, Category::Rent];
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Buy" => Ok(Category::Buy),
            "Rent" => Ok(Category::Rent),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing availability. Transitions are admin-driven and unconstrained:
/// any status may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Available,
    Sold,
    Rented,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Available => "Available",
            Status::Sold => "Sold",
            Status::Rented => "Rented",
        }
    }

    pub const ALL: [Status; 3] = [Status::Available, Status::Sold, Status::Rented];
}

impl FromStr for Status {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(Status::Available),
            "Sold" => Ok(Status::Sold),
            "Rented" => Ok(Status::Rented),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variant: {}", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// One advertised real-estate unit, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub location: String,
    /// Display string ("₹45 Lakh", "25,000/month"), deliberately not numeric.
    pub price: String,
    pub description: String,
    /// Bare URL/path (legacy rows) or JSON-encoded list of URLs.
    pub image: Option<String>,
    pub category: Category,
    pub status: Status,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the admin "add" action; `id`, `status` and
/// `created_at` are assigned by the storage layer.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub title: String,
    pub location: String,
    pub price: String,
    pub description: String,
    pub image: Option<String>,
    pub category: Category,
    pub video_url: Option<String>,
}

/// Full-field update applied by the admin "edit" action.
#[derive(Debug, Clone)]
pub struct PropertyUpdate {
    pub title: String,
    pub location: String,
    pub price: String,
    pub description: String,
    pub image: Option<String>,
    pub category: Category,
    pub status: Status,
    pub video_url: Option<String>,
}

/// Catalog filter. Both clauses optional; absent filters match everything.
///
/// Location containment is ASCII case-insensitive (SQLite `LIKE`), with
/// `%`/`_` in the needle escaped so they match literally.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub location: Option<String>,
}

impl CatalogFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.location.is_none()
    }
}
