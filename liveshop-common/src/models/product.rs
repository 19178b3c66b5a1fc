// File: liveshop-common/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only projection of the storefront catalog; the catalog itself is
/// owned elsewhere. `price` is in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub product_id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub price: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}
