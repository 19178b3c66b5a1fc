// File: liveshop-core/src/repositories/postgres/products.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;
use liveshop_common::error::Error;
use liveshop_common::models::product::Product;
use liveshop_common::traits::repository_traits::ProductCatalogRepository;

/// Postgres projection of the storefront catalog. Read-only here.
pub struct PostgresProductCatalogRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresProductCatalogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCatalogRepository for PostgresProductCatalogRepository {
    async fn get_product(&self, product_id: Uuid) -> Result<Option<Product>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT
                product_id,
                seller_id,
                name,
                price,
                is_published,
                created_at
            FROM products
            WHERE product_id = $1
            "#,
        )
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(r) = row_opt {
            Ok(Some(Product {
                product_id: r.try_get("product_id")?,
                seller_id: r.try_get("seller_id")?,
                name: r.try_get("name")?,
                price: r.try_get("price")?,
                is_published: r.try_get("is_published")?,
                created_at: r.try_get("created_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn list_for_seller(&self, seller_id: Uuid) -> Result<Vec<Product>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT
                product_id,
                seller_id,
                name,
                price,
                is_published,
                created_at
            FROM products
            WHERE seller_id = $1
            ORDER BY created_at DESC
            "#,
        )
            .bind(seller_id)
            .fetch_all(&self.pool)
            .await?;

        let mut products = Vec::with_capacity(rows.len());
        for r in rows {
            products.push(Product {
                product_id: r.try_get("product_id")?,
                seller_id: r.try_get("seller_id")?,
                name: r.try_get("name")?,
                price: r.try_get("price")?,
                is_published: r.try_get("is_published")?,
                created_at: r.try_get("created_at")?,
            });
        }
        Ok(products)
    }
}
