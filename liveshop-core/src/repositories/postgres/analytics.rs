// File: liveshop-core/src/repositories/postgres/analytics.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use liveshop_common::error::Error;
use liveshop_common::models::analytics::{AnalyticsEvent, EventFilter};
use liveshop_common::traits::repository_traits::AnalyticsRepo;

/// Postgres-based event log. Insert-only; callers never update rows.
pub struct PostgresAnalyticsRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresAnalyticsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepo for PostgresAnalyticsRepository {
    async fn insert_event(&self, event: &AnalyticsEvent) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO analytics_events (
                event_id,
                seller_id,
                product_id,
                event_type,
                user_agent,
                created_at
            )
            VALUES ($1,$2,$3,$4,$5,$6)
            "#,
        )
            .bind(event.event_id)
            .bind(event.seller_id)
            .bind(event.product_id)
            .bind(event.event_type)
            .bind(&event.user_agent)
            .bind(event.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<AnalyticsEvent>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT
                event_id,
                seller_id,
                product_id,
                event_type,
                user_agent,
                created_at
            FROM analytics_events
            WHERE ($1::uuid IS NULL OR seller_id = $1)
              AND ($2::uuid IS NULL OR product_id = $2)
              AND ($3::text IS NULL OR event_type = $3)
              AND ($4::timestamptz IS NULL OR created_at >= $4)
              AND ($5::timestamptz IS NULL OR created_at <= $5)
            "#,
        )
            .bind(filter.seller_id)
            .bind(filter.product_id)
            .bind(filter.event_type)
            .bind(filter.since)
            .bind(filter.until)
            .fetch_all(&self.pool)
            .await?;

        let mut events = Vec::with_capacity(rows.len());
        for r in rows {
            events.push(AnalyticsEvent {
                event_id: r.try_get("event_id")?,
                seller_id: r.try_get("seller_id")?,
                product_id: r.try_get("product_id")?,
                event_type: r.try_get("event_type")?,
                user_agent: r.try_get("user_agent")?,
                created_at: r.try_get("created_at")?,
            });
        }
        Ok(events)
    }
}
