// File: liveshop-core/src/repositories/postgres/live_session.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use sqlx::postgres::PgRow;
use uuid::Uuid;
use liveshop_common::error::Error;
use liveshop_common::models::live_session::{LiveSession, SessionFilter};
use liveshop_common::traits::repository_traits::LiveSessionRepository;

/// Postgres-based session repository.
pub struct PostgresLiveSessionRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresLiveSessionRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn row_to_session(r: &PgRow) -> Result<LiveSession, Error> {
        Ok(LiveSession {
            session_id: r.try_get("session_id")?,
            seller_id: r.try_get("seller_id")?,
            shop_slug: r.try_get("shop_slug")?,
            active_product_id: r.try_get("active_product_id")?,
            preloaded_products: r.try_get("preloaded_products")?,
            is_live: r.try_get("is_live")?,
            live_started_at: r.try_get("live_started_at")?,
            live_ended_at: r.try_get("live_ended_at")?,
            flash_offer_active: r.try_get("flash_offer_active")?,
            flash_offer_type: r.try_get("flash_offer_type")?,
            flash_offer_value: r.try_get("flash_offer_value")?,
            flash_offer_ends_at: r.try_get("flash_offer_ends_at")?,
            show_public_counter: r.try_get("show_public_counter")?,
            created_at: r.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl LiveSessionRepository for PostgresLiveSessionRepository {
    async fn create_session(&self, session: &LiveSession) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO live_sessions (
                session_id,
                seller_id,
                shop_slug,
                active_product_id,
                preloaded_products,
                is_live,
                live_started_at,
                live_ended_at,
                flash_offer_active,
                flash_offer_type,
                flash_offer_value,
                flash_offer_ends_at,
                show_public_counter,
                created_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14)
            "#,
        )
            .bind(session.session_id)
            .bind(session.seller_id)
            .bind(&session.shop_slug)
            .bind(session.active_product_id)
            .bind(&session.preloaded_products)
            .bind(session.is_live)
            .bind(session.live_started_at)
            .bind(session.live_ended_at)
            .bind(session.flash_offer_active)
            .bind(session.flash_offer_type)
            .bind(session.flash_offer_value)
            .bind(session.flash_offer_ends_at)
            .bind(session.show_public_counter)
            .bind(session.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_session(&self, session_id: Uuid) -> Result<Option<LiveSession>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT
                session_id,
                seller_id,
                shop_slug,
                active_product_id,
                preloaded_products,
                is_live,
                live_started_at,
                live_ended_at,
                flash_offer_active,
                flash_offer_type,
                flash_offer_value,
                flash_offer_ends_at,
                show_public_counter,
                created_at
            FROM live_sessions
            WHERE session_id = $1
            "#,
        )
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(r) = row_opt {
            Ok(Some(Self::row_to_session(&r)?))
        } else {
            Ok(None)
        }
    }

    async fn update_session(&self, session: &LiveSession) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE live_sessions
            SET active_product_id = $1,
                preloaded_products = $2,
                is_live = $3,
                live_started_at = $4,
                live_ended_at = $5,
                flash_offer_active = $6,
                flash_offer_type = $7,
                flash_offer_value = $8,
                flash_offer_ends_at = $9,
                show_public_counter = $10
            WHERE session_id = $11
            "#,
        )
            .bind(session.active_product_id)
            .bind(&session.preloaded_products)
            .bind(session.is_live)
            .bind(session.live_started_at)
            .bind(session.live_ended_at)
            .bind(session.flash_offer_active)
            .bind(session.flash_offer_type)
            .bind(session.flash_offer_value)
            .bind(session.flash_offer_ends_at)
            .bind(session.show_public_counter)
            .bind(session.session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<LiveSession>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT
                session_id,
                seller_id,
                shop_slug,
                active_product_id,
                preloaded_products,
                is_live,
                live_started_at,
                live_ended_at,
                flash_offer_active,
                flash_offer_type,
                flash_offer_value,
                flash_offer_ends_at,
                show_public_counter,
                created_at
            FROM live_sessions
            WHERE ($1::uuid IS NULL OR seller_id = $1)
              AND ($2::bool IS NULL OR is_live = $2)
              AND ($3::date IS NULL OR (live_started_at AT TIME ZONE 'UTC')::date = $3)
            ORDER BY created_at DESC
            "#,
        )
            .bind(filter.seller_id)
            .bind(filter.is_live)
            .bind(filter.started_on)
            .fetch_all(&self.pool)
            .await?;

        let mut sessions = Vec::with_capacity(rows.len());
        for r in rows {
            sessions.push(Self::row_to_session(&r)?);
        }
        Ok(sessions)
    }

    async fn current_for_seller(&self, seller_id: Uuid) -> Result<Option<LiveSession>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT
                session_id,
                seller_id,
                shop_slug,
                active_product_id,
                preloaded_products,
                is_live,
                live_started_at,
                live_ended_at,
                flash_offer_active,
                flash_offer_type,
                flash_offer_value,
                flash_offer_ends_at,
                show_public_counter,
                created_at
            FROM live_sessions
            WHERE seller_id = $1 AND is_live = TRUE
            ORDER BY live_started_at DESC
            LIMIT 1
            "#,
        )
            .bind(seller_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(r) = row_opt {
            Ok(Some(Self::row_to_session(&r)?))
        } else {
            Ok(None)
        }
    }
}
