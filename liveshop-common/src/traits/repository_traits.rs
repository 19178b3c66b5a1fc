// File: liveshop-common/src/traits/repository_traits.rs

use async_trait::async_trait;
use uuid::Uuid;
use crate::error::Error;
use crate::models::analytics::{AnalyticsEvent, EventFilter};
use crate::models::live_session::{LiveSession, SessionFilter};
use crate::models::product::Product;

/// Store contract for session rows. No delete: history is kept.
#[async_trait]
pub trait LiveSessionRepository: Send + Sync {
    async fn create_session(&self, session: &LiveSession) -> Result<(), Error>;

    async fn get_session(&self, session_id: Uuid) -> Result<Option<LiveSession>, Error>;

    /// Full-row write-back. Single read-modify-write per mutation; two
    /// concurrent writers race under last-write-wins (accepted, one seller
    /// drives one broadcast from one device).
    async fn update_session(&self, session: &LiveSession) -> Result<(), Error>;

    async fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<LiveSession>, Error>;

    /// Most recent live row for the seller, if any.
    async fn current_for_seller(&self, seller_id: Uuid) -> Result<Option<LiveSession>, Error>;
}

/// Append-only event log. Rows are never updated or deleted here.
#[async_trait]
pub trait AnalyticsRepo: Send + Sync {
    async fn insert_event(&self, event: &AnalyticsEvent) -> Result<(), Error>;

    /// Filtered read; no ordering guarantee beyond `created_at` being
    /// present on every row.
    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<AnalyticsEvent>, Error>;
}

/// Read side of the external storefront catalog.
#[async_trait]
pub trait ProductCatalogRepository: Send + Sync {
    async fn get_product(&self, product_id: Uuid) -> Result<Option<Product>, Error>;

    async fn list_for_seller(&self, seller_id: Uuid) -> Result<Vec<Product>, Error>;
}
