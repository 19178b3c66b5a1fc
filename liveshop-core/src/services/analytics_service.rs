// File: liveshop-core/src/services/analytics_service.rs

use std::sync::Arc;
use chrono::Utc;
use tracing::error;
use uuid::Uuid;
use liveshop_common::error::Error;
use liveshop_common::models::analytics::{AnalyticsEvent, EventFilter, EventType};
use liveshop_common::traits::repository_traits::AnalyticsRepo;

/// Records engagement events and reads them back for aggregation.
pub struct AnalyticsService {
    analytics_repo: Arc<dyn AnalyticsRepo + Send + Sync>,
}

impl AnalyticsService {
    pub fn new(analytics_repo: Arc<dyn AnalyticsRepo + Send + Sync>) -> Self {
        Self { analytics_repo }
    }

    /// Appends one event, best-effort. A failed write is logged and
    /// swallowed: the user action this accompanies (a redirect, a page
    /// render) must proceed regardless, so this never returns an error and
    /// never retries.
    pub async fn record_event(
        &self,
        seller_id: Uuid,
        product_id: Option<Uuid>,
        event_type: EventType,
        user_agent: Option<String>,
    ) {
        let event = AnalyticsEvent {
            event_id: Uuid::new_v4(),
            seller_id,
            product_id,
            event_type,
            user_agent,
            created_at: Utc::now(),
        };
        if let Err(e) = self.analytics_repo.insert_event(&event).await {
            error!(
                "Error recording {} event for seller {}: {:?}",
                event_type, seller_id, e
            );
        }
    }

    pub async fn events(&self, filter: &EventFilter) -> Result<Vec<AnalyticsEvent>, Error> {
        self.analytics_repo.list_events(filter).await
    }
}
