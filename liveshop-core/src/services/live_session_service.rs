// File: liveshop-core/src/services/live_session_service.rs

use std::collections::HashSet;
use std::sync::Arc;
use chrono::{Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;
use liveshop_common::error::Error;
use liveshop_common::models::live_session::{FlashOfferType, LiveSession, SessionFilter};
use liveshop_common::traits::repository_traits::{LiveSessionRepository, ProductCatalogRepository};
use crate::pricing::flash_offer_currently_active;

/// Products a seller may stage before going live.
pub const MAX_PRELOADED_PRODUCTS: usize = 5;

/// Drives the seller's broadcast lifecycle: start, switch the showcased
/// product, run a flash offer, stop. Every mutation is a single
/// read-modify-write against one row; concurrent writers race under
/// last-write-wins, which is accepted for a single-device seller flow.
pub struct LiveSessionService {
    session_repo: Arc<dyn LiveSessionRepository + Send + Sync>,
    catalog_repo: Arc<dyn ProductCatalogRepository + Send + Sync>,
}

impl LiveSessionService {
    pub fn new(
        session_repo: Arc<dyn LiveSessionRepository + Send + Sync>,
        catalog_repo: Arc<dyn ProductCatalogRepository + Send + Sync>,
    ) -> Self {
        debug!("Initializing LiveSessionService");
        Self {
            session_repo,
            catalog_repo,
        }
    }

    /// Starts a broadcast with 1..=5 distinct, known products staged.
    /// Always creates a new row; a previous still-live session of the same
    /// seller is stopped first so at most one is live. The first staged
    /// product becomes the showcased one.
    pub async fn start_session(
        &self,
        seller_id: Uuid,
        shop_slug: &str,
        product_ids: &[Uuid],
    ) -> Result<LiveSession, Error> {
        if product_ids.is_empty() || product_ids.len() > MAX_PRELOADED_PRODUCTS {
            return Err(Error::InvalidArgument(format!(
                "Expected between 1 and {} preloaded products, got {}",
                MAX_PRELOADED_PRODUCTS,
                product_ids.len()
            )));
        }

        let mut seen = HashSet::new();
        for product_id in product_ids {
            if !seen.insert(product_id) {
                return Err(Error::InvalidArgument(format!(
                    "Duplicate preloaded product: {}",
                    product_id
                )));
            }
            if self.catalog_repo.get_product(*product_id).await?.is_none() {
                return Err(Error::NotFound(format!(
                    "Product {} does not exist in the catalog",
                    product_id
                )));
            }
        }

        let now = Utc::now();

        // One live broadcast per seller: end the previous one if still open.
        if let Some(mut previous) = self.session_repo.current_for_seller(seller_id).await? {
            if previous.is_live {
                info!(
                    "Seller {} started a new session while {} was live; stopping it",
                    seller_id, previous.session_id
                );
                previous.is_live = false;
                previous.live_ended_at = Some(now);
                previous.flash_offer_active = false;
                self.session_repo.update_session(&previous).await?;
            }
        }

        let session = LiveSession {
            session_id: Uuid::new_v4(),
            seller_id,
            shop_slug: shop_slug.to_string(),
            active_product_id: Some(product_ids[0]),
            preloaded_products: product_ids.to_vec(),
            is_live: true,
            live_started_at: Some(now),
            live_ended_at: None,
            flash_offer_active: false,
            flash_offer_type: FlashOfferType::Percentage,
            flash_offer_value: 0,
            flash_offer_ends_at: None,
            show_public_counter: true,
            created_at: now,
        };
        self.session_repo.create_session(&session).await?;

        info!(
            "Seller {} went live with {} preloaded products (session {})",
            seller_id,
            product_ids.len(),
            session.session_id
        );
        Ok(session)
    }

    /// Swaps the showcased product to another preloaded one.
    pub async fn switch_product(
        &self,
        session_id: Uuid,
        product_id: Uuid,
    ) -> Result<LiveSession, Error> {
        let mut session = self.get_existing(session_id).await?;

        if !session.is_live {
            return Err(Error::Conflict(format!(
                "Session {} is not live",
                session_id
            )));
        }
        if !session.preloaded_products.contains(&product_id) {
            return Err(Error::NotFound(format!(
                "Product {} is not preloaded in session {}",
                product_id, session_id
            )));
        }

        session.active_product_id = Some(product_id);
        self.session_repo.update_session(&session).await?;

        debug!("Session {} now showcases product {}", session_id, product_id);
        Ok(session)
    }

    /// Arms a time-boxed discount on a live session. Rejected while another
    /// offer is still running; an expired one may be replaced directly, no
    /// stop needed in between.
    pub async fn activate_flash_offer(
        &self,
        session_id: Uuid,
        offer_type: FlashOfferType,
        value: i64,
        duration_minutes: i64,
    ) -> Result<LiveSession, Error> {
        if value <= 0 {
            return Err(Error::InvalidArgument(format!(
                "Flash offer value must be positive, got {}",
                value
            )));
        }
        if offer_type == FlashOfferType::Percentage && value > 100 {
            return Err(Error::InvalidArgument(format!(
                "Percentage offer cannot exceed 100, got {}",
                value
            )));
        }
        if duration_minutes <= 0 {
            return Err(Error::InvalidArgument(format!(
                "Flash offer duration must be positive, got {} minutes",
                duration_minutes
            )));
        }

        let mut session = self.get_existing(session_id).await?;

        if !session.is_live {
            return Err(Error::Conflict(format!(
                "Session {} is not live",
                session_id
            )));
        }

        let now = Utc::now();
        if flash_offer_currently_active(&session, now) {
            return Err(Error::Conflict(format!(
                "Session {} already has an active flash offer",
                session_id
            )));
        }

        session.flash_offer_active = true;
        session.flash_offer_type = offer_type;
        session.flash_offer_value = value;
        session.flash_offer_ends_at = Some(now + Duration::minutes(duration_minutes));
        self.session_repo.update_session(&session).await?;

        info!(
            "Session {} armed a {} flash offer of {} for {} minutes",
            session_id, offer_type, value, duration_minutes
        );
        Ok(session)
    }

    /// Ends the broadcast and clears the offer flag.
    pub async fn stop_session(&self, session_id: Uuid) -> Result<LiveSession, Error> {
        let mut session = self.get_existing(session_id).await?;

        if !session.is_live {
            return Err(Error::Conflict(format!(
                "Session {} is not live",
                session_id
            )));
        }

        session.is_live = false;
        session.live_ended_at = Some(Utc::now());
        session.flash_offer_active = false;
        self.session_repo.update_session(&session).await?;

        info!("Session {} stopped", session_id);
        Ok(session)
    }

    /// Shows or hides the public scan counter on the viewer page.
    pub async fn set_public_counter(
        &self,
        session_id: Uuid,
        visible: bool,
    ) -> Result<LiveSession, Error> {
        let mut session = self.get_existing(session_id).await?;
        session.show_public_counter = visible;
        self.session_repo.update_session(&session).await?;
        Ok(session)
    }

    /// The seller's most recent live session, if any. Polling consumers call
    /// this every few seconds and derive offer liveness themselves.
    pub async fn current_session(&self, seller_id: Uuid) -> Result<Option<LiveSession>, Error> {
        self.session_repo.current_for_seller(seller_id).await
    }

    /// All of the seller's sessions, newest first.
    pub async fn sessions_for_seller(&self, seller_id: Uuid) -> Result<Vec<LiveSession>, Error> {
        let filter = SessionFilter {
            seller_id: Some(seller_id),
            ..Default::default()
        };
        self.session_repo.list_sessions(&filter).await
    }

    async fn get_existing(&self, session_id: Uuid) -> Result<LiveSession, Error> {
        match self.session_repo.get_session(session_id).await? {
            Some(s) => Ok(s),
            None => Err(Error::NotFound(format!("No session with id {}", session_id))),
        }
    }
}
