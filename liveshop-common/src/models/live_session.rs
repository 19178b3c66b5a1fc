// File: liveshop-common/src/models/live_session.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Add sqlx::Type so that SQLx knows how to decode this enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FlashOfferType {
    Percentage,
    Fixed,
}

impl fmt::Display for FlashOfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashOfferType::Percentage => write!(f, "percentage"),
            FlashOfferType::Fixed => write!(f, "fixed"),
        }
    }
}

impl FromStr for FlashOfferType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "percentage" => Ok(FlashOfferType::Percentage),
            "fixed" => Ok(FlashOfferType::Fixed),
            _ => Err(format!("Unknown flash offer type: {}", s)),
        }
    }
}

/// One broadcast by one seller. A new row is created on every start;
/// the seller's "current" session is the most recent row with `is_live`.
///
/// While live: `preloaded_products` holds 1..=5 unique entries and
/// `active_product_id` is one of them. `flash_offer_ends_at` is only
/// meaningful while `flash_offer_active`; readers must still check it
/// against their own clock, the flag is never cleared on expiry.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LiveSession {
    pub session_id: Uuid,
    pub seller_id: Uuid,
    pub shop_slug: String,
    pub active_product_id: Option<Uuid>,
    pub preloaded_products: Vec<Uuid>,
    pub is_live: bool,
    pub live_started_at: Option<DateTime<Utc>>,
    pub live_ended_at: Option<DateTime<Utc>>,
    pub flash_offer_active: bool,
    pub flash_offer_type: FlashOfferType,
    /// Whole percent for `Percentage`, minor currency units for `Fixed`.
    pub flash_offer_value: i64,
    pub flash_offer_ends_at: Option<DateTime<Utc>>,
    pub show_public_counter: bool,
    pub created_at: DateTime<Utc>,
}

/// Typed filter for session listings.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub seller_id: Option<Uuid>,
    pub is_live: Option<bool>,
    /// Exact UTC calendar date of `live_started_at`, not a range.
    pub started_on: Option<NaiveDate>,
}
