// File: liveshop-common/src/models/analytics.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Scan,
    ViewProduct,
    WhatsappClick,
    ViewShop,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Scan => write!(f, "scan"),
            EventType::ViewProduct => write!(f, "view_product"),
            EventType::WhatsappClick => write!(f, "whatsapp_click"),
            EventType::ViewShop => write!(f, "view_shop"),
        }
    }
}

impl FromStr for EventType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scan" => Ok(EventType::Scan),
            "view_product" => Ok(EventType::ViewProduct),
            "whatsapp_click" => Ok(EventType::WhatsappClick),
            "view_shop" => Ok(EventType::ViewShop),
            _ => Err(format!("Unknown event type: {}", s)),
        }
    }
}

/// One engagement action. Rows are append-only and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnalyticsEvent {
    pub event_id: Uuid,
    pub seller_id: Uuid,
    pub product_id: Option<Uuid>,
    pub event_type: EventType,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Typed filter for event listings.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub seller_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub event_type: Option<EventType>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}
