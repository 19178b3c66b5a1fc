// File: liveshop-common/src/models/mod.rs
pub mod analytics;
pub mod live_session;
pub mod product;

pub use analytics::{AnalyticsEvent, EventFilter, EventType};
pub use live_session::{FlashOfferType, LiveSession, SessionFilter};
pub use product::Product;
