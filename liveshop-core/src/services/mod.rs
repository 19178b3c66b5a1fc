// src/services/mod.rs

pub mod analytics_service;
pub mod live_session_service;
pub mod reporting_service;

pub use analytics_service::AnalyticsService;
pub use live_session_service::LiveSessionService;
pub use reporting_service::ReportingService;
