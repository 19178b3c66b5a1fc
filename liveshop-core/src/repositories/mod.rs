// src/repositories/mod.rs

pub use liveshop_common::traits::repository_traits::{
    AnalyticsRepo,
    LiveSessionRepository,
    ProductCatalogRepository,
};

pub use postgres::analytics::PostgresAnalyticsRepository;
pub use postgres::live_session::PostgresLiveSessionRepository;
pub use postgres::products::PostgresProductCatalogRepository;

pub mod postgres;
