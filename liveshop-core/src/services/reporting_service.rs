// File: liveshop-core/src/services/reporting_service.rs

use std::sync::Arc;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;
use liveshop_common::error::Error;
use liveshop_common::models::analytics::{AnalyticsEvent, EventFilter};
use liveshop_common::models::live_session::{LiveSession, SessionFilter};
use liveshop_common::traits::repository_traits::{
    AnalyticsRepo, LiveSessionRepository, ProductCatalogRepository,
};
use crate::stats::{conversion_rate, session_stats};

/// One row of the performance dashboard, one historical session each.
#[derive(Debug, Clone, Serialize)]
pub struct SessionBreakdown {
    pub session_id: Uuid,
    pub date: NaiveDate,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_minutes: i64,
    pub active_product_id: Option<Uuid>,
    pub product_name: Option<String>,
    pub scans: i64,
    pub views: i64,
    pub clicks: i64,
    pub conversion_rate: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SellerReport {
    pub session_count: i64,
    pub total_scans: i64,
    pub total_views: i64,
    pub total_clicks: i64,
    /// Computed from the summed totals, not the mean of per-session rates:
    /// a two-scan session must not weigh as much as a hundred-scan one.
    pub conversion_rate: i64,
    pub sessions: Vec<SessionBreakdown>,
}

/// A rendered CSV file, ready to hand to whatever does the download.
#[derive(Debug, Clone, Serialize)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Rolls per-session stats up across the given sessions. With `date_filter`
/// set, only sessions whose `live_started_at` UTC calendar date equals it
/// are included (exact match, not a range). Sessions that never went live
/// carry no window and are skipped.
pub fn aggregate_sessions(
    sessions: &[LiveSession],
    events: &[AnalyticsEvent],
    date_filter: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> SellerReport {
    let mut report = SellerReport::default();

    for session in sessions {
        let started_at = match session.live_started_at {
            Some(t) => t,
            None => continue,
        };
        let date = started_at.date_naive();
        if let Some(wanted) = date_filter {
            if date != wanted {
                continue;
            }
        }

        let stats = session_stats(session, events, now);
        report.total_scans += stats.scans;
        report.total_views += stats.views;
        report.total_clicks += stats.clicks;
        report.sessions.push(SessionBreakdown {
            session_id: session.session_id,
            date,
            started_at,
            ended_at: session.live_ended_at,
            duration_minutes: stats.duration_minutes,
            active_product_id: session.active_product_id,
            product_name: None,
            scans: stats.scans,
            views: stats.views,
            clicks: stats.clicks,
            conversion_rate: conversion_rate(stats.scans, stats.clicks),
        });
    }

    report.session_count = report.sessions.len() as i64;
    report.conversion_rate = conversion_rate(report.total_scans, report.total_clicks);
    report
}

/// Motivational "top N%" badge shown next to the dashboard totals. This is
/// a rough heuristic over the seller's own aggregate, not a percentile over
/// any real cohort: good conversion plus some scan volume pushes the number
/// down toward "top 5%". Always in 5..=95.
pub fn top_percentile(report: &SellerReport) -> u8 {
    let volume_bonus = (report.total_scans / 25).min(20);
    let score = report.conversion_rate + volume_bonus;
    (95 - score).clamp(5, 95) as u8
}

fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row(fields: &[String]) -> String {
    let quoted: Vec<String> = fields.iter().map(|f| csv_quote(f)).collect();
    quoted.join(",")
}

/// Renders the per-session breakdown as UTF-8 CSV, header row first, every
/// value quoted. The filename embeds the export date as
/// `<report-name>-<YYYY-MM-DD>.csv`.
pub fn export_csv(report_name: &str, report: &SellerReport, exported_on: NaiveDate) -> CsvExport {
    let header = [
        "date",
        "start_time",
        "end_time",
        "duration_minutes",
        "product",
        "scans",
        "views",
        "clicks",
        "conversion_rate_pct",
    ];
    let mut content = String::new();
    content.push_str(&csv_row(
        &header.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
    ));
    content.push('\n');

    for row in &report.sessions {
        let fields = [
            row.date.format("%Y-%m-%d").to_string(),
            row.started_at.format("%H:%M:%S").to_string(),
            row.ended_at
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_default(),
            row.duration_minutes.to_string(),
            row.product_name.clone().unwrap_or_default(),
            row.scans.to_string(),
            row.views.to_string(),
            row.clicks.to_string(),
            row.conversion_rate.to_string(),
        ];
        content.push_str(&csv_row(&fields));
        content.push('\n');
    }

    CsvExport {
        filename: format!("{}-{}.csv", report_name, exported_on.format("%Y-%m-%d")),
        content,
    }
}

/// Repo-backed facade over the pure aggregation: fetches the seller's
/// sessions and events, aggregates, and resolves product names through the
/// catalog for display and export.
pub struct ReportingService {
    session_repo: Arc<dyn LiveSessionRepository + Send + Sync>,
    analytics_repo: Arc<dyn AnalyticsRepo + Send + Sync>,
    catalog_repo: Arc<dyn ProductCatalogRepository + Send + Sync>,
}

impl ReportingService {
    pub fn new(
        session_repo: Arc<dyn LiveSessionRepository + Send + Sync>,
        analytics_repo: Arc<dyn AnalyticsRepo + Send + Sync>,
        catalog_repo: Arc<dyn ProductCatalogRepository + Send + Sync>,
    ) -> Self {
        Self {
            session_repo,
            analytics_repo,
            catalog_repo,
        }
    }

    pub async fn seller_report(
        &self,
        seller_id: Uuid,
        date_filter: Option<NaiveDate>,
    ) -> Result<SellerReport, Error> {
        let sessions = self
            .session_repo
            .list_sessions(&SessionFilter {
                seller_id: Some(seller_id),
                ..Default::default()
            })
            .await?;
        let events = self
            .analytics_repo
            .list_events(&EventFilter {
                seller_id: Some(seller_id),
                ..Default::default()
            })
            .await?;

        debug!(
            "Aggregating {} sessions / {} events for seller {}",
            sessions.len(),
            events.len(),
            seller_id
        );
        let mut report = aggregate_sessions(&sessions, &events, date_filter, Utc::now());

        for row in &mut report.sessions {
            if let Some(product_id) = row.active_product_id {
                if let Some(product) = self.catalog_repo.get_product(product_id).await? {
                    row.product_name = Some(product.name);
                }
            }
        }

        Ok(report)
    }

    pub async fn export_seller_csv(
        &self,
        seller_id: Uuid,
        report_name: &str,
        date_filter: Option<NaiveDate>,
    ) -> Result<CsvExport, Error> {
        let report = self.seller_report(seller_id, date_filter).await?;
        Ok(export_csv(report_name, &report, Utc::now().date_naive()))
    }
}
