// src/stats.rs
//
// Per-session engagement counting over the raw event log. Pure: callers
// supply the events and the clock.

use chrono::{DateTime, Utc};
use serde::Serialize;
use liveshop_common::models::analytics::{AnalyticsEvent, EventType};
use liveshop_common::models::live_session::LiveSession;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub scans: i64,
    pub views: i64,
    pub clicks: i64,
    pub duration_minutes: i64,
}

/// Counts events inside the session's active window
/// `[live_started_at, live_ended_at or now]`, bounds inclusive.
///
/// A session that never went live yields all zeroes. For a still-live
/// session the duration keeps growing with `now` on repeated calls.
/// `view_shop` events are kept in the log but are not part of per-session
/// stats.
pub fn session_stats(
    session: &LiveSession,
    events: &[AnalyticsEvent],
    now: DateTime<Utc>,
) -> SessionStats {
    let started_at = match session.live_started_at {
        Some(t) => t,
        None => return SessionStats::default(),
    };
    let ended_at = session.live_ended_at.unwrap_or(now);

    let mut stats = SessionStats {
        duration_minutes: (ended_at - started_at).num_minutes().max(0),
        ..Default::default()
    };

    for event in events {
        if event.created_at < started_at || event.created_at > ended_at {
            continue;
        }
        match event.event_type {
            EventType::Scan => stats.scans += 1,
            EventType::ViewProduct => stats.views += 1,
            EventType::WhatsappClick => stats.clicks += 1,
            EventType::ViewShop => {}
        }
    }

    stats
}

/// Clicks per scan as a whole percentage. Zero scans means zero percent,
/// never a division by zero.
pub fn conversion_rate(scans: i64, clicks: i64) -> i64 {
    if scans > 0 {
        ((clicks as f64 / scans as f64) * 100.0).round() as i64
    } else {
        0
    }
}
