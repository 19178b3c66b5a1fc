// tests/reporting_tests.rs

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;
use liveshop_core::models::analytics::{AnalyticsEvent, EventType};
use liveshop_core::models::live_session::{FlashOfferType, LiveSession};
use liveshop_core::services::reporting_service::{
    aggregate_sessions, export_csv, top_percentile, SellerReport,
};
use liveshop_core::stats::session_stats;

fn session(seller_id: Uuid, started_at: DateTime<Utc>, minutes: i64) -> LiveSession {
    LiveSession {
        session_id: Uuid::new_v4(),
        seller_id,
        shop_slug: "warung-kita".to_string(),
        active_product_id: Some(Uuid::new_v4()),
        preloaded_products: vec![Uuid::new_v4()],
        is_live: false,
        live_started_at: Some(started_at),
        live_ended_at: Some(started_at + Duration::minutes(minutes)),
        flash_offer_active: false,
        flash_offer_type: FlashOfferType::Percentage,
        flash_offer_value: 0,
        flash_offer_ends_at: None,
        show_public_counter: true,
        created_at: started_at,
    }
}

fn events_for(
    seller_id: Uuid,
    start: DateTime<Utc>,
    scans: usize,
    clicks: usize,
) -> Vec<AnalyticsEvent> {
    let mut out = Vec::new();
    for i in 0..scans {
        out.push(AnalyticsEvent {
            event_id: Uuid::new_v4(),
            seller_id,
            product_id: None,
            event_type: EventType::Scan,
            user_agent: None,
            created_at: start + Duration::seconds(10 + i as i64),
        });
    }
    for i in 0..clicks {
        out.push(AnalyticsEvent {
            event_id: Uuid::new_v4(),
            seller_id,
            product_id: None,
            event_type: EventType::WhatsappClick,
            user_agent: None,
            created_at: start + Duration::seconds(120 + i as i64),
        });
    }
    out
}

/// Splits one all-quoted CSV line back into raw field values.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == ',' {
            fields.push(std::mem::take(&mut current));
        }
    }
    fields.push(current);
    fields
}

#[test]
fn totals_are_summed_not_averaged() {
    let seller = Uuid::new_v4();
    let t_a = Utc.with_ymd_and_hms(2025, 3, 10, 19, 0, 0).unwrap();
    let t_b = Utc.with_ymd_and_hms(2025, 3, 11, 19, 0, 0).unwrap();

    let sessions = vec![session(seller, t_a, 30), session(seller, t_b, 30)];
    let mut events = events_for(seller, t_a, 10, 5);
    events.extend(events_for(seller, t_b, 2, 2));

    let now = t_b + Duration::hours(2);
    let report = aggregate_sessions(&sessions, &events, None, now);

    assert_eq!(report.session_count, 2);
    assert_eq!(report.total_scans, 12);
    assert_eq!(report.total_clicks, 7);

    // Per-session rates are 50% and 100%; their mean would be 75%. The
    // aggregate must come from the summed totals instead: round(700/12).
    let rates: Vec<i64> = report.sessions.iter().map(|s| s.conversion_rate).collect();
    let mut sorted = rates.clone();
    sorted.sort();
    assert_eq!(sorted, vec![50, 100]);
    assert_eq!((rates[0] + rates[1]) / 2, 75);
    assert_eq!(report.conversion_rate, 58);
    assert_ne!(report.conversion_rate, 75);
}

#[test]
fn date_filter_is_an_exact_match() {
    let seller = Uuid::new_v4();
    let t_a = Utc.with_ymd_and_hms(2025, 3, 10, 19, 0, 0).unwrap();
    let t_b = Utc.with_ymd_and_hms(2025, 3, 11, 19, 0, 0).unwrap();

    let sessions = vec![session(seller, t_a, 30), session(seller, t_b, 30)];
    let events = events_for(seller, t_a, 4, 1);

    let now = t_b + Duration::hours(2);
    let wanted = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let report = aggregate_sessions(&sessions, &events, Some(wanted), now);

    assert_eq!(report.session_count, 1);
    assert_eq!(report.sessions[0].date, wanted);
    assert_eq!(report.total_scans, 4);

    let none = aggregate_sessions(
        &sessions,
        &events,
        NaiveDate::from_ymd_opt(2025, 3, 12),
        now,
    );
    assert_eq!(none.session_count, 0);
    assert_eq!(none.conversion_rate, 0);
}

#[test]
fn sessions_that_never_went_live_are_skipped() {
    let seller = Uuid::new_v4();
    let t0 = Utc.with_ymd_and_hms(2025, 3, 10, 19, 0, 0).unwrap();
    let mut draft = session(seller, t0, 30);
    draft.live_started_at = None;
    draft.live_ended_at = None;

    let report = aggregate_sessions(&[draft], &[], None, t0 + Duration::hours(1));
    assert_eq!(report.session_count, 0);
    assert!(report.sessions.is_empty());
}

#[test]
fn percentile_badge_stays_in_range() {
    let empty = SellerReport::default();
    assert_eq!(top_percentile(&empty), 95);

    let mut strong = SellerReport::default();
    strong.total_scans = 1_000;
    strong.conversion_rate = 90;
    assert_eq!(top_percentile(&strong), 5);

    let mut mid = SellerReport::default();
    mid.total_scans = 50;
    mid.conversion_rate = 40;
    let badge = top_percentile(&mid);
    assert!((5..=95).contains(&badge));

    // Clicks can outnumber scans; the badge must still clamp.
    let mut weird = SellerReport::default();
    weird.conversion_rate = 300;
    assert_eq!(top_percentile(&weird), 5);
}

#[test]
fn csv_filename_embeds_export_date() {
    let report = SellerReport::default();
    let exported_on = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
    let export = export_csv("live-performance", &report, exported_on);
    assert_eq!(export.filename, "live-performance-2025-04-02.csv");
}

#[test]
fn csv_quotes_every_value_and_escapes_embedded_quotes() {
    let seller = Uuid::new_v4();
    let t0 = Utc.with_ymd_and_hms(2025, 3, 10, 19, 0, 0).unwrap();
    let sessions = vec![session(seller, t0, 30)];
    let mut report = aggregate_sessions(&sessions, &[], None, t0 + Duration::hours(1));
    report.sessions[0].product_name = Some("Mug \"XL\"".to_string());

    let export = export_csv("report", &report, t0.date_naive());
    let lines: Vec<&str> = export.content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("\"date\",\"start_time\""));
    assert!(lines[1].contains("\"Mug \"\"XL\"\"\""));
    for field in parse_csv_line(lines[1]) {
        // Re-parsing must not leave stray quotes behind.
        assert!(!field.contains("\"\""));
    }
}

#[test]
fn csv_round_trips_the_per_session_figures() {
    let seller = Uuid::new_v4();
    let t_a = Utc.with_ymd_and_hms(2025, 3, 10, 19, 0, 0).unwrap();
    let t_b = Utc.with_ymd_and_hms(2025, 3, 11, 20, 30, 0).unwrap();

    let sessions = vec![session(seller, t_a, 45), session(seller, t_b, 15)];
    let mut events = events_for(seller, t_a, 10, 5);
    events.extend(events_for(seller, t_b, 2, 2));

    let now = t_b + Duration::hours(2);
    let report = aggregate_sessions(&sessions, &events, None, now);
    let export = export_csv("report", &report, now.date_naive());

    let lines: Vec<&str> = export.content.lines().collect();
    assert_eq!(lines.len(), 1 + sessions.len());

    for (line, original) in lines[1..].iter().zip(report.sessions.iter()) {
        let fields = parse_csv_line(line);
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[0], original.date.format("%Y-%m-%d").to_string());
        assert_eq!(fields[3].parse::<i64>().unwrap(), original.duration_minutes);
        assert_eq!(fields[5].parse::<i64>().unwrap(), original.scans);
        assert_eq!(fields[6].parse::<i64>().unwrap(), original.views);
        assert_eq!(fields[7].parse::<i64>().unwrap(), original.clicks);
        assert_eq!(fields[8].parse::<i64>().unwrap(), original.conversion_rate);

        // And the figures in the file agree with the aggregator itself.
        let source = sessions
            .iter()
            .find(|s| s.session_id == original.session_id)
            .unwrap();
        let direct = session_stats(source, &events, now);
        assert_eq!(fields[5].parse::<i64>().unwrap(), direct.scans);
        assert_eq!(fields[7].parse::<i64>().unwrap(), direct.clicks);
    }
}
