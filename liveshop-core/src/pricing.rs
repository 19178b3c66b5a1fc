// src/pricing.rs
//
// Flash-offer price derivation. Pure functions: `now` is always passed in,
// nothing here touches a clock or the store. Offer expiry has no explicit
// transition anywhere in the system; every reader derives liveness from the
// stored deadline through `flash_offer_currently_active`.

use chrono::{DateTime, Utc};
use liveshop_common::models::live_session::{FlashOfferType, LiveSession};

/// An offer counts as active only while the stored flag is set AND the
/// deadline is still ahead of `now`. The flag alone is not enough: it stays
/// set after expiry until a stop or a later activation overwrites it.
pub fn flash_offer_currently_active(session: &LiveSession, now: DateTime<Utc>) -> bool {
    match session.flash_offer_ends_at {
        Some(ends_at) => session.flash_offer_active && now < ends_at,
        None => false,
    }
}

/// Price for `base_price` (minor currency units) under the session's offer,
/// clamped at zero. Returns `base_price` unchanged when no offer is
/// currently active.
pub fn effective_price(base_price: i64, session: &LiveSession, now: DateTime<Utc>) -> i64 {
    if !flash_offer_currently_active(session, now) {
        return base_price;
    }

    let discounted = match session.flash_offer_type {
        FlashOfferType::Percentage => {
            base_price - base_price * session.flash_offer_value / 100
        }
        FlashOfferType::Fixed => base_price - session.flash_offer_value,
    };

    discounted.max(0)
}
