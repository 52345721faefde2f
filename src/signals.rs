//! Delayed-charging signal derivation
//!
//! This module contains the pure query functions over a day's price
//! series. The driver recomputes all three on every poll cycle and
//! whenever the threshold changes; given equal inputs they always
//! produce equal outputs.

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::{debug, error};

use crate::smard::PriceSample;

/// Price of the most recent sample that has already started.
///
/// Among samples with `starts_at <= now`, the one with the largest
/// start time wins. Returns `None` when the series is empty or lies
/// entirely in the future.
pub fn current_price(series: &[PriceSample], now: DateTime<Tz>) -> Option<f64> {
    let current = series
        .iter()
        .filter(|sample| sample.starts_at <= now)
        .max_by_key(|sample| sample.starts_at)
        .map(|sample| sample.price);

    match current {
        Some(price) => debug!("Current price: {}", price),
        None => error!("No current price data available"),
    }
    current
}

/// Start of the earliest interval priced strictly below `threshold`.
///
/// Selection is by minimum timestamp, so the result does not depend on
/// the arrival order of the feed data. Returns `None` when no interval
/// qualifies.
pub fn charging_start(series: &[PriceSample], threshold: f64) -> Option<DateTime<Tz>> {
    series
        .iter()
        .filter(|sample| sample.price < threshold)
        .map(|sample| sample.starts_at)
        .min()
}

/// Whether any interval today is priced strictly below `threshold`
pub fn is_active_today(series: &[PriceSample], threshold: f64) -> bool {
    series.iter().any(|sample| sample.price < threshold)
}
