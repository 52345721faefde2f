//! Data types for the SMARD chart data feed

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

/// One pricing interval: start of the interval and its day-ahead price
/// in EUR/MWh. Prices can be negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSample {
    pub starts_at: DateTime<Tz>,
    pub price: f64,
}

/// A single day's price series, ordered by ascending start time.
///
/// Empty is the sentinel for "no data": every fetch failure degrades to
/// an empty series rather than an error.
pub type PriceSeries = Vec<PriceSample>;

/// Index payload: available series-start timestamps in epoch milliseconds
#[derive(Debug, Default, Deserialize)]
pub struct SeriesIndex {
    #[serde(default)]
    pub timestamps: Vec<i64>,
}

/// Series payload: `[timestamp_ms, price]` pairs, price may be null
#[derive(Debug, Default, Deserialize)]
pub struct RawSeries {
    #[serde(default)]
    pub series: Vec<(i64, Option<f64>)>,
}

/// Convert an epoch-millisecond feed timestamp to local wall-clock time.
///
/// Returns `None` for timestamps outside chrono's representable range.
pub fn ms_to_local(timestamp_ms: i64, tz: Tz) -> Option<DateTime<Tz>> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map(|dt| dt.with_timezone(&tz))
}

/// Whether two instants fall on the same local calendar day
pub fn same_day(a: DateTime<Tz>, b: DateTime<Tz>) -> bool {
    a.date_naive() == b.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Berlin;

    #[test]
    fn ms_to_local_converts_to_wall_clock() {
        // 2025-07-01 01:00:00 UTC is 03:00 CEST
        let dt = ms_to_local(1_751_331_600_000, Berlin).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-07-01T03:00:00+02:00");
    }

    #[test]
    fn ms_to_local_rejects_out_of_range() {
        assert!(ms_to_local(i64::MAX, Berlin).is_none());
    }

    #[test]
    fn same_day_compares_local_dates() {
        let morning = ms_to_local(1_753_657_200_000, Berlin).unwrap(); // 2025-07-28 01:00 CEST
        let evening = morning + chrono::Duration::hours(20);
        let tomorrow = morning + chrono::Duration::hours(24);
        assert!(same_day(morning, evening));
        assert!(!same_day(morning, tomorrow));
    }

    #[test]
    fn raw_series_accepts_null_prices() {
        let raw: RawSeries =
            serde_json::from_str(r#"{"series": [[1753657200000, 15.0], [1753660800000, null]]}"#)
                .unwrap();
        assert_eq!(raw.series.len(), 2);
        assert_eq!(raw.series[0].1, Some(15.0));
        assert_eq!(raw.series[1].1, None);
    }
}
