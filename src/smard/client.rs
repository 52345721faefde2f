//! HTTP client for the SMARD chart data API
//!
//! Each fetch resolves today's series in two sequential requests: the
//! index of available series-start timestamps, then the series whose
//! start is the latest one at or before local midnight. Every failure
//! mode degrades to an empty series and is reported via the log; no
//! error crosses the fetch boundary.

use std::time::Duration;

use chrono::{DateTime, LocalResult, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::types::{PriceSample, PriceSeries, RawSeries, SeriesIndex, ms_to_local, same_day};
use super::zones;
use crate::config::FeedConfig;
use crate::error::{Result, SeleneError};
use crate::logging::{StructuredLogger, get_logger};

/// SMARD chart data client
pub struct SmardClient {
    base_url: String,
    region: String,
    resolution: String,
    request_timeout: Duration,
    tz: Tz,
    logger: StructuredLogger,
}

impl SmardClient {
    /// Create a new client for the given feed endpoint and local timezone
    pub fn new(feed: &FeedConfig, tz: Tz) -> Self {
        Self {
            base_url: feed.base_url.trim_end_matches('/').to_string(),
            region: feed.region.clone(),
            resolution: feed.resolution.clone(),
            request_timeout: Duration::from_secs(feed.request_timeout_secs),
            tz,
            logger: get_logger("smard"),
        }
    }

    fn index_url(&self, zone_id: &str) -> String {
        format!(
            "{}/{}/{}/index_{}.json",
            self.base_url, zone_id, self.region, self.resolution
        )
    }

    fn series_url(&self, zone_id: &str, series_start_ms: i64) -> String {
        format!(
            "{}/{}/{}/{}_{}_{}_{}.json",
            self.base_url,
            zone_id,
            self.region,
            zone_id,
            self.region,
            self.resolution,
            series_start_ms
        )
    }

    /// Fetch today's price series for a bidding zone.
    ///
    /// Returns an empty series on any failure: unsupported zone,
    /// transport error, malformed payload, or no usable index timestamp.
    pub async fn fetch_day_prices(&self, zone_id: &str) -> PriceSeries {
        let now = Utc::now().with_timezone(&self.tz);
        self.fetch_day_prices_at(zone_id, now).await
    }

    /// Same as [`Self::fetch_day_prices`] with an explicit reference time
    pub async fn fetch_day_prices_at(&self, zone_id: &str, now: DateTime<Tz>) -> PriceSeries {
        match self.try_fetch(zone_id, now).await {
            Ok(series) => series,
            Err(e) => {
                self.logger
                    .error(&format!("Fetching prices for zone {} failed: {}", zone_id, e));
                PriceSeries::new()
            }
        }
    }

    async fn try_fetch(&self, zone_id: &str, now: DateTime<Tz>) -> Result<PriceSeries> {
        if !zones::is_supported(zone_id) {
            return Err(SeleneError::config(format!(
                "zone id {} is not a supported SMARD bidding zone",
                zone_id
            )));
        }

        let last_midnight = last_midnight(now);
        self.logger.debug(&format!(
            "Fetching {} prices for zone {}, day starting {}",
            self.resolution, zone_id, last_midnight
        ));

        // One HTTP client scoped to the index/series request pair
        let client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?;

        let index: SeriesIndex = client
            .get(self.index_url(zone_id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(series_start) = select_series_start(&index.timestamps, last_midnight, self.tz)
        else {
            return Err(SeleneError::feed(
                "no index timestamp at or before last midnight",
            ));
        };

        let raw: RawSeries = client
            .get(self.series_url(zone_id, series_start))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let series = filter_same_day(&raw.series, last_midnight, self.tz);
        if series.is_empty() {
            self.logger
                .error("No price samples for the current day in the feed response");
        }
        Ok(series)
    }
}

/// Midnight that started the local calendar day containing `now`
pub(crate) fn last_midnight(now: DateTime<Tz>) -> DateTime<Tz> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    match now.timezone().from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        // DST transitions in SMARD zones never land on midnight
        LocalResult::None => now,
    }
}

/// Latest series-start timestamp at or before `last_midnight`.
///
/// The index arrives in ascending order, so the reverse scan finds the
/// newest qualifying series first.
pub(crate) fn select_series_start(
    timestamps: &[i64],
    last_midnight: DateTime<Tz>,
    tz: Tz,
) -> Option<i64> {
    timestamps
        .iter()
        .rev()
        .copied()
        .find(|&ts| ms_to_local(ts, tz).is_some_and(|dt| dt <= last_midnight))
}

/// Keep samples on the same local calendar day as `day_anchor`, dropping
/// null prices and unrepresentable timestamps
pub(crate) fn filter_same_day(
    raw: &[(i64, Option<f64>)],
    day_anchor: DateTime<Tz>,
    tz: Tz,
) -> PriceSeries {
    raw.iter()
        .filter_map(|&(ts, price)| {
            let starts_at = ms_to_local(ts, tz)?;
            let price = price?;
            same_day(starts_at, day_anchor).then_some(PriceSample { starts_at, price })
        })
        .collect()
}
