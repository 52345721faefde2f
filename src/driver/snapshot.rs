use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

use crate::signals;
use crate::smard::zones;

/// One point of the day's series, shaped for charting frontends
#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    /// Interval start, RFC 3339 in the configured timezone
    pub x: String,
    /// Price in EUR/MWh
    pub y: f64,
}

/// Immutable view of the driver's latest poll cycle.
///
/// This is the host boundary: the three delayed-charging signals plus
/// the full day's series, published through a watch channel after every
/// cycle and on threshold changes.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSnapshot {
    /// When this snapshot was built, RFC 3339
    pub timestamp: String,
    pub zone_id: String,
    pub zone_name: String,
    pub threshold: f64,
    /// Price of the most recent started interval, if any
    pub current_price: Option<f64>,
    /// Earliest below-threshold interval start, RFC 3339, if any
    pub charging_start: Option<String>,
    /// Whether any below-threshold interval exists today
    pub active_today: bool,
    pub sample_count: usize,
    /// The day's full series for charting
    pub series: Vec<SeriesPoint>,
    pub total_polls: u64,
    pub poll_interval_minutes: u64,
    /// Driver state (Initializing, Running, Error, ShuttingDown)
    pub driver_state: String,
}

impl Default for PriceSnapshot {
    fn default() -> Self {
        Self {
            timestamp: String::new(),
            zone_id: String::new(),
            zone_name: String::new(),
            threshold: 0.0,
            current_price: None,
            charging_start: None,
            active_today: false,
            sample_count: 0,
            series: Vec::new(),
            total_polls: 0,
            poll_interval_minutes: 0,
            driver_state: "Initializing".to_string(),
        }
    }
}

impl super::SmardDriver {
    /// Subscribe to published snapshots
    pub fn subscribe_snapshot(&self) -> watch::Receiver<Arc<PriceSnapshot>> {
        self.snapshot_rx.clone()
    }

    pub(super) fn build_snapshot(&self) -> PriceSnapshot {
        let now = Utc::now().with_timezone(&self.tz);
        PriceSnapshot {
            timestamp: now.to_rfc3339(),
            zone_id: self.config.zone_id.clone(),
            zone_name: zones::zone_name(&self.config.zone_id)
                .unwrap_or("unknown")
                .to_string(),
            threshold: self.config.threshold,
            current_price: signals::current_price(&self.series, now),
            charging_start: signals::charging_start(&self.series, self.config.threshold)
                .map(|dt| dt.to_rfc3339()),
            active_today: signals::is_active_today(&self.series, self.config.threshold),
            sample_count: self.series.len(),
            series: self
                .series
                .iter()
                .map(|sample| SeriesPoint {
                    x: sample.starts_at.to_rfc3339(),
                    y: sample.price,
                })
                .collect(),
            total_polls: self.total_polls,
            poll_interval_minutes: self.config.poll_interval_minutes,
            driver_state: self.state_label(),
        }
    }

    pub(super) fn publish_snapshot(&self) {
        let snapshot = Arc::new(self.build_snapshot());
        self.snapshot_tx.send(snapshot).ok();
    }
}
