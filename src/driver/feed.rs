use crate::smard::{PriceSeries, SmardClient};

/// Abstraction over the price feed so tests can substitute the network
/// layer with canned data.
#[async_trait::async_trait]
pub trait PriceFeed: Send + Sync {
    /// Today's price series for a zone; empty on any failure
    async fn fetch_day_prices(&self, zone_id: &str) -> PriceSeries;
}

#[async_trait::async_trait]
impl PriceFeed for SmardClient {
    async fn fetch_day_prices(&self, zone_id: &str) -> PriceSeries {
        SmardClient::fetch_day_prices(self, zone_id).await
    }
}
