//! SMARD day-ahead price feed integration
//!
//! Client and data types for the public chart data API on smard.de,
//! which publishes day-ahead wholesale electricity prices per bidding
//! zone as an index of series-start timestamps plus full series keyed
//! by one such timestamp.

pub mod client;
pub mod types;
pub mod zones;

// Re-exports for the public API surface
pub use client::SmardClient;
pub use types::{PriceSample, PriceSeries};
