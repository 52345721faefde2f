//! # Selene - Delayed Charging Driver for SMARD Day-Ahead Prices
//!
//! A Rust driver that polls the public SMARD chart data feed for
//! day-ahead wholesale electricity prices, derives delayed-charging
//! signals from the current day's series, and publishes them as an
//! immutable snapshot for host automation platforms.
//!
//! ## Features
//!
//! - **Day-Ahead Prices**: quarter-hourly or hourly series per bidding zone
//! - **Charging Signals**: current price, earliest below-threshold start,
//!   and an active-today flag
//! - **Resilient Fetching**: every failure degrades to an observable
//!   "no data" state instead of an error
//! - **Host Boundary**: snapshots over a watch channel plus runtime
//!   commands for threshold and zone changes
//! - **Configuration**: YAML-based configuration with validation
//!
//! ## Architecture
//!
//! The application follows a modular architecture with clear separation of concerns:
//!
//! - `config`: Configuration management and validation
//! - `logging`: Structured logging and tracing
//! - `smard`: SMARD feed client, zones, and data types
//! - `signals`: Pure query functions over the day's price series
//! - `driver`: Polling loop, command handling, and snapshot publication

pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod signals;
pub mod smard;

// Re-export commonly used types
pub use config::Config;
pub use driver::SmardDriver;
pub use error::{Result, SeleneError};
