//! Core driver logic for Selene
//!
//! This module contains the polling loop that keeps the day's price
//! series fresh and the orchestration around it: command handling,
//! state reporting, and snapshot publication for host platforms.

use crate::config::Config;
use crate::error::Result;
use crate::logging::get_logger;
use crate::smard::{PriceSeries, SmardClient, zones};
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::{Duration, interval};

pub mod feed;
pub mod snapshot;

use feed::PriceFeed;
use snapshot::PriceSnapshot;

/// Main driver state
#[derive(Debug, Clone)]
pub enum DriverState {
    /// Driver is initializing
    Initializing,
    /// Driver is running normally
    Running,
    /// Driver is in error state
    Error(String),
    /// Driver is shutting down
    ShuttingDown,
}

/// Commands accepted by the driver from external components
#[derive(Debug, Clone)]
pub enum DriverCommand {
    /// Replace the charging threshold (EUR/MWh) and recompute signals
    SetThreshold(f64),
    /// Switch to another bidding zone and refetch
    SetZone(String),
    /// Force a fetch-and-publish cycle outside the regular cadence
    Refresh,
}

/// Main driver for Selene
pub struct SmardDriver {
    /// Configuration
    config: Config,

    /// Local timezone resolved from the configuration
    tz: Tz,

    /// Price feed (trait object so tests can substitute the network layer)
    feed: Box<dyn PriceFeed>,

    /// Logger with context
    logger: crate::logging::StructuredLogger,

    /// Current driver state
    state: watch::Sender<DriverState>,

    /// Shutdown signal
    shutdown_tx: mpsc::UnboundedSender<()>,

    /// Shutdown receiver
    shutdown_rx: mpsc::UnboundedReceiver<()>,

    /// Command receiver for external control
    commands_rx: mpsc::UnboundedReceiver<DriverCommand>,

    /// Command sender (fan-out to host integrations)
    commands_tx: mpsc::UnboundedSender<DriverCommand>,

    /// Latest published snapshot
    snapshot_tx: watch::Sender<Arc<PriceSnapshot>>,
    snapshot_rx: watch::Receiver<Arc<PriceSnapshot>>,

    /// Latest fetched price series (one polling cycle's snapshot)
    series: PriceSeries,

    /// Number of completed poll cycles
    total_polls: u64,
}

impl SmardDriver {
    /// Create a new driver instance from the default configuration paths
    pub fn new(
        commands_rx: mpsc::UnboundedReceiver<DriverCommand>,
        commands_tx: mpsc::UnboundedSender<DriverCommand>,
    ) -> Result<Self> {
        let config = Config::load().map_err(|e| {
            eprintln!("Failed to load configuration: {}", e);
            e
        })?;

        // Initialize logging
        crate::logging::init_logging(&config.logging)?;

        let tz = config.tz()?;
        let client = SmardClient::new(&config.feed, tz);
        Self::with_feed(config, Box::new(client), commands_rx, commands_tx)
    }

    /// Create a driver with an explicit configuration
    pub fn with_config(
        config: Config,
        commands_rx: mpsc::UnboundedReceiver<DriverCommand>,
        commands_tx: mpsc::UnboundedSender<DriverCommand>,
    ) -> Result<Self> {
        let tz = config.tz()?;
        let client = SmardClient::new(&config.feed, tz);
        Self::with_feed(config, Box::new(client), commands_rx, commands_tx)
    }

    /// Create a driver with an explicit configuration and price feed
    pub fn with_feed(
        config: Config,
        feed: Box<dyn PriceFeed>,
        commands_rx: mpsc::UnboundedReceiver<DriverCommand>,
        commands_tx: mpsc::UnboundedSender<DriverCommand>,
    ) -> Result<Self> {
        config.validate()?;
        let tz = config.tz()?;

        let logger = get_logger("driver");
        logger.info("Initializing delayed charging driver");

        let (shutdown_tx, shutdown_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(DriverState::Initializing);
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(PriceSnapshot::default()));

        Ok(Self {
            config,
            tz,
            feed,
            logger,
            state: state_tx,
            shutdown_tx,
            shutdown_rx,
            commands_rx,
            commands_tx,
            snapshot_tx,
            snapshot_rx,
            series: PriceSeries::new(),
            total_polls: 0,
        })
    }

    /// Run the driver until a shutdown signal arrives
    pub async fn run(&mut self) -> Result<()> {
        let zone_name = zones::zone_name(&self.config.zone_id).unwrap_or("unknown");
        self.logger.info(&format!(
            "Starting polling for zone {} ({}) every {} minutes",
            self.config.zone_id, zone_name, self.config.poll_interval_minutes
        ));
        self.state.send(DriverState::Running).ok();

        // The first tick completes immediately, so data is published right away
        let mut poll_interval =
            interval(Duration::from_secs(self.config.poll_interval_minutes * 60));

        loop {
            tokio::select! {
                _ = poll_interval.tick() => {
                    self.poll_cycle().await;
                }
                Some(cmd) = self.commands_rx.recv() => {
                    self.handle_command(cmd).await;
                }
                _ = self.shutdown_rx.recv() => {
                    self.logger.info("Shutdown signal received");
                    break;
                }
            }
        }

        self.state.send(DriverState::ShuttingDown).ok();
        self.publish_snapshot();
        self.logger.info("Driver shutdown complete");
        Ok(())
    }

    /// Single polling cycle: fetch today's series and publish a snapshot.
    ///
    /// Fetch failures surface as an empty series, so a cycle never fails;
    /// the next tick retries naturally.
    async fn poll_cycle(&mut self) {
        self.logger.debug("Starting poll cycle");
        self.series = self.feed.fetch_day_prices(&self.config.zone_id).await;
        self.total_polls += 1;
        self.publish_snapshot();
    }

    /// One fetch-and-publish pass for host-driven scheduling
    pub async fn refresh_now(&mut self) {
        self.poll_cycle().await;
    }

    /// Handle an external command
    async fn handle_command(&mut self, cmd: DriverCommand) {
        match cmd {
            DriverCommand::SetThreshold(value) => {
                if !value.is_finite() {
                    self.logger
                        .error(&format!("Ignoring non-finite threshold {}", value));
                    return;
                }
                self.logger.info(&format!(
                    "Threshold changed from {} to {} EUR/MWh",
                    self.config.threshold, value
                ));
                self.config.threshold = value;
                // Signals depend only on the cached series, no refetch needed
                self.publish_snapshot();
            }
            DriverCommand::SetZone(zone_id) => match zones::zone_name(&zone_id) {
                Some(name) => {
                    self.logger
                        .info(&format!("Switching to zone {} ({})", zone_id, name));
                    self.config.zone_id = zone_id;
                    self.poll_cycle().await;
                }
                None => {
                    self.logger
                        .error(&format!("Ignoring unsupported zone id {}", zone_id));
                }
            },
            DriverCommand::Refresh => {
                self.poll_cycle().await;
            }
        }
    }

    /// Current price of the latest series (most recent started interval)
    pub fn current_price(&self) -> Option<f64> {
        let now = chrono::Utc::now().with_timezone(&self.tz);
        crate::signals::current_price(&self.series, now)
    }

    /// Earliest below-threshold interval start of the latest series
    pub fn charging_start(&self) -> Option<chrono::DateTime<Tz>> {
        crate::signals::charging_start(&self.series, self.config.threshold)
    }

    /// Whether any below-threshold interval exists in the latest series
    pub fn is_active_today(&self) -> bool {
        crate::signals::is_active_today(&self.series, self.config.threshold)
    }

    /// Access the active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sender half for issuing commands to a running driver
    pub fn command_sender(&self) -> mpsc::UnboundedSender<DriverCommand> {
        self.commands_tx.clone()
    }

    /// Subscribe to driver state transitions
    pub fn subscribe_state(&self) -> watch::Receiver<DriverState> {
        self.state.subscribe()
    }

    /// Sender half of the shutdown channel, for signal handlers
    pub fn shutdown_handle(&self) -> mpsc::UnboundedSender<()> {
        self.shutdown_tx.clone()
    }

    /// Request shutdown
    pub fn request_shutdown(&self) {
        self.shutdown_tx.send(()).ok();
    }

    fn state_label(&self) -> String {
        match &*self.state.borrow() {
            DriverState::Initializing => "Initializing".to_string(),
            DriverState::Running => "Running".to_string(),
            DriverState::Error(e) => format!("Error: {}", e),
            DriverState::ShuttingDown => "ShuttingDown".to_string(),
        }
    }
}
