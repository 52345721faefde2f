use anyhow::Result;
use selene::driver::{DriverCommand, SmardDriver};
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Create driver command channel
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<DriverCommand>();

    // Initialize the driver with command receiver
    let mut driver = SmardDriver::new(cmd_rx, cmd_tx.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create driver: {}", e))?;

    info!("Selene delayed charging driver {} starting up", env!("APP_VERSION"));

    // Ctrl-C requests a clean shutdown
    let shutdown = driver.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.send(()).ok();
        }
    });

    match driver.run().await {
        Ok(()) => {
            info!("Driver shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("Driver failed with error: {}", e);
            Err(anyhow::anyhow!("Driver error: {}", e))
        }
    }
}
