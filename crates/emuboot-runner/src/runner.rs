use std::time::Duration;

use emuboot_core::{BootWaitError, DeviceBridge, Result, DEFAULT_POLL_INTERVAL};
use tokio::time::Instant;
use tracing::{debug, info};

/// Polls a device bridge until the device reports booted, then unlocks it.
pub struct BootWaitRunner<B> {
    bridge: B,
    poll_interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootReport {
    /// Boot checks made, including the one that saw the device booted.
    pub attempts: u32,
    pub elapsed: Duration,
}

impl<B: DeviceBridge> BootWaitRunner<B> {
    pub fn new(bridge: B) -> Self {
        Self {
            bridge,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Blocks until `device_id` has booted or `timeout` has elapsed, then
    /// unlocks the device once.
    ///
    /// A failing boot check aborts immediately; only "not booted yet" is
    /// retried. The deadline is checked between polls, so the wait may overrun
    /// `timeout` by up to one poll interval plus one check.
    pub async fn wait_and_unlock(&self, device_id: &str, timeout: Duration) -> Result<BootReport> {
        info!("Waiting for emulator boot");
        let report = self.wait_for_boot(device_id, timeout).await?;

        self.bridge
            .unlock_device(device_id)
            .await
            .map_err(BootWaitError::UnlockFailed)?;

        info!(
            attempts = report.attempts,
            elapsed_secs = report.elapsed.as_secs(),
            "> Device booted"
        );
        Ok(report)
    }

    async fn wait_for_boot(&self, device_id: &str, timeout: Duration) -> Result<BootReport> {
        let start = Instant::now();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            info!("> Checking if device booted... (attempt {})", attempts);

            let booted = self
                .bridge
                .is_device_booted(device_id)
                .await
                .map_err(BootWaitError::BootCheckFailed)?;

            if booted {
                return Ok(BootReport {
                    attempts,
                    elapsed: start.elapsed(),
                });
            }

            if start.elapsed() >= timeout {
                return Err(BootWaitError::BootTimeout(timeout));
            }

            debug!("Device not booted yet, retrying in {:?}", self.poll_interval);
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
