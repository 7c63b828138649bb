use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{BootWaitError, Result};

pub const ENV_EMULATOR_SERIAL: &str = "emulator_serial";
pub const ENV_BOOT_TIMEOUT: &str = "boot_timeout";
pub const ENV_ANDROID_HOME: &str = "android_home";
pub const ENV_POLL_INTERVAL: &str = "poll_interval";

/// Pause between consecutive boot checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Inputs exactly as read from the environment, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInputs {
    pub emulator_serial: String,
    pub boot_timeout: String,
    pub android_home: String,
}

/// Validated run configuration. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    pub device_id: String,
    /// Kept unparsed; see [`parse_boot_timeout`].
    pub boot_timeout: String,
    pub tooling_path: PathBuf,
}

impl RawInputs {
    pub fn new(
        emulator_serial: impl Into<String>,
        boot_timeout: impl Into<String>,
        android_home: impl Into<String>,
    ) -> Self {
        Self {
            emulator_serial: emulator_serial.into(),
            boot_timeout: boot_timeout.into(),
            android_home: android_home.into(),
        }
    }

    /// Every field is checked, and each missing one is logged, before the
    /// first missing field is reported.
    pub fn validate(self) -> Result<RunParameters> {
        let checks = [
            (ENV_EMULATOR_SERIAL, self.emulator_serial.trim().is_empty()),
            (ENV_ANDROID_HOME, self.android_home.trim().is_empty()),
            (ENV_BOOT_TIMEOUT, self.boot_timeout.trim().is_empty()),
        ];

        let missing: Vec<&'static str> = checks
            .iter()
            .filter(|(_, empty)| *empty)
            .map(|(name, _)| *name)
            .collect();

        for name in &missing {
            warn!("Required input `{}` is empty", name);
        }

        if let Some(&first) = missing.first() {
            return Err(BootWaitError::MissingParameter(first));
        }

        Ok(RunParameters {
            device_id: self.emulator_serial.trim().to_string(),
            boot_timeout: self.boot_timeout.trim().to_string(),
            tooling_path: PathBuf::from(self.android_home.trim()),
        })
    }
}

impl RunParameters {
    pub fn log_summary(&self) {
        info!("Configs:");
        info!("- {}: {}", ENV_EMULATOR_SERIAL, self.device_id);
        info!("- {}: {}", ENV_BOOT_TIMEOUT, self.boot_timeout);
        info!("- {}: {}", ENV_ANDROID_HOME, self.tooling_path.display());
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_boot_timeout(&self.boot_timeout)
    }
}

/// Parses a decimal count of seconds. Zero, negatives and non-integers are
/// rejected.
pub fn parse_boot_timeout(value: &str) -> Result<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(BootWaitError::InvalidTimeout(value.to_string())),
    }
}

/// An empty value falls back to [`DEFAULT_POLL_INTERVAL`], since CI runners
/// export unset inputs as empty strings.
pub fn parse_poll_interval(value: &str) -> Result<Duration> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_POLL_INTERVAL);
    }
    match trimmed.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(BootWaitError::InvalidPollInterval(value.to_string())),
    }
}
