use std::time::Duration;

use thiserror::Error;

use crate::bridge::BridgeError;

#[derive(Error, Debug)]
pub enum BootWaitError {
    #[error("Issue with input: no {0} parameter specified")]
    MissingParameter(&'static str),

    #[error("Failed to locate Android SDK: {0}")]
    ToolingLookupFailed(String),

    #[error("Failed to create adb client: {0}")]
    ClientConstructionFailed(String),

    #[error("Failed to parse boot timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),

    #[error("Failed to parse poll interval {0:?}: expected a positive number of seconds")]
    InvalidPollInterval(String),

    #[error("Failed to check emulator boot status: {0}")]
    BootCheckFailed(#[source] BridgeError),

    #[error("Waiting for emulator boot timed out after {} seconds", .0.as_secs())]
    BootTimeout(Duration),

    #[error("Unlock device command failed: {0}")]
    UnlockFailed(#[source] BridgeError),
}

pub type Result<T> = std::result::Result<T, BootWaitError>;
