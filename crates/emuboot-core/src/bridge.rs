use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Device bridge binary not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command `{command}` failed with exit {status}: {output}")]
    CommandFailed {
        command: String,
        status: i32,
        output: String,
    },
}

/// Device-level queries and actions the boot wait depends on.
///
/// Calls are made sequentially by a single caller, one at a time.
#[async_trait]
pub trait DeviceBridge: Send + Sync {
    /// Reports whether `serial` has finished booting.
    ///
    /// `Ok(false)` means "not yet"; an `Err` means the bridge itself failed.
    async fn is_device_booted(&self, serial: &str) -> Result<bool, BridgeError>;

    /// Dismisses the lock screen on `serial`.
    async fn unlock_device(&self, serial: &str) -> Result<(), BridgeError>;
}
