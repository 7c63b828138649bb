pub mod bridge;
pub mod config;
pub mod error;

pub use bridge::{BridgeError, DeviceBridge};
pub use config::{
    parse_boot_timeout, parse_poll_interval, RawInputs, RunParameters, DEFAULT_POLL_INTERVAL,
    ENV_ANDROID_HOME, ENV_BOOT_TIMEOUT, ENV_EMULATOR_SERIAL, ENV_POLL_INTERVAL,
};
pub use error::{BootWaitError, Result};
