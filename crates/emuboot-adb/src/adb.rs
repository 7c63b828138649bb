use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use emuboot_core::{BridgeError, DeviceBridge};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::sdk::AndroidSdk;

const PROP_DEV_BOOTCOMPLETE: &str = "dev.bootcomplete";
const PROP_SYS_BOOT_COMPLETED: &str = "sys.boot_completed";
const PROP_BOOTANIM: &str = "init.svc.bootanim";

const KEYCODE_MENU: &str = "82";
const KEYCODE_BACK: &str = "4";

#[derive(Debug, Error)]
pub enum AdbError {
    #[error("adb binary doesn't exist at: {0}")]
    BinaryMissing(PathBuf),
}

/// The three boot properties an emulator reports, trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootProps {
    pub dev_bootcomplete: String,
    pub sys_boot_completed: String,
    pub bootanim: String,
}

impl BootProps {
    pub fn is_booted(&self) -> bool {
        self.dev_bootcomplete == "1"
            && self.sys_boot_completed == "1"
            && self.bootanim == "stopped"
    }
}

/// Device bridge backed by the SDK's `adb` binary.
#[derive(Debug, Clone)]
pub struct AdbClient {
    adb: PathBuf,
}

impl AdbClient {
    pub fn new(sdk: &AndroidSdk) -> Result<Self, AdbError> {
        let adb = sdk.adb_path();
        if !adb.is_file() {
            return Err(AdbError::BinaryMissing(adb));
        }
        Ok(Self { adb })
    }

    pub fn adb_path(&self) -> &Path {
        &self.adb
    }

    pub async fn get_prop(&self, serial: &str, prop: &str) -> Result<String, BridgeError> {
        self.shell(serial, &["getprop", prop]).await
    }

    pub async fn boot_props(&self, serial: &str) -> Result<BootProps, BridgeError> {
        Ok(BootProps {
            dev_bootcomplete: self.get_prop(serial, PROP_DEV_BOOTCOMPLETE).await?,
            sys_boot_completed: self.get_prop(serial, PROP_SYS_BOOT_COMPLETED).await?,
            bootanim: self.get_prop(serial, PROP_BOOTANIM).await?,
        })
    }

    pub async fn key_event(&self, serial: &str, keycode: &str) -> Result<(), BridgeError> {
        self.shell(serial, &["input", "keyevent", keycode]).await?;
        Ok(())
    }

    async fn shell(&self, serial: &str, args: &[&str]) -> Result<String, BridgeError> {
        let mut full = vec!["-s", serial, "shell"];
        full.extend_from_slice(args);
        self.run(&full).await
    }

    /// Runs adb and returns its trimmed stdout.
    async fn run(&self, args: &[&str]) -> Result<String, BridgeError> {
        let command = format!("adb {}", args.join(" "));
        debug!("$ {}", command);

        let output = Command::new(&self.adb)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    BridgeError::NotFound(self.adb.display().to_string())
                }
                _ => BridgeError::Io(e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!(status = ?output.status.code(), "{}", stdout);

        if output.status.success() {
            return Ok(stdout);
        }

        Err(BridgeError::CommandFailed {
            command,
            status: output.status.code().unwrap_or(-1),
            output: format_output(&stdout, &stderr),
        })
    }
}

#[async_trait]
impl DeviceBridge for AdbClient {
    #[instrument(skip(self))]
    async fn is_device_booted(&self, serial: &str) -> Result<bool, BridgeError> {
        let props = self.boot_props(serial).await?;
        debug!(?props, "Boot properties");
        Ok(props.is_booted())
    }

    #[instrument(skip(self))]
    async fn unlock_device(&self, serial: &str) -> Result<(), BridgeError> {
        self.key_event(serial, KEYCODE_MENU).await?;
        self.key_event(serial, KEYCODE_BACK).await
    }
}

fn format_output(stdout: &str, stderr: &str) -> String {
    match (stdout.is_empty(), stderr.is_empty()) {
        (true, true) => "no output".to_string(),
        (false, true) => stdout.to_string(),
        (true, false) => stderr.to_string(),
        (false, false) => format!("{}\n{}", stderr, stdout),
    }
}
