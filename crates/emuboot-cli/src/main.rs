use std::process::ExitCode;

use clap::Parser;
use emuboot_adb::{AdbClient, AndroidSdk};
use emuboot_core::{
    parse_poll_interval, BootWaitError, RawInputs, Result, ENV_ANDROID_HOME, ENV_BOOT_TIMEOUT,
    ENV_EMULATOR_SERIAL, ENV_POLL_INTERVAL,
};
use emuboot_runner::{BootReport, BootWaitRunner};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "emuboot")]
#[command(about = "Wait for an Android emulator to finish booting, then unlock it", long_about = None)]
struct Cli {
    /// Serial of the emulator to wait for (e.g. emulator-5554)
    #[arg(long, env = ENV_EMULATOR_SERIAL, default_value = "", hide_default_value = true)]
    emulator_serial: String,

    /// Maximum time to wait for boot, in seconds
    #[arg(long, env = ENV_BOOT_TIMEOUT, default_value = "", hide_default_value = true)]
    boot_timeout: String,

    /// Android SDK installation path
    #[arg(long, env = ENV_ANDROID_HOME, default_value = "", hide_default_value = true)]
    android_home: String,

    /// Seconds between boot checks [default: 5]
    #[arg(long, env = ENV_POLL_INTERVAL, default_value = "", hide_default_value = true)]
    poll_interval: String,
}

impl Cli {
    fn inputs(&self) -> RawInputs {
        RawInputs::new(
            self.emulator_serial.as_str(),
            self.boot_timeout.as_str(),
            self.android_home.as_str(),
        )
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<BootReport> {
    let params = cli.inputs().validate()?;
    params.log_summary();

    let sdk = AndroidSdk::locate(&params.tooling_path)
        .map_err(|e| BootWaitError::ToolingLookupFailed(e.to_string()))?;
    let adb =
        AdbClient::new(&sdk).map_err(|e| BootWaitError::ClientConstructionFailed(e.to_string()))?;
    info!("Using adb at {}", adb.adb_path().display());

    let timeout = params.timeout()?;
    let poll_interval = parse_poll_interval(&cli.poll_interval)?;

    BootWaitRunner::new(adb)
        .with_poll_interval(poll_interval)
        .wait_and_unlock(&params.device_id, timeout)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use emuboot_core::DEFAULT_POLL_INTERVAL;
    use tempfile::TempDir;

    fn cli(serial: &str, timeout: &str, android_home: &str) -> Cli {
        Cli {
            emulator_serial: serial.to_string(),
            boot_timeout: timeout.to_string(),
            android_home: android_home.to_string(),
            poll_interval: "1".to_string(),
        }
    }

    /// SDK whose adb is an empty file: it passes lookup but cannot run.
    fn sdk_with_inert_adb() -> TempDir {
        let dir = TempDir::new().unwrap();
        let sdk = AndroidSdk::locate(dir.path()).unwrap();
        std::fs::create_dir_all(sdk.platform_tools()).unwrap();
        std::fs::write(sdk.adb_path(), "").unwrap();
        dir
    }

    #[test]
    fn test_cli_reads_flags() {
        let cli = Cli::try_parse_from([
            "emuboot",
            "--emulator-serial",
            "emulator-5556",
            "--boot-timeout",
            "600",
            "--android-home",
            "/opt/android-sdk",
            "--poll-interval",
            "2",
        ])
        .unwrap();

        assert_eq!(
            cli.inputs(),
            RawInputs::new("emulator-5556", "600", "/opt/android-sdk")
        );
        assert_eq!(cli.poll_interval, "2");
    }

    #[test]
    fn test_empty_poll_interval_env_falls_back_to_default() {
        std::env::set_var(ENV_POLL_INTERVAL, "");
        let parsed = Cli::try_parse_from(["emuboot"]);
        std::env::remove_var(ENV_POLL_INTERVAL);

        let cli = parsed.unwrap();
        assert_eq!(cli.poll_interval, "");
        assert_eq!(
            parse_poll_interval(&cli.poll_interval).unwrap(),
            DEFAULT_POLL_INTERVAL
        );
    }

    #[tokio::test]
    async fn test_each_missing_input_fails_before_any_boot_check() {
        let sdk = sdk_with_inert_adb();
        let home = sdk.path().to_str().unwrap();

        let cases = [
            (cli("", "300", home), ENV_EMULATOR_SERIAL),
            (cli("emulator-5554", "", home), ENV_BOOT_TIMEOUT),
            (cli("emulator-5554", "300", ""), ENV_ANDROID_HOME),
        ];

        for (cli, expected) in cases {
            match run(&cli).await {
                Err(BootWaitError::MissingParameter(name)) => assert_eq!(name, expected),
                other => panic!("expected MissingParameter({expected}), got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_invalid_poll_interval_fails_before_any_boot_check() {
        let sdk = sdk_with_inert_adb();

        let mut cli = cli("emulator-5554", "300", sdk.path().to_str().unwrap());
        cli.poll_interval = "0".to_string();

        let err = run(&cli).await.unwrap_err();
        assert!(matches!(err, BootWaitError::InvalidPollInterval(v) if v == "0"));
    }

    #[tokio::test]
    async fn test_unknown_sdk_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("sdk");

        let err = run(&cli("emulator-5554", "300", missing.to_str().unwrap()))
            .await
            .unwrap_err();
        assert!(matches!(err, BootWaitError::ToolingLookupFailed(_)));
    }

    #[tokio::test]
    async fn test_sdk_without_adb() {
        let dir = TempDir::new().unwrap();

        let err = run(&cli("emulator-5554", "300", dir.path().to_str().unwrap()))
            .await
            .unwrap_err();
        assert!(matches!(err, BootWaitError::ClientConstructionFailed(_)));
    }

    #[tokio::test]
    async fn test_invalid_timeout_fails_before_any_boot_check() {
        let sdk = sdk_with_inert_adb();

        let err = run(&cli("emulator-5554", "abc", sdk.path().to_str().unwrap()))
            .await
            .unwrap_err();
        assert!(matches!(err, BootWaitError::InvalidTimeout(v) if v == "abc"));
    }
}
