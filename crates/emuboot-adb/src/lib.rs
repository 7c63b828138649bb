pub mod adb;
pub mod sdk;

pub use adb::{AdbClient, AdbError, BootProps};
pub use sdk::{AndroidSdk, SdkError};
