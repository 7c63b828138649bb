use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Android SDK path does not exist: {0}")]
    NotFound(PathBuf),
    #[error("Android SDK path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// A located Android SDK installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidSdk {
    root: PathBuf,
}

impl AndroidSdk {
    #[instrument]
    pub fn locate(path: &Path) -> Result<Self, SdkError> {
        if !path.exists() {
            return Err(SdkError::NotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(SdkError::NotADirectory(path.to_path_buf()));
        }

        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        debug!("Android SDK root: {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn platform_tools(&self) -> PathBuf {
        self.root.join("platform-tools")
    }

    pub fn adb_path(&self) -> PathBuf {
        let name = if cfg!(windows) { "adb.exe" } else { "adb" };
        self.platform_tools().join(name)
    }
}
