//! Cross-platform application paths

use std::fs;
use std::path::PathBuf;

use crate::error::DaemonError;

#[derive(Debug, Clone)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self, DaemonError> {
        let data_dir = Self::get_data_dir()?;

        // Ensure the directory tree exists so users can drop scenario files in.
        fs::create_dir_all(data_dir.join("scenarios")).map_err(|source| DaemonError::Io {
            path: data_dir.clone(),
            source,
        })?;

        Ok(Self { data_dir })
    }

    /// Rooted at an explicit directory (tests, portable installs).
    #[allow(dead_code)]
    pub fn at(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn get_data_dir() -> Result<PathBuf, DaemonError> {
        let base = dirs::data_dir().ok_or(DaemonError::NoDataDir)?;
        Ok(base.join("numlab"))
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn scenarios_dir(&self) -> PathBuf {
        self.data_dir.join("scenarios")
    }

    pub fn problems_file(&self) -> PathBuf {
        self.data_dir.join("problems.json")
    }
}
