//! Errors raised while the daemon locates and reads its data files.

use std::path::PathBuf;

use numlab::error::ScenarioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("could not determine the platform data directory")]
    NoDataDir,

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("scenario file {} rejected: {source}", path.display())]
    Scenario {
        path: PathBuf,
        #[source]
        source: ScenarioError,
    },
}
