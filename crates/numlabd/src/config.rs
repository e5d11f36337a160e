//! Daemon configuration and on-disk scenario/problem files.
//!
//! Everything read here is read-only input. The daemon never writes simulation
//! state back to disk.

use std::fs;
use std::path::Path;

use numlab::hints::ProblemSet;
use numlab::scenario::{builtin_catalog, SimulationConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::DaemonError;
use crate::paths::AppPaths;

fn default_addr() -> String {
    "127.0.0.1:9877".to_string()
}

fn default_target_fps() -> u32 {
    60
}

fn default_scenario() -> String {
    "robot_rendezvous".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
    /// Scenario loaded at startup.
    #[serde(default = "default_scenario")]
    pub scenario: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            target_fps: default_target_fps(),
            scenario: default_scenario(),
        }
    }
}

impl DaemonConfig {
    /// Read `config.json`, falling back to defaults when the file is absent.
    pub fn load(paths: &AppPaths) -> Result<Self, DaemonError> {
        let path = paths.config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = read(&path)?;
        Self::parse(&text).map_err(|source| DaemonError::Json { path, source })
    }

    pub fn parse(text: &str) -> serde_json::Result<Self> {
        let mut cfg: Self = serde_json::from_str(text)?;
        cfg.target_fps = cfg.target_fps.clamp(1, 240);
        Ok(cfg)
    }
}

fn read(path: &Path) -> Result<String, DaemonError> {
    fs::read_to_string(path).map_err(|source| DaemonError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Built-in scenarios plus every valid `scenarios/*.json`.
///
/// Invalid files are logged and skipped; a file whose id matches an existing
/// entry replaces it.
pub fn load_catalog(paths: &AppPaths) -> Vec<SimulationConfig> {
    let mut catalog = builtin_catalog();
    let dir = paths.scenarios_dir();
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Could not read {}: {}", dir.display(), e);
            return catalog;
        }
    };

    let mut files: Vec<_> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    for path in files {
        match load_scenario_file(&path) {
            Ok(cfg) => {
                info!("Loaded scenario `{}` from {}", cfg.id, path.display());
                merge(&mut catalog, cfg);
            }
            Err(e) => warn!("{}", e),
        }
    }
    catalog
}

pub fn load_scenario_file(path: &Path) -> Result<SimulationConfig, DaemonError> {
    let text = read(path)?;
    SimulationConfig::from_json(&text).map_err(|source| DaemonError::Scenario {
        path: path.to_path_buf(),
        source,
    })
}

fn merge(catalog: &mut Vec<SimulationConfig>, cfg: SimulationConfig) {
    match catalog.iter_mut().find(|c| c.id == cfg.id) {
        Some(slot) => *slot = cfg,
        None => catalog.push(cfg),
    }
}

/// `problems.json` if present and valid, otherwise the built-in set.
pub fn load_problems(paths: &AppPaths) -> ProblemSet {
    let path = paths.problems_file();
    if !path.exists() {
        return ProblemSet::robot_rendezvous();
    }
    let parsed = read(&path).and_then(|text| {
        ProblemSet::from_json(&text).map_err(|source| DaemonError::Json {
            path: path.clone(),
            source,
        })
    });
    match parsed {
        Ok(problems) => problems,
        Err(e) => {
            warn!("{}; using built-in problems", e);
            ProblemSet::robot_rendezvous()
        }
    }
}
