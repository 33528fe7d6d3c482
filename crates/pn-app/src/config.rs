//! Application configuration.
//!
//! Loaded from YAML; every field has a default so an empty file is valid.
//!
//! ```yaml
//! log_file: pipeline_log.txt
//! data_file: pipeline_data.txt
//! auto_pipe_length_km: 50.0
//! auto_pipe_prefix: Auto_Pipe_
//! capacity_classes: [500, 700, 1000, 1400]
//! ```

use std::path::{Path, PathBuf};

use pn_assets::{DEFAULT_AUTO_PIPE_LENGTH_KM, DEFAULT_AUTO_PIPE_PREFIX, PipeAllocator};
use pn_core::CapacityClass;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "pipenet.yaml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Activity log file.
    pub log_file: PathBuf,
    /// Data file used when the operator enters an empty filename.
    pub data_file: PathBuf,
    /// Length of pipes synthesized by the allocator.
    pub auto_pipe_length_km: f64,
    /// Name prefix of pipes synthesized by the allocator.
    pub auto_pipe_prefix: String,
    /// Capacity classes offered when connecting stations.
    pub capacity_classes: Vec<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("pipeline_log.txt"),
            data_file: PathBuf::from("pipeline_data.txt"),
            auto_pipe_length_km: DEFAULT_AUTO_PIPE_LENGTH_KM,
            auto_pipe_prefix: DEFAULT_AUTO_PIPE_PREFIX.to_string(),
            capacity_classes: CapacityClass::STANDARD_MM.to_vec(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let config: AppConfig = if content.trim().is_empty() {
            AppConfig::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Explicit path if given, else `pipenet.yaml` if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> AppResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(self.auto_pipe_length_km.is_finite() && self.auto_pipe_length_km > 0.0) {
            return Err(AppError::Config(format!(
                "auto_pipe_length_km must be positive, got {}",
                self.auto_pipe_length_km
            )));
        }
        if self.auto_pipe_prefix.trim().is_empty() || self.auto_pipe_prefix.contains('|') {
            return Err(AppError::Config(
                "auto_pipe_prefix must be non-empty and must not contain '|'".to_string(),
            ));
        }
        if self.capacity_classes.is_empty() || self.capacity_classes.contains(&0) {
            return Err(AppError::Config(
                "capacity_classes must list at least one positive class".to_string(),
            ));
        }
        Ok(())
    }

    /// Inclusive range of capacity classes accepted for a connection.
    pub fn class_range(&self) -> (u32, u32) {
        let min = self.capacity_classes.iter().copied().min().unwrap_or(1);
        let max = self.capacity_classes.iter().copied().max().unwrap_or(u32::MAX);
        (min, max)
    }

    /// Allocator configured with this synthesis policy.
    pub fn allocator(&self) -> AppResult<PipeAllocator> {
        Ok(PipeAllocator::new(
            self.auto_pipe_length_km,
            self.auto_pipe_prefix.clone(),
        )?)
    }
}
