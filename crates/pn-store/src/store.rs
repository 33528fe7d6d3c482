//! Data file storage API.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use pn_assets::AssetRegistry;

use crate::format::{parse_registry, render_registry};
use crate::{StoreError, StoreResult};

/// A pipes-and-stations data file on disk.
#[derive(Clone, Debug)]
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Sibling file the contents are staged in before replacing the target.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write every record, replacing the file.
    ///
    /// The existing file is untouched unless the new contents were fully
    /// written.
    pub fn save(&self, registry: &AssetRegistry) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let staging = self.staging_path();
        let written = fs::File::create(&staging).and_then(|mut file| {
            file.write_all(render_registry(registry).as_bytes())?;
            file.sync_all()
        });
        if let Err(err) = written.and_then(|()| fs::rename(&staging, &self.path)) {
            if let Err(cleanup) = fs::remove_file(&staging) {
                tracing::debug!(path = %staging.display(), %cleanup, "staging file left behind");
            }
            return Err(err.into());
        }
        tracing::info!(
            path = %self.path.display(),
            pipes = registry.pipes().len(),
            stations = registry.stations().len(),
            "saved data file"
        );
        Ok(())
    }

    /// Read the file into a fresh registry.
    pub fn load(&self) -> StoreResult<AssetRegistry> {
        if !self.path.exists() {
            return Err(StoreError::NotFound {
                path: self.path.display().to_string(),
            });
        }
        let content = fs::read_to_string(&self.path)?;
        let registry = parse_registry(&content)?;
        tracing::info!(
            path = %self.path.display(),
            pipes = registry.pipes().len(),
            stations = registry.stations().len(),
            "loaded data file"
        );
        Ok(registry)
    }
}
