//! Append-only operator activity log.
//!
//! Each entry is one line: `[YYYY-MM-DD HH:MM:SS] message`, local time.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::StoreResult;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a single log line (without the trailing newline).
pub fn format_entry(at: NaiveDateTime, message: &str) -> String {
    format!("[{}] {}", at.format(TIMESTAMP_FORMAT), message)
}

/// Activity log backed by a file opened in append mode.
#[derive(Debug)]
pub struct ActivityLog {
    path: PathBuf,
    file: File,
}

impl ActivityLog {
    /// Open (creating if needed) the log at `path`.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry stamped with the current local time and flush it.
    pub fn record(&mut self, message: &str) -> StoreResult<()> {
        self.record_at(Local::now().naive_local(), message)
    }

    /// Append one entry with an explicit timestamp.
    pub fn record_at(&mut self, at: NaiveDateTime, message: &str) -> StoreResult<()> {
        tracing::info!(target: "activity", "{message}");
        writeln!(self.file, "{}", format_entry(at, message))?;
        self.file.flush()?;
        Ok(())
    }

    /// Every entry written so far, oldest first.
    pub fn entries(&self) -> StoreResult<Vec<String>> {
        let content = fs::read_to_string(&self.path)?;
        Ok(content.lines().map(str::to_string).collect())
    }
}
