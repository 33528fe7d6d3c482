//! pn-store: record persistence and the operator activity log.

pub mod activity;
pub mod format;
pub mod store;

pub use activity::{ActivityLog, format_entry};
pub use format::{parse_registry, render_registry};
pub use store::DataFile;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Section {section} declares {declared} records but contains {found}")]
    CountMismatch {
        section: &'static str,
        declared: usize,
        found: usize,
    },

    #[error("Invalid record: {0}")]
    Asset(#[from] pn_assets::AssetError),

    #[error("Data file not found: {path}")]
    NotFound { path: String },
}
