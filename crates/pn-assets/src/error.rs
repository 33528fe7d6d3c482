//! Asset registry error types.

use pn_core::{CapacityClass, CoreError, PipeId, StationId};
use thiserror::Error;

pub type AssetResult<T> = Result<T, AssetError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("Unknown pipe {0}")]
    UnknownPipe(PipeId),

    #[error("Unknown station {0}")]
    UnknownStation(StationId),

    #[error("Pipe {0} is already in use by a connection")]
    PipeInUse(PipeId),

    #[error("Pipe {pipe} is not eligible for a {class} connection")]
    IneligiblePipe { pipe: PipeId, class: CapacityClass },

    #[error("Working workshops ({working}) exceed total workshops ({total})")]
    WorkingExceedsTotal { working: u32, total: u32 },

    #[error("Duplicate {what} identity {id}")]
    DuplicateId { what: &'static str, id: u32 },

    #[error("Pipe selection aborted: {reason}")]
    SelectionAborted { reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}
