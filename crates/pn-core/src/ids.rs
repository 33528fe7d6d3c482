use core::fmt;
use core::num::NonZeroU32;

use crate::{CoreError, CoreResult};

macro_rules! asset_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Wrap a raw 1-based identity. Returns `None` for zero.
            pub fn new(raw: u32) -> Option<Self> {
                NonZeroU32::new(raw).map(Self)
            }

            /// The raw 1-based identity, as shown to operators and persisted.
            pub fn get(self) -> u32 {
                self.0.get()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.get())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.get())
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.get()
            }
        }
    };
}

asset_id!(
    /// Identity of a pipe segment.
    ///
    /// - `u32` keeps memory small
    /// - `NonZero` enables `Option<PipeId>` to be pointer-optimized
    PipeId,
    "PipeId"
);

asset_id!(
    /// Identity of a compressor station.
    StationId,
    "StationId"
);

/// Monotonic identity source.
///
/// Hands out 1, 2, 3, ... and never goes backwards, so an identity is never
/// reused even after the record that held it is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    last: u32,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSequence {
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Make sure future identities are strictly greater than `raw`.
    pub fn observe(&mut self, raw: u32) {
        self.last = self.last.max(raw);
    }

    /// Last identity handed out or observed (0 if none).
    pub fn last(&self) -> u32 {
        self.last
    }

    pub fn next_pipe(&mut self) -> CoreResult<PipeId> {
        self.advance().map(PipeId)
    }

    pub fn next_station(&mut self) -> CoreResult<StationId> {
        self.advance().map(StationId)
    }

    /// Fails once `u32::MAX` has been handed out or observed; the sequence
    /// is left unchanged.
    fn advance(&mut self) -> CoreResult<NonZeroU32> {
        let next = self
            .last
            .checked_add(1)
            .and_then(NonZeroU32::new)
            .ok_or(CoreError::IdsExhausted)?;
        self.last = next.get();
        Ok(next)
    }
}
