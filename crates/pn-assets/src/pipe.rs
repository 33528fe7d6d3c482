//! Pipe segment records.

use pn_core::{CapacityClass, Length, PipeId, as_km, ensure_positive, km, validate_name};

use crate::error::AssetResult;

/// Operator input for a new pipe segment; the registry assigns the identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPipe {
    pub name: String,
    pub length_km: f64,
    pub diameter: CapacityClass,
}

/// A physical pipe segment.
///
/// `in_use` is set once by the connection that consumes the segment and is
/// never cleared again.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeSegment {
    pub id: PipeId,
    pub name: String,
    pub length: Length,
    pub diameter: CapacityClass,
    pub under_repair: bool,
    pub(crate) in_use: bool,
}

impl PipeSegment {
    /// Build a validated segment with the given identity.
    pub fn new(id: PipeId, spec: NewPipe) -> AssetResult<Self> {
        let name = validate_name(&spec.name)?;
        let length_km = ensure_positive(spec.length_km, "pipe length")?;
        Ok(Self {
            id,
            name,
            length: km(length_km),
            diameter: spec.diameter,
            under_repair: false,
            in_use: false,
        })
    }

    /// Rebuild a segment read back from storage.
    ///
    /// Storage carries no in-use flag, so restored segments start available.
    pub fn restore(id: PipeId, spec: NewPipe, under_repair: bool) -> AssetResult<Self> {
        let mut pipe = Self::new(id, spec)?;
        pipe.under_repair = under_repair;
        Ok(pipe)
    }

    pub fn length_km(&self) -> f64 {
        as_km(self.length)
    }

    pub fn is_in_use(&self) -> bool {
        self.in_use
    }

    /// Free for allocation: not under repair and not already consumed.
    pub fn is_available(&self) -> bool {
        !self.under_repair && !self.in_use
    }
}
