//! Capacity class: nominal pipe diameter in millimetres.

use core::fmt;

use crate::{CoreError, CoreResult};

/// Nominal diameter category used to match pipes to requested connections.
///
/// Conventionally one of [`CapacityClass::STANDARD_MM`], but any positive
/// value is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CapacityClass(u32);

impl CapacityClass {
    pub const STANDARD_MM: [u32; 4] = [500, 700, 1000, 1400];

    pub fn from_mm(mm: u32) -> CoreResult<Self> {
        if mm == 0 {
            return Err(CoreError::NotPositive {
                what: "capacity class",
                value: 0.0,
            });
        }
        Ok(Self(mm))
    }

    pub fn mm(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CapacityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.0)
    }
}
