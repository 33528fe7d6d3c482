//! Compressor station records.

use pn_core::{CoreError, Real, StationId, percent_of, validate_name};

use crate::error::{AssetError, AssetResult};

/// Operator input for a new station; the registry assigns the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStation {
    pub name: String,
    pub total_workshops: u32,
    pub working_workshops: u32,
    pub class: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressorStation {
    pub id: StationId,
    pub name: String,
    total_workshops: u32,
    working_workshops: u32,
    pub class: u32,
}

impl CompressorStation {
    pub fn new(id: StationId, spec: NewStation) -> AssetResult<Self> {
        let name = validate_name(&spec.name)?;
        if spec.working_workshops > spec.total_workshops {
            return Err(AssetError::WorkingExceedsTotal {
                working: spec.working_workshops,
                total: spec.total_workshops,
            });
        }
        if spec.class == 0 {
            return Err(CoreError::NotPositive {
                what: "station class",
                value: 0.0,
            }
            .into());
        }
        Ok(Self {
            id,
            name,
            total_workshops: spec.total_workshops,
            working_workshops: spec.working_workshops,
            class: spec.class,
        })
    }

    pub fn total_workshops(&self) -> u32 {
        self.total_workshops
    }

    pub fn working_workshops(&self) -> u32 {
        self.working_workshops
    }

    /// Share of idle workshops in percent; 0 for a station without workshops.
    pub fn unused_percent(&self) -> Real {
        percent_of(
            self.total_workshops - self.working_workshops,
            self.total_workshops,
        )
    }

    /// Start (`+n`) or stop (`-n`) workshops, clamped to `[0, total]`.
    ///
    /// Returns the new working count.
    pub fn adjust_working(&mut self, delta: i32) -> u32 {
        let next = i64::from(self.working_workshops) + i64::from(delta);
        let clamped = next.clamp(0, i64::from(self.total_workshops));
        // clamped lies within [0, total] and total fits in u32
        self.working_workshops = u32::try_from(clamped).unwrap_or(self.total_workshops);
        self.working_workshops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(total: u32, working: u32) -> CompressorStation {
        CompressorStation::new(
            StationId::new(1).unwrap(),
            NewStation {
                name: "North".into(),
                total_workshops: total,
                working_workshops: working,
                class: 2,
            },
        )
        .unwrap()
    }

    #[test]
    fn start_workshop_clamps_at_total() {
        let mut st = station(3, 3);
        assert_eq!(st.adjust_working(1), 3);
    }

    #[test]
    fn stop_workshop_clamps_at_zero() {
        let mut st = station(3, 0);
        assert_eq!(st.adjust_working(-1), 0);
    }

    #[test]
    fn large_deltas_clamp() {
        let mut st = station(5, 2);
        assert_eq!(st.adjust_working(i32::MAX), 5);
        assert_eq!(st.adjust_working(i32::MIN), 0);
    }

    #[test]
    fn unused_percent() {
        assert_eq!(station(4, 1).unused_percent(), 75.0);
        assert_eq!(station(0, 0).unused_percent(), 0.0);
    }

    #[test]
    fn working_above_total_is_rejected() {
        let err = CompressorStation::new(
            StationId::new(1).unwrap(),
            NewStation {
                name: "South".into(),
                total_workshops: 2,
                working_workshops: 3,
                class: 1,
            },
        )
        .unwrap_err();
        assert!(matches!(err, AssetError::WorkingExceedsTotal { .. }));
    }
}
