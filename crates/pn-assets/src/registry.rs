//! Identity-keyed record collections for pipes and stations.

use std::collections::HashSet;

use pn_core::{IdSequence, PipeId, Real, StationId};

use crate::error::{AssetError, AssetResult};
use crate::pipe::{NewPipe, PipeSegment};
use crate::station::{CompressorStation, NewStation};

/// Owns every pipe segment and compressor station.
///
/// Records keep insertion order. Everything outside the registry refers to
/// records by identity only.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    pipes: Vec<PipeSegment>,
    stations: Vec<CompressorStation>,
    pipe_ids: IdSequence,
    station_ids: IdSequence,
}

impl AssetRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from previously stored records.
    ///
    /// Identity sequences resume after the largest identity seen.
    pub fn from_records(
        pipes: Vec<PipeSegment>,
        stations: Vec<CompressorStation>,
    ) -> AssetResult<Self> {
        let mut seen = HashSet::new();
        for pipe in &pipes {
            if !seen.insert(pipe.id.get()) {
                return Err(AssetError::DuplicateId {
                    what: "pipe",
                    id: pipe.id.get(),
                });
            }
        }
        seen.clear();
        for station in &stations {
            if !seen.insert(station.id.get()) {
                return Err(AssetError::DuplicateId {
                    what: "station",
                    id: station.id.get(),
                });
            }
        }

        let mut pipe_ids = IdSequence::new();
        pipes.iter().for_each(|p| pipe_ids.observe(p.id.get()));
        let mut station_ids = IdSequence::new();
        stations.iter().for_each(|s| station_ids.observe(s.id.get()));

        Ok(Self {
            pipes,
            stations,
            pipe_ids,
            station_ids,
        })
    }

    /// Add a pipe segment and return its identity.
    pub fn add_pipe(&mut self, spec: NewPipe) -> AssetResult<PipeId> {
        self.add_pipe_with(|_| spec)
    }

    /// Add a pipe whose fields may depend on the identity it is about to get.
    ///
    /// The identity is consumed even if validation fails.
    pub fn add_pipe_with(&mut self, spec: impl FnOnce(PipeId) -> NewPipe) -> AssetResult<PipeId> {
        let id = self.pipe_ids.next_pipe()?;
        let pipe = PipeSegment::new(id, spec(id))?;
        self.pipes.push(pipe);
        Ok(id)
    }

    /// Add a compressor station and return its identity.
    pub fn add_station(&mut self, spec: NewStation) -> AssetResult<StationId> {
        let id = self.station_ids.next_station()?;
        let station = CompressorStation::new(id, spec)?;
        self.stations.push(station);
        Ok(id)
    }

    /// All pipes in insertion order.
    pub fn pipes(&self) -> &[PipeSegment] {
        &self.pipes
    }

    /// All stations in insertion order.
    pub fn stations(&self) -> &[CompressorStation] {
        &self.stations
    }

    /// Get a pipe by ID (returns None if unknown).
    pub fn pipe(&self, id: PipeId) -> Option<&PipeSegment> {
        self.pipes.iter().find(|p| p.id == id)
    }

    /// Get a station by ID (returns None if unknown).
    pub fn station(&self, id: StationId) -> Option<&CompressorStation> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn require_pipe(&self, id: PipeId) -> AssetResult<&PipeSegment> {
        self.pipe(id).ok_or(AssetError::UnknownPipe(id))
    }

    pub fn require_station(&self, id: StationId) -> AssetResult<&CompressorStation> {
        self.station(id).ok_or(AssetError::UnknownStation(id))
    }

    fn pipe_mut(&mut self, id: PipeId) -> AssetResult<&mut PipeSegment> {
        self.pipes
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AssetError::UnknownPipe(id))
    }

    fn station_mut(&mut self, id: StationId) -> AssetResult<&mut CompressorStation> {
        self.stations
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AssetError::UnknownStation(id))
    }

    /// Pipes whose name contains `needle`.
    pub fn pipes_by_name(&self, needle: &str) -> Vec<PipeId> {
        self.pipes
            .iter()
            .filter(|p| p.name.contains(needle))
            .map(|p| p.id)
            .collect()
    }

    /// Pipes with the given repair status.
    pub fn pipes_by_repair(&self, under_repair: bool) -> Vec<PipeId> {
        self.pipes
            .iter()
            .filter(|p| p.under_repair == under_repair)
            .map(|p| p.id)
            .collect()
    }

    /// Stations whose name contains `needle`.
    pub fn stations_by_name(&self, needle: &str) -> Vec<StationId> {
        self.stations
            .iter()
            .filter(|s| s.name.contains(needle))
            .map(|s| s.id)
            .collect()
    }

    /// Stations with at least `min_percent` of their workshops idle.
    pub fn stations_by_unused(&self, min_percent: Real) -> Vec<StationId> {
        self.stations
            .iter()
            .filter(|s| s.unused_percent() >= min_percent)
            .map(|s| s.id)
            .collect()
    }

    /// Flip the under-repair flag on every listed pipe.
    ///
    /// All identities are checked before anything changes.
    pub fn toggle_repair(&mut self, ids: &[PipeId]) -> AssetResult<usize> {
        for &id in ids {
            self.require_pipe(id)?;
        }
        for &id in ids {
            let pipe = self.pipe_mut(id)?;
            pipe.under_repair = !pipe.under_repair;
        }
        tracing::debug!(count = ids.len(), "toggled repair status");
        Ok(ids.len())
    }

    /// Remove the listed pipes.
    ///
    /// Refused as a whole if any of them is unknown or already in use, since
    /// a network edge may reference it.
    pub fn remove_pipes(&mut self, ids: &[PipeId]) -> AssetResult<usize> {
        for &id in ids {
            if self.require_pipe(id)?.is_in_use() {
                return Err(AssetError::PipeInUse(id));
            }
        }
        let before = self.pipes.len();
        self.pipes.retain(|p| !ids.contains(&p.id));
        let removed = before - self.pipes.len();
        tracing::debug!(removed, "removed pipes");
        Ok(removed)
    }

    /// Mark a pipe as consumed by a connection.
    pub fn mark_in_use(&mut self, id: PipeId) -> AssetResult<()> {
        let pipe = self.pipe_mut(id)?;
        if pipe.in_use {
            return Err(AssetError::PipeInUse(id));
        }
        pipe.in_use = true;
        Ok(())
    }

    /// Start or stop workshops at a station; returns the new working count.
    pub fn adjust_working(&mut self, id: StationId, delta: i32) -> AssetResult<u32> {
        Ok(self.station_mut(id)?.adjust_working(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pn_core::{CapacityClass, CoreError};

    fn pipe(name: &str, mm: u32) -> NewPipe {
        NewPipe {
            name: name.into(),
            length_km: 10.0,
            diameter: CapacityClass::from_mm(mm).unwrap(),
        }
    }

    fn station(name: &str, total: u32, working: u32) -> NewStation {
        NewStation {
            name: name.into(),
            total_workshops: total,
            working_workshops: working,
            class: 1,
        }
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut reg = AssetRegistry::new();
        let a = reg.add_pipe(pipe("A", 500)).unwrap();
        let b = reg.add_pipe(pipe("B", 500)).unwrap();
        assert_eq!((a.get(), b.get()), (1, 2));

        reg.remove_pipes(&[b]).unwrap();
        let c = reg.add_pipe(pipe("C", 500)).unwrap();
        assert_eq!(c.get(), 3);
    }

    #[test]
    fn failed_validation_adds_nothing() {
        let mut reg = AssetRegistry::new();
        assert!(reg.add_pipe(pipe("", 500)).is_err());
        assert!(reg.pipes().is_empty());
    }

    #[test]
    fn search_by_name_and_repair() {
        let mut reg = AssetRegistry::new();
        let a = reg.add_pipe(pipe("north-1", 500)).unwrap();
        let b = reg.add_pipe(pipe("north-2", 700)).unwrap();
        let c = reg.add_pipe(pipe("south", 700)).unwrap();
        reg.toggle_repair(&[b]).unwrap();

        assert_eq!(reg.pipes_by_name("north"), vec![a, b]);
        assert_eq!(reg.pipes_by_repair(true), vec![b]);
        assert_eq!(reg.pipes_by_repair(false), vec![a, c]);
    }

    #[test]
    fn toggle_with_unknown_id_changes_nothing() {
        let mut reg = AssetRegistry::new();
        let a = reg.add_pipe(pipe("A", 500)).unwrap();
        let bogus = PipeId::new(99).unwrap();
        assert_eq!(
            reg.toggle_repair(&[a, bogus]),
            Err(AssetError::UnknownPipe(bogus))
        );
        assert!(!reg.pipe(a).unwrap().under_repair);
    }

    #[test]
    fn in_use_pipes_cannot_be_removed() {
        let mut reg = AssetRegistry::new();
        let a = reg.add_pipe(pipe("A", 500)).unwrap();
        let b = reg.add_pipe(pipe("B", 500)).unwrap();
        reg.mark_in_use(a).unwrap();

        assert_eq!(reg.remove_pipes(&[a, b]), Err(AssetError::PipeInUse(a)));
        assert_eq!(reg.pipes().len(), 2);
    }

    #[test]
    fn mark_in_use_twice_fails() {
        let mut reg = AssetRegistry::new();
        let a = reg.add_pipe(pipe("A", 500)).unwrap();
        reg.mark_in_use(a).unwrap();
        assert_eq!(reg.mark_in_use(a), Err(AssetError::PipeInUse(a)));
    }

    #[test]
    fn stations_by_unused_threshold() {
        let mut reg = AssetRegistry::new();
        let idle = reg.add_station(station("Idle", 4, 1)).unwrap();
        let _busy = reg.add_station(station("Busy", 4, 4)).unwrap();
        assert_eq!(reg.stations_by_unused(50.0), vec![idle]);
        assert_eq!(reg.stations_by_name("Bu").len(), 1);
    }

    #[test]
    fn adjust_working_unknown_station() {
        let mut reg = AssetRegistry::new();
        let bogus = StationId::new(5).unwrap();
        assert_eq!(
            reg.adjust_working(bogus, 1),
            Err(AssetError::UnknownStation(bogus))
        );
    }

    #[test]
    fn from_records_resumes_sequences() {
        let mut reg = AssetRegistry::new();
        reg.add_pipe(pipe("A", 500)).unwrap();
        reg.add_pipe(pipe("B", 500)).unwrap();
        let pipes = reg.pipes().to_vec();

        let mut restored = AssetRegistry::from_records(pipes, Vec::new()).unwrap();
        let next = restored.add_pipe(pipe("C", 500)).unwrap();
        assert_eq!(next.get(), 3);
        let st = restored.add_station(station("S", 1, 0)).unwrap();
        assert_eq!(st.get(), 1);
    }

    #[test]
    fn from_records_rejects_duplicates() {
        let id = PipeId::new(1).unwrap();
        let a = PipeSegment::new(id, pipe("A", 500)).unwrap();
        let b = PipeSegment::new(id, pipe("B", 500)).unwrap();
        let err = AssetRegistry::from_records(vec![a, b], Vec::new()).unwrap_err();
        assert_eq!(err, AssetError::DuplicateId { what: "pipe", id: 1 });
    }

    #[test]
    fn exhausted_identities_add_nothing() {
        let last = PipeId::new(u32::MAX).unwrap();
        let loaded = PipeSegment::new(last, pipe("Loaded", 700)).unwrap();
        let mut reg = AssetRegistry::from_records(vec![loaded], Vec::new()).unwrap();

        assert_eq!(
            reg.add_pipe(pipe("Fresh", 700)),
            Err(AssetError::Core(CoreError::IdsExhausted))
        );
        assert_eq!(reg.pipes().len(), 1);
        assert_eq!(reg.pipes()[0].name, "Loaded");
    }
}
