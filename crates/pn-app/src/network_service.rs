//! Pipeline network service: registry, graph and the operations over them.

use pn_assets::{
    AssetRegistry, NewPipe, NewStation, PipeAllocator, PipeSelector, eligible_pipes,
};
use pn_core::{CapacityClass, PipeId, Real, StationId};
use pn_graph::{AdjacencyRow, NetworkGraph, TopologicalOrder};
use pn_store::DataFile;

use crate::error::AppResult;
use crate::events::NetworkEvent;

/// A committed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub source: StationId,
    pub target: StationId,
    pub pipe: PipeId,
    pub class: CapacityClass,
    /// True when the pipe was synthesized for this connection.
    pub created_pipe: bool,
}

/// Owns the asset registry and the network graph built over it.
///
/// Operations queue `NetworkEvent`s; drain them with [`take_events`].
///
/// [`take_events`]: PipelineNetwork::take_events
#[derive(Debug, Clone, Default)]
pub struct PipelineNetwork {
    registry: AssetRegistry,
    graph: NetworkGraph,
    allocator: PipeAllocator,
    events: Vec<NetworkEvent>,
}

impl PipelineNetwork {
    pub fn new(allocator: PipeAllocator) -> Self {
        Self {
            allocator,
            ..Self::default()
        }
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &NetworkGraph {
        &self.graph
    }

    /// Events recorded since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<NetworkEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn add_pipe(&mut self, spec: NewPipe) -> AppResult<PipeId> {
        let id = self.registry.add_pipe(spec)?;
        let name = self.registry.require_pipe(id)?.name.clone();
        self.events.push(NetworkEvent::PipeAdded { id, name });
        Ok(id)
    }

    pub fn add_station(&mut self, spec: NewStation) -> AppResult<StationId> {
        let id = self.registry.add_station(spec)?;
        let name = self.registry.require_station(id)?.name.clone();
        self.events.push(NetworkEvent::StationAdded { id, name });
        Ok(id)
    }

    pub fn find_pipes_by_name(&mut self, query: &str) -> Vec<PipeId> {
        let hits = self.registry.pipes_by_name(query);
        self.events.push(NetworkEvent::PipesSearchedByName {
            query: query.to_string(),
            hits: hits.len(),
        });
        hits
    }

    pub fn find_pipes_by_repair(&mut self, under_repair: bool) -> Vec<PipeId> {
        let hits = self.registry.pipes_by_repair(under_repair);
        self.events.push(NetworkEvent::PipesSearchedByRepair {
            under_repair,
            hits: hits.len(),
        });
        hits
    }

    pub fn find_stations_by_name(&mut self, query: &str) -> Vec<StationId> {
        let hits = self.registry.stations_by_name(query);
        self.events.push(NetworkEvent::StationsSearchedByName {
            query: query.to_string(),
            hits: hits.len(),
        });
        hits
    }

    pub fn find_stations_by_unused(&mut self, min_percent: Real) -> Vec<StationId> {
        let hits = self.registry.stations_by_unused(min_percent);
        self.events.push(NetworkEvent::StationsSearchedByUnused {
            min_percent,
            hits: hits.len(),
        });
        hits
    }

    pub fn toggle_repair(&mut self, pipes: &[PipeId]) -> AppResult<usize> {
        let count = self.registry.toggle_repair(pipes)?;
        self.events.push(NetworkEvent::RepairToggled { count });
        Ok(count)
    }

    pub fn delete_pipes(&mut self, pipes: &[PipeId]) -> AppResult<usize> {
        let count = self.registry.remove_pipes(pipes)?;
        self.events.push(NetworkEvent::PipesDeleted { count });
        Ok(count)
    }

    /// Start (`delta > 0`) or stop (`delta < 0`) workshops, clamped.
    pub fn adjust_workshops(&mut self, station: StationId, delta: i32) -> AppResult<u32> {
        let working = self.registry.adjust_working(station, delta)?;
        self.events.push(NetworkEvent::WorkshopAdjusted {
            station,
            delta,
            working,
        });
        Ok(working)
    }

    /// Pipes that a `class` connection could reuse, in registry order.
    pub fn eligible_pipes(&self, class: CapacityClass) -> Vec<PipeId> {
        eligible_pipes(&self.registry, class)
            .iter()
            .map(|p| p.id)
            .collect()
    }

    /// Wire `source -> target` with a pipe of `class`.
    ///
    /// Both stations must exist; otherwise nothing changes. The selector
    /// picks among eligible pipes; with no pick a pipe is synthesized. The
    /// chosen pipe is marked in use and the edge is added.
    pub fn connect(
        &mut self,
        source: StationId,
        target: StationId,
        class: CapacityClass,
        selector: &mut dyn PipeSelector,
    ) -> AppResult<Connection> {
        self.registry.require_station(source)?;
        self.registry.require_station(target)?;

        let allocation = self
            .allocator
            .allocate(&mut self.registry, class, selector)?;
        self.registry.mark_in_use(allocation.pipe)?;
        self.events.push(NetworkEvent::PipeAllocated {
            pipe: allocation.pipe,
            class,
            created: allocation.created,
        });

        self.graph.add_edge(source, target, allocation.pipe, class);
        self.events.push(NetworkEvent::StationsConnected {
            source,
            target,
            pipe: allocation.pipe,
        });
        tracing::info!(%source, %target, pipe = %allocation.pipe, "stations connected");

        Ok(Connection {
            source,
            target,
            pipe: allocation.pipe,
            class,
            created_pipe: allocation.created,
        })
    }

    /// Current processing order; short when the network has a cycle.
    pub fn topological_order(&mut self) -> TopologicalOrder {
        let order = self.graph.topological_order();
        self.events.push(NetworkEvent::OrderComputed {
            ordered: order.len(),
            known: order.known_stations(),
        });
        order
    }

    pub fn dump(&self) -> Vec<AdjacencyRow> {
        self.graph.dump()
    }

    pub fn save(&mut self, file: &DataFile) -> AppResult<()> {
        file.save(&self.registry)?;
        self.events.push(NetworkEvent::Saved {
            path: file.path().to_path_buf(),
            pipes: self.registry.pipes().len(),
            stations: self.registry.stations().len(),
        });
        Ok(())
    }

    /// Replace every record with the file's contents.
    ///
    /// The graph is cleared since its edges refer to the replaced records.
    /// On error the current state is kept.
    pub fn load(&mut self, file: &DataFile) -> AppResult<()> {
        let registry = file.load()?;
        self.registry = registry;
        self.graph.clear();
        self.events.push(NetworkEvent::Loaded {
            path: file.path().to_path_buf(),
            pipes: self.registry.pipes().len(),
            stations: self.registry.stations().len(),
        });
        Ok(())
    }
}
