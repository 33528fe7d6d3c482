//! Topological ordering of stations.

use std::collections::VecDeque;

use pn_core::StationId;

use crate::graph::NetworkGraph;

/// Result of a topological ordering.
///
/// When the graph has a cycle the sequence is shorter than the number of
/// known stations and must not be used as a full order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologicalOrder {
    stations: Vec<StationId>,
    known: usize,
}

impl TopologicalOrder {
    /// Stations in processing order (possibly partial).
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Number of stations known to the graph when the order was computed.
    pub fn known_stations(&self) -> usize {
        self.known
    }

    /// True when every known station was ordered, i.e. the graph is acyclic.
    pub fn is_complete(&self) -> bool {
        self.stations.len() == self.known
    }

    /// True when at least one station sits on a cycle.
    pub fn has_cycle(&self) -> bool {
        !self.is_complete()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl NetworkGraph {
    /// Compute a topological order with Kahn's algorithm.
    ///
    /// Zero in-degree stations seed a FIFO queue in ascending identity order;
    /// edges are relaxed in insertion order. The graph is not modified, so
    /// repeated calls give the same sequence.
    pub fn topological_order(&self) -> TopologicalOrder {
        let mut remaining = self.in_degree.clone();
        let mut queue: VecDeque<StationId> = remaining
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(&id, _)| id)
            .collect();

        let mut stations = Vec::with_capacity(remaining.len());
        while let Some(station) = queue.pop_front() {
            stations.push(station);
            for edge in self.edges_from(station) {
                // every edge target has an entry, added by add_edge
                if let Some(deg) = remaining.get_mut(&edge.target) {
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(edge.target);
                    }
                }
            }
        }

        let order = TopologicalOrder {
            stations,
            known: self.in_degree.len(),
        };
        tracing::debug!(
            ordered = order.len(),
            known = order.known_stations(),
            "topological order computed"
        );
        order
    }
}
