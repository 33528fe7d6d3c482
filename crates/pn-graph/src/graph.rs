//! Core graph data structures.

use std::collections::BTreeMap;

use pn_core::{CapacityClass, PipeId, StationId};

/// Outgoing edge: the pipe that carries flow to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub pipe: PipeId,
    pub target: StationId,
    pub class: CapacityClass,
}

/// Directed multigraph of compressor stations.
///
/// The graph stores:
/// - For each source station, its outgoing edges in insertion order.
/// - For each station ever named as an endpoint, its in-degree.
///
/// Parallel edges and self-loops are kept as inserted. Maps are ordered by
/// station identity so every traversal is reproducible.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    pub(crate) adjacency: BTreeMap<StationId, Vec<Edge>>,
    pub(crate) in_degree: BTreeMap<StationId, usize>,
    pub(crate) edge_count: usize,
}

impl NetworkGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `source -> target` through `pipe`.
    ///
    /// Endpoints are not checked against any registry; callers validate
    /// identities first.
    pub fn add_edge(
        &mut self,
        source: StationId,
        target: StationId,
        pipe: PipeId,
        class: CapacityClass,
    ) {
        self.adjacency.entry(source).or_default().push(Edge {
            pipe,
            target,
            class,
        });
        *self.in_degree.entry(target).or_insert(0) += 1;
        self.in_degree.entry(source).or_insert(0);
        self.edge_count += 1;
        tracing::debug!(%source, %target, %pipe, %class, "edge inserted");
    }

    /// Outgoing edges of `station`, in insertion order.
    pub fn edges_from(&self, station: StationId) -> &[Edge] {
        self.adjacency
            .get(&station)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// In-degree of `station`, or `None` if it never appeared in an edge.
    pub fn in_degree(&self, station: StationId) -> Option<usize> {
        self.in_degree.get(&station).copied()
    }

    /// Every station known to the degree bookkeeping, ascending.
    pub fn stations(&self) -> impl Iterator<Item = StationId> + '_ {
        self.in_degree.keys().copied()
    }

    pub fn station_count(&self) -> usize {
        self.in_degree.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Drop every edge and station.
    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.in_degree.clear();
        self.edge_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(n: u32) -> StationId {
        StationId::new(n).unwrap()
    }

    fn p(n: u32) -> PipeId {
        PipeId::new(n).unwrap()
    }

    fn class() -> CapacityClass {
        CapacityClass::from_mm(500).unwrap()
    }

    #[test]
    fn source_gets_zero_in_degree_entry() {
        let mut g = NetworkGraph::new();
        g.add_edge(s(1), s(2), p(1), class());
        assert_eq!(g.in_degree(s(1)), Some(0));
        assert_eq!(g.in_degree(s(2)), Some(1));
        assert_eq!(g.station_count(), 2);
    }

    #[test]
    fn parallel_edges_are_preserved() {
        let mut g = NetworkGraph::new();
        g.add_edge(s(1), s(2), p(1), class());
        g.add_edge(s(1), s(2), p(2), class());
        let pipes: Vec<_> = g.edges_from(s(1)).iter().map(|e| e.pipe).collect();
        assert_eq!(pipes, vec![p(1), p(2)]);
        assert_eq!(g.in_degree(s(2)), Some(2));
    }

    #[test]
    fn self_loop_counts_toward_own_in_degree() {
        let mut g = NetworkGraph::new();
        g.add_edge(s(3), s(3), p(1), class());
        assert_eq!(g.in_degree(s(3)), Some(1));
        assert_eq!(g.edges_from(s(3)).len(), 1);
    }

    #[test]
    fn clear_resets_everything() {
        let mut g = NetworkGraph::new();
        g.add_edge(s(1), s(2), p(1), class());
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.station_count(), 0);
        assert!(g.edges_from(s(1)).is_empty());
    }
}
