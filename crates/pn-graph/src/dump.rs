//! Adjacency dump for display.

use pn_core::StationId;

use crate::graph::{Edge, NetworkGraph};

/// One source station and its outgoing edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyRow {
    pub source: StationId,
    pub edges: Vec<Edge>,
}

impl NetworkGraph {
    /// Rows for every station with outgoing edges, ascending by source.
    pub fn dump(&self) -> Vec<AdjacencyRow> {
        self.adjacency
            .iter()
            .filter(|(_, edges)| !edges.is_empty())
            .map(|(&source, edges)| AdjacencyRow {
                source,
                edges: edges.clone(),
            })
            .collect()
    }
}
