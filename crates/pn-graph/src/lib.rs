//! pn-graph: station network layer for pipenet.
//!
//! Provides:
//! - `NetworkGraph`: directed multigraph of stations joined by pipe edges
//! - Deterministic topological ordering (Kahn's algorithm)
//! - Adjacency dump for display
//!
//! The graph holds identities only; records live in the asset registry.
//!
//! # Example
//!
//! ```
//! use pn_core::{CapacityClass, PipeId, StationId};
//! use pn_graph::NetworkGraph;
//!
//! let s = |n| StationId::new(n).unwrap();
//! let p = |n| PipeId::new(n).unwrap();
//! let class = CapacityClass::from_mm(700).unwrap();
//!
//! let mut graph = NetworkGraph::new();
//! graph.add_edge(s(1), s(2), p(1), class);
//! graph.add_edge(s(2), s(3), p(2), class);
//! graph.add_edge(s(1), s(3), p(3), class);
//!
//! let order = graph.topological_order();
//! assert!(order.is_complete());
//! assert_eq!(order.stations(), &[s(1), s(2), s(3)]);
//! ```

pub mod dump;
pub mod graph;
pub mod order;

// Re-exports for ergonomics
pub use dump::AdjacencyRow;
pub use graph::{Edge, NetworkGraph};
pub use order::TopologicalOrder;
