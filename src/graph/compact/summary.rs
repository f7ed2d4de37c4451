//! Degree statistics for a built layout.

use serde::Serialize;

use crate::graph::compact::CompactGraph;

/// Size and degree statistics of a [`CompactGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    /// Addressable nodes.
    pub nodes: usize,
    /// Undirected edges, parallel edges included.
    pub edges: usize,
    /// Length of the neighbor array.
    pub total_degree: usize,
    /// Smallest degree.
    pub min_degree: usize,
    /// Largest degree.
    pub max_degree: usize,
    /// Average degree.
    pub mean_degree: f64,
    /// Nodes with degree zero.
    pub isolated_nodes: usize,
}

impl CompactGraph {
    /// Collects the [`GraphSummary`] of this graph.
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            nodes: self.node_count(),
            edges: self.edge_count(),
            total_degree: self.total_degree(),
            min_degree: self.min_degree(),
            max_degree: self.max_degree(),
            mean_degree: self.mean_degree(),
            isolated_nodes: self.isolated_nodes().count(),
        }
    }
}
