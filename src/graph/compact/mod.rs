//! A compact undirected adjacency layout for contact networks.
//!
//! Each undirected edge `{u, v}` is stored twice, once in each endpoint's
//! neighbor block, so neighbor iteration is a contiguous slice read.
//!
//! Memory layout:
//! - `degrees`: `Vec<u32>` of length `n`
//! - `offsets`: `Vec<usize>` of length `n + 1` (block starts; the last entry is
//!   the total degree)
//! - `neighbors`: `Vec<u32>` of length `2m`, 0-based node ids
//!
//! The layout is built once by [`builder`] and never mutated.

pub mod builder;
pub mod summary;

pub use summary::GraphSummary;

use crate::error::GraphError;

/// An immutable compressed adjacency structure for an undirected multigraph.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_edge_list` | \(O(n + m)\) | Two passes over the edge list |
/// | `neighbors_of` | \(O(1)\) | Borrowed slice, no copy |
/// | `degree_of` | \(O(1)\) | Reads the degree array |
/// | `has_edge` | \(O(\text{degree})\) | Linear scan of one block |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactGraph {
    degrees: Vec<u32>,
    offsets: Vec<usize>,
    neighbors: Vec<u32>,
}

impl CompactGraph {
    /// Number of addressable nodes (the largest input id).
    #[inline]
    pub fn node_count(&self) -> usize {
        self.degrees.len()
    }

    /// Number of undirected edges, parallel edges counted individually.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Sum of all degrees; always `2 * edge_count()`.
    #[inline]
    pub fn total_degree(&self) -> usize {
        self.neighbors.len()
    }

    /// 0-based node indices.
    #[inline]
    pub fn nodes(&self) -> core::ops::Range<usize> {
        0..self.node_count()
    }

    /// Returns the degree of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node >= node_count()`.
    #[inline]
    pub fn degree_of(&self, node: usize) -> usize {
        assert!(node < self.node_count(), "node {node} out of bounds");
        self.degrees[node] as usize
    }

    /// Returns the degree of `node`, or `None` if it is out of range.
    #[inline]
    pub fn try_degree_of(&self, node: usize) -> Option<usize> {
        self.degrees.get(node).map(|&d| d as usize)
    }

    /// Returns the neighbor block of `node`.
    ///
    /// Neighbors appear in the order their edges were read; parallel edges
    /// repeat the neighbor.
    ///
    /// # Panics
    ///
    /// Panics if `node >= node_count()`.
    #[inline]
    pub fn neighbors_of(&self, node: usize) -> &[u32] {
        assert!(node < self.node_count(), "node {node} out of bounds");
        &self.neighbors[self.offsets[node]..self.offsets[node + 1]]
    }

    /// Returns the neighbor block of `node`, or `None` if it is out of range.
    #[inline]
    pub fn try_neighbors_of(&self, node: usize) -> Option<&[u32]> {
        (node < self.node_count()).then(|| &self.neighbors[self.offsets[node]..self.offsets[node + 1]])
    }

    /// Per-node degrees.
    #[inline]
    pub fn degrees(&self) -> &[u32] {
        &self.degrees
    }

    /// Start of each node's block, one entry per node.
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets[..self.node_count()]
    }

    /// Block starts followed by the total degree, `node_count() + 1` entries.
    #[inline]
    pub fn offsets_with_sentinel(&self) -> &[usize] {
        &self.offsets
    }

    /// The flat neighbor array.
    #[inline]
    pub fn neighbors(&self) -> &[u32] {
        &self.neighbors
    }

    /// Checks if `a` and `b` share at least one edge.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edge_multiplicity(a, b) > 0
    }

    /// Number of parallel edges between `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either node is out of bounds.
    pub fn edge_multiplicity(&self, a: usize, b: usize) -> usize {
        assert!(b < self.node_count(), "node {b} out of bounds");
        // Scan the shorter block; both hold the edge.
        let (from, to) = if self.degree_of(a) <= self.degree_of(b) {
            (a, b)
        } else {
            (b, a)
        };
        self.neighbors_of(from)
            .iter()
            .filter(|&&v| v as usize == to)
            .count()
    }

    /// Largest degree, `0` for an empty graph.
    pub fn max_degree(&self) -> usize {
        self.degrees.iter().copied().max().unwrap_or(0) as usize
    }

    /// Smallest degree, `0` for an empty graph.
    pub fn min_degree(&self) -> usize {
        self.degrees.iter().copied().min().unwrap_or(0) as usize
    }

    /// Average degree, `0.0` for an empty graph.
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_degree(&self) -> f64 {
        if self.degrees.is_empty() {
            return 0.0;
        }
        self.total_degree() as f64 / self.node_count() as f64
    }

    /// Nodes with no incident edge. Ids below the maximum that never appear
    /// in the input end up here.
    pub fn isolated_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.degrees
            .iter()
            .enumerate()
            .filter(|(_, &d)| d == 0)
            .map(|(i, _)| i)
    }

    /// Re-checks the layout invariants.
    ///
    /// - `offsets[0] == 0` and `offsets[i + 1] == offsets[i] + degrees[i]`
    /// - the last offset equals `neighbors.len()`
    /// - every neighbor is a valid node index and no node lists itself
    pub fn validate(&self) -> Result<(), GraphError> {
        let n = self.node_count();
        if self.offsets.len() != n + 1 || self.offsets[0] != 0 {
            return Err(GraphError::InvariantViolation {
                node: 0,
                detail: "offset table must start at 0 and hold n + 1 entries",
            });
        }
        for node in 0..n {
            if self.offsets[node + 1] != self.offsets[node] + self.degrees[node] as usize {
                return Err(GraphError::InvariantViolation {
                    node,
                    detail: "offset step differs from degree",
                });
            }
        }
        if self.offsets[n] != self.neighbors.len() {
            return Err(GraphError::InvariantViolation {
                node: n.saturating_sub(1),
                detail: "total degree differs from neighbor count",
            });
        }
        for node in 0..n {
            for &v in self.neighbors_of(node) {
                let v = v as usize;
                if v >= n {
                    return Err(GraphError::InvariantViolation {
                        node,
                        detail: "neighbor index out of range",
                    });
                }
                if v == node {
                    return Err(GraphError::InvariantViolation {
                        node,
                        detail: "node lists itself as a neighbor",
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
