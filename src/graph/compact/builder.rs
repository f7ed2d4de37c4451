//! Counting-sort construction of [`CompactGraph`] from an [`EdgeList`].
//!
//! 1. tally: `degrees[u] += 1`, `degrees[v] += 1` for every edge
//! 2. offsets: exclusive prefix sum over `degrees`
//! 3. placement: a cursor per node, starting at its offset, receives the
//!    other endpoint of every edge in input order
//!
//! Passes 1 and 3 walk the same materialized edge slice, so each block ends
//! up holding exactly `degrees[node]` entries.

use crate::{
    error::GraphError,
    graph::compact::CompactGraph,
    ingest::{EdgeList, RawEdge},
    observer::{BuildObserver, BuildPhase, NoopObserver},
};

/// Counts how many edge endpoints land on each of `node_count` nodes.
///
/// The result depends only on the edge multiset, not on its order.
pub fn tally_degrees(edges: &[RawEdge], node_count: usize) -> Result<Vec<u32>, GraphError> {
    let mut degrees = vec![0u32; node_count];
    for &edge in edges {
        for id in [edge.u(), edge.v()] {
            let slot = degrees
                .get_mut(id as usize - 1)
                .ok_or(GraphError::EndpointOutOfRange { id, node_count })?;
            *slot = slot.checked_add(1).ok_or(GraphError::CapacityExceeded {
                what: "node degree exceeds u32::MAX",
            })?;
        }
    }
    Ok(degrees)
}

/// Exclusive prefix sum over `degrees`, with the total appended.
///
/// `offsets[0] == 0`, `offsets[i + 1] == offsets[i] + degrees[i]`.
pub fn prefix_offsets(degrees: &[u32]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(degrees.len() + 1);
    let mut pos = 0usize;
    offsets.push(pos);
    for &d in degrees {
        pos += d as usize;
        offsets.push(pos);
    }
    offsets
}

/// Writes each edge's endpoints into the blocks described by `offsets`.
///
/// `offsets` must hold `node_count + 1` entries, start at `0` and never
/// decrease. A table breaking that, or a block that overflows or ends short of
/// its bound, is an [`GraphError::InvariantViolation`]; nothing is truncated.
pub fn place_neighbors(edges: &[RawEdge], offsets: &[usize]) -> Result<Vec<u32>, GraphError> {
    if offsets.first().is_some_and(|&start| start != 0) {
        return Err(GraphError::InvariantViolation {
            node: 0,
            detail: "offset table must start at 0",
        });
    }
    if let Some(node) = offsets.windows(2).position(|w| w[0] > w[1]) {
        return Err(GraphError::InvariantViolation {
            node,
            detail: "offset table decreases",
        });
    }

    let node_count = offsets.len().saturating_sub(1);
    let total = offsets.last().copied().unwrap_or(0);
    let mut neighbors = vec![0u32; total];
    let mut cursor = offsets[..node_count].to_vec();

    let mut place = |id: u32, neighbor: u32| -> Result<(), GraphError> {
        let node = id as usize - 1;
        if node >= node_count {
            return Err(GraphError::EndpointOutOfRange { id, node_count });
        }
        let slot = cursor[node];
        if slot >= offsets[node + 1] {
            return Err(GraphError::InvariantViolation {
                node,
                detail: "placement cursor ran past the end of its block",
            });
        }
        neighbors[slot] = neighbor;
        cursor[node] += 1;
        Ok(())
    };

    for &edge in edges {
        let (u0, v0) = edge.zero_based();
        place(edge.u(), v0)?;
        place(edge.v(), u0)?;
    }

    if let Some(node) = (0..node_count).find(|&i| cursor[i] != offsets[i + 1]) {
        return Err(GraphError::InvariantViolation {
            node,
            detail: "block left partially filled",
        });
    }
    Ok(neighbors)
}

impl CompactGraph {
    /// Builds the layout from a validated edge list.
    ///
    /// The node count is the list's maximum id; ids that never appear become
    /// isolated nodes.
    pub fn from_edge_list(
        list: &EdgeList,
        observer: &mut dyn BuildObserver,
    ) -> Result<Self, GraphError> {
        let edges = list.edges();
        let node_count = list.node_count();

        let degrees = tally_degrees(edges, node_count)?;
        let total_degree = edges
            .len()
            .checked_mul(2)
            .ok_or(GraphError::CapacityExceeded {
                what: "total degree exceeds usize::MAX",
            })?;
        observer.on_phase(BuildPhase::DegreesTallied {
            nodes: node_count,
            total_degree,
        });

        let offsets = prefix_offsets(&degrees);
        observer.on_phase(BuildPhase::OffsetsComputed);

        let neighbors = place_neighbors(edges, &offsets)?;
        observer.on_phase(BuildPhase::PlacementFinished);

        let graph = Self {
            degrees,
            offsets,
            neighbors,
        };
        #[cfg(debug_assertions)]
        graph.validate()?;
        Ok(graph)
    }

    /// Validates `pairs` of 1-based ids and builds the layout.
    pub fn from_pairs(pairs: &[(i64, i64)]) -> Result<Self, GraphError> {
        Self::from_edge_list(&EdgeList::from_pairs(pairs)?, &mut NoopObserver)
    }
}
