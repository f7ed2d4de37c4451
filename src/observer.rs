//! Phase-boundary hooks for ingestion and construction.
//!
//! Observers only watch: nothing they do can change the graph being built.

/// A phase boundary reached while loading or building a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// Edge records are about to be read.
    IngestionStarted,
    /// All records were read and validated.
    IngestionFinished {
        /// Accepted edges, duplicates included.
        edges: usize,
        /// Largest 1-based identifier seen.
        max_id: u32,
    },
    /// Per-node degrees were counted.
    DegreesTallied {
        /// Node count of the layout.
        nodes: usize,
        /// Sum of all degrees (twice the edge count).
        total_degree: usize,
    },
    /// The exclusive prefix sum over degrees is in place.
    OffsetsComputed,
    /// Every endpoint was written into its neighbor block.
    PlacementFinished,
}

/// Receives [`BuildPhase`] notifications.
pub trait BuildObserver {
    /// Called once per phase boundary, in order.
    fn on_phase(&mut self, phase: BuildPhase);
}

/// Ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {
    #[inline]
    fn on_phase(&mut self, _phase: BuildPhase) {}
}

impl<F: FnMut(BuildPhase)> BuildObserver for F {
    #[inline]
    fn on_phase(&mut self, phase: BuildPhase) {
        self(phase);
    }
}

/// Forwards notifications to `tracing` as structured events.
#[cfg(feature = "tracing")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

#[cfg(feature = "tracing")]
impl BuildObserver for TracingObserver {
    fn on_phase(&mut self, phase: BuildPhase) {
        match phase {
            BuildPhase::IngestionStarted => tracing::info!("reading edge list"),
            BuildPhase::IngestionFinished { edges, max_id } => {
                tracing::info!(edges, max_id, "edge list read");
            }
            BuildPhase::DegreesTallied {
                nodes,
                total_degree,
            } => tracing::debug!(nodes, total_degree, "degrees tallied"),
            BuildPhase::OffsetsComputed => tracing::debug!("offsets computed"),
            BuildPhase::PlacementFinished => tracing::info!("adjacency layout built"),
        }
    }
}

/// The observer used by [`load_graph`](crate::load_graph).
#[cfg(feature = "tracing")]
pub type DefaultObserver = TracingObserver;

/// The observer used by [`load_graph`](crate::load_graph).
#[cfg(not(feature = "tracing"))]
pub type DefaultObserver = NoopObserver;
