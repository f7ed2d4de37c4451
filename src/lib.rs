//! # `sisnet` - Compact Contact Networks
//!
//! Turns an undirected edge list (`u,v` per line, 1-based ids, any order) into
//! an immutable compressed adjacency layout: per-node degrees, per-node
//! offsets into one flat neighbor array, and O(1) neighbor-slice lookup.
//! The layout is meant as the read-only substrate of epidemic simulations
//! (SIS and friends), which query neighbor blocks millions of times per run.
//!
//! ## Pipeline
//!
//! 1. **Ingestion** ([`ingest`]): each record is parsed and validated
//!    (two integer fields, no self-connections, ids `>= 1`). Accepted edges are
//!    kept in input order, duplicates included, alongside the largest id.
//! 2. **Build** ([`graph::compact::builder`]): degree tally, exclusive prefix
//!    sum into offsets, then a placement pass writing both endpoints of every
//!    edge into their blocks. Internally nodes are 0-based.
//!
//! Any invalid record aborts the load with a [`GraphError`] carrying the
//! 1-based line number.
//!
//! ## Layout invariants
//!
//! - `offsets[0] == 0` and `offsets[i + 1] == offsets[i] + degree(i)`
//! - `sum(degree) == 2 * edge_count == neighbors.len()`
//! - `neighbors_of(i)` holds exactly the neighbors of `i`, in input order
//! - `node_count` is the largest id seen; unused ids are isolated nodes
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use sisnet::{read_graph, LoadOptions, NoopObserver};
//!
//! let graph = read_graph(Cursor::new("1,2\n2,3\n1,3\n"), &LoadOptions::default(), &mut NoopObserver)?;
//!
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.degrees(), &[2, 2, 2]);
//! assert_eq!(graph.offsets(), &[0, 2, 4]);
//! assert_eq!(graph.neighbors_of(0), &[1, 2]);
//! # Ok::<(), sisnet::GraphError>(())
//! ```
//!
//! ## Features
//!
//! - `tracing`: [`load_graph`] reports phase boundaries through `tracing`
//!   events via `observer::TracingObserver`.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod graph;
pub mod ingest;
pub mod loader;
pub mod observer;

pub use error::{GraphError, MalformedReason};
pub use graph::{CompactGraph, GraphSummary};
pub use ingest::{parse_record, read_edges, EdgeList, LoadOptions, RawEdge};
pub use loader::{load_graph, load_graph_with, read_graph};
pub use observer::{BuildObserver, BuildPhase, NoopObserver};

// Compile-time checks for the fixed-width layout.
const _: () = {
    use core::mem;

    assert!(mem::size_of::<RawEdge>() == 2 * mem::size_of::<u32>());
    assert!(mem::size_of::<NoopObserver>() == 0);
};
