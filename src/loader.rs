//! Entry points: ingest an edge-list source, then build the compact layout.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    error::GraphError,
    graph::CompactGraph,
    ingest::{read_edges, LoadOptions},
    observer::{BuildObserver, DefaultObserver},
};

/// Loads the edge list at `path`, fields separated by `delimiter`.
///
/// Fails on the first invalid record; no partial graph is returned.
///
/// ```no_run
/// let graph = sisnet::load_graph("contacts.csv", ',')?;
/// for &peer in graph.neighbors_of(0) {
///     println!("0 -- {peer}");
/// }
/// # Ok::<(), sisnet::GraphError>(())
/// ```
pub fn load_graph(path: impl AsRef<Path>, delimiter: char) -> Result<CompactGraph, GraphError> {
    load_graph_with(
        path,
        &LoadOptions::with_delimiter(delimiter),
        &mut DefaultObserver::default(),
    )
}

/// Like [`load_graph`], with explicit options and observer.
pub fn load_graph_with(
    path: impl AsRef<Path>,
    options: &LoadOptions,
    observer: &mut dyn BuildObserver,
) -> Result<CompactGraph, GraphError> {
    let file = File::open(path.as_ref()).map_err(GraphError::io)?;
    read_graph(BufReader::new(file), options, observer)
}

/// Reads an edge list from any buffered source and builds the layout.
pub fn read_graph<R: BufRead>(
    reader: R,
    options: &LoadOptions,
    observer: &mut dyn BuildObserver,
) -> Result<CompactGraph, GraphError> {
    let edges = read_edges(reader, options, observer)?;
    CompactGraph::from_edge_list(&edges, observer)
}
