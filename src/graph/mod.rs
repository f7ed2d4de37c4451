//! Graph layouts.
//!
//! - `compact`: immutable compressed adjacency (degree / offset / neighbor arrays)
//!   for undirected edge lists

pub mod compact;

pub use compact::{CompactGraph, GraphSummary};
