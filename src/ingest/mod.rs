//! Edge ingestion: line-oriented records into a validated, materialized edge list.
//!
//! Input is plain text, one undirected edge per line, two 1-based node ids
//! separated by a delimiter (`3,7`). Ingestion is fail-fast: the first bad
//! record aborts the load and is reported with its 1-based line number.
//!
//! The result is an owned [`EdgeList`] rather than a stream because the
//! builder walks it twice, once to count degrees and once to place neighbors.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::{
    error::{GraphError, MalformedReason},
    observer::{BuildObserver, BuildPhase},
};

/// Parsing options for edge-list sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Field separator. Whitespace delimiters match any run of whitespace.
    pub delimiter: char,
    /// Skip empty lines instead of rejecting them as malformed.
    pub skip_blank_lines: bool,
    /// Lines starting with this character (after trimming) are skipped.
    pub comment_prefix: Option<char>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            skip_blank_lines: false,
            comment_prefix: None,
        }
    }
}

impl LoadOptions {
    /// Default options with a custom delimiter.
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    fn skips(&self, record: &str) -> bool {
        if record.is_empty() {
            return self.skip_blank_lines;
        }
        self.comment_prefix.is_some_and(|p| record.starts_with(p))
    }
}

/// An undirected edge between two 1-based node ids, `u != v`.
///
/// The only way to obtain one is [`RawEdge::new_checked`], so every edge
/// reaching the builder has ids `>= 1` and distinct endpoints:
///
/// ```compile_fail
/// let looped = sisnet::RawEdge { u: 3, v: 3 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawEdge {
    u: u32,
    v: u32,
}

impl RawEdge {
    /// Validates a pair of identifiers read from `line`.
    ///
    /// Self-connections are rejected before the range check, so `0,0` is a
    /// [`GraphError::SelfLoop`].
    pub fn new_checked(u: i64, v: i64, line: usize) -> Result<Self, GraphError> {
        if u == v {
            return Err(GraphError::SelfLoop { line, node: u });
        }
        Ok(Self {
            u: check_id(u, line)?,
            v: check_id(v, line)?,
        })
    }

    /// First endpoint (1-based).
    #[inline]
    pub fn u(self) -> u32 {
        self.u
    }

    /// Second endpoint (1-based).
    #[inline]
    pub fn v(self) -> u32 {
        self.v
    }

    /// 0-based endpoints.
    #[inline]
    pub fn zero_based(self) -> (u32, u32) {
        // Ids are >= 1 by construction.
        (self.u - 1, self.v - 1)
    }
}

fn check_id(value: i64, line: usize) -> Result<u32, GraphError> {
    match u32::try_from(value) {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(GraphError::InvalidIdentifier { line, value }),
    }
}

/// Accepted edges in input order, plus the largest id seen.
///
/// Duplicates and parallel edges are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    edges: Vec<RawEdge>,
    max_id: u32,
}

impl EdgeList {
    /// Creates an empty edge list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty edge list with room for `capacity` edges.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
            max_id: 0,
        }
    }

    /// Validates and appends `(u, v)`, tracking the maximum id.
    pub fn push_checked(&mut self, u: i64, v: i64, line: usize) -> Result<(), GraphError> {
        let edge = RawEdge::new_checked(u, v, line)?;
        self.push(edge);
        Ok(())
    }

    /// Appends an edge obtained from [`RawEdge::new_checked`].
    pub fn push(&mut self, edge: RawEdge) {
        self.max_id = self.max_id.max(edge.u).max(edge.v);
        self.edges.push(edge);
    }

    /// Validates every pair; the record number in errors is the 1-based position.
    pub fn from_pairs(pairs: &[(i64, i64)]) -> Result<Self, GraphError> {
        let mut list = Self::with_capacity(pairs.len());
        for (i, &(u, v)) in pairs.iter().enumerate() {
            list.push_checked(u, v, i + 1)?;
        }
        Ok(list)
    }

    /// The accepted edges, in input order.
    #[inline]
    pub fn edges(&self) -> &[RawEdge] {
        &self.edges
    }

    /// Largest 1-based id seen, `0` when empty.
    #[inline]
    pub fn max_id(&self) -> u32 {
        self.max_id
    }

    /// Number of nodes the compact layout will address.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.max_id as usize
    }

    /// Number of accepted edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if no edge was accepted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates over the edges in input order.
    pub fn iter(&self) -> core::slice::Iter<'_, RawEdge> {
        self.edges.iter()
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a RawEdge;
    type IntoIter = core::slice::Iter<'a, RawEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

/// Parses a single record into a validated edge.
///
/// Surrounding whitespace is ignored, both around the record and around each
/// field.
pub fn parse_record(record: &str, line: usize, delimiter: char) -> Result<RawEdge, GraphError> {
    let (u, v) = parse_fields(record, line, delimiter)?;
    RawEdge::new_checked(u, v, line)
}

fn parse_fields(record: &str, line: usize, delimiter: char) -> Result<(i64, i64), GraphError> {
    let trimmed = record.trim();
    // Whitespace delimiters collapse runs, like `split_whitespace`.
    let collapse = delimiter.is_whitespace();
    let mut fields = trimmed
        .split(move |c: char| if collapse { c.is_whitespace() } else { c == delimiter })
        .filter(move |f| !(collapse && f.is_empty()));

    let malformed = |reason| GraphError::MalformedRecord {
        line,
        record: trimmed.to_owned(),
        reason,
    };
    if trimmed.is_empty() {
        return Err(malformed(MalformedReason::FieldCount(0)));
    }

    let (first, second) = match (fields.next(), fields.next()) {
        (Some(a), Some(b)) => (a, b),
        (Some(_), None) => return Err(malformed(MalformedReason::FieldCount(1))),
        _ => return Err(malformed(MalformedReason::FieldCount(0))),
    };
    let extra = fields.count();
    if extra > 0 {
        return Err(malformed(MalformedReason::FieldCount(2 + extra)));
    }

    let parse = |field: &str| {
        let field = field.trim();
        field
            .parse::<i64>()
            .map_err(|_| malformed(MalformedReason::InvalidToken(field.to_owned())))
    };
    Ok((parse(first)?, parse(second)?))
}

/// Reads every record from `reader`, stopping at the first invalid one.
pub fn read_edges<R: BufRead>(
    mut reader: R,
    options: &LoadOptions,
    observer: &mut dyn BuildObserver,
) -> Result<EdgeList, GraphError> {
    observer.on_phase(BuildPhase::IngestionStarted);

    let mut edges = EdgeList::new();
    let mut buf = String::new();
    let mut line = 0usize;
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf).map_err(|source| GraphError::Io {
            line: Some(line + 1),
            source,
        })?;
        if read == 0 {
            break;
        }
        line += 1;

        if options.skips(buf.trim()) {
            continue;
        }
        edges.push(parse_record(&buf, line, options.delimiter)?);
    }

    observer.on_phase(BuildPhase::IngestionFinished {
        edges: edges.len(),
        max_id: edges.max_id(),
    });
    Ok(edges)
}
