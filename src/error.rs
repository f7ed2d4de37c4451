//! Error taxonomy for edge ingestion and compact graph construction.
//!
//! Every failure aborts the whole load: a graph is either built from the full,
//! validated edge list or not at all.

use core::fmt;
use std::io;

/// Why a record could not be read as a pair of integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// The record split into the wrong number of fields.
    FieldCount(usize),
    /// A field was not a base-10 integer.
    InvalidToken(String),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount(n) => write!(f, "expected 2 fields, found {n}"),
            Self::InvalidToken(tok) => write!(f, "`{tok}` is not an integer"),
        }
    }
}

/// The error type for loading and building a [`CompactGraph`](crate::CompactGraph).
#[derive(Debug)]
pub enum GraphError {
    /// The edge source could not be opened or read.
    Io {
        /// 1-based line being read when the failure happened, if any.
        line: Option<usize>,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A record did not yield exactly two integers.
    MalformedRecord {
        /// 1-based line number.
        line: usize,
        /// The offending record, verbatim.
        record: String,
        /// What was wrong with it.
        reason: MalformedReason,
    },
    /// A record connects a node to itself.
    SelfLoop {
        /// 1-based line number.
        line: usize,
        /// The 1-based node identifier.
        node: i64,
    },
    /// A record names an identifier outside `1..=u32::MAX`.
    InvalidIdentifier {
        /// 1-based line number.
        line: usize,
        /// The rejected identifier.
        value: i64,
    },
    /// An edge names a node beyond the layout's node count.
    EndpointOutOfRange {
        /// The 1-based identifier as read.
        id: u32,
        /// Node count of the layout.
        node_count: usize,
    },
    /// The placement pass disagreed with the degree tally.
    InvariantViolation {
        /// 0-based node whose block is inconsistent.
        node: usize,
        /// Which check failed.
        detail: &'static str,
    },
    /// A count outgrew the fixed-width arrays of the layout.
    CapacityExceeded {
        /// Which quantity overflowed.
        what: &'static str,
    },
}

impl GraphError {
    /// Returns the 1-based line the error refers to, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io { line, .. } => *line,
            Self::MalformedRecord { line, .. }
            | Self::SelfLoop { line, .. }
            | Self::InvalidIdentifier { line, .. } => Some(*line),
            Self::EndpointOutOfRange { .. }
            | Self::InvariantViolation { .. }
            | Self::CapacityExceeded { .. } => None,
        }
    }

    pub(crate) fn io(source: io::Error) -> Self {
        Self::Io { line: None, source }
    }
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { line: Some(line), source } => {
                write!(f, "failed to read edge list at line {line}: {source}")
            }
            Self::Io { line: None, source } => write!(f, "failed to read edge list: {source}"),
            Self::MalformedRecord { line, record, reason } => {
                write!(f, "line {line}: malformed record `{record}`: {reason}")
            }
            Self::SelfLoop { line, node } => {
                write!(f, "line {line}: self-connection on node {node}")
            }
            Self::InvalidIdentifier { line, value } => {
                write!(f, "line {line}: node id {value} out of range (ids start at 1)")
            }
            Self::EndpointOutOfRange { id, node_count } => {
                write!(f, "node id {id} beyond node count {node_count}")
            }
            Self::InvariantViolation { node, detail } => {
                write!(f, "adjacency invariant violated at node {node}: {detail}")
            }
            Self::CapacityExceeded { what } => write!(f, "capacity exceeded: {what}"),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for GraphError {
    fn from(source: io::Error) -> Self {
        Self::io(source)
    }
}
