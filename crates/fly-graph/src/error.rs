//! Graph-subsystem error type.

use thiserror::Error;

/// Errors produced while building or loading a `ZoneMap`.
#[derive(Debug, Error)]
pub enum MapError {
    /// A map-file line could not be accepted.  `line` is 1-based; `None` for
    /// whole-file checks performed at end of input.
    #[error("{}", syntax_message(.line, .cause))]
    Syntax { line: Option<usize>, cause: String },

    #[error("nb_drones must be at least 1")]
    NoDrones,

    #[error("invalid zone name {0:?}: names must be non-empty and contain no dashes or whitespace")]
    InvalidZoneName(String),

    #[error("invalid zone type {0:?}: must be one of normal, blocked, restricted, priority")]
    InvalidZoneType(String),

    #[error("duplicate zone name {0:?}")]
    DuplicateZone(String),

    #[error("map must define exactly one start zone")]
    MissingStart,

    #[error("map must define exactly one end zone")]
    MissingEnd,

    #[error("duplicate start zone {0:?}: exactly one allowed")]
    DuplicateStart(String),

    #[error("duplicate end zone {0:?}: exactly one allowed")]
    DuplicateEnd(String),

    #[error("zone {0:?} cannot be both the start and the end zone")]
    StartIsEnd(String),

    #[error("zone {0:?} must have max_drones of at least 1")]
    ZeroZoneCapacity(String),

    #[error("connection {a}-{b} must have max_link_capacity of at least 1")]
    ZeroLinkCapacity { a: String, b: String },

    #[error("connection references undefined zone {0:?}")]
    UnknownZone(String),

    #[error("connection cannot join zone {0:?} to itself")]
    SelfConnection(String),

    #[error("duplicate connection {a}-{b} (same as {b}-{a})")]
    DuplicateConnection { a: String, b: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MapError {
    /// Source line of a syntax error, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            MapError::Syntax { line, .. } => *line,
            _ => None,
        }
    }
}

fn syntax_message(line: &Option<usize>, cause: &str) -> String {
    match line {
        Some(n) => format!("line {n}: {cause}"),
        None    => cause.to_owned(),
    }
}

pub type MapResult<T> = Result<T, MapError>;
