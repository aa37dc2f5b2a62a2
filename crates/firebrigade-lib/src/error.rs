use std::path::PathBuf;

use thiserror::Error;

use crate::brigade::BrigadeId;
use crate::graph::{LocationFlag, LocationId};

/// Convenient result alias for the fire brigade library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every variant is a configuration fault raised while a graph or simulation is
/// being assembled. Routing misses and ineligible actions are ordinary outcomes
/// and never surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a connection would break the graph's shape rules.
    #[error("invalid topology: {reason}")]
    InvalidTopology { reason: String },

    /// Raised when an identifier does not name a location in the graph.
    #[error("unknown location: {id}")]
    UnknownLocation { id: LocationId },

    /// Raised when an identifier does not name a brigade.
    #[error("unknown brigade: {id}")]
    UnknownBrigade { id: BrigadeId },

    /// Raised when a brigade would be given more water than it can carry.
    #[error("brigade {id} cannot hold {level} units (capacity {capacity})")]
    WaterOverflow {
        id: BrigadeId,
        level: u32,
        capacity: u32,
    },

    /// Raised when a flag write would break a location invariant.
    #[error("cannot set {flag} on location {id}: {reason}")]
    FlagConflict {
        id: LocationId,
        flag: LocationFlag,
        reason: &'static str,
    },

    /// Raised when simulation settings are missing or inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Raised when a topology file could not be parsed into a graph.
    #[error("failed to load topology from {path}: {message}")]
    TopologyLoad { path: PathBuf, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn topology(reason: impl Into<String>) -> Self {
        Error::InvalidTopology {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            reason: reason.into(),
        }
    }
}
