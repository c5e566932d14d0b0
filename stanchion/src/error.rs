use std::fmt;

use thiserror::Error;

/// The three links every quarter point carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adjacency {
    Jump,
    Edge,
    Interior,
}

impl fmt::Display for Adjacency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Adjacency::Jump => "jump",
            Adjacency::Edge => "edge",
            Adjacency::Interior => "interior",
        })
    }
}

/// Errors raised while building or tracing a combinatorial map.
#[derive(Debug, Error)]
pub enum StanchionError {
    /// A quarter point refers to a missing or inconsistent partner. The map is
    /// unusable and the current draw/export must be abandoned.
    #[error("malformed combinatorial map: quarter point {qp} has no valid {adjacency} adjacency")]
    MalformedAdjacency { qp: u32, adjacency: Adjacency },

    #[error("parameter '{name}' = {value} is out of range")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("graph snapshot rejected: {0}")]
    InvalidSnapshot(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl StanchionError {
    /// Stable machine-readable code, used by the binding layer's error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            StanchionError::MalformedAdjacency { .. } => "malformed_adjacency",
            StanchionError::InvalidParameter { .. } => "invalid_parameter",
            StanchionError::InvalidSnapshot(_) => "invalid_snapshot",
            StanchionError::Json(_) => "invalid_json",
        }
    }
}

pub type Result<T> = std::result::Result<T, StanchionError>;
