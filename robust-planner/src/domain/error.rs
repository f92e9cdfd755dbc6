//! Domain error types.
//!
//! These errors represent validation failures while turning raw schedule
//! rows into domain types. They are distinct from query-time planning errors.

use super::{InvalidStopId, TimeError};

/// Domain-level errors for row validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A time field is not a valid HH:MM:SS string
    #[error("malformed time field: {0}")]
    MalformedTime(#[from] TimeError),

    /// A stop id field is blank or padded
    #[error(transparent)]
    InvalidStop(#[from] InvalidStopId),

    /// Travel time is negative or not a number
    #[error("invalid travel time: {0} minutes")]
    InvalidTravelTime(f64),

    /// Walking time is negative or not a number
    #[error("invalid walking time: {0} minutes")]
    InvalidWalkingTime(f64),

    /// A row of a table failed validation
    #[error("segment row {row}: {source}")]
    InRow {
        row: usize,
        source: Box<DomainError>,
    },
}

impl DomainError {
    /// Returns the underlying error, looking through row context.
    pub fn root(&self) -> &DomainError {
        match self {
            DomainError::InRow { source, .. } => source.root(),
            other => other,
        }
    }
}
