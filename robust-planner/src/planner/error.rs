//! Query-time planning errors.

use crate::domain::{InvalidConfidence, InvalidStopId, StopId, TimeError};

/// Why a query produced no itinerary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Confidence level outside 80/85/90/95/99
    #[error("invalid confidence level {0}: expected one of 80, 85, 90, 95, 99")]
    InvalidConfidenceLevel(u8),

    /// End time is not a valid HH:MM:SS string
    #[error("malformed end time: {0}")]
    MalformedTimeField(#[from] TimeError),

    /// Start or goal stop id is blank or padded
    #[error(transparent)]
    InvalidStop(#[from] InvalidStopId),

    /// Nothing arrives at the goal by the requested time
    #[error("no arrival at {goal} satisfies the end time")]
    NoCompliantDestination { goal: StopId },

    /// The start is disconnected from the chosen arrival within the window
    #[error("no path possible from {start} in under {window_mins} minutes")]
    NoPathFound { start: StopId, window_mins: i64 },
}

impl PlanError {
    /// True when an arrival at the goal was found but the start cannot
    /// reach it within the window.
    pub fn is_no_path(&self) -> bool {
        matches!(self, PlanError::NoPathFound { .. })
    }
}

impl From<InvalidConfidence> for PlanError {
    fn from(err: InvalidConfidence) -> Self {
        PlanError::InvalidConfidenceLevel(err.0)
    }
}
