//! Stop identifier type.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// Identifier of a stop (station or platform) in the schedule feed.
///
/// Any non-blank string without surrounding whitespace is accepted; feeds
/// use both plain numeric ids (`8503000`) and platform-qualified ones
/// (`8503000:0:3`). Cloning is cheap.
///
/// # Examples
///
/// ```
/// use robust_planner::domain::StopId;
///
/// let zurich = StopId::parse("8503000").unwrap();
/// assert_eq!(zurich.as_str(), "8503000");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse(" 8503000").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopId(Arc<str>);

impl StopId {
    /// Parse a stop identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if s.trim() != s {
            return Err(InvalidStopId {
                reason: "must not have leading or trailing whitespace",
            });
        }

        Ok(StopId(Arc::from(s)))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.as_str())
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StopId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
