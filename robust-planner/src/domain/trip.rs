//! Trip identifiers and the walking sentinel.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Identifier of a scheduled trip. Cloning is cheap.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TripId(Arc<str>);

impl TripId {
    pub fn new(id: &str) -> Self {
        TripId(Arc::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TripId({})", self.as_str())
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TripId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// What an itinerary row is travelling on: a scheduled trip, or on foot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TripRef {
    Scheduled(TripId),
    Walking,
}

impl TripRef {
    /// Display value of the walking sentinel.
    pub const WALKING: &'static str = "Walking";

    pub fn is_walking(&self) -> bool {
        matches!(self, TripRef::Walking)
    }
}

impl From<TripId> for TripRef {
    fn from(id: TripId) -> Self {
        TripRef::Scheduled(id)
    }
}

impl fmt::Display for TripRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripRef::Scheduled(id) => f.write_str(id.as_str()),
            TripRef::Walking => f.write_str(Self::WALKING),
        }
    }
}

impl Serialize for TripRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
