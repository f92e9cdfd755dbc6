//! Domain types for the robust journey planner.
//!
//! This module contains the validated value types shared by every stage of
//! the planner. Types enforce their invariants at construction time, so
//! code that receives them can trust their validity.

mod confidence;
mod error;
mod itinerary;
mod segment;
mod stop;
mod time;
mod trip;

pub use confidence::{Confidence, InvalidConfidence};
pub use error::DomainError;
pub use itinerary::ItineraryRow;
pub use segment::{NodeKey, PercentileArrivals, RawSegment, Segment, SegmentTable};
pub use stop::{InvalidStopId, StopId};
pub use time::{ClockTime, TimeError};
pub use trip::{TripId, TripRef};
