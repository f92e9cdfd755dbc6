//! Time-window filtering.
//!
//! Reduces the Segment Table to the events arriving in the window that ends
//! at the desired arrival time, and picks the confidence-adjusted arrival of
//! each kept event as its effective arrival.

use chrono::Duration;

use crate::domain::{ClockTime, Confidence, NodeKey, Segment};

/// A segment kept for one query.
///
/// Its position in the filtered list is its node index for the duration of
/// that query, so the list must never be reordered or reused across queries.
#[derive(Debug, Clone, Copy)]
pub struct FilteredSegment<'a> {
    pub segment: &'a Segment,
    /// Arrival at the selected confidence level.
    pub effective_arrival: ClockTime,
}

impl FilteredSegment<'_> {
    pub fn node_key(&self) -> NodeKey {
        self.segment.node_key()
    }
}

/// Keep the segments with `end_time - window < arrival_time <= end_time`.
///
/// The window start is computed on the wall clock without day rollover: a
/// window reaching back past midnight starts late in the evening and keeps
/// nothing. Input order is preserved.
pub fn filter_window(
    segments: &[Segment],
    end_time: ClockTime,
    confidence: Confidence,
    window: Duration,
) -> Vec<FilteredSegment<'_>> {
    let start_time = end_time.wrapping_sub(window);

    segments
        .iter()
        .filter(|segment| start_time < segment.arrival_time && segment.arrival_time <= end_time)
        .map(|segment| FilteredSegment {
            segment,
            effective_arrival: segment.arrival_at(confidence),
        })
        .collect()
}
