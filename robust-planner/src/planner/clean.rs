//! Itinerary cleaning.
//!
//! The resolver yields one row per visited event. Riders want change points
//! instead: where to board, where to get off, and where to walk. The cleaner
//! walks consecutive row pairs and keeps the rows at which the rider's
//! situation changes.

use tracing::trace;

use crate::domain::{ItineraryRow, TripRef};

/// How the rider moves from one raw row to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Same trip, next stop
    Ride,
    /// Same trip, same stop
    Dwell,
    /// Different trip, same stop
    Transfer,
    /// Different trip, different stop
    Walk,
}

impl Step {
    fn between(from: &ItineraryRow, to: &ItineraryRow) -> Self {
        match (from.trip == to.trip, from.stop_id == to.stop_id) {
            (true, false) => Step::Ride,
            (true, true) => Step::Dwell,
            (false, true) => Step::Transfer,
            (false, false) => Step::Walk,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum State<'r> {
    /// On board a trip, boarding row already emitted
    Riding(&'r TripRef),
    /// Between trips at one stop
    Transferred { at_origin: bool },
    /// On foot, or about to change trips after a walk
    Walked { from_origin: bool },
}

/// Collapse a raw stop sequence into boarding, alighting and walking rows.
///
/// Inputs of fewer than two rows are returned as they are.
pub fn clean_itinerary(raw: &[ItineraryRow]) -> Vec<ItineraryRow> {
    let [.., second_last, last] = raw else {
        return raw.to_vec();
    };
    let first = &raw[0];

    let mut cleaned = Vec::new();
    let mut state = State::Transferred { at_origin: true };

    for pair in raw.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        let step = Step::between(prev, cur);

        state = match (state, step) {
            (State::Riding(trip), Step::Ride | Step::Dwell) => State::Riding(trip),

            (State::Riding(trip), Step::Transfer) => {
                cleaned.push(prev.alighting(trip));
                State::Transferred { at_origin: false }
            }
            (State::Riding(trip), Step::Walk) => {
                cleaned.push(prev.alighting(trip));
                State::Walked { from_origin: false }
            }

            (State::Transferred { .. }, Step::Ride | Step::Dwell) => {
                cleaned.push(prev.boarding(&prev.trip));
                State::Riding(&prev.trip)
            }
            (State::Walked { from_origin }, Step::Ride | Step::Dwell) => {
                // A walk from the origin is already marked by its departure
                if !from_origin {
                    cleaned.push(prev.walked_to());
                }
                cleaned.push(prev.boarding(&prev.trip));
                State::Riding(&prev.trip)
            }

            (State::Transferred { at_origin }, Step::Transfer) => State::Transferred { at_origin },
            (State::Transferred { at_origin: true }, Step::Walk) => {
                cleaned.push(first.walking_from());
                State::Walked { from_origin: true }
            }
            (State::Transferred { at_origin: false }, Step::Walk) => {
                State::Walked { from_origin: false }
            }

            (State::Walked { from_origin }, Step::Transfer | Step::Walk) => {
                State::Walked { from_origin }
            }
        };

        trace!(?step, ?state, stop = %cur.stop_id, "cleaner step");
    }

    // A trailing run at one stop adds nothing; otherwise close the last leg
    if second_last.stop_id != last.stop_id {
        match state {
            State::Riding(trip) => cleaned.push(last.alighting(trip)),
            State::Walked { .. } => cleaned.push(last.walked_to()),
            State::Transferred { .. } => {}
        }
    }

    cleaned
}
