//! Schedule builders shared by the planner tests.

use crate::domain::{ClockTime, PercentileArrivals, Segment, StopId, TripId};
use crate::walkable::WalkingTable;

pub(crate) fn t(s: &str) -> ClockTime {
    ClockTime::parse(s).unwrap()
}

pub(crate) fn stop(s: &str) -> StopId {
    StopId::parse(s).unwrap()
}

/// A trip standing at a stop with no onward call.
///
/// Every percentile arrival equals the scheduled arrival.
pub(crate) fn call(stop_id: &str, trip_id: &str, arrival: &str, departure: &str) -> Segment {
    Segment {
        origin_stop: stop(stop_id),
        trip_id: TripId::new(trip_id),
        arrival_time: t(arrival),
        departure_time: t(departure),
        dest_stop: None,
        next_trip_id: None,
        next_arrival_time: None,
        next_departure_time: None,
        travel_time_secs: 0,
        origin_stop_name: format!("Stop {stop_id}"),
        arrivals: PercentileArrivals::uniform(t(arrival)),
    }
}

/// Point `from` at `next` as the trip's following call.
pub(crate) fn then(mut from: Segment, next: &Segment) -> Segment {
    from.dest_stop = Some(next.origin_stop.clone());
    from.next_trip_id = Some(next.trip_id.clone());
    from.next_arrival_time = Some(next.arrival_time);
    from.next_departure_time = Some(next.departure_time);
    from.travel_time_secs = next
        .arrival_time
        .seconds_from_midnight()
        .saturating_sub(from.departure_time.seconds_from_midnight());
    from
}

/// All calls of one trip, linked in order. Each call is `(stop, arrival, departure)`.
pub(crate) fn trip(trip_id: &str, calls: &[(&str, &str, &str)]) -> Vec<Segment> {
    let standalone: Vec<Segment> = calls
        .iter()
        .map(|(stop_id, arr, dep)| call(stop_id, trip_id, arr, dep))
        .collect();

    let mut linked = Vec::with_capacity(standalone.len());
    for (i, segment) in standalone.iter().enumerate() {
        match standalone.get(i + 1) {
            Some(next) => linked.push(then(segment.clone(), next)),
            None => linked.push(segment.clone()),
        }
    }
    linked
}

/// Use `arrival` as the delay-adjusted arrival at every confidence level.
pub(crate) fn expected(mut segment: Segment, arrival: &str) -> Segment {
    segment.arrivals = PercentileArrivals::uniform(t(arrival));
    segment
}

/// Use `arrival` as the delay-adjusted arrival from p95 upwards.
pub(crate) fn pessimistic(mut segment: Segment, arrival: &str) -> Segment {
    segment.arrivals.p95 = t(arrival);
    segment.arrivals.p99 = t(arrival);
    segment
}

pub(crate) fn no_walking() -> WalkingTable {
    WalkingTable::new()
}
