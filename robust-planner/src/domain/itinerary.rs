//! Itinerary rows.
//!
//! An itinerary is an ordered list of rows, each one a rider-facing event:
//! boarding a trip (departure set, arrival empty), alighting from it
//! (arrival set, departure empty), or a walk marked by the `Walking`
//! sentinel in place of a trip.

use serde::Serialize;

use super::{ClockTime, Segment, StopId, TripRef};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryRow {
    pub stop_id: StopId,
    pub stop_name: String,
    pub trip: TripRef,
    pub arrival_time: Option<ClockTime>,
    pub departure_time: Option<ClockTime>,
}

impl ItineraryRow {
    /// The raw view of a segment: its stop, trip and both scheduled times.
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            stop_id: segment.origin_stop.clone(),
            stop_name: segment.origin_stop_name.clone(),
            trip: TripRef::Scheduled(segment.trip_id.clone()),
            arrival_time: Some(segment.arrival_time),
            departure_time: Some(segment.departure_time),
        }
    }

    /// Board `trip` here: keeps the departure, drops the arrival.
    pub fn boarding(&self, trip: &TripRef) -> Self {
        Self {
            stop_id: self.stop_id.clone(),
            stop_name: self.stop_name.clone(),
            trip: trip.clone(),
            arrival_time: None,
            departure_time: self.departure_time,
        }
    }

    /// Alight from `trip` here: keeps the arrival, drops the departure.
    pub fn alighting(&self, trip: &TripRef) -> Self {
        Self {
            stop_id: self.stop_id.clone(),
            stop_name: self.stop_name.clone(),
            trip: trip.clone(),
            arrival_time: self.arrival_time,
            departure_time: None,
        }
    }

    /// Arrive here on foot.
    pub fn walked_to(&self) -> Self {
        self.alighting(&TripRef::Walking)
    }

    /// Set off on foot from here, leaving at this row's arrival time.
    pub fn walking_from(&self) -> Self {
        Self {
            stop_id: self.stop_id.clone(),
            stop_name: self.stop_name.clone(),
            trip: TripRef::Walking,
            arrival_time: None,
            departure_time: self.arrival_time,
        }
    }

    pub fn is_boarding(&self) -> bool {
        !self.trip.is_walking() && self.arrival_time.is_none() && self.departure_time.is_some()
    }

    pub fn is_alighting(&self) -> bool {
        !self.trip.is_walking() && self.arrival_time.is_some() && self.departure_time.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TripId;

    fn row() -> ItineraryRow {
        ItineraryRow {
            stop_id: StopId::parse("8503000").unwrap(),
            stop_name: "Zürich HB".to_string(),
            trip: TripRef::Scheduled(TripId::new("t1")),
            arrival_time: ClockTime::parse("08:02:00").ok(),
            departure_time: ClockTime::parse("08:04:00").ok(),
        }
    }

    #[test]
    fn boarding_keeps_departure() {
        let raw = row();
        let board = raw.boarding(&raw.trip);
        assert!(board.is_boarding());
        assert_eq!(board.arrival_time, None);
        assert_eq!(board.departure_time, raw.departure_time);
    }

    #[test]
    fn alighting_keeps_arrival() {
        let raw = row();
        let alight = raw.alighting(&raw.trip);
        assert!(alight.is_alighting());
        assert_eq!(alight.arrival_time, raw.arrival_time);
        assert_eq!(alight.departure_time, None);
    }

    #[test]
    fn walking_rows() {
        let raw = row();

        let to = raw.walked_to();
        assert!(to.trip.is_walking());
        assert_eq!(to.arrival_time, raw.arrival_time);
        assert!(!to.is_alighting());

        let from = raw.walking_from();
        assert!(from.trip.is_walking());
        assert_eq!(from.arrival_time, None);
        assert_eq!(from.departure_time, raw.arrival_time);
    }

    #[test]
    fn serializes_with_nulls() {
        let raw = row();
        let json = serde_json::to_value(raw.walked_to()).unwrap();
        assert_eq!(json["trip"], "Walking");
        assert_eq!(json["arrival_time"], "08:02:00");
        assert!(json["departure_time"].is_null());
        assert_eq!(json["stop_id"], "8503000");
    }
}
