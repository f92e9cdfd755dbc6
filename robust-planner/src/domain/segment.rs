//! Schedule segments.
//!
//! A `Segment` is one scheduled event: a trip standing at a stop, together
//! with where the same trip calls next. Each segment becomes one node of the
//! time-expanded graph, and doubles as the riding edge towards the trip's
//! next call.

use serde::Deserialize;

use super::{ClockTime, Confidence, DomainError, StopId, TimeError, TripId};

/// A segment row as produced by the feed loader, before validation.
///
/// Fields use the domain names; the feed's own column names are
/// accepted as aliases. Optional "next" fields may be missing, `null` or
/// empty for the last call of a trip.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSegment {
    #[serde(alias = "stop_id_s")]
    pub origin_stop: String,
    pub trip_id: String,
    pub arrival_time: String,
    pub departure_time: String,
    #[serde(alias = "next_stop_id_s")]
    pub dest_stop: Option<String>,
    pub next_trip_id: Option<String>,
    pub next_arrival_time: Option<String>,
    pub next_departure_time: Option<String>,
    #[serde(alias = "Travel_time")]
    pub travel_time_minutes: Option<f64>,
    #[serde(alias = "stop_name")]
    pub origin_stop_name: String,
    #[serde(alias = "arrival_time_80")]
    pub arrival_p80: String,
    #[serde(alias = "arrival_time_85")]
    pub arrival_p85: String,
    #[serde(alias = "arrival_time_90")]
    pub arrival_p90: String,
    #[serde(alias = "arrival_time_95")]
    pub arrival_p95: String,
    #[serde(alias = "arrival_time_99")]
    pub arrival_p99: String,
}

/// Identity of a node in the time-expanded graph.
///
/// Two segments with the same stop, trip and times are the same event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub stop: StopId,
    pub trip: TripId,
    pub arrival: ClockTime,
    pub departure: ClockTime,
}

/// Delay-adjusted arrival times, one per supported confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentileArrivals {
    pub p80: ClockTime,
    pub p85: ClockTime,
    pub p90: ClockTime,
    pub p95: ClockTime,
    pub p99: ClockTime,
}

impl PercentileArrivals {
    /// The same arrival time at every confidence level.
    pub fn uniform(time: ClockTime) -> Self {
        Self {
            p80: time,
            p85: time,
            p90: time,
            p95: time,
            p99: time,
        }
    }

    pub fn at(&self, confidence: Confidence) -> ClockTime {
        match confidence {
            Confidence::P80 => self.p80,
            Confidence::P85 => self.p85,
            Confidence::P90 => self.p90,
            Confidence::P95 => self.p95,
            Confidence::P99 => self.p99,
        }
    }
}

/// A validated scheduled trip hop.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub origin_stop: StopId,
    pub trip_id: TripId,
    pub arrival_time: ClockTime,
    pub departure_time: ClockTime,
    pub dest_stop: Option<StopId>,
    pub next_trip_id: Option<TripId>,
    pub next_arrival_time: Option<ClockTime>,
    pub next_departure_time: Option<ClockTime>,
    /// Riding time to the next call, in seconds.
    pub travel_time_secs: u32,
    pub origin_stop_name: String,
    pub arrivals: PercentileArrivals,
}

impl Segment {
    /// The node this segment stands for.
    pub fn node_key(&self) -> NodeKey {
        NodeKey {
            stop: self.origin_stop.clone(),
            trip: self.trip_id.clone(),
            arrival: self.arrival_time,
            departure: self.departure_time,
        }
    }

    /// The node of the trip's next call, when all four "next" fields are set.
    pub fn head_key(&self) -> Option<NodeKey> {
        Some(NodeKey {
            stop: self.dest_stop.clone()?,
            trip: self.next_trip_id.clone()?,
            arrival: self.next_arrival_time?,
            departure: self.next_departure_time?,
        })
    }

    /// The delay-adjusted arrival time for a confidence level.
    pub fn arrival_at(&self, confidence: Confidence) -> ClockTime {
        self.arrivals.at(confidence)
    }
}

fn optional_field(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn optional_time(value: &Option<String>) -> Result<Option<ClockTime>, TimeError> {
    optional_field(value).map(ClockTime::parse).transpose()
}

impl TryFrom<&RawSegment> for Segment {
    type Error = DomainError;

    fn try_from(raw: &RawSegment) -> Result<Self, Self::Error> {
        // Fractional minutes are kept to the second
        let travel_time_secs = match raw.travel_time_minutes {
            None => 0,
            Some(minutes) if minutes.is_finite() && minutes >= 0.0 => {
                (minutes * 60.0).round() as u32
            }
            Some(minutes) => return Err(DomainError::InvalidTravelTime(minutes)),
        };

        Ok(Segment {
            origin_stop: StopId::parse(&raw.origin_stop)?,
            trip_id: TripId::new(&raw.trip_id),
            arrival_time: ClockTime::parse(&raw.arrival_time)?,
            departure_time: ClockTime::parse(&raw.departure_time)?,
            dest_stop: optional_field(&raw.dest_stop)
                .map(StopId::parse)
                .transpose()?,
            next_trip_id: optional_field(&raw.next_trip_id).map(TripId::new),
            next_arrival_time: optional_time(&raw.next_arrival_time)?,
            next_departure_time: optional_time(&raw.next_departure_time)?,
            travel_time_secs,
            origin_stop_name: raw.origin_stop_name.clone(),
            arrivals: PercentileArrivals {
                p80: ClockTime::parse(&raw.arrival_p80)?,
                p85: ClockTime::parse(&raw.arrival_p85)?,
                p90: ClockTime::parse(&raw.arrival_p90)?,
                p95: ClockTime::parse(&raw.arrival_p95)?,
                p99: ClockTime::parse(&raw.arrival_p99)?,
            },
        })
    }
}

/// The immutable Segment Table shared by every query.
#[derive(Debug, Clone, Default)]
pub struct SegmentTable {
    segments: Vec<Segment>,
}

impl SegmentTable {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Validate every raw row, in order.
    ///
    /// Fails on the first bad row rather than skipping it: dropping a row
    /// would shift the position-based node identities of later rows.
    pub fn from_raw(rows: &[RawSegment]) -> Result<Self, DomainError> {
        let segments = rows
            .iter()
            .enumerate()
            .map(|(row, raw)| {
                Segment::try_from(raw).map_err(|e| DomainError::InRow {
                    row,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
