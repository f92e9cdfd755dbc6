//! Edge synthesis for the time-expanded graph.
//!
//! Every filtered segment already is an edge: riding its trip to the next
//! call. On top of those, three families are synthesized per stop:
//!
//! - same-stop transfers: arrive on one trip, leave on another;
//! - destination waits: zero-cost links between arrivals at the goal, so the
//!   search can settle on any admissible arrival without penalty;
//! - walking transfers: walk to a nearby stop and catch a trip there.
//!
//! Within a stop, events are ordered by effective arrival. The overlap tests
//! use the scheduled arrival; weights are minute-of-hour gaps between
//! effective arrivals. All weights are in seconds.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{NodeKey, StopId};
use crate::walkable::WalkingTable;

use super::config::PlannerConfig;
use super::window::FilteredSegment;

/// Which family an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Riding a trip to its next call
    Ride,
    /// Changing trips at the same stop
    Transfer,
    /// Zero-cost wait between arrivals at the goal
    DestinationWait,
    /// Walking to a nearby stop to catch a trip there
    Walk,
}

/// A directed edge between two events.
///
/// The head is missing for the last call of a trip; such edges never make
/// it into the graph.
#[derive(Debug, Clone)]
pub struct Edge {
    pub tail: NodeKey,
    pub head: Option<NodeKey>,
    /// Cost in seconds.
    pub weight: u32,
    /// Display name of the tail's stop.
    pub label: String,
    pub kind: EdgeKind,
}

impl Edge {
    fn between(
        from: &FilteredSegment<'_>,
        to: &FilteredSegment<'_>,
        weight: u32,
        kind: EdgeKind,
    ) -> Self {
        Self {
            tail: from.node_key(),
            head: Some(to.node_key()),
            weight,
            label: from.segment.origin_stop_name.clone(),
            kind,
        }
    }

    fn ride(segment: &FilteredSegment<'_>) -> Self {
        Self {
            tail: segment.node_key(),
            head: segment.segment.head_key(),
            weight: segment.segment.travel_time_secs,
            label: segment.segment.origin_stop_name.clone(),
            kind: EdgeKind::Ride,
        }
    }
}

type Group<'s, 'a> = Vec<&'s FilteredSegment<'a>>;

/// Filtered segments grouped by origin stop, in first-seen order.
struct StopGroups<'s, 'a> {
    order: Vec<&'a StopId>,
    groups: HashMap<&'a StopId, Group<'s, 'a>>,
}

impl<'s, 'a> StopGroups<'s, 'a> {
    fn new(filtered: &'s [FilteredSegment<'a>]) -> Self {
        let mut order = Vec::new();
        let mut groups: HashMap<&'a StopId, Group<'s, 'a>> = HashMap::new();

        for segment in filtered {
            let stop = &segment.segment.origin_stop;
            groups
                .entry(stop)
                .or_insert_with(|| {
                    order.push(stop);
                    Vec::new()
                })
                .push(segment);
        }

        // Stable, so equal arrivals keep their input order
        for group in groups.values_mut() {
            group.sort_by_key(|s| s.effective_arrival);
        }

        Self { order, groups }
    }

    fn get(&self, stop: &StopId) -> Option<&Group<'s, 'a>> {
        self.groups.get(stop)
    }

    fn iter(&self) -> impl Iterator<Item = (&'a StopId, &Group<'s, 'a>)> + '_ {
        self.order
            .iter()
            .filter_map(|stop| self.groups.get(*stop).map(|group| (*stop, group)))
    }
}

/// Synthesizes the edge list of one query's time-expanded graph.
pub struct EdgeSynthesizer<'q> {
    start: &'q StopId,
    goal: &'q StopId,
    walking: &'q WalkingTable,
    config: &'q PlannerConfig,
}

impl<'q> EdgeSynthesizer<'q> {
    pub fn new(
        start: &'q StopId,
        goal: &'q StopId,
        walking: &'q WalkingTable,
        config: &'q PlannerConfig,
    ) -> Self {
        Self {
            start,
            goal,
            walking,
            config,
        }
    }

    /// Synthesized edges followed by one riding edge per filtered segment.
    pub fn synthesize(&self, filtered: &[FilteredSegment<'_>]) -> Vec<Edge> {
        let groups = StopGroups::new(filtered);
        let mut edges = Vec::new();

        for (stop, group) in groups.iter() {
            // No waiting at the origin
            if stop != self.start {
                self.transfer_edges(group, &mut edges);
            }

            if stop == self.goal {
                self.destination_edges(group, &mut edges);
            }

            self.walking_edges(stop, group, &groups, &mut edges);
        }

        debug!(
            synthesized = edges.len(),
            transfers = edges.iter().filter(|e| e.kind == EdgeKind::Transfer).count(),
            destination_waits = edges
                .iter()
                .filter(|e| e.kind == EdgeKind::DestinationWait)
                .count(),
            walks = edges.iter().filter(|e| e.kind == EdgeKind::Walk).count(),
            "synthesized edges"
        );

        edges.extend(filtered.iter().map(Edge::ride));
        edges
    }

    /// Ride `a`, then catch `b` at the same stop.
    fn transfer_edges(&self, group: &Group<'_, '_>, edges: &mut Vec<Edge>) {
        let slack = self.config.connection_slack();

        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                let overlaps = a.segment.arrival_time.on_service_day()
                    < b.segment.arrival_time.offset(slack);
                if !overlaps {
                    continue;
                }

                let gap = a.effective_arrival.minute_of_hour_gap(b.effective_arrival);
                if gap > self.config.min_transfer_weight_mins {
                    edges.push(Edge::between(a, b, gap * 60, EdgeKind::Transfer));
                }
            }
        }
    }

    /// Any earlier arrival at the goal reaches a later one for free.
    fn destination_edges(&self, group: &Group<'_, '_>, edges: &mut Vec<Edge>) {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                if a.segment.arrival_time < b.segment.arrival_time {
                    edges.push(Edge::between(a, b, 0, EdgeKind::DestinationWait));
                }
            }
        }
    }

    /// Walk to a nearby stop, arriving just in time for a trip there.
    fn walking_edges(
        &self,
        stop: &StopId,
        group: &Group<'_, '_>,
        groups: &StopGroups<'_, '_>,
        edges: &mut Vec<Edge>,
    ) {
        let slack = self.config.connection_slack();

        for link in self.walking.walkable_from(stop) {
            let Some(close) = groups.get(&link.to) else {
                continue;
            };
            let reach = link.duration + slack;

            for from in group {
                let possible = from.effective_arrival.offset(reach);
                let latest = possible + slack;
                let earliest_arrival = from.segment.arrival_time.offset(reach);

                let first =
                    close.partition_point(|c| c.effective_arrival.on_service_day() < possible);
                for candidate in close[first..]
                    .iter()
                    .take_while(|c| c.effective_arrival.on_service_day() < latest)
                {
                    if earliest_arrival < candidate.segment.arrival_time.on_service_day() {
                        let gap = from
                            .effective_arrival
                            .minute_of_hour_gap(candidate.effective_arrival);
                        edges.push(Edge::between(from, candidate, gap * 60, EdgeKind::Walk));
                    }
                }
            }
        }
    }
}
