//! Path resolution: choose the arrival to search from, run the backward
//! search, then choose the latest start that reaches it.

use std::cmp::Reverse;

use tracing::debug;

use crate::domain::{ClockTime, StopId};

use super::dijkstra::{ShortestPaths, shortest_paths};
use super::edges::Edge;
use super::error::PlanError;
use super::graph::TimeExpandedGraph;

/// Node indices of a resolved journey, in travel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Arrival event at the goal the search was rooted at.
    pub root: usize,
    /// Chosen departure event at the start.
    pub start: usize,
    /// From `start` to `root`, both inclusive.
    pub nodes: Vec<usize>,
    pub cost_secs: u32,
}

/// Pick the search root among the edges arriving at `goal`.
///
/// Candidates are ranked by weight, then by the head's departure, both
/// descending; the first whose head arrives by `end_time` wins.
pub fn select_destination(
    graph: &TimeExpandedGraph,
    edges: &[Edge],
    goal: &StopId,
    end_time: ClockTime,
) -> Result<usize, PlanError> {
    let mut candidates: Vec<(&Edge, _)> = edges
        .iter()
        .filter_map(|edge| edge.head.as_ref().map(|head| (edge, head)))
        .filter(|(_, head)| &head.stop == goal)
        .collect();
    candidates.sort_by_key(|(edge, head)| Reverse((edge.weight, head.departure)));

    candidates
        .into_iter()
        .filter(|(_, head)| head.arrival <= end_time)
        .find_map(|(_, head)| graph.node_index(head))
        .ok_or_else(|| PlanError::NoCompliantDestination { goal: goal.clone() })
}

/// Pick the latest departure from `start` that the search reached.
///
/// Candidates are the tails of edges leaving `start`, ranked by departure
/// then arrival, both descending.
pub fn select_start(
    graph: &TimeExpandedGraph,
    edges: &[Edge],
    paths: &ShortestPaths,
    start: &StopId,
) -> Option<usize> {
    let mut candidates: Vec<_> = edges.iter().filter(|edge| &edge.tail.stop == start).collect();
    candidates.sort_by_key(|edge| Reverse((edge.tail.departure, edge.tail.arrival)));

    candidates
        .into_iter()
        .filter_map(|edge| graph.node_index(&edge.tail))
        .find(|&node| paths.predecessor(node).is_some())
}

/// Resolve one query on a built graph.
pub fn resolve(
    graph: &TimeExpandedGraph,
    edges: &[Edge],
    start: &StopId,
    goal: &StopId,
    end_time: ClockTime,
    window_mins: i64,
) -> Result<ResolvedPath, PlanError> {
    let root = select_destination(graph, edges, goal, end_time)?;
    debug!(root, %goal, "selected destination event");

    let paths = shortest_paths(graph, root);

    let no_path = || PlanError::NoPathFound {
        start: start.clone(),
        window_mins,
    };
    let start_node = select_start(graph, edges, &paths, start).ok_or_else(no_path)?;
    let cost_secs = paths.distance(start_node).ok_or_else(no_path)?;
    debug!(start = start_node, cost_secs, "selected start event");

    Ok(ResolvedPath {
        root,
        start: start_node,
        nodes: paths.path_to_source(start_node),
        cost_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Confidence, Segment};
    use crate::planner::config::PlannerConfig;
    use crate::planner::edges::EdgeSynthesizer;
    use crate::planner::fixtures::{expected, no_walking, stop, t, trip};
    use crate::planner::window::filter_window;
    use chrono::Duration;

    fn two_trips() -> Vec<Segment> {
        let mut segments = trip(
            "t1",
            &[("A", "08:00:00", "08:00:00"), ("B", "08:20:00", "08:20:00")],
        );
        segments[1] = expected(segments[1].clone(), "08:21:00");
        segments.extend(trip(
            "t2",
            &[("B", "08:25:00", "08:25:00"), ("C", "08:40:00", "08:40:00")],
        ));
        segments[3] = expected(segments[3].clone(), "08:41:00");
        segments
    }

    fn run(segments: &[Segment], end: &str) -> Result<ResolvedPath, PlanError> {
        let filtered = filter_window(segments, t(end), Confidence::P90, Duration::hours(2));
        let config = PlannerConfig::default();
        let (start, goal) = (stop("A"), stop("C"));
        let edges =
            EdgeSynthesizer::new(&start, &goal, &no_walking(), &config).synthesize(&filtered);
        let graph = TimeExpandedGraph::build(&filtered, &edges);
        resolve(&graph, &edges, &start, &goal, t(end), config.window_mins)
    }

    #[test]
    fn resolves_through_transfer() {
        let path = run(&two_trips(), "09:00:00").unwrap();
        assert_eq!(path.root, 3);
        assert_eq!(path.start, 0);
        assert_eq!(path.nodes, vec![0, 1, 2, 3]);
        // 20 min riding, 4 changing at B, 15 riding
        assert_eq!(path.cost_secs, 39 * 60);
    }

    #[test]
    fn destination_must_arrive_by_end_time() {
        let err = run(&two_trips(), "08:35:00").unwrap_err();
        assert_eq!(err, PlanError::NoCompliantDestination { goal: stop("C") });
    }

    #[test]
    fn disconnected_start() {
        // t2 leaves B before t1 gets there
        let mut segments = trip(
            "t1",
            &[("A", "08:00:00", "08:00:00"), ("B", "08:20:00", "08:20:00")],
        );
        segments.extend(trip(
            "t2",
            &[("B", "08:10:00", "08:10:00"), ("C", "08:25:00", "08:25:00")],
        ));

        let err = run(&segments, "09:00:00").unwrap_err();
        assert!(err.is_no_path());
        assert_eq!(
            err,
            PlanError::NoPathFound {
                start: stop("A"),
                window_mins: 120
            }
        );
    }

    #[test]
    fn prefers_latest_start_that_connects() {
        // Both departures from A reach B in time for t2
        let mut segments = two_trips();
        segments.extend(trip(
            "t0",
            &[("A", "08:05:00", "08:05:00"), ("B", "08:22:00", "08:22:00")],
        ));

        let path = run(&segments, "09:00:00").unwrap();
        assert_eq!(path.start, 4);
        assert_eq!(path.nodes.first(), Some(&4));
        assert_eq!(path.nodes.last(), Some(&3));
    }
}
