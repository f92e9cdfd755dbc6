//! Single-source shortest paths over the time-expanded graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use super::graph::TimeExpandedGraph;

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: u32,
    node: usize,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost; ties settle the lower node index first
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Distances and predecessors from one source node.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: usize,
    distances: Vec<Option<u32>>,
    predecessors: Vec<Option<usize>>,
}

impl ShortestPaths {
    pub fn source(&self) -> usize {
        self.source
    }

    /// Cost in seconds of the cheapest path from the source, if `node` is
    /// reachable.
    pub fn distance(&self, node: usize) -> Option<u32> {
        self.distances.get(node).copied().flatten()
    }

    /// The node preceding `node` on its cheapest path.
    ///
    /// None for the source itself and for unreachable nodes.
    pub fn predecessor(&self, node: usize) -> Option<usize> {
        self.predecessors.get(node).copied().flatten()
    }

    /// Nodes from `node` back to the source, both inclusive.
    ///
    /// Empty if `node` is unreachable.
    pub fn path_to_source(&self, node: usize) -> Vec<usize> {
        if self.distance(node).is_none() {
            return Vec::new();
        }

        let mut path = vec![node];
        let mut current = node;
        while let Some(previous) = self.predecessor(current) {
            path.push(previous);
            current = previous;
        }
        path
    }
}

/// Dijkstra's algorithm from `source` following the graph's arcs.
pub fn shortest_paths(graph: &TimeExpandedGraph, source: usize) -> ShortestPaths {
    let n = graph.node_count();
    let mut distances: Vec<Option<u32>> = vec![None; n];
    let mut predecessors: Vec<Option<usize>> = vec![None; n];
    let mut heap = BinaryHeap::new();

    if source < n {
        distances[source] = Some(0);
        heap.push(State {
            cost: 0,
            node: source,
        });
    }

    let mut settled = 0usize;
    while let Some(State { cost, node }) = heap.pop() {
        // Stale heap entry
        if distances[node].is_some_and(|best| cost > best) {
            continue;
        }
        settled += 1;

        for adjacent in graph.neighbours(node) {
            let next_cost = cost.saturating_add(adjacent.weight);
            let improves = distances[adjacent.node].is_none_or(|best| next_cost < best);
            if improves {
                distances[adjacent.node] = Some(next_cost);
                predecessors[adjacent.node] = Some(node);
                heap.push(State {
                    cost: next_cost,
                    node: adjacent.node,
                });
            }
        }
    }

    trace!(source, settled, "shortest paths computed");

    ShortestPaths {
        source,
        distances,
        predecessors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Confidence, Segment};
    use crate::planner::edges::{Edge, EdgeKind};
    use crate::planner::fixtures::{call, t};
    use crate::planner::window::filter_window;
    use chrono::Duration;

    /// A graph over `n` standalone events with the given (from, to, weight)
    /// edges. Arcs run from `to` back to `from`.
    fn graph(n: usize, edges: &[(usize, usize, u32)]) -> TimeExpandedGraph {
        let segments: Vec<Segment> = (0..n)
            .map(|i| call("A", &format!("t{i}"), "08:00:00", "08:00:00"))
            .collect();
        let filtered = filter_window(&segments, t("09:00:00"), Confidence::P90, Duration::hours(2));
        let edges: Vec<Edge> = edges
            .iter()
            .map(|&(from, to, weight)| Edge {
                tail: segments[from].node_key(),
                head: Some(segments[to].node_key()),
                weight,
                label: String::new(),
                kind: EdgeKind::Ride,
            })
            .collect();
        TimeExpandedGraph::build(&filtered, &edges)
    }

    #[test]
    fn source_has_zero_distance() {
        let paths = shortest_paths(&graph(1, &[]), 0);
        assert_eq!(paths.source(), 0);
        assert_eq!(paths.distance(0), Some(0));
        assert_eq!(paths.predecessor(0), None);
        assert_eq!(paths.path_to_source(0), vec![0]);
    }

    #[test]
    fn follows_arcs_backwards() {
        // 0 -> 1 -> 2, searched from 2
        let paths = shortest_paths(&graph(3, &[(0, 1, 20), (1, 2, 4)]), 2);
        assert_eq!(paths.distance(0), Some(24));
        assert_eq!(paths.predecessor(0), Some(1));
        assert_eq!(paths.path_to_source(0), vec![0, 1, 2]);
    }

    #[test]
    fn picks_cheaper_route() {
        // 0 -> 3 directly costs 30; via 1 and 2 it costs 10
        let g = graph(4, &[(0, 3, 30), (0, 1, 5), (1, 2, 3), (2, 3, 2)]);
        let paths = shortest_paths(&g, 3);
        assert_eq!(paths.distance(0), Some(10));
        assert_eq!(paths.path_to_source(0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn unreachable_nodes() {
        let paths = shortest_paths(&graph(3, &[(1, 2, 5)]), 2);
        assert_eq!(paths.distance(0), None);
        assert_eq!(paths.predecessor(0), None);
        assert!(paths.path_to_source(0).is_empty());
    }

    #[test]
    fn zero_weight_arcs() {
        let paths = shortest_paths(&graph(3, &[(0, 1, 0), (1, 2, 0)]), 2);
        assert_eq!(paths.distance(0), Some(0));
        assert_eq!(paths.path_to_source(0), vec![0, 1, 2]);
    }

    #[test]
    fn source_outside_graph() {
        let paths = shortest_paths(&graph(2, &[(0, 1, 1)]), 7);
        assert_eq!(paths.distance(0), None);
        assert_eq!(paths.distance(7), None);
    }
}
