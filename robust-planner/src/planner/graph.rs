//! The time-expanded graph of one query.
//!
//! Nodes are the filtered segments, indexed by their position in the filtered
//! list. Arcs point from an edge's head back to its tail, so a search rooted
//! at a destination event walks the journey backwards.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::NodeKey;

use super::edges::Edge;
use super::window::FilteredSegment;

/// A reachable neighbour and the cost of the arc leading to it, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacent {
    pub node: usize,
    pub weight: u32,
}

/// Reversed adjacency over the filtered segments.
#[derive(Debug, Clone)]
pub struct TimeExpandedGraph {
    index: HashMap<NodeKey, usize>,
    arcs: Vec<Vec<Adjacent>>,
    arc_count: usize,
    dropped_edges: usize,
}

impl TimeExpandedGraph {
    /// Build the graph from the filtered segments and the synthesized edges.
    ///
    /// Edges whose endpoints are not both filtered events are dropped. When
    /// several edges connect the same pair, the cheapest one is kept. A node
    /// key carried by several rows resolves to the last of them.
    pub fn build(filtered: &[FilteredSegment<'_>], edges: &[Edge]) -> Self {
        let index: HashMap<NodeKey, usize> = filtered
            .iter()
            .enumerate()
            .map(|(i, segment)| (segment.node_key(), i))
            .collect();

        let mut cheapest: BTreeMap<(usize, usize), u32> = BTreeMap::new();
        let mut dropped_edges = 0;

        for edge in edges {
            let endpoints = edge
                .head
                .as_ref()
                .and_then(|head| index.get(head))
                .zip(index.get(&edge.tail));

            let Some((&head, &tail)) = endpoints else {
                dropped_edges += 1;
                continue;
            };

            cheapest
                .entry((head, tail))
                .and_modify(|w| *w = (*w).min(edge.weight))
                .or_insert(edge.weight);
        }

        let mut arcs = vec![Vec::new(); filtered.len()];
        for (&(head, tail), &weight) in &cheapest {
            arcs[head].push(Adjacent { node: tail, weight });
        }

        debug!(
            nodes = filtered.len(),
            arcs = cheapest.len(),
            dropped = dropped_edges,
            "built time-expanded graph"
        );

        Self {
            index,
            arcs,
            arc_count: cheapest.len(),
            dropped_edges,
        }
    }

    pub fn node_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    /// Edges that referenced an event outside the window.
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// The node index of an event, if it is in the graph.
    pub fn node_index(&self, key: &NodeKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Arcs leaving `node`, i.e. the events that lead into it.
    pub fn neighbours(&self, node: usize) -> &[Adjacent] {
        self.arcs.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Confidence, Segment};
    use crate::planner::edges::EdgeKind;
    use crate::planner::fixtures::{call, t, trip};
    use crate::planner::window::filter_window;
    use chrono::Duration;

    fn window(segments: &[Segment]) -> Vec<FilteredSegment<'_>> {
        filter_window(segments, t("09:00:00"), Confidence::P90, Duration::hours(2))
    }

    fn edge(from: &Segment, to: &Segment, weight: u32) -> Edge {
        Edge {
            tail: from.node_key(),
            head: Some(to.node_key()),
            weight,
            label: from.origin_stop_name.clone(),
            kind: EdgeKind::Transfer,
        }
    }

    #[test]
    fn arcs_point_from_head_to_tail() {
        let segments = trip("t1", &[("A", "08:00:00", "08:00:00"), ("B", "08:20:00", "08:21:00")]);
        let filtered = window(&segments);
        let edges = vec![edge(&segments[0], &segments[1], 20)];

        let graph = TimeExpandedGraph::build(&filtered, &edges);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.arc_count(), 1);
        assert_eq!(graph.neighbours(1), &[Adjacent { node: 0, weight: 20 }]);
        assert!(graph.neighbours(0).is_empty());
        assert_eq!(graph.node_index(&segments[1].node_key()), Some(1));
    }

    #[test]
    fn duplicate_arcs_keep_cheapest() {
        let segments = vec![
            call("B", "t1", "08:20:00", "08:20:00"),
            call("B", "t2", "08:30:00", "08:30:00"),
        ];
        let filtered = window(&segments);
        let edges = vec![
            edge(&segments[0], &segments[1], 10),
            edge(&segments[0], &segments[1], 4),
            edge(&segments[0], &segments[1], 7),
        ];

        let graph = TimeExpandedGraph::build(&filtered, &edges);
        assert_eq!(graph.arc_count(), 1);
        assert_eq!(graph.neighbours(1), &[Adjacent { node: 0, weight: 4 }]);
    }

    #[test]
    fn edges_outside_window_are_dropped() {
        let segments = vec![
            call("A", "t1", "06:00:00", "06:00:00"),
            call("B", "t1", "08:20:00", "08:20:00"),
        ];
        let filtered = window(&segments);
        let mut open = edge(&segments[1], &segments[1], 0);
        open.head = None;
        let edges = vec![edge(&segments[0], &segments[1], 140), open];

        let graph = TimeExpandedGraph::build(&filtered, &edges);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.arc_count(), 0);
        assert_eq!(graph.dropped_edges(), 2);
        assert_eq!(graph.node_index(&segments[0].node_key()), None);
    }

    #[test]
    fn duplicate_node_key_resolves_to_last_row() {
        let segments = vec![
            call("B", "t1", "08:20:00", "08:20:00"),
            call("B", "t1", "08:20:00", "08:20:00"),
        ];
        let filtered = window(&segments);

        let graph = TimeExpandedGraph::build(&filtered, &[]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node_index(&segments[0].node_key()), Some(1));
    }

    #[test]
    fn neighbours_of_unknown_node_is_empty() {
        let graph = TimeExpandedGraph::build(&[], &[]);
        assert_eq!(graph.node_count(), 0);
        assert!(graph.neighbours(3).is_empty());
    }
}
