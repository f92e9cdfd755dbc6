//! Robust journey planner.
//!
//! This module answers: "when must I leave to reach my destination by a
//! given time, if every connection may run as late as its historical delay
//! percentile?"
//!
//! Each query builds a time-expanded graph over the schedule events in a
//! window ending at the requested arrival, runs a backward shortest-path
//! search from a chosen arrival at the goal, and turns the resulting event
//! sequence into a rider-facing itinerary.

mod clean;
mod config;
mod dijkstra;
mod edges;
mod error;
mod graph;
mod resolve;
mod search;
mod window;

#[cfg(test)]
mod fixtures;

pub use clean::clean_itinerary;
pub use config::PlannerConfig;
pub use dijkstra::{ShortestPaths, shortest_paths};
pub use edges::{Edge, EdgeKind, EdgeSynthesizer};
pub use error::PlanError;
pub use graph::{Adjacent, TimeExpandedGraph};
pub use resolve::{ResolvedPath, resolve, select_destination, select_start};
pub use search::{Plan, Planner, Query};
pub use window::{FilteredSegment, filter_window};
