//! Robust journey search.
//!
//! Answers one query: "what is the latest way to leave `start` and still be
//! at `goal` by `end_time`, assuming delays up to the chosen percentile?"
//!
//! The pipeline runs the window filter, edge synthesis, graph construction,
//! path resolution and itinerary cleaning in order. Nothing is shared
//! between queries except the read-only inputs.

use tracing::debug;

use crate::domain::{ClockTime, Confidence, ItineraryRow, SegmentTable, StopId};
use crate::walkable::WalkingTable;

use super::clean::clean_itinerary;
use super::config::PlannerConfig;
use super::edges::EdgeSynthesizer;
use super::error::PlanError;
use super::graph::TimeExpandedGraph;
use super::resolve::resolve;
use super::window::filter_window;

/// A validated journey query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub start: StopId,
    pub goal: StopId,
    /// Latest acceptable arrival at the goal.
    pub end_time: ClockTime,
    pub confidence: Confidence,
}

impl Query {
    /// Create a new query from validated parts.
    pub fn new(start: StopId, goal: StopId, end_time: ClockTime, confidence: Confidence) -> Self {
        Self {
            start,
            goal,
            end_time,
            confidence,
        }
    }

    /// Parse a query from its raw parameters.
    ///
    /// The confidence level is checked first, so an unsupported level is
    /// reported before anything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use robust_planner::planner::{PlanError, Query};
    ///
    /// let query = Query::parse("8503000", "8503006", "09:00:00", 90).unwrap();
    /// assert_eq!(query.end_time.to_string(), "09:00:00");
    ///
    /// let err = Query::parse("8503000", "8503006", "9am", 70).unwrap_err();
    /// assert_eq!(err, PlanError::InvalidConfidenceLevel(70));
    /// ```
    pub fn parse(
        start: &str,
        goal: &str,
        end_time: &str,
        confidence: u8,
    ) -> Result<Self, PlanError> {
        let confidence = Confidence::try_from(confidence)?;
        let end_time = ClockTime::parse(end_time)?;
        Ok(Self::new(
            StopId::parse(start)?,
            StopId::parse(goal)?,
            end_time,
            confidence,
        ))
    }
}

/// The outcome of a successful query.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Boarding, alighting and walking rows.
    pub itinerary: Vec<ItineraryRow>,
    /// One row per visited event, before cleaning.
    pub raw: Vec<ItineraryRow>,
    /// Shortest-path cost from the chosen departure to the chosen arrival,
    /// in seconds.
    pub cost_secs: u32,
}

impl Plan {
    pub fn cost_minutes(&self) -> f64 {
        f64::from(self.cost_secs) / 60.0
    }
}

/// Journey planner over a fixed schedule.
pub struct Planner<'a> {
    segments: &'a SegmentTable,
    walking: &'a WalkingTable,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(
        segments: &'a SegmentTable,
        walking: &'a WalkingTable,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            segments,
            walking,
            config,
        }
    }

    /// Plan the latest robust journey for `query`.
    pub fn plan(&self, query: &Query) -> Result<Plan, PlanError> {
        let filtered = filter_window(
            self.segments.as_slice(),
            query.end_time,
            query.confidence,
            self.config.window(),
        );
        debug!(
            total = self.segments.len(),
            kept = filtered.len(),
            end_time = %query.end_time,
            confidence = %query.confidence,
            "filtered segments to window"
        );

        let edges = EdgeSynthesizer::new(&query.start, &query.goal, self.walking, self.config)
            .synthesize(&filtered);
        let graph = TimeExpandedGraph::build(&filtered, &edges);

        let path = resolve(
            &graph,
            &edges,
            &query.start,
            &query.goal,
            query.end_time,
            self.config.window_mins,
        )?;

        let raw: Vec<ItineraryRow> = path
            .nodes
            .iter()
            .map(|&node| ItineraryRow::from_segment(filtered[node].segment))
            .collect();
        let itinerary = clean_itinerary(&raw);

        debug!(
            raw = raw.len(),
            cleaned = itinerary.len(),
            cost_secs = path.cost_secs,
            "planned itinerary"
        );

        Ok(Plan {
            itinerary,
            raw,
            cost_secs: path.cost_secs,
        })
    }
}
