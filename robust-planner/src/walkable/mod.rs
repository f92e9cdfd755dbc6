//! Walking connections between nearby stops.
//!
//! Some stops are close enough to walk between, enabling connections that
//! don't appear in the schedule. This module provides the Walking Adjacency
//! Table: for each stop, the stops reachable on foot and how long it takes.

use std::collections::HashMap;

use chrono::Duration;
use serde::Deserialize;

use crate::domain::{DomainError, StopId};

/// A walking table row as produced by the feed loader.
#[derive(Debug, Clone, Deserialize)]
pub struct WalkingRow {
    #[serde(alias = "stop_id_s")]
    pub stop_id: String,
    #[serde(alias = "close_stop_id_s")]
    pub close_stop_id: String,
    /// Walking time in minutes, possibly fractional.
    #[serde(alias = "time")]
    pub time_minutes: f64,
}

impl WalkingRow {
    /// The walking time, to the millisecond.
    pub fn duration(&self) -> Result<Duration, DomainError> {
        let minutes = self.time_minutes;
        if !minutes.is_finite() || minutes < 0.0 {
            return Err(DomainError::InvalidWalkingTime(minutes));
        }
        Ok(Duration::milliseconds((minutes * 60_000.0).round() as i64))
    }
}

/// A stop reachable on foot, and how long the walk takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkLink {
    pub to: StopId,
    pub duration: Duration,
}

/// The Walking Adjacency Table.
///
/// Links are directed: only rows keyed by the stop being expanded are
/// consulted, so a walk from A to B says nothing about B to A.
#[derive(Debug, Clone, Default)]
pub struct WalkingTable {
    links: HashMap<StopId, Vec<WalkLink>>,
}

impl WalkingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from loader rows, in order.
    ///
    /// Fails on a blank stop id or a negative or non-finite walking time.
    pub fn from_rows(rows: &[WalkingRow]) -> Result<Self, DomainError> {
        let mut table = Self::new();
        for row in rows {
            table.add(
                StopId::parse(&row.stop_id)?,
                StopId::parse(&row.close_stop_id)?,
                row.duration()?,
            );
        }
        Ok(table)
    }

    /// Add a walking link from `from` to `to`.
    pub fn add(&mut self, from: StopId, to: StopId, duration: Duration) {
        self.links
            .entry(from)
            .or_default()
            .push(WalkLink { to, duration });
    }

    /// All stops walkable from a given stop, in insertion order.
    pub fn walkable_from(&self, from: &StopId) -> &[WalkLink] {
        self.links.get(from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if `to` is listed as walkable from `from`.
    pub fn is_walkable(&self, from: &StopId, to: &StopId) -> bool {
        self.walkable_from(from).iter().any(|link| &link.to == to)
    }

    /// Returns the number of directed links.
    pub fn len(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    /// Returns true if there are no walking links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Builder for creating walking tables.
///
/// Provides a fluent API for adding links. Links with an invalid stop id
/// are ignored.
///
/// # Example
///
/// ```
/// use robust_planner::domain::StopId;
/// use robust_planner::walkable::WalkingTableBuilder;
///
/// let table = WalkingTableBuilder::new()
///     .add("8503000", "8503006", 4)
///     .build();
///
/// let hb = StopId::parse("8503000").unwrap();
/// let oerlikon = StopId::parse("8503006").unwrap();
/// assert!(table.is_walkable(&hb, &oerlikon));
/// assert!(!table.is_walkable(&oerlikon, &hb));
/// ```
#[derive(Debug, Default)]
pub struct WalkingTableBuilder {
    inner: WalkingTable,
}

impl WalkingTableBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directed walking link.
    pub fn add(mut self, from: &str, to: &str, minutes: u32) -> Self {
        if let (Ok(from), Ok(to)) = (StopId::parse(from), StopId::parse(to)) {
            self.inner.add(from, to, Duration::minutes(i64::from(minutes)));
        }
        self
    }

    /// Add a link in both directions.
    pub fn add_both(self, a: &str, b: &str, minutes: u32) -> Self {
        self.add(a, b, minutes).add(b, a, minutes)
    }

    /// Build the walking table.
    pub fn build(self) -> WalkingTable {
        self.inner
    }
}
