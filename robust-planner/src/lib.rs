//! Robust public-transport journey planner.
//!
//! Given a schedule of segments annotated with historical delay percentiles,
//! finds the latest departure from a start stop that still reaches the goal
//! by a requested time at the chosen confidence level.

pub mod domain;
pub mod planner;
pub mod walkable;
