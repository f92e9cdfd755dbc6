//! On-time confidence levels.

use std::fmt;

use serde::Serialize;

/// Error returned for a confidence level outside the supported percentiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid confidence level {0}: expected one of 80, 85, 90, 95, 99")]
pub struct InvalidConfidence(pub u8);

/// Percentile of the historical delay distribution used as the arrival time.
///
/// A higher percentile means a more pessimistic (later) arrival estimate,
/// which trades itinerary length for punctuality.
///
/// # Examples
///
/// ```
/// use robust_planner::domain::Confidence;
///
/// assert_eq!(Confidence::try_from(90).unwrap(), Confidence::P90);
/// assert!(Confidence::try_from(50).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Confidence {
    P80,
    P85,
    P90,
    P95,
    P99,
}

impl Confidence {
    /// Every supported level, lowest first.
    pub const ALL: [Confidence; 5] = [
        Confidence::P80,
        Confidence::P85,
        Confidence::P90,
        Confidence::P95,
        Confidence::P99,
    ];

    /// The percentile as an integer (80, 85, 90, 95 or 99).
    pub fn percentile(self) -> u8 {
        match self {
            Confidence::P80 => 80,
            Confidence::P85 => 85,
            Confidence::P90 => 90,
            Confidence::P95 => 95,
            Confidence::P99 => 99,
        }
    }
}

impl TryFrom<u8> for Confidence {
    type Error = InvalidConfidence;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            80 => Ok(Confidence::P80),
            85 => Ok(Confidence::P85),
            90 => Ok(Confidence::P90),
            95 => Ok(Confidence::P95),
            99 => Ok(Confidence::P99),
            other => Err(InvalidConfidence(other)),
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.percentile())
    }
}
