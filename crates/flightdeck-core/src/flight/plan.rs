use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const ORIGIN_PLACEHOLDER: &str = "Origin";
const DESTINATION_PLACEHOLDER: &str = "Destination";

/// What the user asked to fly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    pub origin: String,
    pub destination: String,
    /// Planned length in minutes.
    pub duration_minutes: f64,
}

impl FlightPlan {
    /// Validate planner input.
    ///
    /// Origin and destination are trimmed and must be non-empty; the
    /// duration must be finite and strictly positive.
    pub fn new(
        origin: &str,
        destination: &str,
        duration_minutes: f64,
    ) -> Result<Self, ValidationError> {
        let origin = origin.trim();
        let destination = destination.trim();
        if origin.is_empty() {
            return Err(ValidationError::MissingOrigin);
        }
        if destination.is_empty() {
            return Err(ValidationError::MissingDestination);
        }
        if !duration_minutes.is_finite() || duration_minutes <= 0.0 {
            return Err(ValidationError::InvalidDuration {
                value: duration_minutes.to_string(),
            });
        }
        Ok(Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            duration_minutes,
        })
    }

    /// Parse the planner's duration text field.
    pub fn parse_duration(text: &str) -> Result<f64, ValidationError> {
        text.trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidDuration {
                value: text.to_string(),
            })
    }

    /// Build a plan from screen-to-screen parameters.
    ///
    /// Never fails: missing names become placeholders and a missing or
    /// unusable duration becomes zero, which lands immediately.
    pub fn from_route(
        origin: Option<&str>,
        destination: Option<&str>,
        duration: Option<&str>,
    ) -> Self {
        let duration_minutes = duration
            .map(str::trim)
            .map(|d| if d.is_empty() { Ok(0.0) } else { d.parse::<f64>() })
            .and_then(Result::ok)
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or(0.0);

        Self {
            origin: non_empty_or(origin, ORIGIN_PLACEHOLDER),
            destination: non_empty_or(destination, DESTINATION_PLACEHOLDER),
            duration_minutes,
        }
    }

    /// Countable seconds: `round(minutes * 60)`, never negative.
    pub fn total_secs(&self) -> u64 {
        let secs = (self.duration_minutes * 60.0).round();
        if secs.is_finite() && secs > 0.0 {
            secs as u64
        } else {
            0
        }
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
