//! Load-time validation errors for scenario configurations.

use thiserror::Error;

/// Configuration problems detected when a scenario is loaded.
///
/// Once a [`crate::scenario::SimulationConfig`] validates, no model or
/// playback operation can fail, so this is the only error type in the core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("scenario id must not be empty")]
    EmptyId,

    #[error("scenario `{scenario}` defines no entities")]
    NoEntities { scenario: String },

    #[error("scenario `{scenario}` defines no anchors")]
    NoAnchors { scenario: String },

    #[error("duplicate id `{id}` in scenario `{scenario}`")]
    DuplicateId { scenario: String, id: String },

    #[error("`{field}` must be finite, got {value}")]
    NonFinite { field: String, value: f64 },

    #[error("entity `{entity}` has a piecewise trajectory with no segments")]
    EmptySegments { entity: String },

    #[error("entity `{entity}`: first segment must start at t = 0, got {threshold}")]
    FirstSegmentNotAtZero { entity: String, threshold: f64 },

    #[error(
        "entity `{entity}`: segment thresholds must be strictly ascending ({previous} then {next})"
    )]
    UnsortedSegments {
        entity: String,
        previous: f64,
        next: f64,
    },

    #[error("parameter range [{min}, {max}] is empty")]
    EmptyRange { min: f64, max: f64 },

    #[error("initial value {initial} lies outside [{min}, {max}]")]
    InitialOutOfRange { initial: f64, min: f64, max: f64 },

    #[error("playback ceiling {ceiling} must lie in ({initial}, {max}]")]
    BadCeiling { ceiling: f64, initial: f64, max: f64 },

    #[error("known solution {value} lies outside [{min}, {max}]")]
    SolutionOutOfRange { value: f64, min: f64, max: f64 },

    #[error("speed limits must satisfy 0 < min <= default <= max (got {min}, {default}, {max})")]
    BadSpeedLimits { min: f64, default: f64, max: f64 },

    #[error("landscape sampling needs start < end and step > 0 (got {start}..{end} by {step})")]
    BadLandscape { start: f64, end: f64, step: f64 },

    #[error("landscape {start}..{end} by {step} needs more than {limit} samples")]
    TooManySamples {
        start: f64,
        end: f64,
        step: f64,
        limit: usize,
    },

    #[error("meeting constants disagree: {entity} is at {actual} at t = {time}, expected {expected}")]
    InconsistentMeeting {
        entity: &'static str,
        time: f64,
        expected: f64,
        actual: f64,
    },

    #[cfg(feature = "serde")]
    #[error("invalid scenario JSON: {0}")]
    Json(String),
}

pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<(), ScenarioError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ScenarioError::NonFinite {
            field: field.to_string(),
            value,
        })
    }
}
