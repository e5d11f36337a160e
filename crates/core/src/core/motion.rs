//! Piecewise-linear motion on a number line.
//!
//! Two forms live here:
//! - [`Entity`] + [`Trajectory`]: the generic engine. Position is the integral of a
//!   piecewise-constant velocity profile keyed by time thresholds.
//! - [`RendezvousParams`]: the canonical two-robot scenario, expressed as three
//!   analytic branches (pre-start, pre-meeting, post-meeting). The reversal speed
//!   after the meeting is scenario data and cannot be derived from the approach.

use crate::error::{ensure_finite, ScenarioError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One piece of a velocity profile: `velocity` applies from `threshold` (inclusive)
/// until the next segment's threshold (exclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VelocitySegment {
    pub threshold: f64,
    pub velocity: f64,
}

impl VelocitySegment {
    pub const fn new(threshold: f64, velocity: f64) -> Self {
        Self {
            threshold,
            velocity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Trajectory {
    Constant { velocity: f64 },
    Piecewise { segments: Vec<VelocitySegment> },
}

/// A moving point. Configuration only; its position is a function of time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entity {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<String>,
    pub start: f64,
    pub trajectory: Trajectory,
}

impl Entity {
    pub fn constant(id: &str, label: &str, start: f64, velocity: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            color: None,
            start,
            trajectory: Trajectory::Constant { velocity },
        }
    }

    pub fn piecewise(id: &str, label: &str, start: f64, segments: Vec<VelocitySegment>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            color: None,
            start,
            trajectory: Trajectory::Piecewise { segments },
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        ensure_finite(&format!("{}.start", self.id), self.start)?;
        match &self.trajectory {
            Trajectory::Constant { velocity } => {
                ensure_finite(&format!("{}.velocity", self.id), *velocity)
            }
            Trajectory::Piecewise { segments } => {
                let first = segments.first().ok_or_else(|| ScenarioError::EmptySegments {
                    entity: self.id.clone(),
                })?;
                if first.threshold != 0.0 {
                    return Err(ScenarioError::FirstSegmentNotAtZero {
                        entity: self.id.clone(),
                        threshold: first.threshold,
                    });
                }
                for (i, seg) in segments.iter().enumerate() {
                    ensure_finite(&format!("{}.segments[{i}].threshold", self.id), seg.threshold)?;
                    ensure_finite(&format!("{}.segments[{i}].velocity", self.id), seg.velocity)?;
                }
                for pair in segments.windows(2) {
                    if pair[1].threshold <= pair[0].threshold {
                        return Err(ScenarioError::UnsortedSegments {
                            entity: self.id.clone(),
                            previous: pair[0].threshold,
                            next: pair[1].threshold,
                        });
                    }
                }
                Ok(())
            }
        }
    }

    /// Velocity in effect at time `t` (zero before motion starts).
    pub fn velocity_at(&self, t: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        match &self.trajectory {
            Trajectory::Constant { velocity } => *velocity,
            Trajectory::Piecewise { segments } => segments
                .iter()
                .take_while(|s| s.threshold <= t)
                .last()
                .map(|s| s.velocity)
                .unwrap_or(0.0),
        }
    }
}

/// Position of `entity` at time `t`.
///
/// Negative times clamp to the start position. There is no upper clamp: past the
/// last threshold the final velocity keeps applying.
pub fn position(entity: &Entity, t: f64) -> f64 {
    if t <= 0.0 {
        return entity.start;
    }
    match &entity.trajectory {
        Trajectory::Constant { velocity } => entity.start + velocity * t,
        Trajectory::Piecewise { segments } => {
            let mut pos = entity.start;
            for (i, seg) in segments.iter().enumerate() {
                if t < seg.threshold {
                    break;
                }
                // Half-open: a segment owns [threshold, next_threshold).
                let end = match segments.get(i + 1) {
                    Some(next) if next.threshold <= t => next.threshold,
                    _ => t,
                };
                pos += seg.velocity * (end - seg.threshold);
            }
            pos
        }
    }
}

/// Constants of the canonical two-robot meeting problem.
///
/// M leaves `a` immediately at `m_speed`; N waits `n_delay` at `b` and then heads
/// toward M at `n_speed`. They meet at `meeting_point` at `meeting_time` and then
/// both reverse at `return_speed`, diverging symmetrically.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RendezvousParams {
    pub a: f64,
    pub b: f64,
    pub m_speed: f64,
    pub n_delay: f64,
    pub n_speed: f64,
    pub meeting_time: f64,
    pub meeting_point: f64,
    pub return_speed: f64,
}

impl Default for RendezvousParams {
    fn default() -> Self {
        Self {
            a: -5.0,
            b: 8.0,
            m_speed: 4.0,
            n_delay: 1.0,
            n_speed: 2.0,
            meeting_time: 2.5,
            meeting_point: 5.0,
            return_speed: 2.0,
        }
    }
}

const MEETING_TOLERANCE: f64 = 1e-9;

impl RendezvousParams {
    pub const M_ID: &'static str = "M";
    pub const N_ID: &'static str = "N";

    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (field, v) in [
            ("a", self.a),
            ("b", self.b),
            ("m_speed", self.m_speed),
            ("n_delay", self.n_delay),
            ("n_speed", self.n_speed),
            ("meeting_time", self.meeting_time),
            ("meeting_point", self.meeting_point),
            ("return_speed", self.return_speed),
        ] {
            ensure_finite(field, v)?;
        }
        // Evaluate the approach branches directly at the meeting time.
        let (m, n) = self.approach(self.meeting_time);
        for (entity, actual) in [("M", m), ("N", n)] {
            if (actual - self.meeting_point).abs() > MEETING_TOLERANCE {
                return Err(ScenarioError::InconsistentMeeting {
                    entity,
                    time: self.meeting_time,
                    expected: self.meeting_point,
                    actual,
                });
            }
        }
        Ok(())
    }

    fn approach(&self, t: f64) -> (f64, f64) {
        let m = self.a + self.m_speed * t;
        let n = if t <= self.n_delay {
            self.b
        } else {
            self.b - self.n_speed * (t - self.n_delay)
        };
        (m, n)
    }

    /// Positions `(m, n)` at time `t`.
    pub fn positions(&self, t: f64) -> (f64, f64) {
        if t <= 0.0 {
            (self.a, self.b)
        } else if t <= self.meeting_time {
            self.approach(t)
        } else {
            let dt = t - self.meeting_time;
            (
                self.meeting_point - self.return_speed * dt,
                self.meeting_point + self.return_speed * dt,
            )
        }
    }

    /// Distance between the start points (question 1 of the built-in problem set).
    pub fn initial_gap(&self) -> f64 {
        (self.b - self.a).abs()
    }
}
