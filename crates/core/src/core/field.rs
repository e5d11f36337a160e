//! Absolute-value-sum landscape: `f(x) = Σ |x - a_i|` over fixed anchors.
//!
//! Nothing here knows where the minimum is. Callers that want it sample the curve
//! and take the smallest value, which is how the display finds the "best" spot.

use crate::error::{ensure_finite, ScenarioError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
    pub position: f64,
}

impl Anchor {
    pub fn new(id: &str, label: &str, position: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            position,
        }
    }
}

/// Upper bound on sampling intervals a landscape may request.
pub const MAX_SAMPLES: usize = 100_000;

/// Inclusive sampling grid `start, start + step, …, end`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl SampleRange {
    pub const fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        ensure_finite("landscape.start", self.start)?;
        ensure_finite("landscape.end", self.end)?;
        ensure_finite("landscape.step", self.step)?;
        if self.start >= self.end || self.step <= 0.0 {
            return Err(ScenarioError::BadLandscape {
                start: self.start,
                end: self.end,
                step: self.step,
            });
        }
        let intervals = (self.end - self.start) / self.step;
        if !intervals.is_finite() || intervals > MAX_SAMPLES as f64 {
            return Err(ScenarioError::TooManySamples {
                start: self.start,
                end: self.end,
                step: self.step,
                limit: MAX_SAMPLES,
            });
        }
        Ok(())
    }

    /// Number of grid points, capped at `MAX_SAMPLES + 1` for unvalidated ranges.
    pub fn count(&self) -> usize {
        // Small epsilon so `end` is included despite float drift in the step.
        let intervals = ((self.end - self.start) / self.step + 1e-9).floor();
        if intervals.is_nan() || intervals < 0.0 {
            return 0;
        }
        (intervals.min(MAX_SAMPLES as f64) as usize).saturating_add(1)
    }

    /// Sample points computed by index, not by accumulation.
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count()).map(move |i| self.start + self.step * i as f64)
    }
}

impl Default for SampleRange {
    fn default() -> Self {
        Self::new(-20.0, 25.0, 0.2)
    }
}

#[inline]
pub fn distance_to(x: f64, anchor: &Anchor) -> f64 {
    (x - anchor.position).abs()
}

pub fn field_value(x: f64, anchors: &[Anchor]) -> f64 {
    anchors.iter().map(|a| distance_to(x, a)).sum()
}

/// `(x, f(x))` pairs across `range`, for drawing the landscape curve.
pub fn sample_landscape(anchors: &[Anchor], range: &SampleRange) -> Vec<(f64, f64)> {
    range.points().map(|x| (x, field_value(x, anchors))).collect()
}

/// Central-difference slope of the field at `x`.
pub fn slope_at(x: f64, anchors: &[Anchor], h: f64) -> f64 {
    (field_value(x + h, anchors) - field_value(x - h, anchors)) / (2.0 * h)
}

/// Smallest sampled value; the first sample wins ties.
pub fn sampled_minimum(samples: &[(f64, f64)]) -> Option<(f64, f64)> {
    samples.iter().copied().fold(None, |best, s| match best {
        Some((_, v)) if v <= s.1 => best,
        _ => Some(s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supply_anchors() -> Vec<Anchor> {
        vec![
            Anchor::new("A", "A", -8.0),
            Anchor::new("B", "B", 2.0),
            Anchor::new("C", "C", 12.0),
        ]
    }

    #[test]
    fn sums_absolute_distances() {
        let anchors = supply_anchors();
        assert_eq!(field_value(2.0, &anchors), 20.0);
        assert_eq!(field_value(0.0, &anchors), 8.0 + 2.0 + 12.0);
        assert_eq!(distance_to(-3.5, &anchors[0]), 4.5);
        assert_eq!(field_value(0.0, &[]), 0.0);
    }

    #[test]
    fn slope_changes_only_at_anchors() {
        let anchors = supply_anchors();
        let h = 1e-3;
        // Left of every anchor the slope is -n; each anchor crossed adds +2.
        let expected = [(-15.0, -3.0), (-3.0, -1.0), (7.0, 1.0), (18.0, 3.0)];
        for (x, slope) in expected {
            assert!((slope_at(x, &anchors, h) - slope).abs() < 1e-6, "x={x}");
        }

        // Slope is constant between breakpoints.
        for pair in [(-7.5, -2.5), (2.5, 11.5)] {
            let s0 = slope_at(pair.0, &anchors, h);
            let s1 = slope_at(pair.1, &anchors, h);
            assert!((s0 - s1).abs() < 1e-6);
        }

        // And jumps by 2 across each anchor.
        for a in &anchors {
            let left = slope_at(a.position - 0.5, &anchors, h);
            let right = slope_at(a.position + 0.5, &anchors, h);
            assert!((right - left - 2.0).abs() < 1e-6, "anchor {}", a.id);
        }
    }

    #[test]
    fn sampled_minimum_lands_on_the_median_anchor() {
        let anchors = supply_anchors();
        let range = SampleRange::new(-20.0, 25.0, 0.01);
        let samples = sample_landscape(&anchors, &range);
        let (x, v) = sampled_minimum(&samples).unwrap();
        assert!((x - 2.0).abs() <= 0.01, "x={x}");
        assert!((v - 20.0).abs() <= 0.01 * 3.0);
    }

    #[test]
    fn sample_range_includes_end_point() {
        let r = SampleRange::default();
        assert_eq!(r.count(), 226);
        let last = r.points().last().unwrap();
        assert!((last - 25.0).abs() < 1e-9);
        assert!(SampleRange::new(1.0, 1.0, 0.1).validate().is_err());
        assert!(SampleRange::new(0.0, 1.0, 0.0).validate().is_err());
    }

    #[test]
    fn tiny_steps_are_rejected_and_never_overflow() {
        for step in [1e-300, 1e-9] {
            let r = SampleRange::new(-20.0, 25.0, step);
            assert!(matches!(
                r.validate(),
                Err(ScenarioError::TooManySamples { limit: MAX_SAMPLES, .. })
            ));
            assert_eq!(r.count(), MAX_SAMPLES + 1);
        }
        let huge = SampleRange::new(-1e308, 1e308, 1.0);
        assert!(huge.validate().is_err());

        let at_cap = SampleRange::new(0.0, 50_000.0, 0.5);
        assert!(at_cap.validate().is_ok());
        assert_eq!(at_cap.count(), MAX_SAMPLES + 1);
    }
}
