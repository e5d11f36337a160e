//! Scenario configuration: what is simulated, over which parameter range, and the
//! UI affordances (known solutions, speed limits) that go with it.
//!
//! Configurations are plain data. [`SimulationConfig::validate`] is the single gate
//! that turns "caller contract violation" into a descriptive [`ScenarioError`]; a
//! session never starts on an unvalidated config.

use hashbrown::HashSet;

use crate::error::{ensure_finite, ScenarioError};
use crate::field::{Anchor, SampleRange};
use crate::motion::{Entity, RendezvousParams};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Like `f64::clamp`, but an inverted range yields `max` instead of panicking.
    pub fn clamp(&self, v: f64) -> f64 {
        v.max(self.min).min(self.max)
    }
}

/// Allowed playback multipliers. Requests outside are clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeedLimits {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl Default for SpeedLimits {
    fn default() -> Self {
        // Matches the speed slider: 0.5x to 3x.
        Self {
            min: 0.5,
            max: 3.0,
            default: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ScenarioKind {
    /// Canonical two-robot meeting, evaluated with its analytic branches.
    Rendezvous(RendezvousParams),
    /// Generic piecewise-velocity entities.
    MotionLab { entities: Vec<Entity> },
    /// Movable point scored against fixed anchors; the parameter is a position.
    AbsOptimization {
        anchors: Vec<Anchor>,
        #[cfg_attr(feature = "serde", serde(default))]
        landscape: SampleRange,
    },
}

impl ScenarioKind {
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Rendezvous(_) => "rendezvous",
            ScenarioKind::MotionLab { .. } => "motion_lab",
            ScenarioKind::AbsOptimization { .. } => "abs_optimization",
        }
    }

    /// True when the parameter is a time (as opposed to a position).
    pub fn is_time_based(&self) -> bool {
        !matches!(self, ScenarioKind::AbsOptimization { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub topic: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub kind: ScenarioKind,
    pub range: ParamRange,
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial: f64,
    pub ceiling: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub known_solutions: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: SpeedLimits,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.id.trim().is_empty() {
            return Err(ScenarioError::EmptyId);
        }

        for (field, v) in [
            ("range.min", self.range.min),
            ("range.max", self.range.max),
            ("initial", self.initial),
            ("ceiling", self.ceiling),
        ] {
            ensure_finite(field, v)?;
        }
        if self.range.min >= self.range.max {
            return Err(ScenarioError::EmptyRange {
                min: self.range.min,
                max: self.range.max,
            });
        }
        if !self.range.contains(self.initial) {
            return Err(ScenarioError::InitialOutOfRange {
                initial: self.initial,
                min: self.range.min,
                max: self.range.max,
            });
        }
        if self.ceiling <= self.initial || self.ceiling > self.range.max {
            return Err(ScenarioError::BadCeiling {
                ceiling: self.ceiling,
                initial: self.initial,
                max: self.range.max,
            });
        }
        for &v in &self.known_solutions {
            ensure_finite("known_solutions", v)?;
            if !self.range.contains(v) {
                return Err(ScenarioError::SolutionOutOfRange {
                    value: v,
                    min: self.range.min,
                    max: self.range.max,
                });
            }
        }

        let s = &self.speed;
        let speeds_ok = [s.min, s.max, s.default].iter().all(|v| v.is_finite())
            && s.min > 0.0
            && s.min <= s.default
            && s.default <= s.max;
        if !speeds_ok {
            return Err(ScenarioError::BadSpeedLimits {
                min: s.min,
                default: s.default,
                max: s.max,
            });
        }

        match &self.kind {
            ScenarioKind::Rendezvous(params) => params.validate(),
            ScenarioKind::MotionLab { entities } => {
                if entities.is_empty() {
                    return Err(ScenarioError::NoEntities {
                        scenario: self.id.clone(),
                    });
                }
                self.ensure_unique_ids(entities.iter().map(|e| e.id.as_str()))?;
                entities.iter().try_for_each(Entity::validate)
            }
            ScenarioKind::AbsOptimization { anchors, landscape } => {
                if anchors.is_empty() {
                    return Err(ScenarioError::NoAnchors {
                        scenario: self.id.clone(),
                    });
                }
                self.ensure_unique_ids(anchors.iter().map(|a| a.id.as_str()))?;
                for a in anchors {
                    ensure_finite(&format!("{}.position", a.id), a.position)?;
                }
                landscape.validate()
            }
        }
    }

    fn ensure_unique_ids<'a>(
        &self,
        ids: impl Iterator<Item = &'a str>,
    ) -> Result<(), ScenarioError> {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(ScenarioError::DuplicateId {
                    scenario: self.id.clone(),
                    id: id.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Meeting time used for phase labels, if the scenario has one.
    pub fn meeting_time(&self) -> Option<f64> {
        match &self.kind {
            ScenarioKind::Rendezvous(p) => Some(p.meeting_time),
            ScenarioKind::MotionLab { .. } => self.known_solutions.first().copied(),
            ScenarioKind::AbsOptimization { .. } => None,
        }
    }

    /// Parse and validate a scenario from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        let cfg: Self =
            serde_json::from_str(text).map_err(|e| ScenarioError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Two robots on a number line: M from A = -5, N from B = 8.
    pub fn robot_rendezvous() -> Self {
        let params = RendezvousParams::default();
        Self {
            id: "robot_rendezvous".to_string(),
            title: "Number-line robot rendezvous".to_string(),
            topic: "Meeting problems and distance on a number line".to_string(),
            description: "Robot M leaves A at 4 units/s. Robot N waits one second at B, then \
                          heads left at 2 units/s. After meeting at P both turn back at 2 units/s."
                .to_string(),
            known_solutions: vec![params.meeting_time],
            kind: ScenarioKind::Rendezvous(params),
            range: ParamRange::new(0.0, 10.0),
            initial: 0.0,
            ceiling: 10.0,
            speed: SpeedLimits::default(),
        }
    }

    /// Pursuit/intercept lab: two vessels closing at constant speeds.
    pub fn red_sea_intercept() -> Self {
        Self {
            id: "red_sea_intercept".to_string(),
            title: "Operation Red Sea Intercept".to_string(),
            topic: "Pursuit, meeting and intercept coordinates".to_string(),
            description: "Hunter M spots submarine N. Find the moment T at which both \
                          coordinates coincide."
                .to_string(),
            kind: ScenarioKind::MotionLab {
                entities: vec![
                    Entity::constant("M", "Hunter M", -6.0, 2.5).with_color("#0ea5e9"),
                    Entity::constant("N", "Submarine N", 9.0, -0.5).with_color("#f43f5e"),
                ],
            },
            range: ParamRange::new(0.0, 15.0),
            initial: 0.0,
            ceiling: 15.0,
            known_solutions: vec![5.0],
            speed: SpeedLimits::default(),
        }
    }

    /// Minimize the total distance to three supply anchors.
    pub fn golden_anchor() -> Self {
        Self {
            id: "golden_anchor".to_string(),
            title: "Operation Golden Anchor".to_string(),
            topic: "Minimum of a sum of absolute values".to_string(),
            description: "Three supply ships lie along the lane. Place flagship P so that \
                          the total distance to all of them is as small as possible."
                .to_string(),
            kind: ScenarioKind::AbsOptimization {
                anchors: vec![
                    Anchor::new("A", "Supply A", -8.0),
                    Anchor::new("B", "Supply B", 2.0),
                    Anchor::new("C", "Supply C", 12.0),
                ],
                landscape: SampleRange::default(),
            },
            range: ParamRange::new(-15.0, 20.0),
            initial: 0.0,
            ceiling: 20.0,
            known_solutions: Vec::new(),
            speed: SpeedLimits::default(),
        }
    }
}

/// Built-in scenarios, in menu order.
pub fn builtin_catalog() -> Vec<SimulationConfig> {
    vec![
        SimulationConfig::robot_rendezvous(),
        SimulationConfig::red_sea_intercept(),
        SimulationConfig::golden_anchor(),
    ]
}
