//! Per-frame projection of `(config, parameter)` into display values.
//!
//! Everything here is a pure function: no caches, no interior state. Several
//! widgets may call [`snapshot`] in the same frame and must see identical results.

use crate::field::{distance_to, field_value, Anchor};
use crate::motion::{position, RendezvousParams};
use crate::phase::Phase;
use crate::scenario::{ScenarioKind, SimulationConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityReading {
    pub id: String,
    pub label: String,
    pub position: f64,
    /// Distance travelled away from the start point, `|position - start|`.
    pub displacement: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PairDistance {
    pub a: String,
    pub b: String,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnchorDistance {
    pub id: String,
    pub label: String,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldReading {
    pub x: f64,
    pub value: f64,
    pub distances: Vec<AnchorDistance>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DerivedSnapshot {
    pub parameter: f64,
    pub phase: Option<Phase>,
    pub entities: Vec<EntityReading>,
    pub pairwise: Vec<PairDistance>,
    /// Sum of every entity's displacement from its start.
    pub displacement_sum: f64,
    pub field: Option<FieldReading>,
}

impl DerivedSnapshot {
    pub fn entity(&self, id: &str) -> Option<&EntityReading> {
        self.entities.iter().find(|e| e.id == id)
    }
}

pub fn snapshot(config: &SimulationConfig, parameter: f64) -> DerivedSnapshot {
    let phase = config
        .meeting_time()
        .map(|meeting| Phase::classify(parameter, meeting));

    let (entities, field) = match &config.kind {
        ScenarioKind::Rendezvous(params) => (rendezvous_readings(params, parameter), None),
        ScenarioKind::MotionLab { entities } => (
            entities
                .iter()
                .map(|e| {
                    let pos = position(e, parameter);
                    EntityReading {
                        id: e.id.clone(),
                        label: e.label.clone(),
                        position: pos,
                        displacement: (pos - e.start).abs(),
                    }
                })
                .collect(),
            None,
        ),
        ScenarioKind::AbsOptimization { anchors, .. } => {
            (Vec::new(), Some(field_reading(anchors, parameter)))
        }
    };

    let pairwise = pairwise_distances(&entities);
    let displacement_sum: f64 = entities.iter().map(|e| e.displacement).sum();

    DerivedSnapshot {
        parameter,
        phase,
        entities,
        pairwise,
        displacement_sum,
        field,
    }
}

fn rendezvous_readings(params: &RendezvousParams, t: f64) -> Vec<EntityReading> {
    let (m, n) = params.positions(t);
    vec![
        EntityReading {
            id: RendezvousParams::M_ID.to_string(),
            label: "Robot M".to_string(),
            position: m,
            displacement: (m - params.a).abs(),
        },
        EntityReading {
            id: RendezvousParams::N_ID.to_string(),
            label: "Robot N".to_string(),
            position: n,
            displacement: (n - params.b).abs(),
        },
    ]
}

fn field_reading(anchors: &[Anchor], x: f64) -> FieldReading {
    FieldReading {
        x,
        value: field_value(x, anchors),
        distances: anchors
            .iter()
            .map(|a| AnchorDistance {
                id: a.id.clone(),
                label: a.label.clone(),
                distance: distance_to(x, a),
            })
            .collect(),
    }
}

fn pairwise_distances(entities: &[EntityReading]) -> Vec<PairDistance> {
    let mut out = Vec::with_capacity(entities.len() * entities.len().saturating_sub(1) / 2);
    for (i, a) in entities.iter().enumerate() {
        for b in &entities[i + 1..] {
            out.push(PairDistance {
                a: a.id.clone(),
                b: b.id.clone(),
                distance: (a.position - b.position).abs(),
            });
        }
    }
    out
}
