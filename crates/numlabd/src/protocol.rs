//! Newline-delimited JSON protocol spoken over TCP.
//!
//! One request per line, one response per line. Both sides are tagged by `type`:
//!   {"type":"Seek","value":2.5}
//!   {"type":"State","scenario":"robot_rendezvous","status":"paused",...}

use numlab::metrics::DerivedSnapshot;
use numlab::playback::PlaybackStatus;
use numlab::scenario::{ParamRange, SimulationConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    ListScenarios,
    LoadScenario {
        id: String,
    },
    Play,
    Pause,
    Reset,
    Seek {
        value: f64,
    },
    SetSpeed {
        multiplier: f64,
    },
    JumpToSolution {
        #[serde(default)]
        index: usize,
    },
    GetSnapshot,
    GetLandscape,
    GetHint {
        question: u32,
        level: u8,
    },
    SetFramerate {
        fps: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub kind: String,
    pub range: ParamRange,
    pub ceiling: f64,
    #[serde(default)]
    pub known_solutions: Vec<f64>,
}

impl From<&SimulationConfig> for ScenarioSummary {
    fn from(cfg: &SimulationConfig) -> Self {
        Self {
            id: cfg.id.clone(),
            title: cfg.title.clone(),
            topic: cfg.topic.clone(),
            kind: cfg.kind.name().to_string(),
            range: cfg.range,
            ceiling: cfg.ceiling,
            known_solutions: cfg.known_solutions.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateView {
    pub scenario: String,
    pub status: PlaybackStatus,
    pub speed: f64,
    pub target_fps: u32,
    pub snapshot: DerivedSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Scenarios {
        scenarios: Vec<ScenarioSummary>,
    },
    State(Box<StateView>),
    Landscape {
        points: Vec<(f64, f64)>,
        #[serde(default)]
        minimum: Option<(f64, f64)>,
    },
    Hint {
        question: u32,
        level: u8,
        #[serde(default)]
        text: Option<String>,
    },
    Success {
        message: String,
    },
    Error {
        message: String,
    },
}
