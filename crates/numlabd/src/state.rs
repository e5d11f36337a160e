use numlab::error::ScenarioError;
use numlab::hints::ProblemSet;
use numlab::playback::TickOutcome;
use numlab::scenario::SimulationConfig;
use numlab::session::Session;
use tracing::{info, warn};

use crate::protocol::{Request, Response, ScenarioSummary, StateView};

/// Everything the daemon owns. Lives behind one `RwLock`; the frame loop and
/// every client command take the write half, so transitions never interleave.
#[derive(Debug)]
pub struct DaemonState {
    catalog: Vec<SimulationConfig>,
    problems: ProblemSet,
    session: Session,
    pub target_fps: u32,
    frame: u64,
}

impl DaemonState {
    /// Start on `initial` if it exists in the catalog, else on the first valid entry.
    pub fn new(
        catalog: Vec<SimulationConfig>,
        problems: ProblemSet,
        initial: &str,
        target_fps: u32,
    ) -> Result<Self, ScenarioError> {
        let preferred = catalog.iter().position(|c| c.id == initial).unwrap_or(0);
        let session = catalog
            .get(preferred)
            .into_iter()
            .chain(catalog.iter())
            .find_map(|cfg| Session::load(cfg.clone()).ok());
        let session = match session {
            Some(session) => session,
            None => {
                warn!("No loadable scenario in catalog; falling back to robot_rendezvous");
                Session::load(SimulationConfig::robot_rendezvous())?
            }
        };

        Ok(Self {
            catalog,
            problems,
            session,
            target_fps: target_fps.max(1),
            frame: 0,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// One frame of the playback loop.
    pub fn tick(&mut self) -> TickOutcome {
        self.frame = self.frame.wrapping_add(1);
        let outcome = self.session.tick();
        if outcome == TickOutcome::ReachedCeiling {
            info!(
                scenario = %self.session.config().id,
                value = self.session.value(),
                frame = self.frame(),
                "Playback finished"
            );
        }
        outcome
    }

    fn state_view(&self) -> Response {
        let scheduler = self.session.scheduler();
        Response::State(Box::new(StateView {
            scenario: self.session.config().id.clone(),
            status: scheduler.status(),
            speed: scheduler.speed(),
            target_fps: self.target_fps,
            snapshot: self.session.snapshot(),
        }))
    }

    pub fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::ListScenarios => Response::Scenarios {
                scenarios: self.catalog.iter().map(ScenarioSummary::from).collect(),
            },
            Request::LoadScenario { id } => {
                let Some(cfg) = self.catalog.iter().find(|c| c.id == id) else {
                    return Response::Error {
                        message: format!("Unknown scenario: {id}"),
                    };
                };
                match Session::load(cfg.clone()) {
                    Ok(session) => {
                        self.session = session;
                        self.state_view()
                    }
                    Err(e) => Response::Error {
                        message: e.to_string(),
                    },
                }
            }
            Request::Play => {
                self.session.play();
                self.state_view()
            }
            Request::Pause => {
                self.session.pause();
                self.state_view()
            }
            Request::Reset => {
                self.session.reset();
                self.state_view()
            }
            Request::Seek { value } => {
                self.session.seek(value);
                self.state_view()
            }
            Request::SetSpeed { multiplier } => {
                self.session.set_speed(multiplier);
                self.state_view()
            }
            Request::JumpToSolution { index } => match self.session.jump_to_solution(index) {
                Some(_) => self.state_view(),
                None => Response::Error {
                    message: format!(
                        "Scenario `{}` has no known solution #{index}",
                        self.session.config().id
                    ),
                },
            },
            Request::GetSnapshot => self.state_view(),
            Request::GetLandscape => match self.session.landscape() {
                Some(points) => Response::Landscape {
                    minimum: self.session.landscape_minimum(),
                    points,
                },
                None => Response::Error {
                    message: format!(
                        "Scenario `{}` has no landscape",
                        self.session.config().id
                    ),
                },
            },
            Request::GetHint { question, level } => Response::Hint {
                question,
                level,
                text: self.problems.hint(question, level).map(str::to_string),
            },
            Request::SetFramerate { fps } => {
                self.target_fps = fps.clamp(1, 240);
                Response::Success {
                    message: format!("Framerate set to {}", self.target_fps),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numlab::phase::Phase;
    use numlab::playback::PlaybackStatus;
    use numlab::scenario::builtin_catalog;

    fn daemon() -> DaemonState {
        DaemonState::new(
            builtin_catalog(),
            ProblemSet::robot_rendezvous(),
            "robot_rendezvous",
            60,
        )
        .unwrap()
    }

    fn view(r: Response) -> StateView {
        match r {
            Response::State(v) => *v,
            other => panic!("expected State, got {other:?}"),
        }
    }

    #[test]
    fn seek_then_snapshot_reports_meeting() {
        let mut d = daemon();
        let v = view(d.handle(Request::Seek { value: 2.5 }));
        assert_eq!(v.scenario, "robot_rendezvous");
        assert_eq!(v.snapshot.phase, Some(Phase::Approaching));
        assert_eq!(v.snapshot.entity("M").unwrap().position, 5.0);
    }

    #[test]
    fn play_pause_reset_cycle() {
        let mut d = daemon();
        assert_eq!(view(d.handle(Request::Play)).status, PlaybackStatus::Playing);
        assert_eq!(view(d.handle(Request::Pause)).status, PlaybackStatus::Paused);
        d.handle(Request::Seek { value: 7.0 });
        let v = view(d.handle(Request::Reset));
        assert_eq!(v.status, PlaybackStatus::Stopped);
        assert_eq!(v.snapshot.parameter, 0.0);
        assert_eq!(d.tick(), TickOutcome::Idle);
        assert_eq!(d.frame(), 1);
    }

    #[test]
    fn unknown_scenario_is_an_error_response() {
        let mut d = daemon();
        let r = d.handle(Request::LoadScenario {
            id: "nope".to_string(),
        });
        assert!(matches!(r, Response::Error { .. }));
        assert_eq!(d.session().config().id, "robot_rendezvous");
    }

    #[test]
    fn landscape_only_for_field_scenarios() {
        let mut d = daemon();
        assert!(matches!(
            d.handle(Request::GetLandscape),
            Response::Error { .. }
        ));

        view(d.handle(Request::LoadScenario {
            id: "golden_anchor".to_string(),
        }));
        let Response::Landscape { points, minimum } = d.handle(Request::GetLandscape) else {
            panic!("expected landscape");
        };
        assert_eq!(points.len(), 226);
        let (x, _) = minimum.unwrap();
        assert!((x - 2.0).abs() <= 0.2);
    }

    #[test]
    fn jump_to_solution_and_hints() {
        let mut d = daemon();
        let v = view(d.handle(Request::JumpToSolution { index: 0 }));
        assert_eq!(v.snapshot.parameter, 2.5);
        assert!(matches!(
            d.handle(Request::JumpToSolution { index: 1 }),
            Response::Error { .. }
        ));

        match d.handle(Request::GetHint {
            question: 2,
            level: 3,
        }) {
            Response::Hint { text, .. } => {
                assert_eq!(text.as_deref(), Some("N(2.5) = 5, the same point P."))
            }
            other => panic!("expected hint, got {other:?}"),
        }
    }

    #[test]
    fn unknown_initial_falls_back_to_first_entry() {
        let d = DaemonState::new(builtin_catalog(), ProblemSet::default(), "missing", 0)
            .unwrap();
        assert_eq!(d.session().config().id, "robot_rendezvous");
        assert_eq!(d.target_fps, 1);
    }
}
