//! # numlab
//!
//! Simulation core for interactive number-line math experiments.
//!
//! The crate computes, for a scalar time or position parameter, the state of a
//! small system (moving points, or a movable point scored against anchors), and
//! owns the playback scheduler that advances that parameter in real time.
//! Rendering is left to the host: it only consumes [`metrics::DerivedSnapshot`].
//!
//! ## Quick Start
//!
//! ```
//! use numlab::prelude::*;
//! use std::time::Duration;
//!
//! let mut session = Session::load(SimulationConfig::robot_rendezvous()).unwrap();
//! session.play();
//! session.set_speed(2.5);
//! session.advance(Duration::from_secs(1));
//!
//! let snap = session.snapshot();
//! assert_eq!(snap.phase, Some(Phase::Approaching));
//! assert_eq!(snap.entity("M").unwrap().position, 5.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialization of configs and snapshots, JSON loading
//!
//! ## Modules
//!
//! - [`motion`]: piecewise-linear trajectories and the canonical meeting scenario
//! - [`field`]: absolute-value-sum landscape
//! - [`phase`]: initial / approaching / returning labels
//! - [`scenario`]: tagged scenario configs, validation, built-ins
//! - [`metrics`]: per-frame derived snapshots
//! - [`playback`]: play/pause/seek/speed/reset scheduler
//! - [`session`]: a loaded scenario bound to a scheduler
//! - [`hints`]: graded scaffolding hints

#[path = "core/error.rs"]
pub mod error;

#[path = "core/time.rs"]
pub mod time;

#[path = "core/motion.rs"]
pub mod motion;

#[path = "core/phase.rs"]
pub mod phase;

#[path = "core/field.rs"]
pub mod field;

#[path = "core/scenario.rs"]
pub mod scenario;

#[path = "core/metrics.rs"]
pub mod metrics;

#[path = "core/playback.rs"]
pub mod playback;

#[path = "core/session.rs"]
pub mod session;

#[path = "core/hints.rs"]
pub mod hints;

/// Prelude module for convenient imports.
///
/// ```
/// use numlab::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::ScenarioError;
    pub use crate::field::{distance_to, field_value, Anchor, SampleRange};
    pub use crate::hints::ProblemSet;
    pub use crate::metrics::{snapshot, DerivedSnapshot};
    pub use crate::motion::{position, Entity, RendezvousParams, Trajectory, VelocitySegment};
    pub use crate::phase::Phase;
    pub use crate::playback::{PlaybackStatus, Scheduler, TickOutcome};
    pub use crate::scenario::{builtin_catalog, ScenarioKind, SimulationConfig};
    pub use crate::session::Session;
}
