//! A loaded scenario bound to its scheduler: the handle a UI drives.

use std::sync::Arc;

use tracing::info;

use crate::error::ScenarioError;
use crate::field::{sample_landscape, sampled_minimum};
use crate::metrics::{snapshot, DerivedSnapshot};
use crate::playback::{PlaybackBounds, PlaybackStatus, Scheduler, TickOutcome};
use crate::scenario::{ScenarioKind, SimulationConfig};
use crate::time::{Duration, Instant};

/// A loaded scenario plus its playback scheduler.
///
/// The configuration is shared read-only (`Arc`) so display widgets can hold it
/// without borrowing the session; the scheduler is the only mutable part.
#[derive(Debug, Clone)]
pub struct Session {
    config: Arc<SimulationConfig>,
    scheduler: Scheduler,
}

impl Session {
    /// Validate `config` and start a stopped session at its initial value.
    pub fn load(config: SimulationConfig) -> Result<Self, ScenarioError> {
        config.validate()?;
        info!(
            scenario = %config.id,
            kind = config.kind.name(),
            "scenario loaded"
        );
        let scheduler = Scheduler::new(PlaybackBounds::from_config(&config));
        Ok(Self {
            config: Arc::new(config),
            scheduler,
        })
    }

    pub fn config(&self) -> &Arc<SimulationConfig> {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn value(&self) -> f64 {
        self.scheduler.value()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.scheduler.status()
    }

    pub fn play(&mut self) {
        self.scheduler.play();
    }

    pub fn play_at(&mut self, now: Instant) {
        self.scheduler.play_at(now);
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn reset(&mut self) {
        self.scheduler.reset();
    }

    pub fn seek(&mut self, value: f64) {
        self.scheduler.seek(value);
    }

    pub fn set_speed(&mut self, multiplier: f64) {
        self.scheduler.set_speed(multiplier);
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.scheduler.tick()
    }

    pub fn tick_at(&mut self, now: Instant) -> TickOutcome {
        self.scheduler.tick_at(now)
    }

    pub fn advance(&mut self, real_elapsed: Duration) -> TickOutcome {
        self.scheduler.advance(real_elapsed)
    }

    /// Seek to the `index`-th known solution and pause there.
    pub fn jump_to_solution(&mut self, index: usize) -> Option<f64> {
        let target = *self.config.known_solutions.get(index)?;
        self.scheduler.pause();
        self.scheduler.seek(target);
        Some(self.scheduler.value())
    }

    pub fn snapshot(&self) -> DerivedSnapshot {
        snapshot(&self.config, self.scheduler.value())
    }

    /// Sampled landscape curve for field scenarios.
    pub fn landscape(&self) -> Option<Vec<(f64, f64)>> {
        match &self.config.kind {
            ScenarioKind::AbsOptimization { anchors, landscape } => {
                Some(sample_landscape(anchors, landscape))
            }
            _ => None,
        }
    }

    /// Lowest point of the sampled landscape, found by evaluation only.
    pub fn landscape_minimum(&self) -> Option<(f64, f64)> {
        sampled_minimum(&self.landscape()?)
    }
}
